// Biblioteca raíz del crate `asistencia_meet`.
// Cruza el export de eventos de Meet con la planilla de horarios de consulta
// y arma el reporte de asistencia docente.
pub mod algorithm;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod server;

pub use algorithm::{generar_reporte, IndiceHorarios, OpcionesReporte, Reporte};
pub use config::Config;
pub use error::{AsistenciaError, Result};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
