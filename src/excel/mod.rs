//! Módulo `excel`: lectura y escritura de tablas.
//!
//! Submódulos:
//! - `io`: lectura genérica de CSV y planillas, helpers de encabezados
//! - `eventos`: export de eventos de Meet
//! - `horarios`: planilla de horarios de consulta y catálogo de materias
//! - `exportar`: reporte a XLSX / CSV

pub mod io;
pub mod eventos;
pub mod horarios;
pub mod exportar;

pub use io::{normalize_header, Tabla};
pub use eventos::{leer_eventos_csv, parse_instante};
pub use horarios::{cargar_estado_horarios, leer_catalogo_materias, leer_horarios};
pub use exportar::{exportar_csv, exportar_csv_buffer, exportar_xlsx, exportar_xlsx_buffer, COLUMNAS_REPORTE};
