//! Errores del crate.
//!
//! Sólo la capa de E/S (lectura de archivos, decodificación de subidas,
//! escritura de exportaciones) puede fallar. El núcleo en `algorithm` no
//! devuelve errores: cualquier entrada produce un reporte completo.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AsistenciaError>;

#[derive(Error, Debug)]
pub enum AsistenciaError {
    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("error leyendo CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("error leyendo planilla: {0}")]
    Excel(#[from] calamine::Error),

    #[error("error escribiendo XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Archivo con estructura inesperada (encabezado faltante, extensión desconocida)
    #[error("formato inválido: {0}")]
    Formato(String),

    #[error("configuración inválida: {0}")]
    Config(String),
}
