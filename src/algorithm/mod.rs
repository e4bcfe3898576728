// Núcleo de conciliación: agrupar → resolver asistencia → armar reporte.
// Nada de este módulo hace E/S ni devuelve errores; el peor caso es un
// reporte con columnas sin asignar.
pub mod agrupar;
pub mod asistencia;
pub mod codigo;
pub mod filters;
pub mod franja;
pub mod indice;
pub mod reporte;

pub use agrupar::{agrupar_reuniones, agrupar_reuniones_con_catalogo};
pub use asistencia::{resolver_asistencia, resolver_todas};
pub use codigo::{normalizar_codigo, reconstruir_link};
pub use filters::{apply_all_filters, opciones_carreras, opciones_materias, FiltroReporte};
pub use franja::{parse_franja, FranjaHoraria};
pub use indice::{EstadoHorarios, IndiceHorarios};
pub use reporte::Reporte;

use crate::models::{Asistencia, FilaEvento};
use std::collections::HashSet;
use tracing::info;

/// Parámetros del armado que no dependen de los datos subidos.
#[derive(Debug, Clone, Default)]
pub struct OpcionesReporte<'a> {
    pub base_url: &'a str,
    /// Códigos de reunión conocidos; `None` acepta cualquiera
    pub catalogo: Option<&'a HashSet<String>>,
}

/// Ejecuta la pasada completa sobre un lote de filas del export.
pub fn generar_reporte<I>(filas: I, indice: &IndiceHorarios, opciones: &OpcionesReporte<'_>) -> Reporte
where
    I: IntoIterator<Item = FilaEvento>,
{
    let reuniones = agrupar_reuniones_con_catalogo(filas, opciones.catalogo);
    let total = reuniones.len();
    let resueltas = resolver_todas(reuniones, indice);
    let presentes = resueltas.iter().filter(|r| r.asistencia == Asistencia::Si).count();
    info!(
        "reporte generado: {} reuniones, {} en horario, {} horarios indexados",
        total,
        presentes,
        indice.len()
    );
    Reporte::armar(resueltas, opciones.base_url)
}
