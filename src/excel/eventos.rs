//! Lectura del export de eventos de Meet (una fila por segmento de
//! participante).

use crate::error::Result;
use crate::excel::io::{celda, Tabla};
use crate::models::FilaEvento;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::io::Read;
use tracing::{debug, info};

pub const COL_ID_CONFERENCIA: &str = "ID de conferencia";
pub const COL_CODIGO_REUNION: &str = "Código de reunión";
pub const COL_HORA_INICIO: &str = "Hora de inicio";
pub const COL_DURACION: &str = "Duración (segundos)";
pub const COL_PARTICIPANTE: &str = "Nombre del actor";

const FORMATOS_LOCALES: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y, %H:%M:%S",
];

/// Interpreta la hora de inicio. Si trae zona horaria se lleva a `local`;
/// si no, se asume que ya está en hora local.
pub fn parse_instante(texto: &str, local: &FixedOffset) -> Option<NaiveDateTime> {
    let texto = texto.trim();
    if texto.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(texto) {
        return Some(dt.with_timezone(local).naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %z"] {
        if let Ok(dt) = DateTime::parse_from_str(texto, fmt) {
            return Some(dt.with_timezone(local).naive_local());
        }
    }
    FORMATOS_LOCALES
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(texto, fmt).ok())
}

/// Segundos de duración; lo ausente, negativo o no numérico vale 0.
/// Los decimales se truncan.
pub fn parse_duracion(texto: &str) -> i64 {
    let texto = texto.trim();
    let segundos = texto
        .parse::<i64>()
        .ok()
        .or_else(|| texto.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        .unwrap_or(0);
    segundos.max(0)
}

fn no_vacio(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Convierte una tabla ya leída en filas de evento. Falla sólo si faltan
/// las columnas obligatorias; las celdas vacías o inválidas se dejan como
/// `None` y la agrupación descarta esas filas.
pub fn filas_desde_tabla(tabla: &Tabla, local: &FixedOffset) -> Result<Vec<FilaEvento>> {
    let id = tabla.columna_requerida(&[COL_ID_CONFERENCIA])?;
    let codigo = tabla.columna_requerida(&[COL_CODIGO_REUNION])?;
    let inicio = tabla.columna_requerida(&[COL_HORA_INICIO])?;
    let duracion = tabla.columna(&[COL_DURACION, "Duración"]);
    let participante = tabla.columna(&[COL_PARTICIPANTE, "Participante"]);

    let filas: Vec<FilaEvento> = tabla
        .filas
        .iter()
        .map(|fila| {
            let texto_inicio = celda(fila, Some(inicio));
            let instante = parse_instante(texto_inicio, local);
            if instante.is_none() && !texto_inicio.is_empty() {
                debug!("hora de inicio no interpretable: '{}'", texto_inicio);
            }
            FilaEvento {
                id_conferencia: no_vacio(celda(fila, Some(id))),
                codigo_reunion: no_vacio(celda(fila, Some(codigo))),
                participante: celda(fila, participante).to_string(),
                inicio: instante,
                duracion_segundos: parse_duracion(celda(fila, duracion)),
            }
        })
        .collect();
    info!("export de eventos leído: {} filas", filas.len());
    Ok(filas)
}

/// Lee el export en CSV desde cualquier lector (archivo o cuerpo de la subida).
pub fn leer_eventos_csv<R: Read>(lector: R, local: &FixedOffset) -> Result<Vec<FilaEvento>> {
    let tabla = Tabla::desde_csv(lector)?;
    filas_desde_tabla(&tabla, local)
}
