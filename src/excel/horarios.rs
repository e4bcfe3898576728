//! Carga de la planilla de horarios de consulta (CSV o XLSX).

use crate::algorithm::codigo::normalizar_codigo;
use crate::algorithm::indice::{EstadoHorarios, IndiceHorarios};
use crate::error::Result;
use crate::excel::io::{celda, Tabla};
use crate::models::{DiaSemana, HorarioDocente};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

const COL_CODIGO_MATERIA: [&str; 3] = ["cod_mat", "Código de materia", "codigo_materia"];
const COL_MATERIA: [&str; 2] = ["materia", "nombre_materia"];
const COL_CARRERA: [&str; 2] = ["carrera", "nombre_carrera"];
const COL_LEGAJO: [&str; 2] = ["leg", "legajo"];
const COL_APELLIDO: [&str; 2] = ["apellido", "docente"];
const COL_LUGAR: [&str; 3] = ["lugar_v", "lugar virtual", "Código de reunión"];

/// Arma los horarios a partir de una tabla. Sólo `lugar_v` es obligatorio;
/// los días ausentes quedan vacíos.
pub fn horarios_desde_tabla(tabla: &Tabla) -> Result<Vec<HorarioDocente>> {
    let lugar = tabla.columna_requerida(&COL_LUGAR)?;
    let codigo_materia = tabla.columna(&COL_CODIGO_MATERIA);
    let materia = tabla.columna(&COL_MATERIA);
    let carrera = tabla.columna(&COL_CARRERA);
    let legajo = tabla.columna(&COL_LEGAJO);
    let apellido = tabla.columna(&COL_APELLIDO);
    // normalize_header quita los acentos, así que "miercoles" también sirve
    let dias: Vec<Option<usize>> = DiaSemana::TODOS.iter().map(|d| tabla.columna(&[d.columna()])).collect();

    let horarios = tabla
        .filas
        .iter()
        .map(|fila| {
            let mut h = HorarioDocente {
                codigo_materia: celda(fila, codigo_materia).to_string(),
                materia: celda(fila, materia).to_string(),
                carrera: celda(fila, carrera).to_string(),
                legajo: celda(fila, legajo).to_string(),
                apellido: celda(fila, apellido).to_string(),
                lugar_v: celda(fila, Some(lugar)).to_string(),
                ..Default::default()
            };
            for (dia, idx) in DiaSemana::TODOS.iter().zip(dias.iter()) {
                h.set_franja(*dia, celda(fila, *idx));
            }
            h
        })
        .collect();
    Ok(horarios)
}

pub fn leer_horarios<P: AsRef<Path>>(path: P) -> Result<Vec<HorarioDocente>> {
    let tabla = Tabla::desde_archivo(path)?;
    horarios_desde_tabla(&tabla)
}

/// Carga la planilla y arma el índice. Un error de lectura no es fatal:
/// queda registrado en el estado y las reuniones se resuelven sin candidatos.
pub fn cargar_estado_horarios<P: AsRef<Path>>(path: P) -> EstadoHorarios {
    let path = path.as_ref();
    match leer_horarios(path) {
        Ok(horarios) => {
            let indice = IndiceHorarios::new(horarios);
            info!(
                "horarios cargados desde {}: {} entradas, {} códigos de reunión",
                path.display(),
                indice.len(),
                indice.codigos()
            );
            EstadoHorarios::Listo(Arc::new(indice))
        }
        Err(e) => {
            warn!("no se pudieron cargar los horarios desde {}: {}", path.display(), e);
            EstadoHorarios::Fallido(e.to_string())
        }
    }
}

/// Catálogo opcional de materias: conjunto de códigos de reunión conocidos.
pub fn catalogo_desde_tabla(tabla: &Tabla) -> Result<HashSet<String>> {
    let codigo = tabla.columna_requerida(&["Código de reunión"])?;
    Ok(tabla
        .filas
        .iter()
        .filter_map(|fila| normalizar_codigo(celda(fila, Some(codigo))))
        .collect())
}

pub fn leer_catalogo_materias<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let catalogo = catalogo_desde_tabla(&Tabla::desde_archivo(path)?)?;
    info!("catálogo de materias cargado desde {}: {} códigos", path.display(), catalogo.len());
    Ok(catalogo)
}
