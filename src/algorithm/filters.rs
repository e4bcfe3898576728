//! Filtros del reporte por carrera y por materia.
//!
//! Ambos filtros son independientes y opcionales; si se usan juntos, una
//! fila debe cumplir los dos. Las listas de opciones se derivan de las
//! filas presentes en el reporte.

use crate::models::{FilaReporte, SIN_ASIGNAR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltroReporte {
    #[serde(default)]
    pub carrera: Option<String>,
    #[serde(default)]
    pub materia: Option<String>,
}

impl FiltroReporte {
    pub fn new(carrera: Option<String>, materia: Option<String>) -> Self {
        let limpiar = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        FiltroReporte { carrera: limpiar(carrera), materia: limpiar(materia) }
    }

    pub fn sin_filtro(&self) -> bool {
        self.carrera.is_none() && self.materia.is_none()
    }

    pub fn acepta(&self, fila: &FilaReporte) -> bool {
        filtro_carrera(fila, self.carrera.as_deref()) && filtro_materia(fila, self.materia.as_deref())
    }
}

fn filtro_carrera(fila: &FilaReporte, carrera: Option<&str>) -> bool {
    carrera.is_none_or(|c| fila.carrera == c)
}

fn filtro_materia(fila: &FilaReporte, materia: Option<&str>) -> bool {
    materia.is_none_or(|m| fila.materia == m)
}

/// Devuelve sólo las filas que pasan todos los filtros, en el mismo orden.
pub fn apply_all_filters<'a>(filas: &'a [FilaReporte], filtro: &FiltroReporte) -> Vec<&'a FilaReporte> {
    if filtro.sin_filtro() {
        return filas.iter().collect();
    }
    filas.iter().filter(|f| filtro.acepta(f)).collect()
}

fn valores_distintos<'a>(valores: impl Iterator<Item = &'a String>) -> Vec<String> {
    valores
        .filter(|v| !v.is_empty() && v.as_str() != SIN_ASIGNAR)
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Carreras presentes, sin repetir y ordenadas
pub fn opciones_carreras(filas: &[FilaReporte]) -> Vec<String> {
    valores_distintos(filas.iter().map(|f| &f.carrera))
}

/// Materias presentes; si hay carrera seleccionada, sólo las de esa carrera
pub fn opciones_materias(filas: &[FilaReporte], carrera: Option<&str>) -> Vec<String> {
    valores_distintos(filas.iter().filter(|f| filtro_carrera(f, carrera)).map(|f| &f.materia))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asistencia;

    fn fila(carrera: &str, materia: &str) -> FilaReporte {
        FilaReporte {
            codigo_materia: "X".to_string(),
            materia: materia.to_string(),
            carrera: carrera.to_string(),
            legajo: String::new(),
            apellido: String::new(),
            link: String::new(),
            inicio: String::new(),
            fin: String::new(),
            horario_esperado: String::new(),
            asistencia: Asistencia::No,
            motivo: String::new(),
            duracion: String::new(),
            participantes: 0,
        }
    }

    fn muestra() -> Vec<FilaReporte> {
        vec![
            fila("Sistemas", "Álgebra"),
            fila("Civil", "Estática"),
            fila("Sistemas", "Programación"),
            fila(SIN_ASIGNAR, SIN_ASIGNAR),
            fila("Civil", "Álgebra"),
        ]
    }

    #[test]
    fn test_sin_filtro_devuelve_todo() {
        let filas = muestra();
        assert!(FiltroReporte::default().sin_filtro());
        assert_eq!(apply_all_filters(&filas, &FiltroReporte::default()).len(), 5);
    }

    #[test]
    fn test_filtros_combinados() {
        let filas = muestra();
        let f = FiltroReporte::new(Some("Civil".into()), Some("Álgebra".into()));
        let res = apply_all_filters(&filas, &f);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].carrera, "Civil");

        let solo_materia = FiltroReporte::new(None, Some("Álgebra".into()));
        assert_eq!(apply_all_filters(&filas, &solo_materia).len(), 2);
    }

    #[test]
    fn test_valores_en_blanco_no_filtran() {
        let f = FiltroReporte::new(Some("  ".into()), Some(String::new()));
        assert!(f.sin_filtro());
    }

    #[test]
    fn test_opciones() {
        let filas = muestra();
        assert_eq!(opciones_carreras(&filas), vec!["Civil", "Sistemas"]);
        assert_eq!(opciones_materias(&filas, None), vec!["Estática", "Programación", "Álgebra"]);
        assert_eq!(opciones_materias(&filas, Some("Sistemas")), vec!["Programación", "Álgebra"]);
    }
}
