//! Armado del reporte: formato de fechas y duración, link reconstruido y
//! orden final (código de materia y luego inicio).

use crate::algorithm::codigo::reconstruir_link;
use crate::models::{DiaSemana, FilaReporte, ReunionResuelta, SIN_ASIGNAR};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// "<Día> DD/MM/YYYY HH:MM:SS"
pub fn formatear_fecha_hora(fecha: &NaiveDateTime) -> String {
    format!("{} {}", DiaSemana::de_fecha(fecha).nombre(), fecha.format("%d/%m/%Y %H:%M:%S"))
}

/// "<H>h <M>m", truncando a minutos completos
pub fn formatear_duracion(duracion: Duration) -> String {
    let minutos = duracion.num_minutes().max(0);
    format!("{}h {}m", minutos / 60, minutos % 60)
}

/// Orden estable: código de materia ascendente y, a igual código, inicio
/// cronológico.
pub fn ordenar_reuniones(reuniones: &mut [ReunionResuelta]) {
    reuniones.sort_by(|a, b| {
        a.codigo_materia()
            .cmp(b.codigo_materia())
            .then_with(|| a.reunion.inicio.cmp(&b.reunion.inicio))
    });
}

pub fn fila_reporte(r: &ReunionResuelta, base_url: &str) -> FilaReporte {
    let docente = r.docente.as_ref();
    let campo = |valor: Option<&String>| valor.cloned().unwrap_or_else(|| SIN_ASIGNAR.to_string());
    FilaReporte {
        codigo_materia: campo(docente.map(|d| &d.codigo_materia)),
        materia: campo(docente.map(|d| &d.materia)),
        carrera: campo(docente.map(|d| &d.carrera)),
        legajo: campo(docente.map(|d| &d.legajo)),
        apellido: campo(docente.map(|d| &d.apellido)),
        link: reconstruir_link(&r.reunion.codigo, base_url),
        inicio: formatear_fecha_hora(&r.reunion.inicio),
        fin: formatear_fecha_hora(&r.reunion.fin),
        horario_esperado: r.horario_esperado.clone(),
        asistencia: r.asistencia,
        motivo: r.motivo.clone(),
        duracion: formatear_duracion(r.reunion.duracion()),
        participantes: r.reunion.cantidad_participantes(),
    }
}

/// Reporte listo para mostrar o exportar. Las filas ya están ordenadas.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reporte {
    pub filas: Vec<FilaReporte>,
}

impl Reporte {
    pub fn armar(mut reuniones: Vec<ReunionResuelta>, base_url: &str) -> Reporte {
        ordenar_reuniones(&mut reuniones);
        Reporte { filas: reuniones.iter().map(|r| fila_reporte(r, base_url)).collect() }
    }

    pub fn len(&self) -> usize {
        self.filas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filas.is_empty()
    }
}
