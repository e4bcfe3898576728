// Estructuras de datos principales

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Valor usado en las columnas de docente/materia cuando no hubo coincidencia.
pub const SIN_ASIGNAR: &str = "-";

/// Una fila del export de eventos de Meet: un segmento de un participante.
/// Los campos opcionales ausentes excluyen la fila de la agrupación.
#[derive(Debug, Clone, Default)]
pub struct FilaEvento {
    pub id_conferencia: Option<String>,
    pub codigo_reunion: Option<String>,
    pub participante: String,
    /// Inicio en hora local
    pub inicio: Option<NaiveDateTime>,
    pub duracion_segundos: i64,
}

/// Días de la semana, con el domingo como índice 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiaSemana {
    Domingo = 0,
    Lunes = 1,
    Martes = 2,
    Miercoles = 3,
    Jueves = 4,
    Viernes = 5,
    Sabado = 6,
}

impl DiaSemana {
    pub const TODOS: [DiaSemana; 7] = [
        DiaSemana::Domingo,
        DiaSemana::Lunes,
        DiaSemana::Martes,
        DiaSemana::Miercoles,
        DiaSemana::Jueves,
        DiaSemana::Viernes,
        DiaSemana::Sabado,
    ];

    pub fn indice(self) -> usize {
        self as usize
    }

    pub fn de_fecha(fecha: &NaiveDateTime) -> DiaSemana {
        DiaSemana::from(fecha.weekday())
    }

    /// Nombre con mayúscula inicial, como se muestra en el reporte.
    pub fn nombre(self) -> &'static str {
        match self {
            DiaSemana::Domingo => "Domingo",
            DiaSemana::Lunes => "Lunes",
            DiaSemana::Martes => "Martes",
            DiaSemana::Miercoles => "Miércoles",
            DiaSemana::Jueves => "Jueves",
            DiaSemana::Viernes => "Viernes",
            DiaSemana::Sabado => "Sábado",
        }
    }

    /// Nombre de la columna en la planilla de horarios.
    pub fn columna(self) -> &'static str {
        match self {
            DiaSemana::Domingo => "domingo",
            DiaSemana::Lunes => "lunes",
            DiaSemana::Martes => "martes",
            DiaSemana::Miercoles => "miércoles",
            DiaSemana::Jueves => "jueves",
            DiaSemana::Viernes => "viernes",
            DiaSemana::Sabado => "sábado",
        }
    }
}

impl From<Weekday> for DiaSemana {
    fn from(w: Weekday) -> Self {
        // num_days_from_sunday() siempre está en 0..=6
        DiaSemana::TODOS[w.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DiaSemana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nombre())
    }
}

/// Una fila de la planilla de horarios de consulta.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HorarioDocente {
    pub codigo_materia: String,
    pub materia: String,
    pub carrera: String,
    pub legajo: String,
    pub apellido: String,
    /// Lugar virtual (link o código de Meet) tal como viene en la planilla
    pub lugar_v: String,
    /// Texto libre "H:MM a H:MM" por día, indexado por `DiaSemana`
    pub dias: [String; 7],
}

impl HorarioDocente {
    pub fn franja(&self, dia: DiaSemana) -> &str {
        &self.dias[dia.indice()]
    }

    pub fn set_franja(&mut self, dia: DiaSemana, texto: &str) {
        self.dias[dia.indice()] = texto.trim().to_string();
    }

    pub fn docente(&self) -> DocenteAsignado {
        DocenteAsignado {
            codigo_materia: self.codigo_materia.clone(),
            materia: self.materia.clone(),
            carrera: self.carrera.clone(),
            legajo: self.legajo.clone(),
            apellido: self.apellido.clone(),
        }
    }
}

/// Una ocurrencia de reunión: todas las filas con el mismo ID de conferencia.
#[derive(Debug, Clone, PartialEq)]
pub struct Reunion {
    pub id_conferencia: String,
    /// Código normalizado (minúsculas, sólo alfanuméricos)
    pub codigo: String,
    pub inicio: NaiveDateTime,
    pub fin: NaiveDateTime,
    pub participantes: BTreeSet<String>,
}

impl Reunion {
    pub fn duracion(&self) -> Duration {
        self.fin - self.inicio
    }

    pub fn cantidad_participantes(&self) -> usize {
        self.participantes.len()
    }
}

/// Datos del docente/materia tomados del horario que coincidió.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocenteAsignado {
    pub codigo_materia: String,
    pub materia: String,
    pub carrera: String,
    pub legajo: String,
    pub apellido: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Asistencia {
    #[serde(rename = "Sí")]
    Si,
    No,
}

impl Asistencia {
    pub fn as_str(self) -> &'static str {
        match self {
            Asistencia::Si => "Sí",
            Asistencia::No => "No",
        }
    }
}

impl fmt::Display for Asistencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultado de cruzar una `Reunion` con los horarios.
#[derive(Debug, Clone, PartialEq)]
pub struct ReunionResuelta {
    pub reunion: Reunion,
    /// `None` cuando no hubo candidato que cumpla alguna regla
    pub docente: Option<DocenteAsignado>,
    pub asistencia: Asistencia,
    /// Vacío cuando la reunión cayó dentro del horario
    pub motivo: String,
    /// "<Día> <franja>", vacío si no hubo coincidencia
    pub horario_esperado: String,
}

impl ReunionResuelta {
    pub fn codigo_materia(&self) -> &str {
        self.docente.as_ref().map(|d| d.codigo_materia.as_str()).unwrap_or(SIN_ASIGNAR)
    }
}

/// Fila final del reporte, en el orden de columnas de la exportación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaReporte {
    pub codigo_materia: String,
    pub materia: String,
    pub carrera: String,
    pub legajo: String,
    pub apellido: String,
    pub link: String,
    pub inicio: String,
    pub fin: String,
    pub horario_esperado: String,
    pub asistencia: Asistencia,
    pub motivo: String,
    pub duracion: String,
    pub participantes: usize,
}
