//! Verificación de asistencia: cruza cada reunión con los horarios de
//! consulta que comparten su código de reunión.
//!
//! Política de coincidencia, evaluada candidato por candidato en el orden
//! de la planilla; el primer candidato que cumple alguna regla gana:
//!
//! 1. `EnHorario`: el minuto de inicio cae en `[inicio, fin]`.
//! 2. `LlegadaAnticipada`: el minuto de inicio cae en `[inicio - 30, inicio)`.
//!
//! Si ningún candidato cumple, la reunión queda con asistencia "No".

use crate::algorithm::franja::{parse_franja, FranjaHoraria};
use crate::algorithm::indice::IndiceHorarios;
use crate::models::{Asistencia, DiaSemana, HorarioDocente, Reunion, ReunionResuelta};
use chrono::Timelike;
use tracing::debug;

/// Minutos de tolerancia antes del inicio de la franja
pub const VENTANA_ANTICIPADA_MIN: i32 = 30;

pub const MOTIVO_SIN_CANDIDATOS: &str = "no schedule candidates";
pub const MOTIVO_LLEGADA_ANTICIPADA: &str = "early arrival, matched within 30-minute pre-window";

pub fn motivo_sin_franja(candidatos: usize) -> String {
    format!("no matching time window among {} candidate(s)", candidatos)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReglaCoincidencia {
    EnHorario,
    LlegadaAnticipada,
}

/// Reglas en orden de precedencia
pub const REGLAS: [ReglaCoincidencia; 2] = [ReglaCoincidencia::EnHorario, ReglaCoincidencia::LlegadaAnticipada];

impl ReglaCoincidencia {
    pub fn cumple(self, franja: &FranjaHoraria, minuto: i32) -> bool {
        match self {
            ReglaCoincidencia::EnHorario => franja.contiene(minuto),
            ReglaCoincidencia::LlegadaAnticipada => franja.en_ventana_previa(minuto, VENTANA_ANTICIPADA_MIN),
        }
    }

    pub fn motivo(self) -> &'static str {
        match self {
            ReglaCoincidencia::EnHorario => "",
            ReglaCoincidencia::LlegadaAnticipada => MOTIVO_LLEGADA_ANTICIPADA,
        }
    }
}

/// Coincidencia encontrada para una reunión
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coincidencia<'a> {
    pub candidato: &'a HorarioDocente,
    pub regla: ReglaCoincidencia,
}

/// Recorre los candidatos en orden y devuelve el primero que cumple alguna
/// regla. Sólo se mira la franja del día de la reunión; las franjas vacías o
/// malformadas se saltean.
pub fn buscar_coincidencia<'a>(candidatos: &'a [HorarioDocente], dia: DiaSemana, minuto: i32) -> Option<Coincidencia<'a>> {
    let mut ultima_franja: Option<&str> = None;
    for candidato in candidatos {
        let texto = candidato.franja(dia);
        let Some(franja) = parse_franja(texto) else { continue };
        if let Some(regla) = REGLAS.iter().copied().find(|r| r.cumple(&franja, minuto)) {
            return Some(Coincidencia { candidato, regla });
        }
        ultima_franja = Some(texto);
    }
    if let Some(texto) = ultima_franja {
        debug!("sin coincidencia el {} a los {} min; última franja vista: {}", dia, minuto, texto);
    }
    None
}

/// Minuto del día (0..=1439) del inicio de la reunión
pub fn minuto_del_dia(reunion: &Reunion) -> i32 {
    (reunion.inicio.hour() * 60 + reunion.inicio.minute()) as i32
}

/// Resuelve la asistencia de una reunión contra el índice de horarios.
pub fn resolver_asistencia(reunion: Reunion, indice: &IndiceHorarios) -> ReunionResuelta {
    let candidatos = indice.candidatos(&reunion.codigo);
    if candidatos.is_empty() {
        return ReunionResuelta {
            reunion,
            docente: None,
            asistencia: Asistencia::No,
            motivo: MOTIVO_SIN_CANDIDATOS.to_string(),
            horario_esperado: String::new(),
        };
    }

    let dia = DiaSemana::de_fecha(&reunion.inicio);
    let minuto = minuto_del_dia(&reunion);

    match buscar_coincidencia(candidatos, dia, minuto) {
        Some(Coincidencia { candidato, regla }) => ReunionResuelta {
            docente: Some(candidato.docente()),
            asistencia: Asistencia::Si,
            motivo: regla.motivo().to_string(),
            horario_esperado: format!("{} {}", dia.nombre(), candidato.franja(dia)),
            reunion,
        },
        None => ReunionResuelta {
            motivo: motivo_sin_franja(candidatos.len()),
            reunion,
            docente: None,
            asistencia: Asistencia::No,
            horario_esperado: String::new(),
        },
    }
}

pub fn resolver_todas(reuniones: Vec<Reunion>, indice: &IndiceHorarios) -> Vec<ReunionResuelta> {
    reuniones.into_iter().map(|r| resolver_asistencia(r, indice)).collect()
}
