//! Índice de horarios por código de reunión normalizado.
//!
//! Varios docentes pueden compartir el mismo lugar virtual (por ejemplo un
//! turno rotativo), así que cada código guarda todos sus candidatos en el
//! orden en que aparecen en la planilla. Ese orden decide el desempate.

use crate::algorithm::codigo::normalizar_codigo;
use crate::models::HorarioDocente;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Clone)]
pub struct IndiceHorarios {
    por_codigo: HashMap<String, Vec<HorarioDocente>>,
    total: usize,
}

impl IndiceHorarios {
    pub fn new(horarios: Vec<HorarioDocente>) -> Self {
        let mut indice = IndiceHorarios::default();
        for h in horarios {
            match normalizar_codigo(&h.lugar_v) {
                Some(codigo) => {
                    indice.por_codigo.entry(codigo).or_default().push(h);
                    indice.total += 1;
                }
                None => warn!(
                    "horario sin lugar virtual utilizable (legajo '{}', materia '{}'), se ignora",
                    h.legajo, h.codigo_materia
                ),
            }
        }
        indice
    }

    /// Índice vacío: todas las reuniones quedan sin candidatos.
    pub fn vacio() -> Self {
        IndiceHorarios::default()
    }

    /// Candidatos para un código ya normalizado, en orden de planilla.
    pub fn candidatos(&self, codigo: &str) -> &[HorarioDocente] {
        self.por_codigo.get(codigo).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cantidad de horarios indexados
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn codigos(&self) -> usize {
        self.por_codigo.len()
    }
}

/// Estado de la carga de horarios, que ocurre una sola vez al iniciar.
#[derive(Debug, Clone)]
pub enum EstadoHorarios {
    Pendiente,
    Listo(Arc<IndiceHorarios>),
    Fallido(String),
}

impl EstadoHorarios {
    /// Índice a usar para resolver. Mientras no haya horarios cargados se
    /// devuelve un índice vacío en lugar de bloquear.
    pub fn indice(&self) -> Arc<IndiceHorarios> {
        match self {
            EstadoHorarios::Listo(indice) => Arc::clone(indice),
            EstadoHorarios::Pendiente | EstadoHorarios::Fallido(_) => Arc::new(IndiceHorarios::vacio()),
        }
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoHorarios::Pendiente => "pendiente",
            EstadoHorarios::Listo(_) => "listo",
            EstadoHorarios::Fallido(_) => "fallido",
        }
    }
}
