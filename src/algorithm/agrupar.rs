//! Agrupación de filas de eventos en reuniones.
//!
//! Cada `id_conferencia` produce una `Reunion` con el inicio mínimo, el fin
//! máximo (inicio + duración de cada fila) y el conjunto de participantes
//! distintos. El orden de las filas no altera el resultado.

use crate::algorithm::codigo::normalizar_codigo;
use crate::models::{FilaEvento, Reunion};
use chrono::{NaiveDateTime, TimeDelta};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Fila ya validada: tiene id, código normalizado e inicio.
struct FilaValida {
    id_conferencia: String,
    codigo: String,
    participante: String,
    inicio: NaiveDateTime,
    fin: NaiveDateTime,
}

fn validar(fila: FilaEvento) -> Option<FilaValida> {
    let id_conferencia = fila.id_conferencia.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
    let codigo = fila.codigo_reunion.as_deref().and_then(normalizar_codigo)?;
    let inicio = fila.inicio?;
    // Una duración fuera del rango de chrono cuenta como 0
    let fin = TimeDelta::try_seconds(fila.duracion_segundos.max(0))
        .and_then(|d| inicio.checked_add_signed(d))
        .unwrap_or(inicio);
    Some(FilaValida { id_conferencia, codigo, participante: fila.participante, inicio, fin })
}

/// El código de la reunión es el de la fila con menor inicio; a igual
/// inicio, el menor código.
fn combinar(reunion: &mut Reunion, fila: FilaValida) {
    if (fila.inicio, &fila.codigo) < (reunion.inicio, &reunion.codigo) {
        reunion.inicio = fila.inicio;
        reunion.codigo = fila.codigo;
    }
    if fila.fin > reunion.fin {
        reunion.fin = fila.fin;
    }
    reunion.participantes.insert(fila.participante);
}

/// Agrupa las filas por ID de conferencia. Las filas sin ID, sin código o
/// sin inicio se descartan sin error.
pub fn agrupar_reuniones<I>(filas: I) -> Vec<Reunion>
where
    I: IntoIterator<Item = FilaEvento>,
{
    agrupar_reuniones_con_catalogo(filas, None)
}

/// Igual que `agrupar_reuniones`, pero si se entrega un catálogo de códigos
/// conocidos también descarta las filas cuyo código no figure en él.
pub fn agrupar_reuniones_con_catalogo<I>(filas: I, catalogo: Option<&HashSet<String>>) -> Vec<Reunion>
where
    I: IntoIterator<Item = FilaEvento>,
{
    let mut descartadas = 0usize;
    let grupos = filas
        .into_iter()
        .filter_map(|fila| {
            let valida = validar(fila)
                .filter(|f| catalogo.is_none_or(|codigos| codigos.contains(&f.codigo)));
            if valida.is_none() {
                descartadas += 1;
            }
            valida
        })
        .fold(HashMap::<String, Reunion>::new(), |mut grupos, fila| {
            match grupos.get_mut(&fila.id_conferencia) {
                Some(reunion) => combinar(reunion, fila),
                None => {
                    let reunion = Reunion {
                        id_conferencia: fila.id_conferencia.clone(),
                        codigo: fila.codigo,
                        inicio: fila.inicio,
                        fin: fila.fin,
                        participantes: BTreeSet::from([fila.participante]),
                    };
                    grupos.insert(fila.id_conferencia, reunion);
                }
            }
            grupos
        });

    if descartadas > 0 {
        debug!("{} filas descartadas por datos incompletos o código fuera de catálogo", descartadas);
    }
    grupos.into_values().collect()
}
