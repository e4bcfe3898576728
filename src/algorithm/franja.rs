//! Parser de franjas horarias de la planilla de horarios.
//! Formato: "H:MM a H:MM" (24 hs, sin cero inicial obligatorio).

/// Separador literal entre inicio y fin
pub const SEPARADOR: &str = " a ";

/// Rango en minutos desde medianoche, ambos extremos en 0..=1439.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FranjaHoraria {
    pub inicio: i32,
    pub fin: i32,
}

impl FranjaHoraria {
    /// Pertenencia con ambos extremos incluidos.
    pub fn contiene(&self, minuto: i32) -> bool {
        minuto >= self.inicio && minuto <= self.fin
    }

    /// `[inicio - ventana, inicio)`
    pub fn en_ventana_previa(&self, minuto: i32, ventana: i32) -> bool {
        minuto >= self.inicio - ventana && minuto < self.inicio
    }
}

/// Convierte "HH:MM" a minutos desde medianoche
pub fn hora_a_minutos(hora: &str) -> Option<i32> {
    let (hh, mm) = hora.trim().split_once(':')?;
    let hh = hh.trim();
    let mm = mm.trim();
    if hh.is_empty() || mm.is_empty() {
        return None;
    }
    if !hh.chars().all(|c| c.is_ascii_digit()) || !mm.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let h = hh.parse::<i32>().ok()?;
    let m = mm.parse::<i32>().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Devuelve `None` si falta el separador o alguno de los lados no es una hora
/// válida. Las celdas vacías son el caso normal, no un error.
pub fn parse_franja(texto: &str) -> Option<FranjaHoraria> {
    let (ini, fin) = texto.split_once(SEPARADOR)?;
    Some(FranjaHoraria {
        inicio: hora_a_minutos(ini)?,
        fin: hora_a_minutos(fin)?,
    })
}
