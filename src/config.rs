//! Configuración del servicio.
//!
//! Se lee desde variables de entorno (cargando `.env` si existe). Los flags
//! de la CLI en `main` pueden sobreescribir cualquier valor.

use crate::error::{AsistenciaError, Result};
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_HORARIOS_PATH: &str = "datafiles/horarios.csv";
pub const DEFAULT_MEET_BASE_URL: &str = "https://meet.google.com/";
/// Argentina (UTC-3)
pub const DEFAULT_UTC_OFFSET_MINUTOS: i32 = -180;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub horarios_path: PathBuf,
    pub materias_path: Option<PathBuf>,
    pub meet_base_url: String,
    pub utc_offset_minutos: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            horarios_path: PathBuf::from(DEFAULT_HORARIOS_PATH),
            materias_path: None,
            meet_base_url: DEFAULT_MEET_BASE_URL.to_string(),
            utc_offset_minutos: DEFAULT_UTC_OFFSET_MINUTOS,
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn var_no_vacia(nombre: &str) -> Option<String> {
    env::var(nombre).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    /// Construye la configuración a partir del entorno.
    pub fn from_env() -> Result<Config> {
        load_dotenv();
        let mut cfg = Config::default();

        if let Some(b) = var_no_vacia("ASISTENCIA_BIND") {
            cfg.bind = b;
        }
        if let Some(p) = var_no_vacia("ASISTENCIA_HORARIOS_PATH") {
            cfg.horarios_path = PathBuf::from(p);
        }
        cfg.materias_path = var_no_vacia("ASISTENCIA_MATERIAS_PATH").map(PathBuf::from);
        if let Some(u) = var_no_vacia("ASISTENCIA_MEET_BASE_URL") {
            cfg.meet_base_url = u;
        }
        if let Some(o) = var_no_vacia("ASISTENCIA_UTC_OFFSET_MINUTOS") {
            cfg.utc_offset_minutos = o.parse::<i32>().map_err(|_| {
                AsistenciaError::Config(format!("ASISTENCIA_UTC_OFFSET_MINUTOS no es un entero: '{}'", o))
            })?;
        }

        cfg.validar()?;
        Ok(cfg)
    }

    pub fn validar(&self) -> Result<()> {
        if self.bind.trim().is_empty() {
            return Err(AsistenciaError::Config("bind vacío".to_string()));
        }
        self.offset_local()?;
        Ok(())
    }

    /// Offset usado para llevar instantes con zona explícita a hora local.
    pub fn offset_local(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutos * 60).ok_or_else(|| {
            AsistenciaError::Config(format!("offset fuera de rango: {} minutos", self.utc_offset_minutos))
        })
    }

    /// Base del link de la reunión, siempre terminada en '/'.
    pub fn base_url(&self) -> String {
        if self.meet_base_url.ends_with('/') {
            self.meet_base_url.clone()
        } else {
            format!("{}/", self.meet_base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_por_defecto() {
        let cfg = Config::default();
        assert_eq!(cfg.offset_local().unwrap().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_offset_fuera_de_rango() {
        let cfg = Config { utc_offset_minutos: 24 * 60, ..Config::default() };
        assert!(matches!(cfg.validar(), Err(AsistenciaError::Config(_))));
    }

    #[test]
    fn test_base_url_agrega_barra() {
        let cfg = Config { meet_base_url: "https://meet.example.org".to_string(), ..Config::default() };
        assert_eq!(cfg.base_url(), "https://meet.example.org/");
    }
}
