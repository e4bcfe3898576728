// --- Verificación de Asistencia Docente - Archivo principal ---

use asistencia_meet::excel::{cargar_estado_horarios, exportar_csv, exportar_xlsx, leer_catalogo_materias, leer_eventos_csv};
use asistencia_meet::{generar_reporte, run_server, AsistenciaError, Config, OpcionesReporte};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "asistencia-meet")]
#[command(about = "Verificación de asistencia docente a partir de reportes de Meet")]
#[command(version)]
struct Args {
    /// Planilla de horarios (CSV o XLSX)
    #[arg(long, env = "ASISTENCIA_HORARIOS_PATH")]
    horarios: Option<PathBuf>,

    /// Catálogo opcional de materias por código de reunión
    #[arg(long, env = "ASISTENCIA_MATERIAS_PATH")]
    materias: Option<PathBuf>,

    #[command(subcommand)]
    comando: Option<Comando>,
}

#[derive(Subcommand, Debug)]
enum Comando {
    /// Levanta la API HTTP (por defecto)
    Serve {
        #[arg(long, env = "ASISTENCIA_BIND")]
        bind: Option<String>,
    },
    /// Procesa un export de Meet y escribe el reporte
    Reporte {
        /// CSV exportado de Meet
        eventos: PathBuf,
        /// Archivo de salida (.xlsx o .csv); sin él se imprime un resumen
        #[arg(short, long)]
        salida: Option<PathBuf>,
    },
}

fn ejecutar_reporte(config: &Config, eventos: PathBuf, salida: Option<PathBuf>) -> asistencia_meet::Result<()> {
    let filas = leer_eventos_csv(File::open(&eventos)?, &config.offset_local()?)?;
    // Si los horarios no cargan, el reporte sale igual con todo sin asignar
    let indice = cargar_estado_horarios(&config.horarios_path).indice();
    let catalogo = match &config.materias_path {
        Some(p) => match leer_catalogo_materias(p) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("catálogo de materias no disponible: {}", e);
                None
            }
        },
        None => None,
    };
    let base_url = config.base_url();
    let opciones = OpcionesReporte { base_url: &base_url, catalogo: catalogo.as_ref() };
    let reporte = generar_reporte(filas, &indice, &opciones);

    match salida {
        Some(path) => {
            let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase());
            match ext.as_deref() {
                Some("xlsx") => exportar_xlsx(&reporte.filas, &path)?,
                Some("csv") => exportar_csv(&reporte.filas, File::create(&path)?)?,
                _ => {
                    return Err(AsistenciaError::Formato(format!(
                        "extensión de salida no soportada: {}",
                        path.display()
                    )))
                }
            }
            info!("reporte escrito en {} ({} filas)", path.display(), reporte.len());
        }
        None => {
            for fila in &reporte.filas {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    fila.codigo_materia, fila.legajo, fila.inicio, fila.duracion, fila.asistencia, fila.motivo
                );
            }
            println!("{} reuniones", reporte.len());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asistencia_meet=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(h) = args.horarios {
        config.horarios_path = h;
    }
    if args.materias.is_some() {
        config.materias_path = args.materias;
    }

    match args.comando {
        Some(Comando::Reporte { eventos, salida }) => {
            ejecutar_reporte(&config, eventos, salida)?;
        }
        Some(Comando::Serve { bind }) => {
            if let Some(b) = bind {
                config.bind = b;
            }
            println!("=== Verificación de Asistencia Docente (API) ===");
            run_server(config).await?;
        }
        None => {
            println!("=== Verificación de Asistencia Docente (API) ===");
            run_server(config).await?;
        }
    }
    Ok(())
}
