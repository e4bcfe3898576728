use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use futures_util::stream::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::algorithm::{
    apply_all_filters, generar_reporte, opciones_carreras, opciones_materias, EstadoHorarios, FiltroReporte,
    OpcionesReporte, Reporte,
};
use crate::config::Config;
use crate::error::Result;
use crate::excel::{cargar_estado_horarios, exportar_csv_buffer, exportar_xlsx_buffer, leer_catalogo_materias, leer_eventos_csv};

/// Estado compartido del servidor. Cada subida reemplaza el reporte anterior.
pub struct EstadoApp {
    pub config: Config,
    pub horarios: RwLock<EstadoHorarios>,
    pub catalogo: RwLock<Option<Arc<HashSet<String>>>>,
    pub reporte: RwLock<Reporte>,
}

impl EstadoApp {
    pub fn new(config: Config) -> Self {
        EstadoApp {
            config,
            horarios: RwLock::new(EstadoHorarios::Pendiente),
            catalogo: RwLock::new(None),
            reporte: RwLock::new(Reporte::default()),
        }
    }

    pub fn set_horarios(&self, estado: EstadoHorarios) {
        *self.horarios.write().unwrap_or_else(|e| e.into_inner()) = estado;
    }

    pub fn set_catalogo(&self, catalogo: Option<HashSet<String>>) {
        *self.catalogo.write().unwrap_or_else(|e| e.into_inner()) = catalogo.map(Arc::new);
    }

    fn estado_horarios(&self) -> EstadoHorarios {
        self.horarios.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn reporte_actual(&self) -> Reporte {
        self.reporte.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Pasada completa sobre un CSV subido. Si los horarios todavía no
    /// están cargados se resuelve contra un índice vacío.
    pub fn procesar_csv(&self, bytes: &[u8]) -> Result<Reporte> {
        let filas = leer_eventos_csv(bytes, &self.config.offset_local()?)?;
        let indice = self.estado_horarios().indice();
        let catalogo = self.catalogo.read().unwrap_or_else(|e| e.into_inner()).clone();
        let base_url = self.config.base_url();
        let opciones = OpcionesReporte { base_url: &base_url, catalogo: catalogo.as_deref() };
        let reporte = generar_reporte(filas, &indice, &opciones);
        *self.reporte.write().unwrap_or_else(|e| e.into_inner()) = reporte.clone();
        Ok(reporte)
    }
}

/// Carga horarios y catálogo una sola vez, fuera del hilo del servidor.
pub fn cargar_datos_referencia(estado: web::Data<EstadoApp>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let horarios = cargar_estado_horarios(&estado.config.horarios_path);
        estado.set_horarios(horarios);

        if let Some(path) = estado.config.materias_path.clone() {
            match leer_catalogo_materias(&path) {
                Ok(cat) => estado.set_catalogo(Some(cat)),
                Err(e) => warn!("catálogo de materias no disponible ({}): {}", path.display(), e),
            }
        }
    })
}

#[derive(Deserialize)]
struct ExportQuery {
    formato: Option<String>,
    carrera: Option<String>,
    materia: Option<String>,
}

fn filtro_de(q: web::Query<FiltroReporte>) -> FiltroReporte {
    let q = q.into_inner();
    FiltroReporte::new(q.carrera, q.materia)
}

fn respuesta_reporte(resultado: Result<Reporte>) -> HttpResponse {
    match resultado {
        Ok(reporte) => HttpResponse::Ok().json(json!({"status": "ok", "total": reporte.len(), "filas": reporte.filas})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": format!("failed to process upload: {}", e)})),
    }
}

/// POST /reporte
/// Recibe el export de Meet como multipart (primer archivo del formulario).
async fn subir_reporte_handler(estado: web::Data<EstadoApp>, mut payload: Multipart) -> impl Responder {
    let mut contenido: Vec<u8> = Vec::new();
    let mut recibido = false;
    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("multipart field error: {}", e)})),
        };
        if recibido {
            continue;
        }
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => contenido.extend_from_slice(&bytes),
                Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("upload stream error: {}", e)})),
            }
        }
        recibido = true;
    }
    if !recibido {
        return HttpResponse::BadRequest().json(json!({"error": "no file in upload"}));
    }
    respuesta_reporte(estado.procesar_csv(&contenido))
}

/// POST /reporte/csv
/// Igual que `/reporte` pero con el CSV directo en el cuerpo.
async fn subir_reporte_csv_handler(estado: web::Data<EstadoApp>, body: web::Bytes) -> impl Responder {
    respuesta_reporte(estado.procesar_csv(&body))
}

/// GET /reporte?carrera=...&materia=...
async fn ver_reporte_handler(estado: web::Data<EstadoApp>, query: web::Query<FiltroReporte>) -> impl Responder {
    let filtro = filtro_de(query);
    let reporte = estado.reporte_actual();
    let filas = apply_all_filters(&reporte.filas, &filtro);
    HttpResponse::Ok().json(json!({
        "total": reporte.len(),
        "filtradas": filas.len(),
        "filtro": filtro,
        "carreras": opciones_carreras(&reporte.filas),
        "materias": opciones_materias(&reporte.filas, filtro.carrera.as_deref()),
        "filas": filas,
    }))
}

/// GET /reporte/opciones?carrera=...
async fn opciones_handler(estado: web::Data<EstadoApp>, query: web::Query<FiltroReporte>) -> impl Responder {
    let filtro = filtro_de(query);
    let reporte = estado.reporte_actual();
    HttpResponse::Ok().json(json!({
        "carreras": opciones_carreras(&reporte.filas),
        "materias": opciones_materias(&reporte.filas, filtro.carrera.as_deref()),
    }))
}

/// GET /reporte/export?formato=xlsx|csv
async fn exportar_handler(estado: web::Data<EstadoApp>, query: web::Query<ExportQuery>) -> impl Responder {
    let q = query.into_inner();
    let filtro = FiltroReporte::new(q.carrera, q.materia);
    let reporte = estado.reporte_actual();
    let filas = apply_all_filters(&reporte.filas, &filtro);

    let formato = q.formato.unwrap_or_else(|| "xlsx".to_string()).to_lowercase();
    let (resultado, mime, nombre) = match formato.as_str() {
        "xlsx" => (
            exportar_xlsx_buffer(filas.iter().copied()),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "meet_report.xlsx",
        ),
        "csv" => (exportar_csv_buffer(filas.iter().copied()), "text/csv; charset=utf-8", "meet_report.csv"),
        otro => return HttpResponse::BadRequest().json(json!({"error": format!("unknown format '{}'", otro)})),
    };

    match resultado {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(mime)
            .append_header((actix_web::http::header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", nombre)))
            .body(bytes),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("failed to export: {}", e)})),
    }
}

/// GET /horarios/estado
async fn estado_horarios_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let horarios = estado.estado_horarios();
    let error = match &horarios {
        EstadoHorarios::Fallido(e) => Some(e.clone()),
        _ => None,
    };
    HttpResponse::Ok().json(json!({
        "estado": horarios.etiqueta(),
        "entradas": horarios.indice().len(),
        "error": error,
    }))
}

async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "description": "Verificación de asistencia docente a partir del export de reuniones de Meet.",
        "endpoints": {
            "POST /reporte": "multipart con el CSV exportado de Meet; genera y reemplaza el reporte",
            "POST /reporte/csv": "mismo proceso con el CSV en el cuerpo",
            "GET /reporte": "reporte actual; acepta ?carrera= y ?materia=",
            "GET /reporte/opciones": "carreras y materias disponibles; acepta ?carrera=",
            "GET /reporte/export": "descarga; ?formato=xlsx|csv más los mismos filtros",
            "GET /horarios/estado": "estado de la carga de horarios"
        },
        "columnas_export": crate::excel::COLUMNAS_REPORTE,
    }))
}

/// Rutas de la API, separadas para poder montarlas en tests.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/reporte", web::post().to(subir_reporte_handler))
        .route("/reporte", web::get().to(ver_reporte_handler))
        .route("/reporte/csv", web::post().to(subir_reporte_csv_handler))
        .route("/reporte/opciones", web::get().to(opciones_handler))
        .route("/reporte/export", web::get().to(exportar_handler))
        .route("/horarios/estado", web::get().to(estado_horarios_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let estado = web::Data::new(EstadoApp::new(config));
    // La carga corre en segundo plano; las subidas no esperan por ella
    let _carga = cargar_datos_referencia(estado.clone());

    info!("Iniciando servidor en http://{}", bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .bind(bind)?
    .run()
    .await
}
