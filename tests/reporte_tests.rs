use asistencia_meet::algorithm::codigo::normalizar_codigo;
use asistencia_meet::algorithm::{apply_all_filters, opciones_carreras, opciones_materias, FiltroReporte};
use asistencia_meet::excel::horarios::horarios_desde_tabla;
use asistencia_meet::excel::{exportar_xlsx, leer_eventos_csv, Tabla, COLUMNAS_REPORTE};
use asistencia_meet::models::{Asistencia, SIN_ASIGNAR};
use asistencia_meet::{generar_reporte, IndiceHorarios, OpcionesReporte};
use chrono::FixedOffset;
use std::collections::HashSet;

const HORARIOS: &str = "cod_mat,materia,carrera,leg,apellido,lugar_v,domingo,lunes,martes,miércoles,jueves,viernes,sábado\n\
    MAT2,Física,Civil,200,Gómez,https://meet.google.com/xyz-abcd-efg,,,9:00 a 10:00,,,,\n\
    MAT1,Álgebra,Sistemas,100,Pérez,https://meet.google.com/abc-defg-hij,,10:00 a 11:30,,,,,\n";

const EVENTOS: &str = "ID de conferencia,Código de reunión,Hora de inicio,Duración (segundos),Nombre del actor\n\
    conf-a,abc-defg-hij,2025-05-12 10:00:00,1800,Ana\n\
    conf-a,abc-defg-hij,2025-05-12 10:20:00,2700,Beto\n\
    conf-a,abc-defg-hij,2025-05-12 10:25:00,60,Ana\n\
    conf-b,xyz-abcd-efg,2025-05-13 08:45:00,3600,Caro\n\
    conf-c,qqq-qqqq-qqq,2025-05-13 08:00:00,600,Dani\n\
    conf-d,abc-defg-hij,2025-05-05 10:15:00,,Ana\n\
    ,abc-defg-hij,2025-05-12 10:00:00,60,Sin conferencia\n";

fn local() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

fn indice() -> IndiceHorarios {
    let tabla = Tabla::desde_csv(HORARIOS.as_bytes()).unwrap();
    IndiceHorarios::new(horarios_desde_tabla(&tabla).unwrap())
}

fn opciones() -> OpcionesReporte<'static> {
    OpcionesReporte { base_url: "https://meet.google.com/", catalogo: None }
}

#[test]
fn test_pipeline_completo() {
    let filas = leer_eventos_csv(EVENTOS.as_bytes(), &local()).unwrap();
    let reporte = generar_reporte(filas, &indice(), &opciones());

    // conf-a, conf-b, conf-c, conf-d (la fila sin conferencia se descarta)
    assert_eq!(reporte.len(), 4);

    let claves: Vec<(&str, &str)> = reporte.filas.iter().map(|f| (f.codigo_materia.as_str(), f.inicio.as_str())).collect();
    assert_eq!(
        claves,
        vec![
            (SIN_ASIGNAR, "Martes 13/05/2025 08:00:00"),
            ("MAT1", "Lunes 05/05/2025 10:15:00"),
            ("MAT1", "Lunes 12/05/2025 10:00:00"),
            ("MAT2", "Martes 13/05/2025 08:45:00"),
        ]
    );

    let a = &reporte.filas[2];
    assert_eq!(a.fin, "Lunes 12/05/2025 11:05:00");
    assert_eq!(a.duracion, "1h 5m");
    assert_eq!(a.participantes, 2);
    assert_eq!(a.asistencia, Asistencia::Si);
    assert_eq!(a.link, "https://meet.google.com/abc-defg-hij");
    assert_eq!(a.horario_esperado, "Lunes 10:00 a 11:30");
    assert_eq!(a.apellido, "Pérez");

    let b = &reporte.filas[3];
    assert_eq!(b.asistencia, Asistencia::Si);
    assert!(b.motivo.starts_with("early arrival"));

    let c = &reporte.filas[0];
    assert_eq!(c.asistencia, Asistencia::No);
    assert_eq!(c.motivo, "no schedule candidates");
    assert_eq!(c.carrera, SIN_ASIGNAR);

    let d = &reporte.filas[1];
    assert_eq!(d.duracion, "0h 0m");
}

#[test]
fn test_sin_filas_reporte_vacio() {
    let filas = leer_eventos_csv(
        "ID de conferencia,Código de reunión,Hora de inicio,Duración (segundos),Nombre del actor\n".as_bytes(),
        &local(),
    )
    .unwrap();
    assert!(filas.is_empty());
    let reporte = generar_reporte(filas, &indice(), &opciones());
    assert!(reporte.is_empty());
}

#[test]
fn test_sin_horarios_todo_sin_asignar() {
    let filas = leer_eventos_csv(EVENTOS.as_bytes(), &local()).unwrap();
    let reporte = generar_reporte(filas, &IndiceHorarios::vacio(), &opciones());
    assert_eq!(reporte.len(), 4);
    assert!(reporte.filas.iter().all(|f| f.asistencia == Asistencia::No && f.motivo == "no schedule candidates"));
}

#[test]
fn test_catalogo_descarta_codigos_desconocidos() {
    let catalogo: HashSet<String> = ["abcdefghij".to_string()].into_iter().collect();
    let filas = leer_eventos_csv(EVENTOS.as_bytes(), &local()).unwrap();
    let opciones = OpcionesReporte { base_url: "https://meet.google.com/", catalogo: Some(&catalogo) };
    let reporte = generar_reporte(filas, &indice(), &opciones);
    assert_eq!(reporte.len(), 2);
    assert!(reporte.filas.iter().all(|f| f.codigo_materia == "MAT1"));
}

#[test]
fn test_normalizacion_url_y_codigo_coinciden() {
    for (url, codigo) in [
        ("https://meet.google.com/abc-defg-hij", "abc-defg-hij"),
        ("https://meet.google.com/ABC-DEFG-HIJ", "abcdefghij"),
        ("meet.google.com/xyz-abcd-efg", "XYZ-ABCD-EFG"),
    ] {
        assert_eq!(normalizar_codigo(url), normalizar_codigo(codigo));
    }
}

#[test]
fn test_filtros_sobre_reporte() {
    let filas = leer_eventos_csv(EVENTOS.as_bytes(), &local()).unwrap();
    let reporte = generar_reporte(filas, &indice(), &opciones());

    assert_eq!(opciones_carreras(&reporte.filas), vec!["Civil", "Sistemas"]);
    assert_eq!(opciones_materias(&reporte.filas, Some("Civil")), vec!["Física"]);

    let filtro = FiltroReporte::new(Some("Sistemas".into()), None);
    assert_eq!(apply_all_filters(&reporte.filas, &filtro).len(), 2);
    let ambos = FiltroReporte::new(Some("Sistemas".into()), Some("Física".into()));
    assert!(apply_all_filters(&reporte.filas, &ambos).is_empty());
}

#[test]
fn test_exportar_xlsx_y_releer() {
    let filas = leer_eventos_csv(EVENTOS.as_bytes(), &local()).unwrap();
    let reporte = generar_reporte(filas, &indice(), &opciones());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meet_report.xlsx");
    exportar_xlsx(&reporte.filas, &path).unwrap();

    let tabla = Tabla::desde_planilla(&path).unwrap();
    assert_eq!(tabla.encabezados, COLUMNAS_REPORTE.to_vec());
    assert_eq!(tabla.filas.len(), reporte.len());
    assert_eq!(tabla.filas[2][0], "MAT1");
    assert_eq!(tabla.filas[2][12], "2");
}
