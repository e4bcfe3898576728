use asistencia_meet::algorithm::asistencia::{resolver_asistencia, MOTIVO_LLEGADA_ANTICIPADA, MOTIVO_SIN_CANDIDATOS};
use asistencia_meet::algorithm::{EstadoHorarios, IndiceHorarios};
use asistencia_meet::models::{Asistencia, DiaSemana, HorarioDocente, Reunion};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

fn lunes(h: u32, m: u32) -> NaiveDateTime {
    // 2025-05-12 es lunes
    NaiveDate::from_ymd_opt(2025, 5, 12).unwrap().and_hms_opt(h, m, 0).unwrap()
}

fn reunion(codigo: &str, inicio: NaiveDateTime) -> Reunion {
    Reunion {
        id_conferencia: "conf-1".to_string(),
        codigo: codigo.to_string(),
        inicio,
        fin: inicio + chrono::Duration::minutes(45),
        participantes: BTreeSet::from(["Ana".to_string()]),
    }
}

fn horario(legajo: &str, lugar: &str, dia: DiaSemana, franja: &str) -> HorarioDocente {
    let mut h = HorarioDocente {
        codigo_materia: format!("MAT-{}", legajo),
        materia: "Álgebra".to_string(),
        carrera: "Sistemas".to_string(),
        legajo: legajo.to_string(),
        apellido: "Pérez".to_string(),
        lugar_v: lugar.to_string(),
        ..Default::default()
    };
    h.set_franja(dia, franja);
    h
}

fn indice_abc123() -> IndiceHorarios {
    IndiceHorarios::new(vec![horario("100", "abc123", DiaSemana::Lunes, "14:00 a 15:30")])
}

#[test]
fn test_en_horario() {
    // 14:30 = minuto 870
    let r = resolver_asistencia(reunion("abc123", lunes(14, 30)), &indice_abc123());
    assert_eq!(r.asistencia, Asistencia::Si);
    assert_eq!(r.motivo, "");
    assert_eq!(r.horario_esperado, "Lunes 14:00 a 15:30");
    assert_eq!(r.docente.unwrap().legajo, "100");
}

#[test]
fn test_llegada_anticipada() {
    // 13:50 = minuto 830, dentro de los 30 minutos previos a las 14:00
    let r = resolver_asistencia(reunion("abc123", lunes(13, 50)), &indice_abc123());
    assert_eq!(r.asistencia, Asistencia::Si);
    assert_eq!(r.motivo, MOTIVO_LLEGADA_ANTICIPADA);
    assert!(r.motivo.starts_with("early arrival"));
    assert!(r.docente.is_some());
}

#[test]
fn test_fuera_de_ventana() {
    // 13:20 = minuto 800
    let r = resolver_asistencia(reunion("abc123", lunes(13, 20)), &indice_abc123());
    assert_eq!(r.asistencia, Asistencia::No);
    assert_eq!(r.motivo, "no matching time window among 1 candidate(s)");
    assert!(r.docente.is_none());
    assert_eq!(r.horario_esperado, "");
}

#[test]
fn test_limites_inclusivos() {
    let indice = indice_abc123();
    assert_eq!(resolver_asistencia(reunion("abc123", lunes(14, 0)), &indice).asistencia, Asistencia::Si);
    assert_eq!(resolver_asistencia(reunion("abc123", lunes(15, 30)), &indice).asistencia, Asistencia::Si);
    assert_eq!(resolver_asistencia(reunion("abc123", lunes(15, 31)), &indice).asistencia, Asistencia::No);
    let justo = resolver_asistencia(reunion("abc123", lunes(13, 30)), &indice);
    assert_eq!(justo.motivo, MOTIVO_LLEGADA_ANTICIPADA);
    assert_eq!(resolver_asistencia(reunion("abc123", lunes(13, 29)), &indice).asistencia, Asistencia::No);
}

#[test]
fn test_otro_dia_no_coincide() {
    // martes 13/05 a la misma hora: la franja del lunes no aplica
    let martes = NaiveDate::from_ymd_opt(2025, 5, 13).unwrap().and_hms_opt(14, 30, 0).unwrap();
    let r = resolver_asistencia(reunion("abc123", martes), &indice_abc123());
    assert_eq!(r.asistencia, Asistencia::No);
}

#[test]
fn test_sin_candidatos() {
    let r = resolver_asistencia(reunion("zzz999", lunes(14, 30)), &indice_abc123());
    assert_eq!(r.asistencia, Asistencia::No);
    assert_eq!(r.motivo, MOTIVO_SIN_CANDIDATOS);
    assert!(r.docente.is_none());
}

#[test]
fn test_horarios_no_cargados_resuelven_sin_candidatos() {
    let indice = EstadoHorarios::Pendiente.indice();
    let r = resolver_asistencia(reunion("abc123", lunes(14, 30)), &indice);
    assert_eq!(r.motivo, MOTIVO_SIN_CANDIDATOS);
}

#[test]
fn test_turno_rotativo_primer_candidato_en_orden() {
    let indice = IndiceHorarios::new(vec![
        horario("100", "https://meet.google.com/abc-defg-hij", DiaSemana::Lunes, "9:00 a 10:00"),
        horario("200", "abc-defg-hij", DiaSemana::Lunes, "14:00 a 16:00"),
        horario("300", "ABCDEFGHIJ", DiaSemana::Lunes, "14:00 a 15:00"),
    ]);
    let r = resolver_asistencia(reunion("abcdefghij", lunes(14, 30)), &indice);
    assert_eq!(r.docente.as_ref().unwrap().legajo, "200");
    assert_eq!(r.horario_esperado, "Lunes 14:00 a 16:00");

    // misma entrada, mismo resultado
    let otra = resolver_asistencia(reunion("abcdefghij", lunes(14, 30)), &indice);
    assert_eq!(r, otra);
}

#[test]
fn test_cuenta_de_candidatos_en_motivo() {
    let indice = IndiceHorarios::new(vec![
        horario("100", "abc", DiaSemana::Lunes, "9:00 a 10:00"),
        horario("200", "abc", DiaSemana::Lunes, ""),
    ]);
    let r = resolver_asistencia(reunion("abc", lunes(18, 0)), &indice);
    assert_eq!(r.motivo, "no matching time window among 2 candidate(s)");
}
