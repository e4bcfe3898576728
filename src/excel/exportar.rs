//! Exportación del reporte a XLSX y CSV con las columnas en orden fijo.

use crate::error::Result;
use crate::models::FilaReporte;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::Path;

pub const NOMBRE_HOJA: &str = "Meet Report";

pub const COLUMNAS_REPORTE: [&str; 13] = [
    "Código materia",
    "Materia",
    "Carrera",
    "Legajo",
    "Apellido",
    "Reunión",
    "Inicio",
    "Fin",
    "Horario esperado",
    "¿Asistió en horario?",
    "Motivo",
    "Duración",
    "Participantes",
];

const ANCHOS: [f64; 13] = [15.0, 25.0, 25.0, 10.0, 18.0, 40.0, 28.0, 28.0, 24.0, 20.0, 45.0, 12.0, 14.0];

/// Celdas de texto de una fila, en el orden de `COLUMNAS_REPORTE`
/// (sin la última, que es numérica).
fn celdas_texto(fila: &FilaReporte) -> [&str; 12] {
    [
        &fila.codigo_materia,
        &fila.materia,
        &fila.carrera,
        &fila.legajo,
        &fila.apellido,
        &fila.link,
        &fila.inicio,
        &fila.fin,
        &fila.horario_esperado,
        fila.asistencia.as_str(),
        &fila.motivo,
        &fila.duracion,
    ]
}

fn armar_libro<'a>(filas: impl IntoIterator<Item = &'a FilaReporte>) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let negrita = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(NOMBRE_HOJA)?;

    for (col, (titulo, ancho)) in COLUMNAS_REPORTE.iter().zip(ANCHOS.iter()).enumerate() {
        sheet.write_string_with_format(0, col as u16, *titulo, &negrita)?;
        sheet.set_column_width(col as u16, *ancho)?;
    }

    for (i, fila) in filas.into_iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, valor) in celdas_texto(fila).iter().enumerate() {
            sheet.write_string(row, col as u16, *valor)?;
        }
        sheet.write_number(row, 12, fila.participantes as f64)?;
    }
    Ok(workbook)
}

pub fn exportar_xlsx_buffer<'a>(filas: impl IntoIterator<Item = &'a FilaReporte>) -> Result<Vec<u8>> {
    let mut workbook = armar_libro(filas)?;
    Ok(workbook.save_to_buffer()?)
}

pub fn exportar_xlsx<'a, P: AsRef<Path>>(filas: impl IntoIterator<Item = &'a FilaReporte>, path: P) -> Result<()> {
    let mut workbook = armar_libro(filas)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

pub fn exportar_csv<'a, W: Write>(filas: impl IntoIterator<Item = &'a FilaReporte>, destino: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(destino);
    writer.write_record(COLUMNAS_REPORTE)?;
    for fila in filas {
        let participantes = fila.participantes.to_string();
        let mut registro: Vec<&str> = celdas_texto(fila).to_vec();
        registro.push(&participantes);
        writer.write_record(&registro)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn exportar_csv_buffer<'a>(filas: impl IntoIterator<Item = &'a FilaReporte>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    exportar_csv(filas, &mut buf)?;
    Ok(buf)
}
