use crate::error::{AsistenciaError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;

/// Convierte un `Data` de calamine a String
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn sin_acento(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' => 'a',
        'é' | 'è' | 'ë' => 'e',
        'í' | 'ì' | 'ï' => 'i',
        'ó' | 'ò' | 'ö' => 'o',
        'ú' | 'ù' | 'ü' => 'u',
        other => other,
    }
}

/// Normaliza encabezados: minúsculas, sin espacios, sin acentos ni BOM.
pub fn normalize_header(s: &str) -> String {
    s.trim_start_matches('\u{feff}')
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(sin_acento)
        .collect()
}

/// Tabla con encabezado, leída de CSV o de una planilla.
#[derive(Debug, Clone, Default)]
pub struct Tabla {
    pub encabezados: Vec<String>,
    pub filas: Vec<Vec<String>>,
}

impl Tabla {
    pub fn desde_csv<R: Read>(lector: R) -> Result<Tabla> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(lector);
        let encabezados: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let mut filas = Vec::new();
        for registro in reader.records() {
            let registro = registro?;
            let fila: Vec<String> = registro.iter().map(|c| c.to_string()).collect();
            if fila.iter().all(|c| c.is_empty()) {
                continue;
            }
            filas.push(fila);
        }
        Ok(Tabla { encabezados, filas })
    }

    /// Lee la primera hoja de un libro (xlsx, xls, ods). La primera fila
    /// no vacía se toma como encabezado.
    pub fn desde_planilla<P: AsRef<Path>>(path: P) -> Result<Tabla> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        let Some(hoja) = workbook.sheet_names().first().cloned() else {
            return Ok(Tabla::default());
        };
        let range = workbook.worksheet_range(&hoja)?;
        let mut filas = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>())
            .filter(|r| r.iter().any(|c| !c.is_empty()));
        let encabezados = filas.next().unwrap_or_default();
        Ok(Tabla { encabezados, filas: filas.collect() })
    }

    /// Elige el lector según la extensión del archivo.
    pub fn desde_archivo<P: AsRef<Path>>(path: P) -> Result<Tabla> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Tabla::desde_csv(std::fs::File::open(path)?),
            "xlsx" | "xlsm" | "xls" | "ods" => Tabla::desde_planilla(path),
            _ => Err(AsistenciaError::Formato(format!(
                "extensión no soportada para '{}' (se espera csv, xlsx, xls u ods)",
                path.display()
            ))),
        }
    }

    /// Índice de la primera columna cuyo encabezado normalizado coincide con
    /// alguno de los alias.
    pub fn columna(&self, alias: &[&str]) -> Option<usize> {
        let buscados: Vec<String> = alias.iter().map(|a| normalize_header(a)).collect();
        self.encabezados
            .iter()
            .position(|h| buscados.contains(&normalize_header(h)))
    }

    pub fn columna_requerida(&self, alias: &[&str]) -> Result<usize> {
        self.columna(alias).ok_or_else(|| {
            AsistenciaError::Formato(format!("falta la columna '{}'", alias.first().copied().unwrap_or_default()))
        })
    }
}

/// Valor de una celda por índice de columna; vacío si no existe.
pub fn celda(fila: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| fila.get(i)).map(|s| s.trim()).unwrap_or("")
}
