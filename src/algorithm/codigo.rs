//! Normalización de códigos de reunión.
//!
//! El export de eventos trae el código como "abc-defg-hij" y la planilla de
//! horarios como link completo ("https://meet.google.com/abc-defg-hij"). Ambos
//! lados deben pasar por `normalizar_codigo` para poder compararse.

/// Toma el último segmento de ruta, descarta todo lo que no sea letra o
/// dígito ASCII y pasa a minúsculas. Devuelve `None` si no queda nada.
pub fn normalizar_codigo(raw: &str) -> Option<String> {
    let segmento = raw.trim().rsplit('/').next().unwrap_or("");
    let codigo: String = segmento
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if codigo.is_empty() { None } else { Some(codigo) }
}

/// Reconstruye el link a partir del código normalizado: segmentos de 3, 4 y
/// el resto, separados por guiones. Los segmentos vacíos se omiten.
pub fn reconstruir_link(codigo: &str, base_url: &str) -> String {
    let chars: Vec<char> = codigo.chars().collect();
    let corte1 = chars.len().min(3);
    let corte2 = chars.len().min(7);
    let segmentos: Vec<String> = [&chars[..corte1], &chars[corte1..corte2], &chars[corte2..]]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.iter().collect())
        .collect();
    format!("{}{}", base_url, segmentos.join("-"))
}
