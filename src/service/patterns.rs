//! Patrones compilados para la extracción de campos de comprobantes.

use lazy_static::lazy_static;
use regex::Regex;

/// Patrones de etiqueta + importe para el barrido directo sobre texto completo.
/// Cada etiqueta admite hasta 10 caracteres de relleno (espacios, `:`, `$`)
/// antes del grupo numérico.
fn amount_label_patterns(labels: &[&str]) -> Vec<Regex> {
    labels
        .iter()
        .map(|label| {
            Regex::new(&format!(r"(?i){}[\s:$]{{0,10}}([\d\.\s,]+)", label))
                .expect("patrón de etiqueta inválido")
        })
        .collect()
}

lazy_static! {
    // Normalización numérica: detecta agrupación de miles (1.234,56 / 1.234.567)
    pub static ref MILES_AGRUPADOS: Regex = Regex::new(r"\d\.\d{3}[\.,]").unwrap();

    // Normalización de claves
    pub static ref NO_ALFANUMERICO: Regex = Regex::new(r"[^a-z0-9%]+").unwrap();
    pub static ref IVA_ESPACIADO: Regex = Regex::new(r"\bi\s+v\s+a\b").unwrap();
    pub static ref CUIT_ESPACIADO: Regex = Regex::new(r"\bc\s+u\s+i\s+t\b").unwrap();
    pub static ref ESPACIOS: Regex = Regex::new(r"\s+").unwrap();
    pub static ref DOBLE_ESPACIO: Regex = Regex::new(r"\s{2,}").unwrap();

    // Encabezado del comprobante
    pub static ref FECHA_TOKEN: Regex =
        Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap();
    pub static ref FECHA_ETIQUETADA: Regex =
        Regex::new(r"(?i)Fecha\s*[:\-]?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})").unwrap();
    pub static ref NUMERO_TOKEN: Regex = Regex::new(r"\b(\d{4}-\d{8})\b").unwrap();
    pub static ref NUMERO_ETIQUETADO: Regex =
        Regex::new(r"(?i)N(?:r[oº°]|[º°]|u(?:m(?:\.|ero)?)?|o)\s*[:\-]?\s*(\d{4}-\d{8})").unwrap();
    pub static ref TIPO_FACTURA: Regex = Regex::new(r"(?i)\bFACTURA\s+([ABCEM])\b").unwrap();
    pub static ref TIPO_ETIQUETADO: Regex =
        Regex::new(r"(?i)Tipo\s*de\s*Comprobante\s*[:\-]?\s*([ABCEM])").unwrap();

    // Cliente
    pub static ref RAZON_SOCIAL_ETIQUETADA: Regex =
        Regex::new(r"(?i)Raz[oó]n\s*Social[:\s-]+(.+)").unwrap();
    pub static ref LINEA_MAYUSCULAS: Regex =
        Regex::new(r"^[A-ZÁÉÍÓÚÑ&\s\.]{6,}$").unwrap();
    pub static ref MENCIONA_CUIT: Regex = Regex::new(r"(?i)CUIT").unwrap();
    pub static ref ENCABEZADO_BASICO: Regex =
        Regex::new(r"(?i)Factura|Comprobante|TOTAL|IVA").unwrap();
    pub static ref ENCABEZADO_AMPLIO: Regex = Regex::new(
        r"(?i)FACTURA|COMPROBANTE|DOMICILIO|IVA|TOTAL|SUBTOTAL|CONDICI[ÓO]N|CUIT|RESPONSABLE"
    )
    .unwrap();
    pub static ref COLA_DOMICILIO: Regex = Regex::new(r"(?i)Domicilio.*$").unwrap();
    pub static ref COLA_CUIT: Regex = Regex::new(r"(?i)CUIT.*$").unwrap();
    pub static ref DOMICILIO_ETIQUETADO: Regex =
        Regex::new(r"(?i)Domicilio[:\s-]+(.+)").unwrap();
    pub static ref DOMICILIO_SOLO: Regex = Regex::new(r"(?i)^Domicilio$").unwrap();
    pub static ref DOMICILIO_EN_TEXTO: Regex =
        Regex::new(r"(?i)Domicilio[:\s-]+([^\n\r]+)").unwrap();
    pub static ref ETIQUETA_DOMICILIO: Regex = Regex::new(r"(?i)Domicilio[:\s-]*").unwrap();
    pub static ref PREFIJO_DIRECCION: Regex = Regex::new(r"^\s*[:\-]").unwrap();
    pub static ref CUIT_AGRUPADO: Regex = Regex::new(r"(\d{2})\D?(\d{8})\D?(\d)").unwrap();

    // Importes: número con decimales de dos cifras, o corrida cruda de 5+ dígitos
    pub static ref MONTO_DECIMAL: Regex = Regex::new(r"(\d[\d\s\.]*[.,]\d{2})").unwrap();
    pub static ref MONTO_ENTERO: Regex = Regex::new(r"(\d{5,})").unwrap();

    // Total (tres variantes, en orden de prioridad)
    pub static ref TOTAL_ETIQUETADO: Regex =
        Regex::new(r"(?i)(Importe\s*Total|TOTAL)\s*[:\s$]*([\d\.,]+)").unwrap();
    pub static ref TOTAL_CON_MONEDA: Regex = Regex::new(r"(?i)Total\s*\$?\s*([\d\.,]+)").unwrap();
    pub static ref TOTAL_MULTILINEA: Regex =
        Regex::new(r"(?i)Importe\s*Total[\s\n\r]+([\d\.,]+)").unwrap();

    // Etiquetas para el barrido directo por campo
    pub static ref ETIQUETAS_NETO_GRAVADO: Vec<Regex> = amount_label_patterns(&[
        r"Importe\s+Neto\s+Gravado",
        r"Neto\s+Gravado",
        r"Subtotal",
    ]);
    pub static ref ETIQUETAS_NETO_NO_GRAVADO: Vec<Regex> = amount_label_patterns(&[
        r"Importe\s+Neto\s+No\s+Gravado",
        r"Neto\s+No\s+Gravado",
    ]);
    pub static ref ETIQUETAS_EXENTO: Vec<Regex> =
        amount_label_patterns(&[r"Importe\s+Exento", r"Neto\s+Exento"]);
    pub static ref ETIQUETAS_OTROS_CONCEPTOS: Vec<Regex> =
        amount_label_patterns(&[r"Importe\s+Otros\s+Conceptos", r"Otros\s+Conceptos"]);
    pub static ref ETIQUETAS_IVA_21: Vec<Regex> =
        amount_label_patterns(&[r"I\.?V\.?A\.?\s*21%?", r"IVA\s*21"]);
    pub static ref ETIQUETAS_IVA_105: Vec<Regex> =
        amount_label_patterns(&[r"I\.?V\.?A\.?\s*10[,\.]?5%?", r"IVA\s*10"]);
    pub static ref ETIQUETAS_IVA_27: Vec<Regex> =
        amount_label_patterns(&[r"I\.?V\.?A\.?\s*27%?", r"IVA\s*27"]);
    pub static ref ETIQUETAS_IVA_GENERAL: Vec<Regex> =
        amount_label_patterns(&[r"IVA\s*Total", r"I\.?V\.?A\.?\s*Total", r"IVA\s*:\s*"]);
}
