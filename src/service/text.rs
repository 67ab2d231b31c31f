//! Normalización de texto OCR: números localizados y claves de comparación.

use unicode_normalization::UnicodeNormalization;

use super::patterns::{CUIT_ESPACIADO, ESPACIOS, IVA_ESPACIADO, MILES_AGRUPADOS, NO_ALFANUMERICO};

/// Lleva una cadena numérica localizada (separador de miles `.`, coma decimal)
/// a la forma canónica con punto decimal. Idempotente: una cadena ya canónica
/// vuelve sin cambios.
pub fn norm_number(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let mut out: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    // "1.234,56" o "1.234.567": los puntos son separadores de miles
    if MILES_AGRUPADOS.is_match(&out) {
        out = out.replace('.', "");
    }
    out = out.replacen(',', ".", 1);
    out.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Reduce una línea a una clave comparable: sin acentos, minúsculas, signos
/// colapsados a espacio. Repara "i v a" y "c u i t" cuando el OCR separó las
/// letras.
pub fn clean_key(line: &str) -> String {
    let sin_acentos: String = line
        .nfd()
        .filter(|c| {
            let cp = *c as u32;
            !(0x0300..=0x036f).contains(&cp)
        })
        .collect();
    let lower = sin_acentos.to_lowercase();
    let espaciado = NO_ALFANUMERICO.replace_all(&lower, " ");
    let con_iva = IVA_ESPACIADO.replace_all(&espaciado, "iva");
    let con_cuit = CUIT_ESPACIADO.replace_all(&con_iva, "cuit");
    ESPACIOS.replace_all(&con_cuit, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_number_miles_y_coma() {
        assert_eq!(norm_number("1.234,56"), "1234.56");
        assert_eq!(norm_number("10.500,00"), "10500.00");
        assert_eq!(norm_number("1.234.567"), "1234567");
    }

    #[test]
    fn test_norm_number_simple() {
        assert_eq!(norm_number("1234,56"), "1234.56");
        assert_eq!(norm_number("1234.56"), "1234.56");
        assert_eq!(norm_number("$ 210,00"), "210.00");
        assert_eq!(norm_number(""), "");
    }

    #[test]
    fn test_norm_number_idempotente() {
        for s in ["1.234,56", "10.500,00", "1234.56", "4 521,10", "$99,90", "30-12345678-9"] {
            let una = norm_number(s);
            assert_eq!(norm_number(&una), una, "no idempotente para {:?}", s);
        }
    }

    #[test]
    fn test_clean_key_acentos_y_signos() {
        assert_eq!(clean_key("Razón Social:"), "razon social");
        assert_eq!(clean_key("I.V.A. 21%"), "iva 21%");
        assert_eq!(clean_key("  IVA   21 %  "), "iva 21 %");
    }

    #[test]
    fn test_clean_key_ocr_espaciado() {
        assert_eq!(clean_key("I V A 21"), "iva 21");
        assert_eq!(clean_key("C U I T 30-12345678-9"), "cuit 30 12345678 9");
    }
}
