//! Extracción de importes por categoría (netos, exento, IVA por alícuota).

use std::collections::HashMap;

use regex::Regex;

use super::patterns::{MONTO_DECIMAL, MONTO_ENTERO};
use super::text::{clean_key, norm_number};

/// Regla de categoría: clave canónica + frases que la identifican en una
/// línea ya normalizada con [`clean_key`].
pub struct AmountRule {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
}

/// Tabla ordenada de categorías. El orden importa: las alícuotas específicas
/// se evalúan antes que el "iva" genérico.
pub const AMOUNT_RULES: &[AmountRule] = &[
    AmountRule {
        key: "importe_neto_gravado",
        keywords: &[
            "importe neto gravado",
            "importe neto grabado",
            "neto gravado",
            "neto grabado",
            "subtotal",
        ],
    },
    AmountRule {
        key: "importe_neto_no_gravado",
        keywords: &[
            "importe neto no gravado",
            "importe neto no grabado",
            "no gravado",
            "no grabado",
            "neto no gravado",
            "neto no grabado",
        ],
    },
    AmountRule {
        key: "importe_exento",
        keywords: &["importe exento", "neto exento"],
    },
    AmountRule {
        key: "importe_otros_conceptos",
        keywords: &["importe otros conceptos", "otros conceptos"],
    },
    AmountRule {
        key: "iva_27",
        keywords: &["iva 27", "iva 27%"],
    },
    AmountRule {
        key: "iva_105",
        keywords: &["iva 105", "iva 10 5", "iva 10,5", "iva 10.5", "iva 10"],
    },
    AmountRule {
        key: "iva_21",
        keywords: &["iva 21", "iva21", "iva 21%"],
    },
    AmountRule {
        key: "iva",
        keywords: &["iva"],
    },
];

/// Primer importe con forma de número en la cadena: decimal con dos cifras
/// (admite miles y espacios internos del OCR), o una corrida de 5+ dígitos.
fn extract_amount(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if let Some(caps) = MONTO_DECIMAL.captures(s) {
        return caps[1].to_string();
    }
    if let Some(caps) = MONTO_ENTERO.captures(s) {
        return caps[1].to_string();
    }
    String::new()
}

/// Barrido línea por línea contra la tabla de categorías. El primer valor
/// por categoría es definitivo. Las exclusiones mantienen separadas las
/// líneas de alícuota específica y la línea "iva" a secas (heurística
/// ajustada empíricamente, preservar tal cual).
pub fn collect_amounts(lines: &[String]) -> HashMap<&'static str, String> {
    let mut results: HashMap<&'static str, String> = HashMap::new();

    for (i, raw) in lines.iter().enumerate() {
        if raw.is_empty() {
            continue;
        }
        let key = clean_key(raw);
        if key.is_empty() {
            continue;
        }
        let next = lines.get(i + 1).map(String::as_str).unwrap_or("");

        for rule in AMOUNT_RULES {
            if results.contains_key(rule.key) {
                continue;
            }
            let es_iva = rule.key.starts_with("iva");
            if es_iva && key.contains("iva 21") && rule.key == "iva" {
                continue;
            }
            if es_iva && rule.key != "iva" && key == "iva" {
                continue;
            }
            if rule.key == "iva"
                && (key.contains("iva 21") || key.contains("iva 105") || key.contains("iva 27"))
            {
                continue;
            }
            if rule.key != "iva" && key == "iva" {
                continue;
            }

            if rule.key == "iva" && key == "iva" {
                let mut amount = extract_amount(raw);
                if amount.is_empty() {
                    amount = extract_amount(next);
                }
                if !amount.is_empty() {
                    results.insert(rule.key, norm_number(&amount));
                }
                continue;
            }

            if rule.keywords.iter().any(|k| key.contains(k)) {
                let mut amount = extract_amount(raw);
                if amount.is_empty() {
                    amount = extract_amount(next);
                }
                if !amount.is_empty() {
                    results.insert(rule.key, norm_number(&amount));
                }
            }
        }
    }

    results
}

/// Barrido simple por palabra clave: primera línea cuya clave contiene
/// alguna de las frases, tomando el importe de esa línea o de la siguiente.
pub fn find_amount(lines: &[String], keywords: &[&str]) -> String {
    for (i, raw) in lines.iter().enumerate() {
        if raw.is_empty() {
            continue;
        }
        let key = clean_key(raw);
        if key.is_empty() {
            continue;
        }
        if keywords.iter().any(|k| key.contains(k)) {
            let found = extract_amount(raw);
            if !found.is_empty() {
                return norm_number(&found);
            }
            let next = lines.get(i + 1).map(String::as_str).unwrap_or("");
            let next_found = extract_amount(next);
            if !next_found.is_empty() {
                return norm_number(&next_found);
            }
        }
    }
    String::new()
}

/// Barrido directo sobre el texto completo con patrones etiquetados
/// (etiqueta + captura numérica). Devuelve el primer grupo con dígitos.
pub fn match_amount_in_text(text: &str, patterns: &[Regex]) -> String {
    for re in patterns {
        if let Some(caps) = re.captures(text) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if raw.chars().any(|c| c.is_ascii_digit()) {
                return norm_number(raw);
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::patterns::ETIQUETAS_NETO_GRAVADO;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_iva_21_con_miles() {
        let lines = lines("IVA 21%        1.234,56");
        let amounts = collect_amounts(&lines);
        assert_eq!(amounts.get("iva_21").map(String::as_str), Some("1234.56"));
        assert_eq!(amounts.get("iva"), None);
    }

    #[test]
    fn test_linea_iva_generica() {
        let lines = lines("IVA: 450,00\nTotal 2.650,00");
        let amounts = collect_amounts(&lines);
        assert_eq!(amounts.get("iva").map(String::as_str), Some("450.00"));
        assert_eq!(amounts.get("iva_21"), None);
    }

    #[test]
    fn test_importe_en_linea_siguiente() {
        let lines = lines("Importe Neto Gravado\n1.000,00");
        let amounts = collect_amounts(&lines);
        assert_eq!(
            amounts.get("importe_neto_gravado").map(String::as_str),
            Some("1000.00")
        );
    }

    #[test]
    fn test_primer_valor_gana() {
        let lines = lines("Subtotal 100,00\nNeto Gravado 999,99");
        let amounts = collect_amounts(&lines);
        assert_eq!(
            amounts.get("importe_neto_gravado").map(String::as_str),
            Some("100.00")
        );
    }

    #[test]
    fn test_iva_generico_por_subcadena() {
        // La comparación es por subcadena: "Siempreviva" contiene "iva", la
        // regla genérica reclama la línea y el importe sale de la corrida de
        // dígitos de la línea siguiente
        let lines = lines("Domicilio: Av. Siempreviva 742\nCUIT 30-12345678-9");
        let amounts = collect_amounts(&lines);
        assert_eq!(amounts.get("iva").map(String::as_str), Some("12345678"));
    }

    #[test]
    fn test_find_amount_entero_largo() {
        let lines = lines("Neto gravado 152300");
        assert_eq!(find_amount(&lines, &["neto gravado"]), "152300");
    }

    #[test]
    fn test_match_amount_in_text() {
        let text = "Detalle\nImporte Neto Gravado $ 1.500,50\n";
        assert_eq!(match_amount_in_text(text, &ETIQUETAS_NETO_GRAVADO), "1500.50");
        assert_eq!(match_amount_in_text("sin importes", &ETIQUETAS_NETO_GRAVADO), "");
    }
}
