//! Orquestador: arma el registro completo a partir del texto OCR.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::models::InvoiceRecord;

use super::amounts::{collect_amounts, find_amount, match_amount_in_text};
use super::client::parse_cliente;
use super::patterns::{
    COLA_CUIT, ETIQUETAS_EXENTO, ETIQUETAS_IVA_105, ETIQUETAS_IVA_21, ETIQUETAS_IVA_27,
    ETIQUETAS_IVA_GENERAL, ETIQUETAS_NETO_GRAVADO, ETIQUETAS_NETO_NO_GRAVADO,
    ETIQUETAS_OTROS_CONCEPTOS, FECHA_ETIQUETADA, FECHA_TOKEN, NUMERO_ETIQUETADO, NUMERO_TOKEN,
    TIPO_ETIQUETADO, TIPO_FACTURA, TOTAL_CON_MONEDA, TOTAL_ETIQUETADO, TOTAL_MULTILINEA,
};
use super::text::norm_number;

/// Primer candidato no vacío.
fn pick<const N: usize>(candidates: [String; N]) -> String {
    candidates.into_iter().find(|c| !c.is_empty()).unwrap_or_default()
}

fn match_group(text: &str, re: &Regex, group: usize) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extracción completa: texto OCR de un comprobante a registro canónico.
/// Nunca falla: cada campo que no se encuentra queda como cadena vacía.
pub fn analizar(text: &str) -> InvoiceRecord {
    // 1. Canonicalizar Unicode y separar líneas
    let t: String = text.nfkc().collect();
    let lines: Vec<String> = t
        .split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect();

    // 2. Encabezado: fecha, número y tipo de comprobante
    let fecha = pick([
        match_group(&t, &FECHA_TOKEN, 1),
        match_group(&t, &FECHA_ETIQUETADA, 1),
    ]);
    let numero = pick([
        match_group(&t, &NUMERO_TOKEN, 1),
        match_group(&t, &NUMERO_ETIQUETADO, 1),
    ]);
    let tipo = pick([
        match_group(&t, &TIPO_FACTURA, 1),
        match_group(&t, &TIPO_ETIQUETADO, 1),
    ]);

    // 3. Cliente
    let cliente = parse_cliente(&t);
    let razon_social = COLA_CUIT.replace(&cliente.razon_social, "").trim().to_string();

    // 4. Importes por categoría, con triple redundancia por campo:
    //    barrido por tabla, patrón etiquetado sobre texto completo y
    //    barrido simple por palabra clave
    let amounts = collect_amounts(&lines);
    let de_tabla = |key: &str| amounts.get(key).cloned().unwrap_or_default();

    let importe_neto_gravado = pick([
        de_tabla("importe_neto_gravado"),
        match_amount_in_text(&t, &ETIQUETAS_NETO_GRAVADO),
        find_amount(
            &lines,
            &["importe neto gravado", "importe neto grabado", "neto gravado", "neto grabado", "subtotal"],
        ),
    ]);
    let importe_neto_no_gravado = pick([
        de_tabla("importe_neto_no_gravado"),
        match_amount_in_text(&t, &ETIQUETAS_NETO_NO_GRAVADO),
        find_amount(
            &lines,
            &["importe neto no gravado", "importe neto no grabado", "no gravado", "no grabado", "neto no gravado", "neto no grabado"],
        ),
    ]);
    let importe_exento = pick([
        de_tabla("importe_exento"),
        match_amount_in_text(&t, &ETIQUETAS_EXENTO),
        find_amount(&lines, &["importe exento", "neto exento"]),
    ]);
    let importe_otros_conceptos = pick([
        de_tabla("importe_otros_conceptos"),
        match_amount_in_text(&t, &ETIQUETAS_OTROS_CONCEPTOS),
        find_amount(&lines, &["importe otros conceptos", "otros conceptos"]),
    ]);

    let iva_21 = pick([
        de_tabla("iva_21"),
        match_amount_in_text(&t, &ETIQUETAS_IVA_21),
        find_amount(&lines, &["iva 21", "iva21", "iva 21%"]),
    ]);
    let iva_105 = pick([
        de_tabla("iva_105"),
        match_amount_in_text(&t, &ETIQUETAS_IVA_105),
        find_amount(&lines, &["iva 105", "iva 10,5", "iva 10.5", "iva 10"]),
    ]);
    let iva_27 = pick([
        de_tabla("iva_27"),
        match_amount_in_text(&t, &ETIQUETAS_IVA_27),
        find_amount(&lines, &["iva 27", "iva 27%"]),
    ]);
    let iva_general = pick([
        de_tabla("iva"),
        match_amount_in_text(&t, &ETIQUETAS_IVA_GENERAL),
        find_amount(&lines, &["iva total"]),
    ]);

    // 5. IVA de cabecera: genérico primero, después por alícuota
    let iva = norm_number(&pick([
        iva_general,
        iva_21.clone(),
        iva_105.clone(),
        iva_27.clone(),
    ]));

    // 6. Total
    let total = norm_number(&pick([
        match_group(&t, &TOTAL_ETIQUETADO, 2),
        match_group(&t, &TOTAL_CON_MONEDA, 1),
        match_group(&t, &TOTAL_MULTILINEA, 1),
    ]));

    // 7. Registro final; el recorte de texto crudo queda para auditoría
    InvoiceRecord {
        fecha,
        tipo,
        numero_comprobante: numero,
        cuit: cliente.cuit,
        razon_social,
        domicilio_cliente: cliente.domicilio,
        subtotal: importe_neto_gravado.clone(),
        importe_neto_gravado,
        importe_neto_no_gravado,
        importe_exento,
        importe_otros_conceptos,
        iva,
        iva_21,
        iva_105,
        iva_27,
        total,
        raw: t.chars().take(400).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    // El domicilio evita la subcadena "iva": una calle que la contenga
    // (p. ej. "Siempreviva") hace que la regla genérica de IVA reclame esa
    // línea, igual que en collect_amounts
    const FACTURA: &str = "FACTURA B\nNro: 0001-00001234\nFecha: 03/02/2024\nRazón Social: ACME S.A.\nDomicilio: Calle Falsa 742\nCUIT 30-12345678-9\nImporte Neto Gravado $ 1.000,00\nIVA 21% 210,00\nTOTAL $ 1.210,00\n";

    #[test]
    fn test_registro_completo() {
        let record = analizar(FACTURA);
        assert_eq!(record.fecha, "03/02/2024");
        assert_eq!(record.tipo, "B");
        assert_eq!(record.numero_comprobante, "0001-00001234");
        assert_eq!(record.razon_social, "ACME S.A.");
        assert_eq!(record.domicilio_cliente, "Calle Falsa 742");
        assert_eq!(record.cuit, "30-12345678-9");
        assert_eq!(record.importe_neto_gravado, "1000.00");
        assert_eq!(record.subtotal, record.importe_neto_gravado);
        assert_eq!(record.iva_21, "210.00");
        assert_eq!(record.iva, "210.00");
        assert_eq!(record.total, "1210.00");
    }

    #[test]
    fn test_total_con_moneda() {
        let record = analizar("TOTAL $ 10.500,00");
        assert_eq!(record.total, "10500.00");
    }

    #[test]
    fn test_entrada_vacia_degrada() {
        let record = analizar("");
        assert_eq!(record.fecha, "");
        assert_eq!(record.cuit, "");
        assert_eq!(record.razon_social, "");
        assert_eq!(record.total, "");
        assert_eq!(record.raw, "");
    }

    #[test]
    fn test_recorte_de_texto_crudo() {
        let text = "x".repeat(900);
        let record = analizar(&text);
        assert_eq!(record.raw.chars().count(), 400);
    }

    #[test]
    fn test_invariantes_de_formato() {
        let cuit_re = Regex::new(r"^\d{2}-\d{8}-\d$").unwrap();
        let monto_re = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
        let record = analizar(FACTURA);
        assert!(cuit_re.is_match(&record.cuit));
        for campo in [
            &record.subtotal,
            &record.importe_neto_gravado,
            &record.iva,
            &record.iva_21,
            &record.total,
        ] {
            assert!(monto_re.is_match(campo), "monto mal formado: {:?}", campo);
        }
    }

    #[test]
    fn test_tipo_por_etiqueta() {
        let record = analizar("Tipo de Comprobante: A\nTotal 99,00");
        assert_eq!(record.tipo, "A");
        assert_eq!(record.total, "99.00");
    }
}
