//! Datos del cliente: razón social, CUIT y domicilio.
//!
//! La razón social se resuelve por niveles: etiqueta explícita, línea
//! anterior a la mención de CUIT, o primera línea en mayúsculas que no sea
//! encabezado. La línea elegida queda como ancla para acotar la búsqueda de
//! domicilio y CUIT.

use crate::models::ClientInfo;

use super::patterns::{
    COLA_DOMICILIO, CUIT_AGRUPADO, DOBLE_ESPACIO, DOMICILIO_EN_TEXTO, DOMICILIO_ETIQUETADO,
    DOMICILIO_SOLO, ENCABEZADO_AMPLIO, ENCABEZADO_BASICO, ETIQUETA_DOMICILIO, LINEA_MAYUSCULAS,
    MENCIONA_CUIT, PREFIJO_DIRECCION, RAZON_SOCIAL_ETIQUETADA,
};

/// CUIT con el agrupamiento fijo 2-8-1 a partir de 11 dígitos sueltos.
fn format_cuit_from_digits(digits: &str) -> String {
    if digits.len() != 11 {
        return String::new();
    }
    format!("{}-{}-{}", &digits[0..2], &digits[2..10], &digits[10..])
}

fn sanitize_address(value: &str) -> String {
    let sin_prefijo = PREFIJO_DIRECCION.replace(value, "");
    DOBLE_ESPACIO.replace_all(&sin_prefijo, " ").trim().to_string()
}

pub fn parse_cliente(text: &str) -> ClientInfo {
    let trimmed: Vec<String> = text
        .split('\n')
        .map(|l| l.trim_end_matches('\r').trim().to_string())
        .collect();

    let mut razon = String::new();
    let mut razon_index: Option<usize> = None;

    // Nivel 1: etiqueta "Razón Social" con valor en la misma línea
    for (i, line) in trimmed.iter().enumerate() {
        if let Some(caps) = RAZON_SOCIAL_ETIQUETADA.captures(line) {
            let value = caps[1].trim();
            if !value.is_empty() {
                razon = value.to_string();
                razon_index = Some(i);
                break;
            }
        }
    }

    // Nivel 2: línea inmediatamente anterior a la mención de CUIT
    if razon.is_empty() {
        for i in 1..trimmed.len() {
            if MENCIONA_CUIT.is_match(&trimmed[i])
                && !trimmed[i - 1].is_empty()
                && !ENCABEZADO_BASICO.is_match(&trimmed[i - 1])
            {
                razon = trimmed[i - 1].clone();
                razon_index = Some(i - 1);
                break;
            }
        }
    }

    // Nivel 3: primera línea en mayúsculas que no sea texto de plantilla
    if razon.is_empty() {
        for (i, line) in trimmed.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            if LINEA_MAYUSCULAS.is_match(line) && !ENCABEZADO_AMPLIO.is_match(line) {
                razon = line.clone();
                razon_index = Some(i);
                break;
            }
        }
    }

    razon = COLA_DOMICILIO.replace(&razon, "").to_string();
    razon = DOBLE_ESPACIO.replace_all(&razon, " ").trim().to_string();

    // Domicilio: primero dentro de la ventana de 8 líneas desde el ancla
    let mut domicilio = String::new();
    if let Some(anchor) = razon_index {
        let end = trimmed.len().min(anchor + 8);
        for j in anchor..end {
            let line = &trimmed[j];
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = DOMICILIO_ETIQUETADO.captures(line) {
                if !caps[1].trim().is_empty() {
                    domicilio = sanitize_address(&caps[1]);
                    if domicilio.is_empty() {
                        if let Some(next) = trimmed.get(j + 1).filter(|s| !s.is_empty()) {
                            domicilio = sanitize_address(next);
                        }
                    }
                    break;
                }
            }
            if DOMICILIO_SOLO.is_match(line) {
                if let Some(next) = trimmed.get(j + 1).filter(|s| !s.is_empty()) {
                    domicilio = sanitize_address(next);
                    break;
                }
            }
        }
    }

    // Sin ancla o sin aciertos: primera etiqueta en todo el texto
    if domicilio.is_empty() {
        if let Some(caps) = DOMICILIO_EN_TEXTO.captures(text) {
            if !caps[1].trim().is_empty() {
                domicilio = sanitize_address(&caps[1]);
            }
        }
    }

    domicilio = ETIQUETA_DOMICILIO.replace(&domicilio, "").trim().to_string();

    // CUIT: ventana de 6 líneas desde el ancla
    let mut cuit = String::new();
    if let Some(anchor) = razon_index {
        let end = trimmed.len().min(anchor + 6);
        for j in anchor..end {
            if let Some(caps) = CUIT_AGRUPADO.captures(&trimmed[j]) {
                cuit = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
                break;
            }
            let digits: String = trimmed[j].chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() == 11 {
                cuit = format_cuit_from_digits(&digits);
                break;
            }
        }
    }

    // Búsqueda global: se prefiere la primera aparición posterior al ancla;
    // si no hay, la última del documento (el CUIT del emisor suele venir antes
    // que el del cliente)
    if cuit.is_empty() {
        let matches: Vec<(String, usize)> = CUIT_AGRUPADO
            .captures_iter(text)
            .map(|caps| {
                let m = caps.get(0).expect("captura 0 siempre presente");
                (format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]), m.start())
            })
            .collect();
        if !matches.is_empty() {
            let anchor_pos = razon_index
                .map(|i| trimmed[i].as_str())
                .filter(|s| !s.is_empty())
                .and_then(|anchor| text.find(anchor));
            let elegido = match anchor_pos {
                Some(pos) => matches
                    .iter()
                    .find(|(_, start)| *start >= pos)
                    .or_else(|| matches.last()),
                None => matches.last(),
            };
            if let Some((value, _)) = elegido {
                cuit = value.clone();
            }
        }
    }

    ClientInfo {
        razon_social: razon,
        cuit,
        domicilio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etiqueta_explicita_con_domicilio_y_cuit() {
        let text = "FACTURA A\nRazón Social: ACME S.A.\ncondición frente al IVA: RI\nDomicilio: Av. Siempreviva 742\nCUIT 30-12345678-9\n";
        let cliente = parse_cliente(text);
        assert_eq!(cliente.razon_social, "ACME S.A.");
        assert_eq!(cliente.domicilio, "Av. Siempreviva 742");
        assert_eq!(cliente.cuit, "30-12345678-9");
    }

    #[test]
    fn test_linea_anterior_al_cuit() {
        let text = "Factura B\n\nDISTRIBUIDORA NORTE S.R.L.\nCUIT: 30-98765432-1\n";
        let cliente = parse_cliente(text);
        assert_eq!(cliente.razon_social, "DISTRIBUIDORA NORTE S.R.L.");
        assert_eq!(cliente.cuit, "30-98765432-1");
    }

    #[test]
    fn test_cuit_sin_separadores() {
        let text = "Razón Social: ACME S.A.\nC U I T 30123456789\n";
        let cliente = parse_cliente(text);
        assert_eq!(cliente.cuit, "30-12345678-9");
    }

    #[test]
    fn test_cuit_posterior_al_ancla() {
        let text = "EMISORA SA\nCUIT emisor 20-11111111-1\nmucho texto intermedio\nRazón Social: ACME S.A.\nsin datos\nsin datos aca\nsin datos tampoco\nmas relleno\ny mas relleno\notro relleno\nCUIT 30-22222222-2\n";
        let cliente = parse_cliente(text);
        assert_eq!(cliente.cuit, "30-22222222-2");
    }

    #[test]
    fn test_sin_marcadores_degrada_a_vacio() {
        let text = "texto cualquiera\nsin datos de nadie\n";
        let cliente = parse_cliente(text);
        assert_eq!(cliente.razon_social, "");
        assert_eq!(cliente.cuit, "");
        assert_eq!(cliente.domicilio, "");
    }
}
