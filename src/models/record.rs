use serde::{Deserialize, Serialize};

/// Registro canónico de un comprobante. Todos los campos numéricos van como
/// cadena decimal canónica (punto decimal, sin separadores de miles) para no
/// perder precisión; un campo ausente es cadena vacía, nunca null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub fecha: String,
    pub tipo: String,
    pub numero_comprobante: String,
    pub cuit: String,
    pub razon_social: String,
    pub domicilio_cliente: String,
    /// Alias de `importe_neto_gravado`
    pub subtotal: String,
    pub importe_neto_gravado: String,
    pub importe_neto_no_gravado: String,
    pub importe_exento: String,
    pub importe_otros_conceptos: String,
    /// IVA de cabecera: el genérico si existe, si no la primera alícuota
    pub iva: String,
    pub iva_21: String,
    pub iva_105: String,
    pub iva_27: String,
    pub total: String,
    /// Primeros 400 caracteres del texto de entrada, solo para auditoría
    pub raw: String,
}

/// Datos del cliente, intermedios entre el extractor de cliente y el
/// orquestador.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub razon_social: String,
    pub cuit: String,
    pub domicilio: String,
}
