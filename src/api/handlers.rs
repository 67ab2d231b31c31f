use crate::service;
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Cuerpo de la petición: texto OCR de un comprobante
#[derive(Debug, Deserialize)]
pub struct AnalizarRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Cuerpo de error
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Chequeo de salud
pub async fn health_check() -> &'static str {
    "OK"
}

/// Extracción de campos sobre texto OCR. La falta de texto se rechaza acá;
/// el núcleo de extracción nunca falla y siempre devuelve el registro
/// completo.
pub async fn analizar(Json(req): Json<AnalizarRequest>) -> Response {
    let Some(text) = req.text.filter(|t| !t.is_empty()) else {
        let response = ErrorResponse {
            error: "Falta texto OCR.".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    };

    let record = service::analizar(&text);
    tracing::info!(
        "Comprobante analizado: tipo={} numero={} cuit={} total={}",
        record.tipo,
        record.numero_comprobante,
        record.cuit,
        record.total
    );
    (StatusCode::OK, Json(record)).into_response()
}
