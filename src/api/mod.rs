//! # HTTP API
//!
//! Axum router exposing the imprint service.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/imprint`: JSON `{ "text", "password"?, "drawers"? }` ->
//!   `image/png`, or `{ "hash", "canvas_size", "image_base64" }` when the
//!   client sends `Accept: application/json`
//! - `POST /api/v1/imprint/parse`: multipart `file` (PNG) + `password`? ->
//!   `{ "text" }`
//! - `GET /api/health`
//!
//! Per-request drawers are checked with [`DrawerConfig::validate`] and capped
//! at [`MAX_REQUEST_DRAWERS`]; anything out of bounds is a 400.
//!
//! Errors are JSON `{ "error": message }` with a status code per failure kind.
//! Rendering and decoding run on the blocking thread pool.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::common::config::ServerSettings;
use crate::imprint::{ImprintError, ImprintService};
use crate::processing::StegoError;
use crate::render::DrawerConfig;

/// Shared state of all handlers.
pub struct AppState {
    pub service: ImprintService,
    pub settings: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub text: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub drawers: Option<Vec<DrawerConfig>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub hash: String,
    pub canvas_size: u32,
    pub image_base64: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Most drawers one create request may name.
pub const MAX_REQUEST_DRAWERS: usize = 8;

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    let error = error.into();
    warn!("⚠️  Request rejected ({}): {}", status, error);
    (status, Json(ErrorResponse { error }))
}

/// Status code for a failed create or parse.
fn status_for(error: &ImprintError) -> StatusCode {
    match error {
        ImprintError::Stego(StegoError::CapacityExceeded { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        ImprintError::Stego(StegoError::PasswordRequired) => StatusCode::UNAUTHORIZED,
        ImprintError::Stego(StegoError::AuthenticationFailed) => StatusCode::FORBIDDEN,
        ImprintError::Stego(StegoError::InvalidCarrier(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        ImprintError::Image(_) => StatusCode::BAD_REQUEST,
    }
}

/// Build the API router.
///
/// # Example
/// ```ignore
/// let app = build_router(Arc::new(AppState { service, settings }));
/// axum::serve(listener, app).await?;
/// ```
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/api/v1/imprint", post(create_handler))
        .route("/api/v1/imprint/parse", post(parse_handler))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "imprint-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request.map_err(|e| error_response(e.status(), e.body_text()))?;

    if request.text.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Text must not be empty"));
    }
    if request.text.len() > state.settings.max_text_bytes {
        return Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Text is {} bytes, the limit is {}",
                request.text.len(),
                state.settings.max_text_bytes
            ),
        ));
    }

    if let Some(drawers) = &request.drawers {
        if drawers.len() > MAX_REQUEST_DRAWERS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!(
                    "At most {} drawers per request, got {}",
                    MAX_REQUEST_DRAWERS,
                    drawers.len()
                ),
            ));
        }
        for drawer in drawers {
            drawer
                .validate()
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
        }
    }

    info!("📥 Imprint request: {} bytes of text", request.text.len());

    let as_json = wants_json(&headers);
    let worker = Arc::clone(&state);

    // Rendering is CPU-bound; keep it off the async runtime
    let (png, fingerprint) = tokio::task::spawn_blocking(move || {
        let png = worker.service.create_png(
            &request.text,
            request.password.as_deref(),
            request.drawers.as_deref(),
        )?;
        let fingerprint = as_json.then(|| worker.service.fingerprint(&request.text));
        Ok::<_, ImprintError>((png, fingerprint))
    })
    .await
    .map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Imprint task panicked: {}", e),
        )
    })?
    .map_err(|e| error_response(status_for(&e), e.to_string()))?;

    info!("✅ Imprint ready: {} PNG bytes", png.len());

    match fingerprint {
        Some(fingerprint) => Ok(Json(CreateResponse {
            hash: fingerprint.hash().to_string(),
            canvas_size: fingerprint.canvas_size,
            image_base64: general_purpose::STANDARD.encode(&png),
        })
        .into_response()),
        None => Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response()),
    }
}

async fn parse_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| error_response(e.status(), e.body_text()))?;

    let mut image_data: Option<Vec<u8>> = None;
    let mut password: Option<String> = None;

    // Parse multipart form data
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(e.status(), format!("Failed to read multipart data: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let data = field.bytes().await.map_err(|e| {
                    error_response(e.status(), format!("Failed to read image data: {}", e.body_text()))
                })?;
                image_data = Some(data.to_vec());
            }
            "password" => {
                let value = field.text().await.map_err(|e| {
                    error_response(e.status(), format!("Failed to read password: {}", e.body_text()))
                })?;
                password = Some(value);
            }
            _ => {}
        }
    }

    let image_data = image_data
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "No file provided"))?;

    info!("📤 Parse request: {} bytes of image", image_data.len());

    let worker = Arc::clone(&state);
    let text = tokio::task::spawn_blocking(move || {
        worker.service.parse_png(&image_data, password.as_deref())
    })
    .await
    .map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Parse task panicked: {}", e),
        )
    })?
    .map_err(|e| error_response(status_for(&e), e.to_string()))?;

    Ok(Json(ParseResponse { text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StegoError::PasswordRequired, StatusCode::UNAUTHORIZED),
            (StegoError::AuthenticationFailed, StatusCode::FORBIDDEN),
            (
                StegoError::InvalidCarrier("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                StegoError::CapacityExceeded {
                    needed_bits: 9,
                    available_bits: 8,
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(status_for(&ImprintError::Stego(error)), status);
        }
    }

    #[test]
    fn test_accept_header_detection() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));
        headers.insert(header::ACCEPT, "text/html, application/json".parse().unwrap());
        assert!(wants_json(&headers));
    }
}
