use crate::api_errors::AppError;
use crate::artifact_loader::LoadReport;
use crate::crop_catalog::{self, CatalogEntry};
use crate::feature_vector::SoilReadings;
use crate::prediction_service::PredictionService;
use crate::result_exporter::{render_display, render_export};
use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Response header carrying the per-request id on export downloads
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub class_id: i64,
    pub crop: String,
    pub advice: String,
    pub display: String,
}

/// Build the router exposing prediction, export, status and health endpoints
pub fn build_router(service: PredictionService) -> Router {
    Router::new()
        // current endpoints
        .route("/api/predict", post(predict))
        .route("/api/predict/export", post(export))
        .route("/api/status", get(status))
        .route("/api/catalog", get(catalog))
        // versioned aliases
        .route("/v1/predict", post(predict))
        .route("/v1/predict/export", post(export))
        .route("/v1/status", get(status))
        .route("/v1/catalog", get(catalog))
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(Extension(service)),
        )
}

async fn predict(
    Extension(service): Extension<PredictionService>,
    Json(readings): Json<SoilReadings>,
) -> Result<Json<PredictResponse>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        let result = service.predict(&readings)?;
        let display = render_display(&result);

        Ok::<_, AppError>(Json(PredictResponse {
            request_id,
            class_id: result.class_id,
            crop: result.crop_label,
            advice: result.advice_text,
            display,
        }))
    }
    .instrument(info_span!("predict", %request_id))
    .await
}

async fn export(
    Extension(service): Extension<PredictionService>,
    Json(readings): Json<SoilReadings>,
) -> Result<impl IntoResponse, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        let result = service.predict(&readings)?;
        let payload = render_export(&result);

        let disposition = format!("attachment; filename=\"{}\"", payload.file_name);
        Ok::<_, AppError>((
            [
                (header::CONTENT_TYPE, payload.mime_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
                (
                    header::HeaderName::from_static(REQUEST_ID_HEADER),
                    request_id.to_string(),
                ),
            ],
            payload.content,
        ))
    }
    .instrument(info_span!("export", %request_id))
    .await
}

async fn status(Extension(service): Extension<PredictionService>) -> Json<LoadReport> {
    Json(service.report().clone())
}

async fn catalog() -> Json<Vec<CatalogEntry>> {
    Json(crop_catalog::entries())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn readyz(Extension(service): Extension<PredictionService>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ready": service.is_ready() }))
}
