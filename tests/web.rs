// tests/web.rs
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use crop_advisor::artifact_loader::PredictionContext;
use crop_advisor::errors::ModelResult;
use crop_advisor::model::Classifier;
use crop_advisor::prediction_service::PredictionService;
use crop_advisor::web::{build_router, PredictResponse, REQUEST_ID_HEADER};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

/// Picks class 20 (Cotton) when rainfall is high, 1 (Rice) otherwise
struct RainfallRule;

impl Classifier for RainfallRule {
    fn predict(&self, features: &[f64]) -> ModelResult<i64> {
        Ok(if features[6] > 100.0 { 1 } else { 20 })
    }

    fn describe(&self) -> String {
        "rainfall rule".to_string()
    }
}

fn ready_app() -> Router {
    let context = PredictionContext::from_parts(Some(Arc::new(RainfallRule)), None);
    build_router(PredictionService::new(Arc::new(context)))
}

fn unready_app() -> Router {
    build_router(PredictionService::new(Arc::new(PredictionContext::from_parts(
        None, None,
    ))))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn predict_returns_crop_and_advice() {
    let req = post_json(
        "/api/predict",
        json!({"n": 90, "p": 42, "k": 43, "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9}),
    );

    let response = ready_app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: PredictResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed.class_id, 1);
    assert_eq!(parsed.crop, "Rice");
    assert!(parsed.display.contains("Recommended Crop: Rice"));
    assert!(parsed.advice.contains("Ensure proper irrigation and soil fertility."));
}

#[tokio::test]
async fn each_request_gets_its_own_id() {
    let app = ready_app();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/predict", json!({"rainfall": 10.0})))
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: PredictResponse = serde_json::from_slice(&body).unwrap();
        ids.push(parsed.request_id);
    }
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn missing_fields_default_to_zero() {
    let response = ready_app()
        .oneshot(post_json("/v1/predict", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: PredictResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed.crop, "Cotton");
}

#[tokio::test]
async fn export_is_plain_text_attachment() {
    let response = ready_app()
        .oneshot(post_json("/api/predict/export", json!({"rainfall": 250.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"crop_prediction.txt\""
    );
    let request_id = headers[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        text,
        "Recommended Crop: Rice\n\nSuggestions:\n- Ensure proper irrigation and soil fertility.\n- Maintain correct pH and nutrients.\n- Monitor rainfall & humidity."
    );
}

#[tokio::test]
async fn unready_service_answers_503() {
    let response = unready_app()
        .oneshot(post_json("/api/predict", json!({"n": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_val: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json_val["error"].as_str().unwrap().contains("Model unavailable"));
}

#[tokio::test]
async fn unready_service_offers_no_export() {
    let response = unready_app()
        .oneshot(post_json("/api/predict/export", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
}

#[tokio::test]
async fn readyz_reflects_classifier() {
    for (app, expected) in [(ready_app(), true), (unready_app(), false)] {
        let req = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json_val: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json_val["ready"], expected);
    }
}

#[tokio::test]
async fn catalog_lists_all_crops() {
    let req = Request::builder().uri("/api/catalog").body(Body::empty()).unwrap();
    let response = ready_app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(entries.len(), 22);
    assert_eq!(entries[13], json!({"id": 14, "name": "Watermelon"}));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let req = Request::builder()
        .uri("/api/predict")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"n\": \"lots\"}"))
        .unwrap();

    let response = ready_app().oneshot(req).await.unwrap();
    assert!(response.status().is_client_error());
}
