//! API endpoint tests
//!
//! Every request goes through the full router, so each failure is rendered
//! by the error-handling layer exactly as a client would receive it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use inventory_service::api::create_router;
use inventory_service::api::middleware::error_handling::{
    Dispatcher, ErrorHandlingConfig, RecordingFailureLogger, Severity,
};
use inventory_service::api::router::AppState;
use inventory_service::infrastructure::persistence::InMemoryInventoryRepository;
use inventory_service::use_cases::InventoryUseCase;

fn setup_test_api_server() -> (Router, Arc<RecordingFailureLogger>) {
    let logger = Arc::new(RecordingFailureLogger::new());
    let dispatcher = Arc::new(Dispatcher::new(
        ErrorHandlingConfig::default(),
        logger.clone(),
    ));
    let repository = Arc::new(InMemoryInventoryRepository::new());

    let app = create_router(AppState {
        inventory_use_case: Arc::new(InventoryUseCase::new(repository)),
        dispatcher,
    });

    (app, logger)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json_response(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

fn assert_envelope(json: &serde_json::Value, status: u16, code: &str, path: &str) {
    assert_eq!(json.as_object().unwrap().len(), 5, "envelope: {json}");
    assert_eq!(json["status"], status);
    assert_eq!(json["code"], code);
    assert_eq!(json["path"], path);
    assert!(json["timestamp"].is_string());
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn api_test_health_endpoint() {
    let (app, logger) = setup_test_api_server();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json_response(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(logger.records().is_empty());
}

#[tokio::test]
async fn api_test_openapi_specification() {
    let (app, _) = setup_test_api_server();

    let response = app
        .oneshot(get_request("/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json_response(response).await;
    assert!(json["openapi"].is_string());
    assert!(json["components"]["schemas"]["ErrorEnvelope"].is_object());
}

#[tokio::test]
async fn api_test_create_then_fetch() {
    let (app, logger) = setup_test_api_server();

    let create = json_request(
        Method::POST,
        "/api/inventory",
        json!({"productId": 10, "sku": "SKU-10", "quantity": 4}),
    );
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json_response(response).await;
    assert_eq!(created["productId"], 10);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/inventory/{}", created["id"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/inventory?productId=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json_response(response).await["sku"], "SKU-10");

    assert!(logger.records().is_empty());
}

#[tokio::test]
async fn api_test_item_not_found() {
    let (app, logger) = setup_test_api_server();

    let response = app.oneshot(get_request("/api/inventory/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 404, "RESOURCE_NOT_FOUND", "/api/inventory/42");
    assert_eq!(json["message"], "Item de inventario 42 no encontrado");

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Warning);
}

#[tokio::test]
async fn api_test_duplicate_product_is_conflict() {
    let (app, _) = setup_test_api_server();
    let body = json!({"productId": 7, "sku": "SKU-7", "quantity": 1});

    let first = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/inventory", body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(Method::POST, "/api/inventory", body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = extract_json_response(second).await;
    assert_envelope(&json, 409, "INVENTORY_ITEM_EXISTS", "/api/inventory");
    assert_eq!(
        json["message"],
        "Ya existe un item de inventario para el productId: 7"
    );
}

#[tokio::test]
async fn api_test_field_validation() {
    let (app, logger) = setup_test_api_server();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/inventory",
            json!({"productId": 3, "sku": " ", "quantity": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 400, "VALIDATION_ERROR", "/api/inventory");
    assert_eq!(
        json["message"],
        "quantity: must be positive; sku: must not be blank"
    );
    assert_eq!(logger.records()[0].severity, Severity::Warning);
}

#[tokio::test]
async fn api_test_missing_query_parameter() {
    let (app, _) = setup_test_api_server();

    let response = app.oneshot(get_request("/api/inventory")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 400, "MISSING_PARAMETER", "/api/inventory");
    assert_eq!(json["message"], "Parámetro requerido faltante: productId");
}

#[tokio::test]
async fn api_test_path_type_mismatch() {
    let (app, _) = setup_test_api_server();

    let response = app
        .oneshot(get_request("/api/inventory/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 400, "TYPE_MISMATCH", "/api/inventory/abc");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("El parámetro 'id' debe ser de tipo "));
}

#[tokio::test]
async fn api_test_malformed_json_body() {
    let (app, _) = setup_test_api_server();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/inventory")
        .header("content-type", "application/json")
        .body(Body::from("{\"productId\": 1, \"sku\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 400, "INVALID_REQUEST_BODY", "/api/inventory");
    assert_eq!(json["message"], "Error al parsear JSON: formato inválido");
}

#[tokio::test]
async fn api_test_body_without_json_content_type() {
    let (app, _) = setup_test_api_server();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/inventory")
        .body(Body::from("productId=1"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 400, "INVALID_REQUEST_BODY", "/api/inventory");
    assert_eq!(
        json["message"],
        "El cuerpo de la petición no es válido. Verifica el formato JSON."
    );
}

#[tokio::test]
async fn api_test_unknown_route_uses_envelope() {
    let (app, _) = setup_test_api_server();

    let response = app.oneshot(get_request("/v1/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 404, "RESOURCE_NOT_FOUND", "/v1/unknown");
}

#[tokio::test]
async fn api_test_query_type_mismatch() {
    let (app, logger) = setup_test_api_server();

    for uri in ["/api/inventory?productId=abc", "/api/inventory?productId=-1"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = extract_json_response(response).await;
        assert_envelope(&json, 400, "TYPE_MISMATCH", "/api/inventory");
        assert_eq!(
            json["message"],
            "El parámetro 'productId' debe ser de tipo desconocido"
        );
    }

    assert!(logger
        .records()
        .iter()
        .all(|record| record.severity == Severity::Warning));
}

#[tokio::test]
async fn api_test_unsupported_method_uses_envelope() {
    let (app, logger) = setup_test_api_server();

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/inventory/1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = extract_json_response(response).await;
    assert_envelope(&json, 500, "INTERNAL_SERVER_ERROR", "/api/inventory/1");
    assert_eq!(
        json["message"],
        "Ocurrió un error inesperado. Por favor, contacta al administrador del sistema."
    );

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert!(records[0].diagnostic.as_deref().unwrap().contains("DELETE"));
}
