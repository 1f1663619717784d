use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::Json,
};
use utoipa::OpenApi;

use crate::api::errors::ErrorEnvelope;
use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::failure::ApiFailure;
use crate::api::openapi::ApiDoc;
use crate::application::dto::{CreateInventoryItemRequest, InventoryItemDto, ProductQuery};
use crate::application::use_cases::InventoryUseCase;

/// GET /api/inventory/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "inventory",
    params(("id" = u64, Path, description = "Inventory item ID")),
    responses(
        (status = 200, description = "Item found", body = InventoryItemDto),
        (status = 400, description = "ID is not a number", body = ErrorEnvelope),
        (status = 404, description = "Item not found", body = ErrorEnvelope)
    )
)]
pub async fn get_item_handler(
    State(use_case): State<Arc<InventoryUseCase>>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<InventoryItemDto>, ApiFailure> {
    let item = use_case.get_by_id(id).await?;
    Ok(Json(item.into()))
}

/// GET /api/inventory?productId=
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "inventory",
    params(("productId" = u64, Query, description = "Product ID")),
    responses(
        (status = 200, description = "Item found", body = InventoryItemDto),
        (status = 400, description = "Missing or invalid productId", body = ErrorEnvelope),
        (status = 404, description = "No item for the product", body = ErrorEnvelope)
    )
)]
pub async fn get_by_product_handler(
    State(use_case): State<Arc<InventoryUseCase>>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Result<Json<InventoryItemDto>, ApiFailure> {
    let item = use_case.get_by_product_id(query.product_id).await?;
    Ok(Json(item.into()))
}

/// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "inventory",
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Item created", body = InventoryItemDto),
        (status = 400, description = "Invalid body or integrity violation", body = ErrorEnvelope),
        (status = 409, description = "Product already has an item", body = ErrorEnvelope)
    )
)]
pub async fn create_item_handler(
    State(use_case): State<Arc<InventoryUseCase>>,
    ValidatedJson(request): ValidatedJson<CreateInventoryItemRequest>,
) -> Result<(StatusCode, Json<InventoryItemDto>), ApiFailure> {
    let item = use_case.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Known route, unsupported method. Not part of the client-facing taxonomy,
/// so it surfaces as an unexpected error.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiFailure {
    ApiFailure::Unclassified(anyhow::anyhow!(
        "request method '{}' is not supported for {}",
        method,
        uri.path()
    ))
}

/// Any unmatched route
pub async fn fallback_handler(uri: Uri) -> ApiFailure {
    ApiFailure::NotFound(format!("Recurso no encontrado: {}", uri.path()))
}
