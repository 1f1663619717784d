use utoipa::OpenApi;

use crate::api::errors::{ErrorCode, ErrorEnvelope};
use crate::api::handlers::health::HealthResponse;
use crate::application::dto::{CreateInventoryItemRequest, InventoryItemDto};

/// OpenAPI specification for the inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Service API",
        version = "1.0.0",
        description = "Inventory items with a uniform error envelope for every failed request"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::inventory::get_item_handler,
        crate::api::handlers::inventory::get_by_product_handler,
        crate::api::handlers::inventory::create_item_handler,
    ),
    components(
        schemas(
            ErrorEnvelope,
            ErrorCode,
            HealthResponse,
            InventoryItemDto,
            CreateInventoryItemRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "inventory", description = "Inventory item operations")
    )
)]
pub struct ApiDoc;
