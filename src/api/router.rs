use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    create_item_handler, fallback_handler, get_by_product_handler, get_item_handler,
    health_handler, method_not_allowed_handler, openapi_handler,
};
use crate::api::middleware::error_handling::{Dispatcher, ErrorHandlingLayer};
use crate::application::use_cases::InventoryUseCase;

/// Application state container
pub struct AppState {
    pub inventory_use_case: Arc<InventoryUseCase>,
    pub dispatcher: Arc<Dispatcher>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let inventory_state = Arc::clone(&state.inventory_use_case);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .route(
            "/api/inventory",
            get(get_by_product_handler)
                .post(create_item_handler)
                .with_state(Arc::clone(&inventory_state)),
        )
        .route(
            "/api/inventory/{id}",
            get(get_item_handler).with_state(inventory_state),
        )
        // Applies to the routes registered above
        .method_not_allowed_fallback(method_not_allowed_handler)
        .fallback(fallback_handler)
        // Must wrap both fallbacks too, so it is added last
        .layer(ErrorHandlingLayer::new(state.dispatcher))
}
