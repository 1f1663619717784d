pub mod health;
pub mod inventory;


pub use health::health_handler;
pub use inventory::{
    create_item_handler, fallback_handler, get_by_product_handler, get_item_handler,
    method_not_allowed_handler, openapi_handler,
};
