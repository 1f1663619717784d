use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::entities::{InventoryItem, NewInventoryItem};

/// DTO for inventory item responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    pub id: u64,
    pub product_id: u64,
    pub sku: String,
    pub quantity: i64,
    pub created_at: String,
}

impl From<InventoryItem> for InventoryItemDto {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id(),
            product_id: item.product_id(),
            sku: item.sku().to_string(),
            quantity: item.quantity(),
            created_at: item.created_at().to_rfc3339(),
        }
    }
}

/// DTO for create request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
    #[validate(range(min = 1, message = "must be positive"))]
    pub product_id: u64,
    #[validate(custom(function = "validate_not_blank"))]
    pub sku: String,
    #[validate(range(min = 1, message = "must be positive"))]
    pub quantity: i64,
}

impl From<CreateInventoryItemRequest> for NewInventoryItem {
    fn from(req: CreateInventoryItemRequest) -> Self {
        Self {
            product_id: req.product_id,
            sku: req.sku.trim().to_string(),
            quantity: req.quantity,
        }
    }
}

/// Query string for lookups by product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub product_id: u64,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank")
            .with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
