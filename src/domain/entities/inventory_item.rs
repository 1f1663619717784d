use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory item - stock held for a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: u64,
    product_id: u64,
    sku: String,
    quantity: i64,
    created_at: DateTime<Utc>,
}

/// Item data before the repository assigns an ID
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub product_id: u64,
    pub sku: String,
    pub quantity: i64,
}

impl InventoryItem {
    /// Create a new item stamped with the current time
    pub fn new(id: u64, item: NewInventoryItem) -> Self {
        Self {
            id,
            product_id: item.product_id,
            sku: item.sku,
            quantity: item.quantity,
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
