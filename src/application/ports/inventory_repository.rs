use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{InventoryItem, NewInventoryItem};
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A storage constraint rejected the write; carries the driver diagnostic
    #[error("{0}")]
    Integrity(String),
}

/// Port for inventory persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Find item by its own ID
    async fn find_by_id(&self, id: u64) -> Result<Option<InventoryItem>, RepositoryError>;

    /// Find the item held for a product
    async fn find_by_product_id(
        &self,
        product_id: u64,
    ) -> Result<Option<InventoryItem>, RepositoryError>;

    /// Insert a new item, enforcing one item per product
    async fn insert(&self, item: NewInventoryItem) -> Result<InventoryItem, RepositoryError>;
}
