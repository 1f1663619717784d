use std::sync::Arc;

use crate::application::errors::InventoryUseCaseError;
use crate::application::ports::InventoryRepository;
use crate::domain::entities::{InventoryItem, NewInventoryItem};
use crate::domain::errors::DomainError;

/// Use case: Read and register inventory items
pub struct InventoryUseCase {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryUseCase {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: u64) -> Result<InventoryItem, InventoryUseCaseError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::inventory_item(id).into())
    }

    pub async fn get_by_product_id(
        &self,
        product_id: u64,
    ) -> Result<InventoryItem, InventoryUseCaseError> {
        self.repository
            .find_by_product_id(product_id)
            .await?
            .ok_or_else(|| DomainError::inventory_item_by_product_id(product_id).into())
    }

    /// Register a new item; a product may only hold one.
    ///
    /// The existence check and the insert are not atomic, so a concurrent
    /// create for the same product surfaces as a repository integrity error.
    pub async fn create(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, InventoryUseCaseError> {
        if self
            .repository
            .find_by_product_id(item.product_id)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists_for_product_id(item.product_id).into());
        }

        let created = self.repository.insert(item).await?;
        tracing::info!(
            id = created.id(),
            product_id = created.product_id(),
            "inventory item created"
        );

        Ok(created)
    }
}
