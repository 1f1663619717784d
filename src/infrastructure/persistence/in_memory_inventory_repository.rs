use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::ports::{InventoryRepository, RepositoryError};
use crate::domain::entities::{InventoryItem, NewInventoryItem};

/// In-process inventory store keyed by item ID with a unique product index
pub struct InMemoryInventoryRepository {
    items: DashMap<u64, InventoryItem>,
    product_index: DashMap<u64, u64>,
    next_id: AtomicU64,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            product_index: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryInventoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<InventoryItem>, RepositoryError> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_product_id(
        &self,
        product_id: u64,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        let Some(id) = self.product_index.get(&product_id).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn insert(&self, item: NewInventoryItem) -> Result<InventoryItem, RepositoryError> {
        // The index entry stays locked until the item is stored
        match self.product_index.entry(item.product_id) {
            Entry::Occupied(_) => Err(RepositoryError::Integrity(format!(
                "duplicate key value violates unique constraint \"inventory_items_product_id_key\": Key (product_id)=({}) already exists",
                item.product_id
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let created = InventoryItem::new(id, item);
                self.items.insert(id, created.clone());
                slot.insert(id);
                Ok(created)
            }
        }
    }
}
