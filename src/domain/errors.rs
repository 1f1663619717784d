use thiserror::Error;

/// Business failures raised by the inventory domain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),
}

impl DomainError {
    pub fn inventory_item(id: u64) -> Self {
        Self::NotFound(format!("Item de inventario {} no encontrado", id))
    }

    pub fn inventory_item_by_product_id(product_id: u64) -> Self {
        Self::NotFound(format!(
            "Item de inventario no encontrado para productId: {}",
            product_id
        ))
    }

    pub fn already_exists_for_product_id(product_id: u64) -> Self {
        Self::AlreadyExists(format!(
            "Ya existe un item de inventario para el productId: {}",
            product_id
        ))
    }
}
