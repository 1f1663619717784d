mod inventory_repository;

pub use inventory_repository::{InventoryRepository, RepositoryError};

#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
