mod inventory;

pub use inventory::InventoryUseCase;
