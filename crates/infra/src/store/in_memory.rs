use std::sync::RwLock;

use catalog_products::Product;

use super::{ProductStore, StoreError};

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(products.clone())
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut current = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        *current = products.to_vec();
        Ok(())
    }
}
