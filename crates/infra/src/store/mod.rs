//! Whole-collection product storage.
//!
//! A store only knows how to read and write the *entire* collection; lookups,
//! filtering and merging happen in memory in the repository.

pub mod in_memory;
pub mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use catalog_core::DomainError;
use catalog_products::Product;

pub use in_memory::InMemoryProductStore;
pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed product document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid product record #{index} in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error("failed to encode products: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Load/save of the full product collection, in document order.
pub trait ProductStore: Send + Sync {
    fn load(&self) -> Result<Vec<Product>, StoreError>;
    fn save(&self, products: &[Product]) -> Result<(), StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        (**self).load()
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        (**self).save(products)
    }
}
