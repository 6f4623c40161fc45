//! Infrastructure layer: product storage, repository, config.

pub mod config;
pub mod repository;
pub mod store;

pub use repository::{ListQuery, ProductRepository, RepositoryError, RepositoryResult, SortOrder};
pub use store::{InMemoryProductStore, JsonFileStore, ProductStore, StoreError};
