use std::sync::Arc;

use tokio::task::JoinError;

use catalog_infra::{ProductRepository, ProductStore, RepositoryResult};

/// Repository behind the API; the store is chosen at startup.
pub type Products = ProductRepository<Arc<dyn ProductStore>>;

/// Shared handler state.
pub struct AppServices {
    pub products: Products,
    /// Human-readable location of the backing document (for the service banner).
    pub data_path: String,
}

impl AppServices {
    pub fn new(products: Products, data_path: impl Into<String>) -> Self {
        Self {
            products,
            data_path: data_path.into(),
        }
    }

    /// Run a repository operation on the blocking pool.
    ///
    /// Stores do synchronous file IO, which must stay off the async workers.
    pub async fn with_products<T, F>(self: Arc<Self>, op: F) -> Result<RepositoryResult<T>, JoinError>
    where
        F: FnOnce(&Products) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || op(&self.products)).await
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::{DomainError, ProductId};
    use catalog_infra::{InMemoryProductStore, ListQuery, RepositoryError};

    use super::*;

    fn services() -> Arc<AppServices> {
        let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
        Arc::new(AppServices::new(ProductRepository::new(store), "memory"))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn repository_calls_run_off_the_async_worker() {
        let services = services();
        let worker = std::thread::current().id();

        let ran_on = services
            .clone()
            .with_products(|_| Ok(std::thread::current().id()))
            .await
            .unwrap()
            .unwrap();
        assert_ne!(ran_on, worker);

        let err = services
            .with_products(move |p| p.get(ProductId::new()))
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_results_come_back_through_the_pool() {
        let err = services()
            .with_products(|p| p.list(&ListQuery::default()))
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Domain(DomainError::NotFound(_))));
    }
}
