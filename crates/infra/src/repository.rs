//! Product repository: in-memory operations over a whole-collection store.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use catalog_core::{DomainError, FieldViolation, ProductId};
use catalog_products::{NewProduct, Product, ProductPatch};

use crate::store::{ProductStore, StoreError};

pub const DEFAULT_LIST_LIMIT: usize = 5;
pub const MAX_LIST_LIMIT: usize = 100;
const MAX_NAME_FILTER_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Parameters for [`ProductRepository::list`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Sort by price; `order` is ignored unless this is set.
    pub sort_price: bool,
    pub order: SortOrder,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            name: None,
            sort_price: false,
            order: SortOrder::Asc,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListQuery {
    fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            let len = name.chars().count();
            if len == 0 || len > MAX_NAME_FILTER_LEN {
                violations.push(FieldViolation::new(
                    "name",
                    format!("length must be between 1 and {MAX_NAME_FILTER_LEN} characters"),
                ));
            }
        }
        if !(1..=MAX_LIST_LIMIT).contains(&self.limit) {
            violations.push(FieldViolation::new(
                "limit",
                format!("must be between 1 and {MAX_LIST_LIMIT}"),
            ));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(violations))
        }
    }
}

/// Product catalog operations over a [`ProductStore`].
///
/// Every mutating call loads the entire collection, changes it in memory and
/// saves the entire collection back. Nothing serialises those steps: two
/// concurrent writers can interleave and the last `save` silently discards the
/// other's change (lost update). Callers that need correctness under concurrent
/// writes must add a single-writer lock or an atomic swap-file store.
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filter, sort and truncate the catalog.
    ///
    /// An empty result is reported as `NotFound`, not as an empty list. This
    /// mirrors the behaviour existing clients rely on, but it is unusual for a
    /// collection endpoint and worth revisiting.
    pub fn list(&self, query: &ListQuery) -> RepositoryResult<Vec<Product>> {
        query.validate()?;
        let mut products = self.store.load()?;

        if let Some(name) = &query.name {
            let needle = name.trim().to_lowercase();
            products.retain(|p| p.name().to_lowercase().contains(&needle));
        }

        if products.is_empty() {
            let msg = match &query.name {
                Some(name) => format!("Product with name {name} not found"),
                None => "no products found".to_string(),
            };
            return Err(DomainError::not_found(msg).into());
        }

        if query.sort_price {
            match query.order {
                SortOrder::Asc => products.sort_by_key(|p| p.price()),
                SortOrder::Desc => products.sort_by(|a, b| b.price().cmp(&a.price())),
            }
        }

        products.truncate(query.limit);
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    pub fn get(&self, id: ProductId) -> RepositoryResult<Product> {
        self.store
            .load()?
            .into_iter()
            .find(|p| p.id_typed() == id)
            .ok_or_else(|| not_found(id).into())
    }

    /// Validate `input`, assign id and timestamp, and append it.
    ///
    /// The SKU must not be in use; the collection is left untouched otherwise.
    pub fn create(&self, input: NewProduct) -> RepositoryResult<Product> {
        let product = Product::create(input, ProductId::new(), Utc::now())?;

        let mut products = self.store.load()?;
        if products.iter().any(|p| p.sku() == product.sku()) {
            tracing::info!(sku = product.sku(), "rejected duplicate sku");
            return Err(DomainError::conflict("sku already exists").into());
        }

        products.push(product.clone());
        self.store.save(&products)?;

        tracing::info!(product_id = %product.id_typed(), sku = product.sku(), "product created");
        Ok(product)
    }

    /// Merge `patch` into the stored product and re-validate the merged record.
    pub fn update(&self, id: ProductId, patch: ProductPatch) -> RepositoryResult<Product> {
        let mut products = self.store.load()?;
        let idx = products
            .iter()
            .position(|p| p.id_typed() == id)
            .ok_or_else(|| not_found(id))?;

        if patch.is_empty() {
            tracing::debug!(product_id = %id, "empty patch; document left untouched");
            return Ok(products.swap_remove(idx));
        }

        let new_sku = patch.sku().map(str::to_owned);
        let merged = products[idx].apply_patch(patch)?;

        if let Some(sku) = new_sku {
            if products.iter().any(|p| p.id_typed() != id && p.sku() == sku) {
                return Err(DomainError::conflict("sku already exists").into());
            }
        }

        products[idx] = merged.clone();
        self.store.save(&products)?;

        tracing::info!(product_id = %id, "product updated");
        Ok(merged)
    }

    /// Remove by id and return the removed record. Not idempotent.
    pub fn delete(&self, id: ProductId) -> RepositoryResult<Product> {
        let mut products = self.store.load()?;
        let idx = products
            .iter()
            .position(|p| p.id_typed() == id)
            .ok_or_else(|| not_found(id))?;

        let removed = products.remove(idx);
        self.store.save(&products)?;

        tracing::info!(product_id = %id, sku = removed.sku(), "product deleted");
        Ok(removed)
    }
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::not_found(format!("Product with id {id} not found"))
}
