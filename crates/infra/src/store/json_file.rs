use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use catalog_products::Product;

use super::{ProductStore, StoreError};

/// Products kept as one pretty-printed JSON array on disk.
///
/// Every `save` rewrites the whole file in place. There is no temp-file swap and
/// no lock, so a crash mid-write or two concurrent writers can leave the
/// document truncated or lose one writer's changes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "product document missing; starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        // Hand-edited documents can hold records no API call could have produced.
        for (index, product) in products.iter().enumerate() {
            product.validate().map_err(|source| StoreError::Invalid {
                path: self.path.clone(),
                index,
                source,
            })?;
        }
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(products).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, body).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), count = products.len(), "product document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use catalog_core::{ProductId, SellerId};
    use catalog_products::{Dimensions, NewProduct, Seller};

    use super::*;

    fn product(sku: &str) -> Product {
        let input = NewProduct {
            sku: sku.to_string(),
            name: "AirPods Pro".to_string(),
            category: "audio".to_string(),
            price: 24_900,
            currency: None,
            stock: 3,
            rating: 4.7,
            brand: "Apple".to_string(),
            description: "Wireless earbuds".to_string(),
            is_available: true,
            seller: Seller {
                seller_id: SellerId::new(),
                name: "Apple Store".to_string(),
                email: "store@apple.in".to_string(),
                website: "https://www.apple.com/in".to_string(),
            },
            dimensions: Dimensions {
                length: 6.0,
                width: 4.5,
                height: 2.1,
            },
        };
        Product::create(input, ProductId::new(), Utc::now()).unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("products.json"));
        let products = vec![product("aud-air-001"), product("aud-air-002")];

        store.save(&products).unwrap();
        assert_eq!(store.load().unwrap(), products);
    }

    #[test]
    fn document_never_contains_derived_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        store.save(&[product("aud-air-001")]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let record = &raw.as_array().unwrap()[0];
        assert!(record.get("final_price").is_none());
        assert!(record.get("volume").is_none());
        assert!(record.get("created_at").is_some());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn out_of_range_price_on_disk_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        store.save(&[product("aud-air-001"), product("aud-air-002")]).unwrap();

        let mut raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        raw[1]["price"] = serde_json::json!(i64::MIN);
        fs::write(store.path(), raw.to_string()).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Invalid { index: 1, .. }));
        assert!(err.to_string().contains("price"));
    }
}
