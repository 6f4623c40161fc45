//! Sparse product updates.

use serde::Deserialize;

use catalog_core::{DomainResult, SellerId};

use crate::product::{Dimensions, Product, Seller};

/// Sparse set of field assignments. `None` (or an absent / `null` JSON field)
/// leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub stock: Option<i64>,
    pub rating: Option<f64>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub seller: Option<SellerPatch>,
    pub dimensions: Option<DimensionsPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SellerPatch {
    pub seller_id: Option<SellerId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionsPatch {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl SellerPatch {
    fn merge_into(self, seller: &mut Seller) {
        assign(&mut seller.seller_id, self.seller_id);
        assign(&mut seller.name, self.name);
        assign(&mut seller.email, self.email);
        assign(&mut seller.website, self.website);
    }
}

impl DimensionsPatch {
    fn merge_into(self, dims: &mut Dimensions) {
        assign(&mut dims.length, self.length);
        assign(&mut dims.width, self.width);
        assign(&mut dims.height, self.height);
    }
}

impl ProductPatch {
    /// True when the patch assigns nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// SKU the patch would move the product to, if any.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }
}

impl Product {
    /// Merge `patch` into a copy of this product and validate the merged record as
    /// a whole. Cross-field rules can break on one-sided patches (e.g. `stock: 0`
    /// against an available product), so every rule is re-run, not only the
    /// touched fields. `self` is never modified.
    pub fn apply_patch(&self, patch: ProductPatch) -> DomainResult<Product> {
        let mut merged = self.clone();
        let fields = merged.fields_mut();

        assign(fields.sku, patch.sku);
        assign(fields.name, patch.name);
        assign(fields.category, patch.category);
        assign(fields.price, patch.price);
        assign(fields.currency, patch.currency);
        assign(fields.stock, patch.stock);
        assign(fields.rating, patch.rating);
        assign(fields.brand, patch.brand);
        assign(fields.description, patch.description);
        assign(fields.is_available, patch.is_available);
        if let Some(seller) = patch.seller {
            seller.merge_into(fields.seller);
        }
        if let Some(dims) = patch.dimensions {
            dims.merge_into(fields.dimensions);
        }

        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use catalog_core::{DomainError, Entity, ProductId};

    use super::*;
    use crate::product::fixtures::new_product;

    fn stored() -> Product {
        Product::create(new_product("tv-bra-055"), ProductId::new(), Utc::now()).unwrap()
    }

    #[test]
    fn only_supplied_fields_change() {
        let original = stored();
        let patch = ProductPatch {
            name: Some("Bravia 65".to_string()),
            price: Some(90_000),
            ..Default::default()
        };

        let merged = original.apply_patch(patch).unwrap();
        assert_eq!(merged.name(), "Bravia 65");
        assert_eq!(merged.price(), 90_000);
        assert_eq!(merged.final_price(), 80_000);
        assert_eq!(merged.sku(), original.sku());
        assert_eq!(merged.seller(), original.seller());
        assert_eq!(merged.id(), original.id());
        assert_eq!(merged.created_at(), original.created_at());
    }

    #[test]
    fn zero_stock_against_available_record_fails_cross_field_check() {
        let original = stored();
        assert!(original.is_available());

        let err = original
            .apply_patch(ProductPatch {
                stock: Some(0),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.violations()[0].field, "is_available");
        assert_eq!(original.stock(), 12);
    }

    #[test]
    fn zero_stock_with_unavailable_is_accepted() {
        let merged = stored()
            .apply_patch(ProductPatch {
                stock: Some(0),
                is_available: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(merged.stock(), 0);
        assert!(!merged.is_available());
    }

    #[test]
    fn nested_patches_merge_per_field() {
        let original = stored();
        let merged = original
            .apply_patch(ProductPatch {
                seller: Some(SellerPatch {
                    email: Some("sales@apple.in".to_string()),
                    ..Default::default()
                }),
                dimensions: Some(DimensionsPatch {
                    height: Some(10.0),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(merged.seller().email, "sales@apple.in");
        assert_eq!(merged.seller().name, original.seller().name);
        assert_eq!(merged.dimensions().height, 10.0);
        assert_eq!(merged.volume(), 90.0 * 20.0 * 10.0);
    }

    #[test]
    fn patched_seller_email_is_rechecked_against_allow_list() {
        let err = stored()
            .apply_patch(ProductPatch {
                seller: Some(SellerPatch {
                    email: Some("user@gmail.com".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "seller.email");
    }

    #[test]
    fn patch_cannot_carry_id_or_created_at() {
        for body in [r#"{"id":"73cbdd06-5668-4e52-b172-e765f8468398"}"#, r#"{"created_at":"2024-01-01T00:00:00Z"}"#, r#"{"volume":1.0}"#] {
            assert!(serde_json::from_str::<ProductPatch>(body).is_err(), "{body}");
        }
        assert!(serde_json::from_str::<ProductPatch>("{}").unwrap().is_empty());
    }
}
