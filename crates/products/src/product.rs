use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{DomainResult, Entity, ProductId, SellerId, ValueObject};

use crate::validation::{self, SUPPORTED_CURRENCY};

/// Amount knocked off the list price when computing `final_price`.
pub const FINAL_PRICE_DISCOUNT: i64 = 10_000;

/// Seller contact embedded in a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seller {
    pub seller_id: SellerId,
    pub name: String,
    pub email: String,
    pub website: String,
}

impl ValueObject for Seller {}

/// Physical dimensions of a product (all bounds exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl ValueObject for Dimensions {}

impl Dimensions {
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// Raw input for creating a product.
///
/// `id` and `created_at` are system-assigned and derived values are never
/// accepted, so unknown fields are rejected outright.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub stock: i64,
    pub rating: f64,
    pub brand: String,
    pub description: String,
    pub is_available: bool,
    pub seller: Seller,
    pub dimensions: Dimensions,
}

/// Catalog product, as persisted.
///
/// A `Product` is only ever produced by [`Product::create`] or
/// [`Product::apply_patch`], both of which run the full validation pipeline, or
/// by deserializing a previously persisted record (stores re-validate on load).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    category: String,
    price: i64,
    currency: String,
    stock: i64,
    rating: f64,
    brand: String,
    description: String,
    is_available: bool,
    seller: Seller,
    dimensions: Dimensions,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Build and validate a new product. Nothing is returned unless every rule passes.
    pub fn create(
        input: NewProduct,
        id: ProductId,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let product = Self {
            id,
            sku: input.sku,
            name: input.name,
            category: input.category,
            price: input.price,
            currency: input
                .currency
                .unwrap_or_else(|| SUPPORTED_CURRENCY.to_string()),
            stock: input.stock,
            rating: input.rating,
            brand: input.brand,
            description: input.description,
            is_available: input.is_available,
            seller: input.seller,
            dimensions: input.dimensions,
            created_at,
        };
        product.validate()?;
        Ok(product)
    }

    /// Run the full validation pipeline against this record.
    pub fn validate(&self) -> DomainResult<()> {
        validation::validate(self)
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// List price minus the flat catalog discount. May be negative for cheap items;
    /// clamps at `i64::MIN` instead of overflowing.
    pub fn final_price(&self) -> i64 {
        self.price.saturating_sub(FINAL_PRICE_DISCOUNT)
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    pub(crate) fn fields_mut(&mut self) -> ProductFieldsMut<'_> {
        ProductFieldsMut {
            sku: &mut self.sku,
            name: &mut self.name,
            category: &mut self.category,
            price: &mut self.price,
            currency: &mut self.currency,
            stock: &mut self.stock,
            rating: &mut self.rating,
            brand: &mut self.brand,
            description: &mut self.description,
            is_available: &mut self.is_available,
            seller: &mut self.seller,
            dimensions: &mut self.dimensions,
        }
    }
}

/// Mutable view over the patchable fields. `id` and `created_at` are deliberately absent.
pub(crate) struct ProductFieldsMut<'a> {
    pub sku: &'a mut String,
    pub name: &'a mut String,
    pub category: &'a mut String,
    pub price: &'a mut i64,
    pub currency: &'a mut String,
    pub stock: &'a mut i64,
    pub rating: &'a mut f64,
    pub brand: &'a mut String,
    pub description: &'a mut String,
    pub is_available: &'a mut bool,
    pub seller: &'a mut Seller,
    pub dimensions: &'a mut Dimensions,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
