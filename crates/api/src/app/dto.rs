use serde::Serialize;

use catalog_core::ProductId;
use catalog_products::{Product, ProductView};

use crate::app::errors;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductListResponse<'a> {
    pub total_len: usize,
    pub items: Vec<ProductView<'a>>,
}

impl<'a> ProductListResponse<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self {
            total_len: products.len(),
            items: products.iter().map(ProductView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse<'a> {
    pub message: &'static str,
    pub data: ProductView<'a>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo<'a> {
    pub message: &'static str,
    pub data_path: &'a str,
}

// -------------------------
// Path helpers
// -------------------------

pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}
