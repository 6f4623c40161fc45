//! Read-side representation: stored fields plus derived values.

use serde::Serialize;

use crate::product::Product;

/// What callers see when reading a product.
///
/// `final_price` and `volume` are computed here on every read and never written
/// back to storage.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub final_price: i64,
    pub volume: f64,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            final_price: product.final_price(),
            volume: product.volume(),
        }
    }
}
