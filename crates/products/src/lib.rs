//! Products domain module (catalog records, validation, derived values).
//!
//! This crate contains business rules for the product catalog, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod patch;
pub mod product;
pub mod validation;
pub mod view;

pub use patch::{DimensionsPatch, ProductPatch, SellerPatch};
pub use product::{Dimensions, FINAL_PRICE_DISCOUNT, NewProduct, Product, Seller};
pub use validation::{ALLOWED_EMAIL_DOMAINS, SUPPORTED_CURRENCY};
pub use view::ProductView;
