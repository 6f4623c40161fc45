//! Product validation pipeline.
//!
//! Checks run in three stages: per-field syntax (lengths, ranges, formats),
//! per-field semantics (SKU suffix, e-mail allow-list), then cross-field rules.
//! Every check in a stage runs and reports; the first stage with any violation
//! ends the pipeline, so later stages only ever see field-valid records.

use validator::{ValidateEmail, ValidateUrl};

use catalog_core::{DomainError, DomainResult, FieldViolation};

use crate::product::Product;

/// The only currency code the catalog accepts.
pub const SUPPORTED_CURRENCY: &str = "INR";

/// Seller e-mail domains accepted by the catalog. Closed list.
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["apple.in", "sony.in"];

type Check = fn(&Product, &mut Vec<FieldViolation>);

const FIELD_CHECKS: &[Check] = &[
    check_sku_length,
    check_name,
    check_category,
    check_price,
    check_currency,
    check_stock,
    check_rating,
    check_brand,
    check_description,
    check_seller_email_format,
    check_seller_website,
    check_dimensions,
];

const SEMANTIC_CHECKS: &[Check] = &[check_sku_format, check_seller_email_domain];

const CROSS_FIELD_CHECKS: &[Check] = &[check_stock_availability];

/// Run every stage against `product`.
pub fn validate(product: &Product) -> DomainResult<()> {
    for stage in [FIELD_CHECKS, SEMANTIC_CHECKS, CROSS_FIELD_CHECKS] {
        let mut violations = Vec::new();
        for check in stage {
            check(product, &mut violations);
        }
        if !violations.is_empty() {
            tracing::debug!(sku = product.sku(), ?violations, "product failed validation");
            return Err(DomainError::Validation(violations));
        }
    }
    Ok(())
}

fn char_len(field: &'static str, value: &str, min: usize, max: usize, out: &mut Vec<FieldViolation>) {
    let len = value.chars().count();
    if len < min || len > max {
        out.push(FieldViolation::new(
            field,
            format!("length must be between {min} and {max} characters"),
        ));
    }
}

fn check_sku_length(p: &Product, out: &mut Vec<FieldViolation>) {
    char_len("sku", p.sku(), 3, 50, out);
}

fn check_name(p: &Product, out: &mut Vec<FieldViolation>) {
    char_len("name", p.name(), 1, 50, out);
}

fn check_category(p: &Product, out: &mut Vec<FieldViolation>) {
    if p.category().is_empty() {
        out.push(FieldViolation::new("category", "must not be empty"));
    }
}

fn check_price(p: &Product, out: &mut Vec<FieldViolation>) {
    if p.price() <= 0 {
        out.push(FieldViolation::new("price", "must be greater than 0"));
    }
}

fn check_currency(p: &Product, out: &mut Vec<FieldViolation>) {
    if p.currency() != SUPPORTED_CURRENCY {
        out.push(FieldViolation::new(
            "currency",
            format!("must be {SUPPORTED_CURRENCY}"),
        ));
    }
}

fn check_stock(p: &Product, out: &mut Vec<FieldViolation>) {
    if p.stock() < 0 {
        out.push(FieldViolation::new("stock", "must be greater than or equal to 0"));
    }
}

fn check_rating(p: &Product, out: &mut Vec<FieldViolation>) {
    if !(0.0..=5.0).contains(&p.rating()) {
        out.push(FieldViolation::new("rating", "must be between 0 and 5"));
    }
}

fn check_brand(p: &Product, out: &mut Vec<FieldViolation>) {
    char_len("brand", p.brand(), 1, 50, out);
}

fn check_description(p: &Product, out: &mut Vec<FieldViolation>) {
    char_len("description", p.description(), 1, 200, out);
}

fn check_seller_email_format(p: &Product, out: &mut Vec<FieldViolation>) {
    if !p.seller().email.validate_email() {
        out.push(FieldViolation::new("seller.email", "must be a valid email address"));
    }
}

fn check_seller_website(p: &Product, out: &mut Vec<FieldViolation>) {
    if !p.seller().website.validate_url() {
        out.push(FieldViolation::new("seller.website", "must be a valid URL"));
    }
}

fn check_dimensions(p: &Product, out: &mut Vec<FieldViolation>) {
    let d = p.dimensions();
    for (field, value, upper) in [
        ("dimensions.length", d.length, 100.0),
        ("dimensions.width", d.width, 50.0),
        ("dimensions.height", d.height, 50.0),
    ] {
        if !(value > 0.0 && value < upper) {
            out.push(FieldViolation::new(
                field,
                format!("must be greater than 0 and less than {upper}"),
            ));
        }
    }
}

fn check_sku_format(p: &Product, out: &mut Vec<FieldViolation>) {
    let Some((_, tail)) = p.sku().rsplit_once('-') else {
        out.push(FieldViolation::new("sku", "must contain a hyphen"));
        return;
    };
    if tail.len() != 3 || !tail.bytes().all(|b| b.is_ascii_digit()) {
        out.push(FieldViolation::new("sku", "must end with a 3-digit number"));
    }
}

fn check_seller_email_domain(p: &Product, out: &mut Vec<FieldViolation>) {
    let domain = p
        .seller()
        .email
        .rsplit_once('@')
        .map(|(_, d)| d.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EMAIL_DOMAINS.contains(&domain.as_str()) {
        out.push(FieldViolation::new(
            "seller.email",
            format!("domain must be one of: {}", ALLOWED_EMAIL_DOMAINS.join(", ")),
        ));
    }
}

fn check_stock_availability(p: &Product, out: &mut Vec<FieldViolation>) {
    if p.stock() == 0 && p.is_available() {
        out.push(FieldViolation::new(
            "is_available",
            "must be false when stock is 0",
        ));
    }
}
