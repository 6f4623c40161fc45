//! Value object trait: equality by value, not identity.
//!
//! Embedded records such as a product's seller contact or physical dimensions
//! have no lifecycle of their own; they are replaced, never updated in place.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values and re-validate it as part of its owner.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
