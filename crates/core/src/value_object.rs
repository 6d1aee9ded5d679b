//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are validated once, at construction.
/// A `Price` of 50.0 is the same price wherever it appears; a `Product` with
/// a given id is the same product even after its price changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
