//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Constructors are expected to validate, so holding a value
/// object means holding a valid value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CompanyName(String);
///
/// impl ValueObject for CompanyName {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
