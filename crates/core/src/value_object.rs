//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same values are
/// the same value (`Money`, a calendar date, a parsed field value). They are
/// immutable; "changing" one means building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
