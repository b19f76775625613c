//! Value objects: equality by value, not identity.

/// An immutable domain value compared field-by-field.
///
/// Implementors derive `PartialEq`, so two values of the same type are equal
/// exactly when every field is equal. Comparing against a value of another
/// type does not type-check, and comparing against an absent value is always
/// `false`.
pub trait ValueObject: Clone + PartialEq + std::fmt::Debug {
  fn equals(&self, other: Option<&Self>) -> bool {
    other.is_some_and(|other| self == other)
  }
}
