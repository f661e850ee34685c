//! Naming-convention predicates shared by the declaration checks.
//!
//! These are intentionally lenient character-class tests, not full
//! convention validators. Uppercase classification is Unicode-aware,
//! matching the letter classification used across the checker.

/// True if the identifier violates snake_case.
///
/// A single uppercase letter anywhere is sufficient.
pub fn violates_snake_case(name: &str) -> bool {
    name.chars().any(char::is_uppercase)
}

/// True if the identifier violates CamelCase.
///
/// Fires when the name contains no uppercase letter at all, or contains
/// an underscore anywhere. Either condition alone is sufficient, so
/// `My_Class` fails on the underscore even though it is capitalized.
pub fn violates_camel_case(name: &str) -> bool {
    !name.chars().any(char::is_uppercase) || name.contains('_')
}
