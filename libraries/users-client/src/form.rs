//! Client-side form validation.

use crate::view::Field;
use std::collections::BTreeMap;
use users_core::{validate, UserFields, UserInput};

/// Validate the form with the same rules the server applies.
///
/// Returns the normalized fields, or one message per offending field
/// (the first violation found for that field).
pub fn validate_form(name: &str, email: &str) -> Result<UserFields, BTreeMap<Field, String>> {
    validate(&UserInput::new(name, email)).map_err(|errors| {
        let mut by_field = BTreeMap::new();
        for violation in errors.violations() {
            by_field
                .entry(Field::of(*violation))
                .or_insert_with(|| violation.message().to_string());
        }
        by_field
    })
}
