use std::collections::BTreeMap;

use crate::model::Field;

/// Field-level validation errors for one pass over a form.
///
/// Keyed by [`Field`], so iteration follows form order. An empty result means
/// the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    /// Get the error message for a field (if any).
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Get the first invalid field in form order (for focusing).
    pub fn first_invalid(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Remove the error for one field. Returns `true` if there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    /// Record an error; the first message recorded for a field wins.
    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

impl FromIterator<(Field, String)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut result = Self::default();
        for (field, message) in iter {
            result.insert(field, message);
        }
        result
    }
}
