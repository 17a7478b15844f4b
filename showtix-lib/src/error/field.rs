//! FieldError for typed purchase form fields

/// Error type for setting a purchase form field from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The raw value is not one of the accepted values for this field.
    #[error("'{value}' is not a valid value for {field}")]
    InvalidValue { field: &'static str, value: String },
}

impl FieldError {
    /// Creates a new invalid value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
