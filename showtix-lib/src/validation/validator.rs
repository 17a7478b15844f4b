//! Validator builder for fluent validation API.

use chrono::NaiveDate;

use super::result::ValidationResult;
use super::validators;
use super::validators::FieldResult;
use crate::model::Field;
use crate::model::PurchaseRequest;

/// Type alias for validation rule closures.
type Rule<'a, V> = Box<dyn Fn(&V) -> FieldResult + 'a>;

/// Internal representation of a field being validated.
struct FieldEntry<'a> {
    field: Field,
    validate: Box<dyn Fn() -> Option<&'static str> + 'a>,
}

/// Builder for validating multiple form fields.
///
/// Every registered field is checked on [`validate`](Validator::validate), so
/// the result lists all problems at once. Within a field, the first failing
/// rule supplies the message.
///
/// # Example
///
/// ```
/// use showtix_lib::model::Field;
/// use showtix_lib::validation::Validator;
///
/// let result = Validator::new()
///     .field(Field::FirstName, "")
///         .required("First name is required")
///     .field(Field::Email, "ada@example")
///         .required("Email is required")
///         .rule(|v| v.ends_with(".com"), "Please enter a valid email address")
///     .validate();
///
/// assert_eq!(result.len(), 2);
/// ```
pub struct Validator<'a> {
    fields: Vec<FieldEntry<'a>>,
}

impl<'a> Validator<'a> {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to validate.
    pub fn field<V: 'a>(self, field: Field, value: V) -> FieldBuilder<'a, V> {
        FieldBuilder {
            validator: self,
            field,
            value,
            rules: Vec::new(),
        }
    }

    /// Run every field's rules.
    pub fn validate(self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for entry in &self.fields {
            if let Some(message) = (entry.validate)() {
                result.insert(entry.field, message);
            }
        }

        result
    }
}

impl Default for Validator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<'a, V> {
    validator: Validator<'a>,
    field: Field,
    value: V,
    rules: Vec<Rule<'a, V>>,
}

impl<'a, V: 'a> FieldBuilder<'a, V> {
    /// Add a check that produces its own message.
    pub fn check<F>(mut self, f: F) -> Self
    where
        F: Fn(&V) -> FieldResult + 'a,
    {
        self.rules.push(Box::new(f));
        self
    }

    /// Add a predicate rule with a fixed message.
    pub fn rule<F>(self, f: F, msg: &'static str) -> Self
    where
        F: Fn(&V) -> bool + 'a,
    {
        self.check(move |v| if f(v) { Ok(()) } else { Err(msg) })
    }

    /// Continue to the next field.
    pub fn field<V2: 'a>(self, field: Field, value: V2) -> FieldBuilder<'a, V2> {
        self.finalize().field(field, value)
    }

    /// Finalize and run all validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    /// Finalize this field and return the validator.
    fn finalize(self) -> Validator<'a> {
        let FieldBuilder {
            mut validator,
            field,
            value,
            rules,
        } = self;

        validator.fields.push(FieldEntry {
            field,
            validate: Box::new(move || rules.iter().find_map(|rule| rule(&value).err())),
        });

        validator
    }
}

// Built-in rules for text values
impl<'a> FieldBuilder<'a, &'a str> {
    /// Require the field to be non-blank.
    pub fn required(self, msg: &'static str) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }
}

/// Validates a whole purchase request as of `today`.
///
/// The card type is not checked: it always holds one of the accepted values.
pub fn validate_purchase(request: &PurchaseRequest, today: NaiveDate) -> ValidationResult {
    Validator::new()
        .field(Field::TicketCount, request.ticket_count)
        .check(|v| validators::ticket_count(*v))
        .field(Field::FirstName, request.first_name.as_str())
        .check(|v| validators::first_name(v))
        .field(Field::LastName, request.last_name.as_str())
        .check(|v| validators::last_name(v))
        .field(Field::Email, request.email.as_str())
        .check(|v| validators::email(v))
        .field(Field::PhoneNumber, request.phone_number.as_str())
        .check(|v| validators::phone_number(v))
        .field(Field::Address, request.address.as_str())
        .check(|v| validators::address(v))
        .field(Field::CardNumber, request.card_number.as_str())
        .check(|v| validators::card_number(v))
        .field(Field::ExpirationDate, request.expiration_date.as_str())
        .check(move |v| validators::expiration_date(v, today))
        .field(Field::Cvv, request.cvv.as_str())
        .check(|v| validators::cvv(v))
        .validate()
}
