//! The purchase request sent to the purchases endpoint

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::ShowId;
use crate::error::FieldError;

/// Credit card brands accepted at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Visa,
    Mastercard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
}

impl CardType {
    /// All card types, in the order they are offered.
    pub const ALL: [CardType; 4] = [
        CardType::Visa,
        CardType::Mastercard,
        CardType::AmericanExpress,
        CardType::Discover,
    ];

    /// Display name, identical to the wire value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" => Ok(Self::Mastercard),
            "american express" | "amex" => Ok(Self::AmericanExpress),
            "discover" => Ok(Self::Discover),
            _ => Err(FieldError::invalid_value(Field::CardType.wire_name(), s)),
        }
    }
}

/// An editable field of the purchase form.
///
/// Ordered the way the form presents them; validation errors are reported in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TicketCount,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Address,
    CardType,
    CardNumber,
    ExpirationDate,
    Cvv,
}

impl Field {
    /// Every editable field, in form order.
    pub const ALL: [Field; 10] = [
        Field::TicketCount,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::PhoneNumber,
        Field::Address,
        Field::CardType,
        Field::CardNumber,
        Field::ExpirationDate,
        Field::Cvv,
    ];

    /// The JSON property name used by the purchases endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::TicketCount => "NumTicketsOrdered",
            Self::FirstName => "CustFirstName",
            Self::LastName => "CustLastName",
            Self::Email => "CustEmail",
            Self::PhoneNumber => "PhoneNumber",
            Self::Address => "Address",
            Self::CardType => "CreditCardType",
            Self::CardNumber => "CreditCardNumber",
            Self::ExpirationDate => "ExpirationDate",
            Self::Cvv => "CVV",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::TicketCount => "Number of Tickets",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Address",
            Self::CardType => "Credit Card Type",
            Self::CardNumber => "Credit Card Number",
            Self::ExpirationDate => "Expiration Date (MM/YY)",
            Self::Cvv => "CVV",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Everything the customer entered for one purchase attempt.
///
/// Text fields hold exactly what was typed; normalisation (digit stripping)
/// happens only inside validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    #[serde(rename = "ShowId")]
    pub show_id: ShowId,
    #[serde(rename = "NumTicketsOrdered")]
    pub ticket_count: Option<i64>,
    #[serde(rename = "CustFirstName")]
    pub first_name: String,
    #[serde(rename = "CustLastName")]
    pub last_name: String,
    #[serde(rename = "CustEmail")]
    pub email: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "CreditCardType")]
    pub card_type: CardType,
    #[serde(rename = "CreditCardNumber")]
    pub card_number: String,
    #[serde(rename = "ExpirationDate")]
    pub expiration_date: String,
    #[serde(rename = "CVV")]
    pub cvv: String,
}

impl PurchaseRequest {
    /// Creates a blank request for a show: one ticket, Visa, everything else empty.
    pub fn new(show_id: impl Into<ShowId>) -> Self {
        Self {
            show_id: show_id.into(),
            ticket_count: Some(1),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            address: String::new(),
            card_type: CardType::default(),
            card_number: String::new(),
            expiration_date: String::new(),
            cvv: String::new(),
        }
    }

    /// Returns the current value of a field as the user would see it.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::TicketCount => self.ticket_count.map(|n| n.to_string()).unwrap_or_default(),
            Field::FirstName => self.first_name.clone(),
            Field::LastName => self.last_name.clone(),
            Field::Email => self.email.clone(),
            Field::PhoneNumber => self.phone_number.clone(),
            Field::Address => self.address.clone(),
            Field::CardType => self.card_type.to_string(),
            Field::CardNumber => self.card_number.clone(),
            Field::ExpirationDate => self.expiration_date.clone(),
            Field::Cvv => self.cvv.clone(),
        }
    }

    /// Sets a field from raw input.
    ///
    /// A ticket count that is not an integer becomes absent. An unknown card
    /// type is rejected and leaves the request unchanged.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        match field {
            Field::TicketCount => self.ticket_count = raw.trim().parse().ok(),
            Field::FirstName => self.first_name = raw.to_string(),
            Field::LastName => self.last_name = raw.to_string(),
            Field::Email => self.email = raw.to_string(),
            Field::PhoneNumber => self.phone_number = raw.to_string(),
            Field::Address => self.address = raw.to_string(),
            Field::CardType => self.card_type = raw.parse()?,
            Field::CardNumber => self.card_number = raw.to_string(),
            Field::ExpirationDate => self.expiration_date = raw.to_string(),
            Field::Cvv => self.cvv = raw.to_string(),
        }
        Ok(())
    }
}
