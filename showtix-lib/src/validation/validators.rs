//! Field validators for the purchase form.
//!
//! Each validator checks one raw value and returns the message to show next
//! to the field when the value is unacceptable.

use std::sync::LazyLock;

use chrono::Datelike;
use chrono::NaiveDate;
use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

static EXPIRATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})$").expect("Invalid regex pattern"));

static CVV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex pattern"));

/// Outcome of a single field check.
pub type FieldResult = Result<(), &'static str>;

/// Number of tickets must be present and at least 1.
pub fn ticket_count(value: Option<i64>) -> FieldResult {
    match value {
        Some(n) if n >= 1 => Ok(()),
        _ => Err("Please enter a valid number of tickets"),
    }
}

pub fn first_name(value: &str) -> FieldResult {
    required(value, "First name is required")
}

pub fn last_name(value: &str) -> FieldResult {
    required(value, "Last name is required")
}

pub fn email(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err("Email is required");
    }
    if !EMAIL.is_match(value) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

/// Only the digits count: `555-123-4567` and `5551234567` are the same number.
pub fn phone_number(value: &str) -> FieldResult {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err("Phone number is required");
    }
    if digits.len() != 10 {
        return Err("Phone number must be 10 digits");
    }
    Ok(())
}

pub fn address(value: &str) -> FieldResult {
    required(value, "Address is required")
}

/// Whitespace between digit groups is ignored; anything else is not.
pub fn card_number(value: &str) -> FieldResult {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err("Credit card number is required");
    }
    if compact.len() != 16 || !compact.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Credit card must be 16 digits");
    }
    Ok(())
}

/// `MM/YY`, not earlier than the month containing `today`.
///
/// A month outside 01-12 is treated as malformed.
pub fn expiration_date(value: &str, today: NaiveDate) -> FieldResult {
    if value.trim().is_empty() {
        return Err("Expiration date is required");
    }
    let Some((month, year)) = parse_expiration(value) else {
        return Err("Format must be MM/YY");
    };
    let Some(expires) = NaiveDate::from_ymd_opt(2000 + year, month, 1) else {
        return Err("Format must be MM/YY");
    };
    let current_month = today.with_day(1).unwrap_or(today);
    if expires < current_month {
        return Err("Card has expired");
    }
    Ok(())
}

pub fn cvv(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err("CVV is required");
    }
    if !CVV.is_match(value) {
        return Err("CVV must be 3 or 4 digits");
    }
    Ok(())
}

/// Strips everything but ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Splits `MM/YY` into month and two-digit year.
fn parse_expiration(value: &str) -> Option<(u32, i32)> {
    let captures = EXPIRATION.captures(value)?;
    let month = captures[1].parse().ok()?;
    let year = captures[2].parse().ok()?;
    Some((month, year))
}

fn required(value: &str, msg: &'static str) -> FieldResult {
    if value.trim().is_empty() { Err(msg) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ticket_count() {
        assert_eq!(ticket_count(Some(1)), Ok(()));
        assert_eq!(ticket_count(Some(12)), Ok(()));
        assert_eq!(ticket_count(Some(0)), Err("Please enter a valid number of tickets"));
        assert_eq!(ticket_count(Some(-2)), Err("Please enter a valid number of tickets"));
        assert_eq!(ticket_count(None), Err("Please enter a valid number of tickets"));
    }

    #[test]
    fn test_names_and_address_are_trimmed() {
        assert_eq!(first_name("   "), Err("First name is required"));
        assert_eq!(last_name(""), Err("Last name is required"));
        assert_eq!(address("\t"), Err("Address is required"));
        assert_eq!(first_name(" Ada "), Ok(()));
    }

    #[test]
    fn test_email() {
        assert_eq!(email(""), Err("Email is required"));
        assert_eq!(email("not-an-email"), Err("Please enter a valid email address"));
        assert_eq!(email("a@b"), Err("Please enter a valid email address"));
        assert_eq!(email("a b@c.d"), Err("Please enter a valid email address"));
        assert_eq!(email("a@@b.c"), Err("Please enter a valid email address"));
        assert_eq!(email("ada@example.com"), Ok(()));
    }

    #[test]
    fn test_phone_number_ignores_punctuation() {
        assert_eq!(phone_number("123-456-7890"), Ok(()));
        assert_eq!(phone_number("1234567890"), Ok(()));
        assert_eq!(phone_number("(123) 456 7890"), Ok(()));
        assert_eq!(phone_number("---"), Err("Phone number is required"));
        assert_eq!(phone_number("123-4567"), Err("Phone number must be 10 digits"));
        assert_eq!(phone_number("1-800-123-45678"), Err("Phone number must be 10 digits"));
    }

    #[test]
    fn test_card_number_ignores_spaces() {
        assert_eq!(card_number("1234 5678 9012 3456"), Ok(()));
        assert_eq!(card_number("1234567890123456"), Ok(()));
        assert_eq!(card_number("  "), Err("Credit card number is required"));
        assert_eq!(card_number("1234-5678-9012-3456"), Err("Credit card must be 16 digits"));
        assert_eq!(card_number("123456789012345"), Err("Credit card must be 16 digits"));
        assert_eq!(card_number("12345678901234ab"), Err("Credit card must be 16 digits"));
    }

    #[test]
    fn test_expiration_date() {
        let today = day(2026, 10, 18);
        assert_eq!(expiration_date("", today), Err("Expiration date is required"));
        assert_eq!(expiration_date("1/27", today), Err("Format must be MM/YY"));
        assert_eq!(expiration_date("01-27", today), Err("Format must be MM/YY"));
        assert_eq!(expiration_date("01/20", today), Err("Card has expired"));
        assert_eq!(expiration_date("09/26", today), Err("Card has expired"));
        assert_eq!(expiration_date("10/26", today), Ok(()));
        assert_eq!(expiration_date("12/99", today), Ok(()));
    }

    #[test]
    fn test_expiration_rejects_bad_month() {
        let today = day(2026, 10, 18);
        assert_eq!(expiration_date("AB/25", today), Err("Format must be MM/YY"));
        assert_eq!(expiration_date("00/30", today), Err("Format must be MM/YY"));
        assert_eq!(expiration_date("13/30", today), Err("Format must be MM/YY"));
    }

    #[test]
    fn test_january_2020_expired_for_any_later_month() {
        for (y, m) in [(2020, 2), (2021, 1), (2030, 12)] {
            assert_eq!(expiration_date("01/20", day(y, m, 1)), Err("Card has expired"));
        }
        assert_eq!(expiration_date("01/20", day(2020, 1, 31)), Ok(()));
    }

    #[test]
    fn test_cvv() {
        assert_eq!(cvv(""), Err("CVV is required"));
        assert_eq!(cvv("12"), Err("CVV must be 3 or 4 digits"));
        assert_eq!(cvv("12345"), Err("CVV must be 3 or 4 digits"));
        assert_eq!(cvv("12a"), Err("CVV must be 3 or 4 digits"));
        assert_eq!(cvv("123"), Ok(()));
        assert_eq!(cvv("1234"), Ok(()));
    }
}
