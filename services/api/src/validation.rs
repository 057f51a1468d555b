//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate email format: local@domain with at least one dot in the domain
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Coerce a form value to a non-negative price
pub fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid price: {}", value))?;

    if !price.is_finite() || price < 0.0 {
        return Err(format!("Price must be a non-negative number: {}", value));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_emails() {
        assert!(validate_email("ann@x.com").is_ok());
        assert!(validate_email("a.b+tag@sub.domain.org").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("ann").is_err());
        assert!(validate_email("ann@host").is_err());
        assert!(validate_email("ann@@x.com").is_err());
        assert!(validate_email("ann smith@x.com").is_err());
    }

    #[test]
    fn parses_prices() {
        assert_eq!(parse_price("120").unwrap(), 120.0);
        assert_eq!(parse_price(" 99.5 ").unwrap(), 99.5);
        assert_eq!(parse_price("0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_bad_prices() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
    }
}
