//! Prompt-time input validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Minimal email shape check: one `@`, non-empty local part, and a
/// dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Parse a `YYYY-MM-DD` date that must lie in the future.
pub fn parse_future_date(input: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| "date must be in YYYY-MM-DD format".to_string())?;
    let parsed = date.and_time(NaiveTime::MIN).and_utc();
    if parsed <= Utc::now() {
        return Err("the date must be in the future".into());
    }
    Ok(parsed)
}

pub fn validate_total_amount(total: f64) -> Result<(), String> {
    if !total.is_finite() || total < 0.0 {
        return Err("total amount cannot be negative".into());
    }
    Ok(())
}

pub fn validate_amount_due(due: f64, total: f64) -> Result<(), String> {
    if !due.is_finite() || due < 0.0 {
        return Err("amount due cannot be negative".into());
    }
    if due > total {
        return Err("amount due cannot be greater than the total amount".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("manager@test.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@.example.com"));
    }

    #[test]
    fn rejects_past_and_malformed_dates() {
        assert!(parse_future_date("2001-01-01").is_err());
        assert!(parse_future_date("not-a-date").is_err());
        assert!(parse_future_date("2030-13-40").is_err());
    }

    #[test]
    fn accepts_future_dates() {
        assert!(parse_future_date("2099-06-15").is_ok());
    }

    #[test]
    fn amount_bounds() {
        assert!(validate_total_amount(0.0).is_ok());
        assert!(validate_total_amount(-1.0).is_err());
        assert!(validate_amount_due(50.0, 100.0).is_ok());
        assert!(validate_amount_due(100.0, 100.0).is_ok());
        assert!(validate_amount_due(100.01, 100.0).is_err());
        assert!(validate_amount_due(-0.5, 100.0).is_err());
    }
}
