use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters that satisfy the password special-character rule.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Counted in `char`s, so an emoji is one character rather than two UTF-16 units.
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_CVV_DIGITS: usize = 4;
pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;

lazy_static! {
    static ref EXPIRY_REGEX: Regex = Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").unwrap();
    static ref CVV_REGEX: Regex = Regex::new(r"^[0-9]{3,4}$").unwrap();
}

/// Outcome of a validation pass. Failures are data, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }
}

/// Card fields as typed into the add-money form. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub card_number: String,
    /// MM/YY
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Check a password against every rule. All rules are evaluated so the
/// caller can show every failure at once.
pub fn validate_password(password: &str) -> ValidationReport {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        errors.push("Password must contain at least one special character".to_string());
    }

    ValidationReport::from_errors(errors)
}

/// Returns true if the card number is 13-19 digits (ignoring spaces and
/// dashes) and passes the Luhn checksum.
pub fn validate_card_number(card_number: &str) -> bool {
    let digits: Vec<u32> = match card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    {
        Some(digits) => digits,
        None => return false,
    };

    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) {
        return false;
    }

    luhn_sum(&digits) % 10 == 0
}

fn luhn_sum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum()
}

/// Check every field of a card. `today` decides whether the card has expired.
pub fn validate_card_details(details: &CardDetails, today: NaiveDate) -> ValidationReport {
    let mut errors = Vec::new();

    if !validate_card_number(&details.card_number) {
        errors.push("Invalid card number".to_string());
    }

    match parse_expiry(&details.expiry_date) {
        None => errors.push("Invalid expiry date (use MM/YY format)".to_string()),
        Some((month, year)) => {
            let current_year = (today.year() % 100) as u32;
            let current_month = today.month();
            if year < current_year || (year == current_year && month < current_month) {
                errors.push("Card has expired".to_string());
            }
        }
    }

    if !CVV_REGEX.is_match(&details.cvv) {
        errors.push("Invalid CVV (must be 3-4 digits)".to_string());
    }

    if details.cardholder_name.trim().is_empty() {
        errors.push("Cardholder name is required".to_string());
    } else if details.cardholder_name.chars().count() < 3 {
        errors.push("Cardholder name is too short".to_string());
    }

    ValidationReport::from_errors(errors)
}

/// Card number as typed into the card form: digits only, in groups of four.
/// "4242-4242 4242.4242" -> "4242 4242 4242 4242"
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expiry as typed into the card form. Once two digits are present a slash
/// follows the month, and anything past the fourth digit is dropped.
/// "1" -> "1", "12" -> "12/", "122599" -> "12/25"
pub fn format_expiry_input(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 2 {
        return digits;
    }
    let year_end = digits.len().min(4);
    format!("{}/{}", &digits[..2], &digits[2..year_end])
}

/// Digits only, at most four of them.
pub fn sanitize_cvv(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_CVV_DIGITS)
        .collect()
}

impl CardDetails {
    /// Build card details from raw form input, normalizing the number, expiry
    /// and CVV the way the card form does before validation.
    pub fn from_input(
        card_number: &str,
        expiry_date: &str,
        cvv: &str,
        cardholder_name: impl Into<String>,
    ) -> Self {
        Self {
            card_number: format_card_number(card_number),
            expiry_date: format_expiry_input(expiry_date),
            cvv: sanitize_cvv(cvv),
            cardholder_name: cardholder_name.into(),
        }
    }
}

/// Split an MM/YY expiry into (month, two-digit year).
fn parse_expiry(expiry: &str) -> Option<(u32, u32)> {
    let caps = EXPIRY_REGEX.captures(expiry)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let year = caps.get(2)?.as_str().parse().ok()?;
    Some((month, year))
}

/// Accepts 7-15 digits once spaces, dashes, parentheses and a single leading
/// `+` are removed.
pub fn validate_mobile_number(mobile: &str) -> bool {
    let trimmed = mobile.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: Option<Vec<char>> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .map(|c| c.is_ascii_digit().then_some(c))
        .collect();

    matches!(digits, Some(d) if (7..=15).contains(&d.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn card(number: &str, expiry: &str, cvv: &str, name: &str) -> CardDetails {
        CardDetails {
            card_number: number.into(),
            expiry_date: expiry.into(),
            cvv: cvv.into(),
            cardholder_name: name.into(),
        }
    }

    #[test]
    fn test_strong_password_passes() {
        let report = validate_password("Secur3!pass");
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_password_reports_every_rule() {
        let report = validate_password("");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 5);
    }

    #[test]
    fn test_password_missing_special() {
        let report = validate_password("Password123");
        assert_eq!(
            report.errors,
            vec!["Password must contain at least one special character"]
        );
    }

    #[test]
    fn test_password_non_ascii_letters_do_not_count() {
        // Only A-Z / a-z satisfy the letter rules
        let report = validate_password("ÄÖÜäöü1!");
        assert!(report.has_error_containing("uppercase"));
        assert!(report.has_error_containing("lowercase"));
        assert!(!report.has_error_containing("8 characters"));
    }

    #[test]
    fn test_unicode_punctuation_is_not_special() {
        let report = validate_password("Abcdefg1¡");
        assert!(report.has_error_containing("special character"));
    }

    #[test]
    fn test_luhn_known_numbers() {
        assert!(validate_card_number("4242424242424242"));
        assert!(!validate_card_number("4242424242424241"));
        assert!(validate_card_number("4242 4242-4242 4242"));
        assert!(validate_card_number("378282246310005"));
    }

    #[test]
    fn test_card_number_shape() {
        assert!(!validate_card_number(""));
        assert!(!validate_card_number("123"));
        assert!(!validate_card_number("abcd123456789012"));
        assert!(!validate_card_number("42424242424242424242"));
    }

    #[test]
    fn test_valid_card_details() {
        let report = validate_card_details(
            &card("4242424242424242", "12/30", "123", "Jane Doe"),
            date("2026-10-19"),
        );
        assert!(report.is_valid, "{:?}", report.errors);
    }

    #[test]
    fn test_expired_card() {
        let report = validate_card_details(
            &card("4242424242424242", "01/20", "123", "Jane Doe"),
            date("2026-10-19"),
        );
        assert_eq!(report.errors, vec!["Card has expired"]);
    }

    #[test]
    fn test_card_expiring_this_month_is_valid() {
        let report = validate_card_details(
            &card("4242424242424242", "10/26", "123", "Jane Doe"),
            date("2026-10-19"),
        );
        assert!(report.is_valid);

        let report = validate_card_details(
            &card("4242424242424242", "09/26", "123", "Jane Doe"),
            date("2026-10-19"),
        );
        assert!(report.has_error_containing("expired"));
    }

    #[test]
    fn test_bad_expiry_format_skips_expiry_check() {
        let report = validate_card_details(
            &card("4242424242424242", "13/25", "123", "Jane Doe"),
            date("2026-10-19"),
        );
        assert_eq!(report.errors, vec!["Invalid expiry date (use MM/YY format)"]);
        assert!(!report.has_error_containing("expired"));
    }

    #[test]
    fn test_all_card_fields_reported_together() {
        let report = validate_card_details(&card("1234", "1/25", "12", "   "), date("2026-10-19"));
        assert_eq!(
            report.errors,
            vec![
                "Invalid card number",
                "Invalid expiry date (use MM/YY format)",
                "Invalid CVV (must be 3-4 digits)",
                "Cardholder name is required",
            ]
        );
    }

    #[test]
    fn test_cvv_and_name_rules() {
        let today = date("2026-10-19");
        assert!(
            validate_card_details(&card("4242424242424242", "12/30", "1234", "Al "), today)
                .is_valid
        );
        let short = validate_card_details(&card("4242424242424242", "12/30", "12a", "Al"), today);
        assert_eq!(
            short.errors,
            vec![
                "Invalid CVV (must be 3-4 digits)",
                "Cardholder name is too short"
            ]
        );
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4242-4242.4242 4242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("42424"), "4242 4");
        assert_eq!(format_card_number("4242"), "4242");
        assert_eq!(format_card_number("card"), "");
        assert!(validate_card_number(&format_card_number("4242x4242x4242x4242")));
    }

    #[test]
    fn test_format_expiry_input() {
        assert_eq!(format_expiry_input(""), "");
        assert_eq!(format_expiry_input("1"), "1");
        assert_eq!(format_expiry_input("12"), "12/");
        assert_eq!(format_expiry_input("122"), "12/2");
        assert_eq!(format_expiry_input("1225"), "12/25");
        assert_eq!(format_expiry_input("12/25"), "12/25");
        assert_eq!(format_expiry_input("122599"), "12/25");
    }

    #[test]
    fn test_sanitize_cvv() {
        assert_eq!(sanitize_cvv("123"), "123");
        assert_eq!(sanitize_cvv("12345"), "1234");
        assert_eq!(sanitize_cvv("1a2b3"), "123");
        assert_eq!(sanitize_cvv(""), "");
    }

    #[test]
    fn test_form_input_is_normalized_before_validation() {
        let details = CardDetails::from_input("4242-4242-4242-4242", "0530", "12345", "Emma Wilson");
        assert_eq!(details.card_number, "4242 4242 4242 4242");
        assert_eq!(details.expiry_date, "05/30");
        assert_eq!(details.cvv, "1234");
        assert!(validate_card_details(&details, date("2025-05-18")).is_valid);

        // A lone month digit never gains a slash, so it stays a format error
        let partial = CardDetails::from_input("4242424242424242", "5", "123", "Emma Wilson");
        assert_eq!(
            validate_card_details(&partial, date("2025-05-18")).errors,
            vec!["Invalid expiry date (use MM/YY format)"]
        );
    }

    #[test]
    fn test_password_length_counts_chars() {
        // Seven chars, even though the emoji is two UTF-16 units
        let report = validate_password("😀Aa1!xy");
        assert_eq!(
            report.errors,
            vec!["Password must be at least 8 characters long"]
        );
    }

    #[test]
    fn test_mobile_numbers() {
        assert!(validate_mobile_number("+1 (555) 123-4567"));
        assert!(validate_mobile_number("5551234"));
        assert!(!validate_mobile_number("555-12"));
        assert!(!validate_mobile_number("555-CALL-NOW"));
        assert!(!validate_mobile_number(""));
    }
}
