use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// $5,420.50 is stored as 542050.
pub type Cents = i64;

/// Format cents as a plain decimal string.
/// Example: 542050 -> "5420.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Sum amounts, clamping at the ends of the `Cents` range instead of wrapping.
pub fn sum_cents<I>(amounts: I) -> Cents
where
    I: IntoIterator<Item = Cents>,
{
    amounts.into_iter().fold(0, Cents::saturating_add)
}

/// Format cents the way the dashboard displays balances.
/// Example: 542050 -> "$5,420.50", -1234 -> "-$12.34"
pub fn format_currency(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = (abs_cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, abs_cents % 100)
}

/// Parse a user-entered amount into cents.
///
/// Accepts an optional leading sign, an optional `$`, and `,` thousands
/// separators. More than two decimal places are truncated.
/// Example: "$1,200.5" -> 120050, "100" -> 10000, ".99" -> 99
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

    if rest.is_empty() {
        return Err(ParseCentsError::Empty);
    }

    let (units_str, decimal_str) = match rest.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (rest.as_str(), ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(units_str) || !all_digits(decimal_str) {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::Overflow(input.to_string()))?
    };

    // "5" after the point means 50 cents; anything past two digits is dropped
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().unwrap_or(0) * 10,
        _ => decimal_str[..2].parse().unwrap_or(0),
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or_else(|| ParseCentsError::Overflow(input.to_string()))?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid money format: {0}")]
    InvalidFormat(String),

    #[error("amount out of range: {0}")]
    Overflow(String),
}
