// Display helpers for prices, sizes and dates
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

const MILLIMETERS_PER_INCH: f64 = 25.4;

/// `$1,234.50` for USD; any other currency as `1,234.50 EUR`
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", amount.abs().round_dp(2));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);

    if currency.eq_ignore_ascii_case("USD") {
        format!("{}${}.{}", sign, grouped, cents)
    } else {
        format!("{}{}.{} {}", sign, grouped, cents, currency.to_uppercase())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Inches to whole millimetres, e.g. `10.0` -> `"254 mm"`
pub fn to_millimeters(inches: f64) -> String {
    format!("{} mm", (inches * MILLIMETERS_PER_INCH).round() as i64)
}

/// `2024-05-15T08:56:21.618Z` -> `15 May 2024`.
/// Anything we can't parse comes back untouched.
pub fn format_date(raw: &str) -> String {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
