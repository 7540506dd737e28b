//! Compiled patterns and parsing primitives shared across the normalizer
//! and rule predicates. All regexes compile once.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::DateLocale;

lazy_static! {
    /// Valid HS code: 6 to 10 digits, checked against the digits-only
    /// projection of the raw value so dotted forms ("8471.30.00") pass.
    pub static ref HS_CODE: Regex = Regex::new(r"^\d{6,10}$").unwrap();

    /// ISO 4217 codes seen on commercial invoices. RMB is a common alias
    /// for CNY on Chinese export paperwork.
    static ref CURRENCY_CODE: Regex = Regex::new(
        r"(?i)\b(USD|EUR|GBP|JPY|CNY|RMB|HKD|SGD|AUD|CAD|CHF|KRW|INR|TWD|THB|VND|MYR|IDR|MXN|BRL|NZD|SEK|NOK|DKK|PLN|AED)\b",
    )
    .unwrap();

    /// First numeric token, thousands separators allowed.
    static ref AMOUNT: Regex = Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?").unwrap();

    /// First run of digits after separator stripping.
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn currency_from_symbol(raw: &str) -> Option<&'static str> {
    for ch in raw.chars() {
        match ch {
            '$' => return Some("USD"),
            '€' => return Some("EUR"),
            '£' => return Some("GBP"),
            '¥' => return Some("JPY"),
            _ => {}
        }
    }
    None
}

/// Parse a monetary value like `USD 10,000.50`, `$1,234.56` or `10000 EUR`.
/// Returns the amount and the resolved currency, if any. `None` when no
/// numeric token is present.
pub fn parse_money(raw: &str) -> Option<(f64, Option<String>)> {
    let amount_match = AMOUNT.find(raw)?;
    let amount: f64 = amount_match.as_str().replace(',', "").parse().ok()?;

    let currency = CURRENCY_CODE
        .find(raw)
        .map(|m| {
            let code = m.as_str().to_uppercase();
            if code == "RMB" {
                "CNY".to_string()
            } else {
                code
            }
        })
        .or_else(|| currency_from_symbol(raw).map(str::to_string));

    Some((amount, currency))
}

/// Parse an item/quantity count, tolerating unit noise ("12 cartons",
/// "1,200 pcs"). `None` when no digits are present.
pub fn parse_count(raw: &str) -> Option<u64> {
    let stripped = raw.replace(',', "");
    DIGIT_RUN.find(&stripped)?.as_str().parse().ok()
}

const ISO_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y"];
// Unambiguous regardless of locale; tried after the locale's own formats.
const NAMED_MONTH_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// Parse a date, preferring ISO, then the caller's locale ordering, then
/// named-month forms that are unambiguous either way.
pub fn parse_date(raw: &str, locale: DateLocale) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let locale_formats = match locale {
        DateLocale::DayFirst => DAY_FIRST_FORMATS,
        DateLocale::MonthFirst => MONTH_FIRST_FORMATS,
    };

    ISO_FORMATS
        .iter()
        .chain(locale_formats)
        .chain(NAMED_MONTH_FORMATS)
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Digits-only projection of a raw value, e.g. "8471.30.00" -> "84713000".
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
