//! Shared pattern matchers used by both the request and proposal extractors.
//!
//! Patterns compile once per process and are evaluated statelessly per call,
//! so concurrent extractions cannot interfere with each other.

use regex::Regex;
use std::sync::OnceLock;

fn symbol_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([$€£₹])\s*([0-9][0-9,]*(?:\.[0-9]+)?)").expect("amount pattern compiles")
    })
}

fn worded_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([0-9][0-9,]*)\s*(?:dollars|usd|budget)\b")
            .expect("worded amount pattern compiles")
    })
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([0-9]+)\s*(days?|weeks?)\b").expect("duration pattern compiles")
    })
}

fn net_terms_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bnet\s*-?\s*(15|30|60)\b").expect("net terms compile"))
}

fn warranty_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([0-9]+)[\s-]*(year|month)s?\s+warranty\b")
            .expect("warranty pattern compiles")
    })
}

fn validity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bvalid\s+for\s+([0-9]+)\s+days?\b").expect("validity pattern compiles")
    })
}

/// A matched delivery duration, normalized to days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DurationMatch {
    pub(crate) days: u32,
    pub(crate) phrase: String,
}

fn parse_integer(raw: &str) -> Option<u64> {
    let cleaned = raw.replace(',', "");
    let integer_part = cleaned.split('.').next().unwrap_or(&cleaned);
    integer_part.parse::<u64>().ok()
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn currency_for_symbol(symbol: &str) -> &'static str {
    match symbol {
        "€" => "EUR",
        "£" => "GBP",
        "₹" => "INR",
        _ => "USD",
    }
}

/// Every symbol-prefixed amount in the text, in document order.
pub(crate) fn symbol_amounts(text: &str) -> Vec<f64> {
    symbol_amount_re()
        .captures_iter(text)
        .filter_map(|captures| parse_decimal(&captures[2]))
        .collect()
}

/// First symbol-prefixed amount, with the currency implied by its symbol.
pub(crate) fn first_symbol_budget(text: &str) -> Option<(u64, &'static str)> {
    let captures = symbol_amount_re().captures(text)?;
    let amount = parse_integer(&captures[2])?;
    Some((amount, currency_for_symbol(&captures[1])))
}

/// First amount followed by a currency word (`5000 dollars`, `9000 USD`).
pub(crate) fn first_worded_budget(text: &str) -> Option<u64> {
    let captures = worded_amount_re().captures(text)?;
    parse_integer(&captures[1])
}

/// First `<n> day(s)|week(s)` phrase, with week counts multiplied by 7.
pub(crate) fn first_duration(text: &str) -> Option<DurationMatch> {
    let captures = duration_re().captures(text)?;
    let count = captures[1].parse::<u32>().ok()?;
    let unit = captures[2].to_ascii_lowercase();
    let days = if unit.starts_with("week") {
        count.checked_mul(7)?
    } else {
        count
    };

    Some(DurationMatch {
        days,
        phrase: captures[0].to_string(),
    })
}

/// Payment terms from the fixed enumerated set.
pub(crate) fn payment_terms(text: &str) -> Option<String> {
    if let Some(captures) = net_terms_re().captures(text) {
        return Some(format!("Net {}", &captures[1]));
    }

    let lowered = text.to_lowercase();
    if lowered.contains("immediate") || lowered.contains("advance") {
        return Some("Advance Payment".to_string());
    }

    None
}

/// Warranty duration, rendered with a singular or plural unit suffix.
pub(crate) fn warranty_terms(text: &str) -> Option<String> {
    let captures = warranty_re().captures(text)?;
    let count = captures[1].parse::<u32>().ok()?;
    let unit = captures[2].to_ascii_lowercase();
    let suffix = if count == 1 { "" } else { "s" };
    Some(format!("{count} {unit}{suffix} warranty"))
}

/// Quote validity window (`valid for 30 days`).
pub(crate) fn validity_period(text: &str) -> Option<String> {
    let captures = validity_re().captures(text)?;
    Some(format!("{} days", &captures[1]))
}
