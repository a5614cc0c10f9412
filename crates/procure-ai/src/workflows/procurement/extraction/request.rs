use super::patterns;
use crate::workflows::procurement::domain::{RequestExtraction, RequestedItem, Requirements};
use regex::Regex;
use std::sync::OnceLock;

/// Quantity-plus-keyword patterns for the supported item categories: compute
/// hardware, display hardware, input devices, furniture, telephony, printing
/// hardware, and networking hardware. Categories are evaluated independently,
/// so a token matching two categories produces two items.
const ITEM_CATEGORY_PATTERNS: [&str; 7] = [
    r"(?i)\b([0-9]+)\s+(laptops?|notebooks?|computers?|desktops?|workstations?|servers?)\b",
    r"(?i)\b([0-9]+)\s+(monitors?|displays?|projectors?)\b",
    r"(?i)\b([0-9]+)\s+(keyboards?|mice|mouse|headsets?|webcams?)\b",
    r"(?i)\b([0-9]+)\s+(chairs?|desks?|tables?|cabinets?)\b",
    r"(?i)\b([0-9]+)\s+(phones?|telephones?|smartphones?|handsets?)\b",
    r"(?i)\b([0-9]+)\s+(printers?|scanners?|copiers?)\b",
    r"(?i)\b([0-9]+)\s+(routers?|switch(?:es)?|access\s+points?|firewalls?)\b",
];

fn item_category_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ITEM_CATEGORY_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("item category pattern compiles"))
            .collect()
    })
}

fn ram_spec_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b([0-9]+)\s*GB\s+RAM\b").expect("ram pattern compiles"))
}

fn screen_size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b([0-9]+)\s*(?:inch(?:es)?\b|")"#).expect("screen pattern compiles")
    })
}

const FALLBACK_TITLE: &str = "Procurement Request";
const PLACEHOLDER_ITEM_NAME: &str = "Items as specified";

/// Best-effort structured form of a free-text purchase request.
///
/// Total over all string inputs: degraded quality is acceptable, absence of a
/// result is not. Matchers run independently in a fixed order with no shared
/// parse tree.
pub fn extract_request(text: &str) -> RequestExtraction {
    let (budget, currency) = extract_budget(text);
    let delivery_days = patterns::first_duration(text).map(|matched| matched.days);
    let mut items = extract_items(text);
    attach_specifications(text, &mut items);

    let requirements = Requirements {
        payment_terms: patterns::payment_terms(text),
        warranty: patterns::warranty_terms(text),
        delivery_location: None,
        additional_terms: Vec::new(),
    };

    let title = if items.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        format!("{} Procurement", names.join(" and "))
    };

    if items.is_empty() {
        items.push(RequestedItem {
            name: PLACEHOLDER_ITEM_NAME.to_string(),
            quantity: 1,
            specifications: truncate_chars(text, 100),
        });
    }

    RequestExtraction {
        title,
        description: truncate_chars(text, 200),
        budget,
        currency,
        delivery_days,
        items,
        requirements,
    }
}

fn extract_budget(text: &str) -> (Option<u64>, String) {
    if let Some((amount, currency)) = patterns::first_symbol_budget(text) {
        return (Some(amount), currency.to_string());
    }
    (patterns::first_worded_budget(text), "USD".to_string())
}

fn extract_items(text: &str) -> Vec<RequestedItem> {
    let mut items = Vec::new();
    for pattern in item_category_patterns() {
        for captures in pattern.captures_iter(text) {
            let Ok(quantity) = captures[1].parse::<u32>() else {
                continue;
            };
            if quantity == 0 {
                continue;
            }
            items.push(RequestedItem {
                name: canonical_item_name(&captures[2]),
                quantity,
                specifications: String::new(),
            });
        }
    }
    items
}

/// Decorates items positionally: RAM goes to the first item overall, screen
/// size to the first item whose name contains "monitor". When categories
/// interleave in the input this can misattach a specification; the behavior
/// is kept for parity with the original extractor.
fn attach_specifications(text: &str, items: &mut [RequestedItem]) {
    if let Some(captures) = ram_spec_re().captures(text) {
        if let Some(first) = items.first_mut() {
            first.specifications = format!("{}GB RAM", &captures[1]);
        }
    }

    if let Some(captures) = screen_size_re().captures(text) {
        if let Some(monitor) = items
            .iter_mut()
            .find(|item| item.name.to_lowercase().contains("monitor"))
        {
            monitor.specifications = format!("{} inch", &captures[1]);
        }
    }
}

fn canonical_item_name(token: &str) -> String {
    capitalize(&singularize(token))
}

fn singularize(token: &str) -> String {
    let lowered = token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match lowered.as_str() {
        "mice" => "mouse".to_string(),
        "switches" => "switch".to_string(),
        _ => lowered
            .strip_suffix('s')
            .map(str::to_string)
            .unwrap_or(lowered),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
