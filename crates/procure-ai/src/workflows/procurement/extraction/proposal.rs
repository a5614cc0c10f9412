use super::patterns;
use crate::workflows::procurement::domain::ProposalExtraction;

/// Best-effort structured form of a vendor's reply.
///
/// Same matcher toolkit as the request extractor, parameterized for quote
/// text: the total is the *largest* dollar amount in the reply (vendors quote
/// unit prices before the total), delivery comes from the first duration
/// phrase, and terms use the shared enumerated checks. Total over all inputs.
pub fn extract_proposal(text: &str) -> ProposalExtraction {
    let total_price = patterns::symbol_amounts(text)
        .into_iter()
        .fold(None, |best: Option<f64>, amount| match best {
            Some(current) if current >= amount => Some(current),
            _ => Some(amount),
        });

    let duration = patterns::first_duration(text);
    let (delivery_days, delivery_timeline) = match duration {
        Some(matched) => (Some(matched.days), Some(matched.phrase)),
        None => (None, None),
    };

    ProposalExtraction {
        total_price,
        item_pricing: Vec::new(),
        delivery_timeline,
        delivery_days,
        payment_terms: patterns::payment_terms(text),
        warranty: patterns::warranty_terms(text),
        validity_period: patterns::validity_period(text),
        conditions: Vec::new(),
        notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_price_is_the_largest_amount() {
        let extraction = extract_proposal(
            "Unit price $950 per laptop, $180 per monitor, grand total $5,110 all inclusive.",
        );
        assert_eq!(extraction.total_price, Some(5110.0));
    }

    #[test]
    fn missing_amounts_leave_price_unset() {
        let extraction = extract_proposal("We can quote in 1 week once stock is confirmed.");
        assert_eq!(extraction.total_price, None);
        assert_eq!(extraction.delivery_days, Some(7));
    }

    #[test]
    fn delivery_keeps_the_matched_phrase() {
        let extraction = extract_proposal("Delivery in 10 days after order confirmation.");
        assert_eq!(extraction.delivery_days, Some(10));
        assert_eq!(extraction.delivery_timeline.as_deref(), Some("10 days"));
    }

    #[test]
    fn terms_use_the_shared_matchers() {
        let extraction = extract_proposal(
            "Total $8,000, Net 30, 2 year warranty, quote valid for 30 days, ships in 3 weeks.",
        );
        assert_eq!(extraction.payment_terms.as_deref(), Some("Net 30"));
        assert_eq!(extraction.warranty.as_deref(), Some("2 years warranty"));
        assert_eq!(extraction.validity_period.as_deref(), Some("30 days"));
        assert_eq!(extraction.delivery_days, Some(21));
    }
}
