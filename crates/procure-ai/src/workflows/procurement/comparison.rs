use crate::workflows::procurement::domain::{
    ComparisonOutcome, ProposalRecord, Recommendation, VendorScore,
};

/// Sentinel for an unknown delivery window; anything at or above it scores
/// the neutral midpoint.
const UNKNOWN_DELIVERY_DAYS: u32 = 999;
const NEUTRAL_SCORE: u8 = 50;

/// Error raised when a comparison is requested over unusable input.
#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error("at least one proposal is required for comparison")]
    NoProposals,
}

/// Deterministic comparison over already-parsed proposals.
///
/// Produces a total ordering even with partial data: missing prices and
/// unknown delivery windows score the neutral midpoint instead of being
/// excluded. Sorting is stable, so equal overall scores keep their input
/// order. Exactly one proposal short-circuits to a trivial recommendation
/// before any scoring runs.
pub fn compare_proposals(proposals: &[ProposalRecord]) -> Result<ComparisonOutcome, ComparisonError> {
    match proposals {
        [] => Err(ComparisonError::NoProposals),
        [sole] => Ok(sole_proposal_outcome(sole)),
        _ => Ok(ranked_outcome(proposals)),
    }
}

fn ranked_outcome(proposals: &[ProposalRecord]) -> ComparisonOutcome {
    let price_band = PriceBand::from_proposals(proposals);

    let mut scores: Vec<VendorScore> = proposals
        .iter()
        .map(|proposal| score_proposal(proposal, &price_band))
        .collect();
    scores.sort_by(|left, right| right.overall_score.cmp(&left.overall_score));

    let top = &scores[0];
    let alternative = scores.get(1).map(|second| second.vendor_name.clone());
    let recommendation = Recommendation {
        recommended_vendor_id: top.vendor_id.clone(),
        reasoning: format!(
            "{} offers the strongest overall value, scoring {}/100 across price, delivery, and terms.",
            top.vendor_name, top.overall_score
        ),
        risks: top.cons.clone(),
        alternative,
    };

    ComparisonOutcome {
        scores,
        recommendation,
    }
}

/// Price normalization band. The max counts missing totals as zero while the
/// min only looks at proposals that quoted a price; both quirks are kept for
/// parity with the original formula.
struct PriceBand {
    min_price: f64,
    spread: f64,
}

impl PriceBand {
    fn from_proposals(proposals: &[ProposalRecord]) -> Self {
        let max_price = proposals
            .iter()
            .map(|proposal| proposal.extraction.total_price.unwrap_or(0.0))
            .fold(0.0_f64, f64::max);
        let min_price = proposals
            .iter()
            .filter_map(|proposal| proposal.extraction.total_price)
            .fold(None, |best: Option<f64>, price| match best {
                Some(current) if current <= price => Some(current),
                _ => Some(price),
            })
            .unwrap_or(0.0);

        let raw_spread = max_price - min_price;
        let spread = if raw_spread > 0.0 { raw_spread } else { 1.0 };

        Self { min_price, spread }
    }

    fn price_score(&self, price: f64) -> u8 {
        clamp_score(100.0 - ((price - self.min_price) / self.spread) * 50.0)
    }
}

fn score_proposal(proposal: &ProposalRecord, price_band: &PriceBand) -> VendorScore {
    let extraction = &proposal.extraction;

    let price_score = match extraction.total_price {
        Some(price) => price_band.price_score(price),
        None => NEUTRAL_SCORE,
    };

    let delivery_days = extraction.delivery_days.unwrap_or(UNKNOWN_DELIVERY_DAYS);
    let delivery_score = if delivery_days < UNKNOWN_DELIVERY_DAYS {
        clamp_score(100.0 - (f64::from(delivery_days) / 60.0) * 50.0)
    } else {
        NEUTRAL_SCORE
    };

    let terms_score: u8 = if extraction.warranty.is_some() { 80 } else { 60 };

    let overall = f64::from(
        u16::from(price_score) + u16::from(delivery_score) + u16::from(terms_score),
    ) / 3.0;
    let overall_score = clamp_score(overall);

    let (pros, cons) = pros_and_cons(proposal, delivery_days);

    VendorScore {
        vendor_id: proposal.vendor_id.clone(),
        vendor_name: proposal.vendor_name.clone(),
        price_score,
        delivery_score,
        terms_score,
        overall_score,
        pros,
        cons,
        summary: format!(
            "{} scored {}/100 (price {}, delivery {}, terms {}).",
            proposal.vendor_name, overall_score, price_score, delivery_score, terms_score
        ),
    }
}

fn pros_and_cons(proposal: &ProposalRecord, delivery_days: u32) -> (Vec<String>, Vec<String>) {
    let extraction = &proposal.extraction;
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    match extraction.total_price {
        Some(price) => pros.push(format!("Quoted price: ${}", format_money(price))),
        None => cons.push("No total price provided".to_string()),
    }

    if delivery_days < UNKNOWN_DELIVERY_DAYS {
        pros.push(format!("Delivery in {delivery_days} days"));
    } else {
        cons.push("Delivery timeline unclear".to_string());
    }

    match &extraction.warranty {
        Some(warranty) => pros.push(format!("Warranty: {warranty}")),
        None => cons.push("No warranty information".to_string()),
    }

    if let Some(terms) = &extraction.payment_terms {
        pros.push(format!("Payment terms: {terms}"));
    }

    (pros, cons)
}

fn sole_proposal_outcome(proposal: &ProposalRecord) -> ComparisonOutcome {
    let score = VendorScore {
        vendor_id: proposal.vendor_id.clone(),
        vendor_name: proposal.vendor_name.clone(),
        price_score: 100,
        delivery_score: 100,
        terms_score: 100,
        overall_score: 100,
        pros: vec!["Only proposal received".to_string()],
        cons: Vec::new(),
        summary: format!(
            "{} is the sole responsive vendor; no comparison performed.",
            proposal.vendor_name
        ),
    };

    let recommendation = Recommendation {
        recommended_vendor_id: proposal.vendor_id.clone(),
        reasoning: format!(
            "Only one proposal was received; {} wins by default.",
            proposal.vendor_name
        ),
        risks: vec!["No competing bids to benchmark pricing against".to_string()],
        alternative: None,
    };

    ComparisonOutcome {
        scores: vec![score],
        recommendation,
    }
}

fn format_money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
