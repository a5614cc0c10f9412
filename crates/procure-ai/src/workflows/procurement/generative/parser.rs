use super::prompts;
use super::{CompletionError, CompletionGateway, CompletionRequest};
use crate::workflows::procurement::domain::{
    ComparisonOutcome, EmailDraft, ProposalExtraction, ProposalRecord, Recommendation,
    RequestExtraction, RfpRecord, VendorId, VendorScore,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Typed front-end over the completion gateway: one method per target JSON
/// shape. Responses are parsed strictly; any mismatch is a `CompletionError`
/// the call site answers with the deterministic fallback.
pub struct GenerativeParser {
    gateway: Arc<dyn CompletionGateway>,
}

impl GenerativeParser {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn extract_request(&self, text: &str) -> Result<RequestExtraction, CompletionError> {
        let raw = self
            .gateway
            .complete(CompletionRequest {
                system: prompts::REQUEST_EXTRACTION_SYSTEM.to_string(),
                user: text.to_string(),
                temperature: prompts::REQUEST_EXTRACTION_TEMPERATURE,
                json_only: true,
            })
            .await?;

        let extraction: RequestExtraction = parse_json(&raw)?;
        if extraction.items.is_empty() {
            return Err(CompletionError::InvalidResponse(
                "extraction carried no items".to_string(),
            ));
        }

        Ok(extraction)
    }

    pub async fn extract_proposal(
        &self,
        text: &str,
    ) -> Result<ProposalExtraction, CompletionError> {
        let raw = self
            .gateway
            .complete(CompletionRequest {
                system: prompts::PROPOSAL_EXTRACTION_SYSTEM.to_string(),
                user: text.to_string(),
                temperature: prompts::PROPOSAL_EXTRACTION_TEMPERATURE,
                json_only: true,
            })
            .await?;

        parse_json(&raw)
    }

    pub async fn compare(
        &self,
        rfp: &RfpRecord,
        proposals: &[ProposalRecord],
    ) -> Result<ComparisonOutcome, CompletionError> {
        let proposal_views: Vec<serde_json::Value> = proposals
            .iter()
            .map(|proposal| {
                json!({
                    "vendor_id": proposal.vendor_id,
                    "vendor_name": proposal.vendor_name,
                    "proposal": proposal.extraction,
                })
            })
            .collect();
        let user = json!({ "rfp": rfp.request, "proposals": proposal_views }).to_string();

        let raw = self
            .gateway
            .complete(CompletionRequest {
                system: prompts::COMPARISON_SYSTEM.to_string(),
                user,
                temperature: prompts::COMPARISON_TEMPERATURE,
                json_only: true,
            })
            .await?;

        let outcome: RawComparison = parse_json(&raw)?;
        if outcome.scores.is_empty() {
            return Err(CompletionError::InvalidResponse(
                "comparison carried no scores".to_string(),
            ));
        }

        Ok(outcome.normalized())
    }

    pub async fn draft_email(
        &self,
        rfp: &RfpRecord,
        vendor_name: &str,
    ) -> Result<EmailDraft, CompletionError> {
        let user = json!({ "vendor_name": vendor_name, "rfp": rfp.request }).to_string();

        let raw = self
            .gateway
            .complete(CompletionRequest {
                system: prompts::EMAIL_SYSTEM.to_string(),
                user,
                temperature: prompts::EMAIL_TEMPERATURE,
                json_only: true,
            })
            .await?;

        parse_json(&raw)
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, CompletionError> {
    serde_json::from_str(raw).map_err(|err| CompletionError::InvalidResponse(err.to_string()))
}

/// Float-tolerant mirror of the comparison shape. Models round-trip scores as
/// floats often enough that strict integer parsing would reject otherwise
/// usable responses; sub-scores are clamped and the overall score recomputed
/// as their rounded mean so the score invariant holds on this path too.
#[derive(Debug, Deserialize)]
struct RawComparison {
    scores: Vec<RawVendorScore>,
    recommendation: RawRecommendation,
}

#[derive(Debug, Deserialize)]
struct RawVendorScore {
    vendor_id: String,
    vendor_name: String,
    price_score: f64,
    delivery_score: f64,
    terms_score: f64,
    #[serde(default)]
    pros: Vec<String>,
    #[serde(default)]
    cons: Vec<String>,
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    recommended_vendor_id: String,
    reasoning: String,
    #[serde(default)]
    risks: Vec<String>,
    #[serde(default)]
    alternative: Option<String>,
}

impl RawComparison {
    fn normalized(self) -> ComparisonOutcome {
        let mut scores: Vec<VendorScore> = self
            .scores
            .into_iter()
            .map(RawVendorScore::normalized)
            .collect();
        scores.sort_by(|left, right| right.overall_score.cmp(&left.overall_score));

        ComparisonOutcome {
            scores,
            recommendation: Recommendation {
                recommended_vendor_id: VendorId(self.recommendation.recommended_vendor_id),
                reasoning: self.recommendation.reasoning,
                risks: self.recommendation.risks,
                alternative: self.recommendation.alternative,
            },
        }
    }
}

impl RawVendorScore {
    fn normalized(self) -> VendorScore {
        let price_score = clamp_score(self.price_score);
        let delivery_score = clamp_score(self.delivery_score);
        let terms_score = clamp_score(self.terms_score);
        let overall =
            f64::from(u16::from(price_score) + u16::from(delivery_score) + u16::from(terms_score))
                / 3.0;

        VendorScore {
            vendor_id: VendorId(self.vendor_id),
            vendor_name: self.vendor_name,
            price_score,
            delivery_score,
            terms_score,
            overall_score: clamp_score(overall),
            pros: self.pros,
            cons: self.cons,
            summary: self.summary,
        }
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_scores_clamp_and_recompute_overall() {
        let raw = RawVendorScore {
            vendor_id: "vendor-1".to_string(),
            vendor_name: "Acme Supply".to_string(),
            price_score: 180.0,
            delivery_score: -20.0,
            terms_score: 59.6,
            pros: Vec::new(),
            cons: Vec::new(),
            summary: String::new(),
        };

        let score = raw.normalized();
        assert_eq!(score.price_score, 100);
        assert_eq!(score.delivery_score, 0);
        assert_eq!(score.terms_score, 60);
        assert_eq!(score.overall_score, 53);
    }

    #[test]
    fn malformed_payloads_become_invalid_response() {
        let error = parse_json::<RawComparison>("not json at all").unwrap_err();
        assert!(matches!(error, CompletionError::InvalidResponse(_)));
    }
}
