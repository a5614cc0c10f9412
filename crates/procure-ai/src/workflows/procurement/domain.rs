use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for request-for-proposal records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfpId(pub String);

/// Identifier wrapper for vendor directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// Identifier wrapper for stored vendor proposals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

/// Lifecycle of an RFP as it moves through the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfpStatus {
    Draft,
    Dispatched,
    UnderReview,
    Awarded,
}

impl RfpStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RfpStatus::Draft => "draft",
            RfpStatus::Dispatched => "dispatched",
            RfpStatus::UnderReview => "under_review",
            RfpStatus::Awarded => "awarded",
        }
    }
}

/// Structured form of a free-text purchase request.
///
/// Produced fresh per call by either extraction path and never mutated after
/// return; the caller owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestExtraction {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub budget: Option<u64>,
    pub currency: String,
    #[serde(default)]
    pub delivery_days: Option<u32>,
    #[serde(default)]
    pub items: Vec<RequestedItem>,
    #[serde(default)]
    pub requirements: Requirements,
}

/// Single line item requested in an RFP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub specifications: String,
}

/// Commercial terms requested alongside the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    #[serde(default)]
    pub additional_terms: Vec<String>,
}

/// Structured pricing and terms pulled out of a vendor's reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalExtraction {
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub item_pricing: Vec<ItemPricing>,
    #[serde(default)]
    pub delivery_timeline: Option<String>,
    #[serde(default)]
    pub delivery_days: Option<u32>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub validity_period: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-item quote inside a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPricing {
    pub item_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub total_price: f64,
}

/// Scored view of one vendor's proposal.
///
/// Every score is clamped to `[0, 100]`; `overall_score` is the unweighted
/// mean of the three sub-scores rounded to the nearest integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorScore {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub price_score: u8,
    pub delivery_score: u8,
    pub terms_score: u8,
    pub overall_score: u8,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub summary: String,
}

/// Final pick produced by a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_vendor_id: VendorId,
    pub reasoning: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub alternative: Option<String>,
}

/// Ranked scores plus the recommendation; scores are sorted descending by
/// `overall_score` with ties keeping input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub scores: Vec<VendorScore>,
    pub recommendation: Recommendation,
}

/// Vendor directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRecord {
    pub id: VendorId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub category: Option<String>,
    pub active: bool,
}

/// Intake payload for registering a vendor; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Result wrapper carrying whether the deterministic fallback produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed<T> {
    pub data: T,
    pub used_fallback: bool,
}

/// Rendered outbound message, before transport concerns are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Timestamped record of an RFP held by the collaborating store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpRecord {
    pub id: RfpId,
    pub request: RequestExtraction,
    pub status: RfpStatus,
    pub created_at: DateTime<Utc>,
}

impl RfpRecord {
    pub fn status_view(&self) -> RfpStatusView {
        RfpStatusView {
            rfp_id: self.id.clone(),
            title: self.request.title.clone(),
            status: self.status.label(),
            item_count: self.request.items.len(),
            budget: self.request.budget,
        }
    }
}

/// Stored vendor reply reduced to structured pricing/terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub rfp_id: RfpId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub received_at: DateTime<Utc>,
    pub raw_reply: String,
    pub extraction: ProposalExtraction,
    pub used_fallback: bool,
}

/// Sanitized representation of an RFP's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct RfpStatusView {
    pub rfp_id: RfpId,
    pub title: String,
    pub status: &'static str,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
}
