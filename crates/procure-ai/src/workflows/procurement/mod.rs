//! Procurement workflow: RFP intake, vendor dispatch, reply ingestion, and
//! proposal comparison.
//!
//! Extraction and comparison each have two paths sharing one contract: the
//! generative adapter is tried first when configured, and any failure falls
//! back to the deterministic engines. Results carry a `used_fallback` flag so
//! callers can tell which path produced them.

pub mod comparison;
pub mod domain;
pub mod email;
pub mod extraction;
pub mod generative;
pub mod inbox;
pub mod mail;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use comparison::{compare_proposals, ComparisonError};
pub use domain::{
    ComparisonOutcome, EmailDraft, ItemPricing, Parsed, ProposalExtraction, ProposalId,
    ProposalRecord, Recommendation, RequestExtraction, RequestedItem, Requirements, RfpId,
    RfpRecord, RfpStatus, RfpStatusView, VendorId, VendorRecord, VendorScore, VendorSubmission,
};
pub use email::render_rfp_email;
pub use extraction::{extract_proposal, extract_request};
pub use generative::{
    CompletionError, CompletionGateway, CompletionRequest, GenerativeParser, HttpCompletionClient,
};
pub use inbox::{match_vendor_replies, VendorReply};
pub use mail::{
    EmailAttachment, InboundEmail, MailError, MailReceipt, MailSender, MailboxPoller,
    OutboundEmail,
};
pub use repository::{ProposalStore, RepositoryError, RfpRepository, VendorDirectory};
pub use router::procurement_router;
pub use service::{DispatchReport, ProcurementError, ProcurementService, VendorDispatch};
