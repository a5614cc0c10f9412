use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::comparison::{self, ComparisonError};
use super::domain::{
    ComparisonOutcome, EmailDraft, Parsed, ProposalExtraction, ProposalId, ProposalRecord,
    RequestExtraction, RfpId, RfpRecord, RfpStatus, VendorId, VendorRecord, VendorSubmission,
};
use super::email;
use super::extraction;
use super::generative::{CompletionGateway, GenerativeParser};
use super::inbox;
use super::mail::{EmailAttachment, MailError, MailSender, MailboxPoller, OutboundEmail};
use super::repository::{ProposalStore, RepositoryError, RfpRepository, VendorDirectory};
use crate::workflows::vendors::vendor_id_for_name;

/// Service composing extraction, dispatch, reply ingestion, and comparison.
///
/// The completion gateway is optional: `None` means the generative service
/// was never configured, and every operation answers with the deterministic
/// engines without attempting a network call.
pub struct ProcurementService<R, V, P> {
    rfps: Arc<R>,
    vendors: Arc<V>,
    proposals: Arc<P>,
    mail: Box<dyn MailSender>,
    mailbox: Box<dyn MailboxPoller>,
    generative: Option<Arc<dyn CompletionGateway>>,
}

static RFP_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROPOSAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_rfp_id() -> RfpId {
    let id = RFP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RfpId(format!("rfp-{id:06}"))
}

fn next_proposal_id() -> ProposalId {
    let id = PROPOSAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProposalId(format!("prop-{id:06}"))
}

impl<R, V, P> ProcurementService<R, V, P>
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    pub fn new(
        rfps: Arc<R>,
        vendors: Arc<V>,
        proposals: Arc<P>,
        mail: Box<dyn MailSender>,
        mailbox: Box<dyn MailboxPoller>,
        generative: Option<Arc<dyn CompletionGateway>>,
    ) -> Self {
        Self {
            rfps,
            vendors,
            proposals,
            mail,
            mailbox,
            generative,
        }
    }

    fn parser(&self) -> Option<GenerativeParser> {
        self.generative.clone().map(GenerativeParser::new)
    }

    /// Turn a free-text purchase request into a stored RFP draft.
    pub async fn ingest_request(&self, text: &str) -> Result<Parsed<RfpRecord>, ProcurementError> {
        let Parsed {
            data: request,
            used_fallback,
        } = self.extract_request(text).await;

        let record = RfpRecord {
            id: next_rfp_id(),
            request,
            status: RfpStatus::Draft,
            created_at: Utc::now(),
        };
        let stored = self.rfps.insert(record)?;

        info!(rfp_id = %stored.id.0, used_fallback, "ingested purchase request");
        Ok(Parsed {
            data: stored,
            used_fallback,
        })
    }

    /// Fetch a stored RFP for API responses.
    pub fn get(&self, rfp_id: &RfpId) -> Result<RfpRecord, ProcurementError> {
        let record = self.rfps.fetch(rfp_id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Register a vendor in the directory, deriving its id from the name.
    pub fn register_vendor(
        &self,
        submission: VendorSubmission,
    ) -> Result<VendorRecord, ProcurementError> {
        let record = VendorRecord {
            id: vendor_id_for_name(&submission.name),
            name: submission.name,
            email: submission.email,
            category: submission.category,
            active: true,
        };
        let stored = self.vendors.insert(record)?;
        Ok(stored)
    }

    /// All vendors currently eligible for dispatch.
    pub fn vendors(&self) -> Result<Vec<VendorRecord>, ProcurementError> {
        Ok(self.vendors.list_active()?)
    }

    /// Render and send the RFP email to each selected vendor, sequentially.
    ///
    /// One vendor at a time, no parallel fan-out: a failing send is recorded
    /// in the report and the loop moves on to the next vendor.
    pub async fn dispatch(
        &self,
        rfp_id: &RfpId,
        vendor_ids: &[VendorId],
        attachments: &[EmailAttachment],
    ) -> Result<DispatchReport, ProcurementError> {
        if vendor_ids.is_empty() {
            return Err(ProcurementError::NoVendorsSelected);
        }

        let mut rfp = self.rfps.fetch(rfp_id)?.ok_or(RepositoryError::NotFound)?;
        let mut dispatches = Vec::with_capacity(vendor_ids.len());

        for vendor_id in vendor_ids {
            let Some(vendor) = self.vendors.fetch(vendor_id)? else {
                dispatches.push(VendorDispatch {
                    vendor_id: vendor_id.clone(),
                    vendor_name: None,
                    success: false,
                    message_id: None,
                    error: Some("vendor not found in directory".to_string()),
                    used_fallback: false,
                });
                continue;
            };

            let Parsed {
                data: draft,
                used_fallback,
            } = self.draft_email(&rfp, &vendor.name).await;

            let outcome = self.mail.send(OutboundEmail {
                to: vendor.email.clone(),
                subject: draft.subject,
                body: draft.body,
                attachments: attachments.to_vec(),
            });

            dispatches.push(match outcome {
                Ok(receipt) => VendorDispatch {
                    vendor_id: vendor.id.clone(),
                    vendor_name: Some(vendor.name.clone()),
                    success: true,
                    message_id: Some(receipt.message_id),
                    error: None,
                    used_fallback,
                },
                Err(err) => {
                    warn!(vendor = %vendor.name, error = %err, "RFP dispatch failed for vendor");
                    VendorDispatch {
                        vendor_id: vendor.id.clone(),
                        vendor_name: Some(vendor.name.clone()),
                        success: false,
                        message_id: None,
                        error: Some(err.to_string()),
                        used_fallback,
                    }
                }
            });
        }

        let delivered = dispatches.iter().filter(|entry| entry.success).count();
        if delivered > 0 {
            rfp.status = RfpStatus::Dispatched;
            self.rfps.update(rfp)?;
        }

        info!(rfp_id = %rfp_id.0, delivered, total = dispatches.len(), "dispatch round finished");
        Ok(DispatchReport {
            rfp_id: rfp_id.clone(),
            dispatches,
        })
    }

    /// Poll the mailbox and store structured proposals for replies that came
    /// from known vendors. Messages that cannot be stored are skipped with a
    /// warning rather than aborting the batch.
    pub async fn ingest_replies(
        &self,
        rfp_id: &RfpId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProposalRecord>, ProcurementError> {
        let rfp = self.rfps.fetch(rfp_id)?.ok_or(RepositoryError::NotFound)?;
        let since = since.unwrap_or(rfp.created_at);

        let messages = self.mailbox.fetch_unseen_since(since)?;
        let vendors = self.vendors.list_active()?;

        let mut stored = Vec::new();
        for reply in inbox::match_vendor_replies(messages, &vendors) {
            let Parsed {
                data: extraction,
                used_fallback,
            } = self.extract_proposal(&reply.message.text).await;

            let record = ProposalRecord {
                id: next_proposal_id(),
                rfp_id: rfp.id.clone(),
                vendor_id: reply.vendor.id.clone(),
                vendor_name: reply.vendor.name.clone(),
                received_at: reply.message.received_at,
                raw_reply: reply.message.text,
                extraction,
                used_fallback,
            };

            match self.proposals.insert(record) {
                Ok(record) => stored.push(record),
                Err(err) => {
                    warn!(vendor = %reply.vendor.name, error = %err, "skipping proposal that could not be stored");
                }
            }
        }

        info!(rfp_id = %rfp_id.0, stored = stored.len(), "ingested vendor replies");
        Ok(stored)
    }

    /// Rank the stored proposals for an RFP and pick a recommendation.
    pub async fn compare(
        &self,
        rfp_id: &RfpId,
    ) -> Result<Parsed<ComparisonOutcome>, ProcurementError> {
        let mut rfp = self.rfps.fetch(rfp_id)?.ok_or(RepositoryError::NotFound)?;
        let proposals = self.proposals.for_rfp(rfp_id)?;
        if proposals.is_empty() {
            return Err(ComparisonError::NoProposals.into());
        }

        // A sole proposal wins by default; neither scoring path runs.
        let outcome = if proposals.len() == 1 {
            Parsed {
                data: comparison::compare_proposals(&proposals)?,
                used_fallback: false,
            }
        } else {
            match self.parser() {
                Some(parser) => match parser.compare(&rfp, &proposals).await {
                    Ok(data) => Parsed {
                        data,
                        used_fallback: false,
                    },
                    Err(err) => {
                        warn!(error = %err, "generative comparison failed; using deterministic scoring");
                        Parsed {
                            data: comparison::compare_proposals(&proposals)?,
                            used_fallback: true,
                        }
                    }
                },
                None => Parsed {
                    data: comparison::compare_proposals(&proposals)?,
                    used_fallback: true,
                },
            }
        };

        rfp.status = RfpStatus::UnderReview;
        self.rfps.update(rfp)?;

        Ok(outcome)
    }

    /// Close out an RFP by awarding it to a vendor with a stored proposal.
    pub fn award(
        &self,
        rfp_id: &RfpId,
        vendor_id: &VendorId,
    ) -> Result<RfpRecord, ProcurementError> {
        let mut rfp = self.rfps.fetch(rfp_id)?.ok_or(RepositoryError::NotFound)?;

        let proposals = self.proposals.for_rfp(rfp_id)?;
        if !proposals
            .iter()
            .any(|proposal| &proposal.vendor_id == vendor_id)
        {
            return Err(ProcurementError::AwardWithoutProposal(vendor_id.0.clone()));
        }

        rfp.status = RfpStatus::Awarded;
        self.rfps.update(rfp.clone())?;

        info!(rfp_id = %rfp_id.0, vendor_id = %vendor_id.0, "RFP awarded");
        Ok(rfp)
    }

    async fn extract_request(&self, text: &str) -> Parsed<RequestExtraction> {
        if let Some(parser) = self.parser() {
            match parser.extract_request(text).await {
                Ok(extraction) => {
                    return Parsed {
                        data: extraction,
                        used_fallback: false,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "generative request extraction failed; using pattern fallback");
                }
            }
        }

        Parsed {
            data: extraction::extract_request(text),
            used_fallback: true,
        }
    }

    async fn extract_proposal(&self, text: &str) -> Parsed<ProposalExtraction> {
        if let Some(parser) = self.parser() {
            match parser.extract_proposal(text).await {
                Ok(extraction) => {
                    return Parsed {
                        data: extraction,
                        used_fallback: false,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "generative proposal extraction failed; using pattern fallback");
                }
            }
        }

        Parsed {
            data: extraction::extract_proposal(text),
            used_fallback: true,
        }
    }

    async fn draft_email(&self, rfp: &RfpRecord, vendor_name: &str) -> Parsed<EmailDraft> {
        if let Some(parser) = self.parser() {
            match parser.draft_email(rfp, vendor_name).await {
                Ok(draft) => {
                    return Parsed {
                        data: draft,
                        used_fallback: false,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "generative email drafting failed; using template");
                }
            }
        }

        Parsed {
            data: email::render_rfp_email(rfp, vendor_name),
            used_fallback: true,
        }
    }
}

/// Per-vendor outcome of one dispatch round.
#[derive(Debug, Clone, Serialize)]
pub struct VendorDispatch {
    pub vendor_id: VendorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub used_fallback: bool,
}

/// Sequential dispatch summary; per-vendor flags, no aggregation beyond them.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub rfp_id: RfpId,
    pub dispatches: Vec<VendorDispatch>,
}

impl DispatchReport {
    pub fn delivered(&self) -> usize {
        self.dispatches.iter().filter(|entry| entry.success).count()
    }
}

/// Error raised by the procurement service.
#[derive(Debug, thiserror::Error)]
pub enum ProcurementError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    #[error("no vendors selected for dispatch")]
    NoVendorsSelected,
    #[error("vendor {0} has no stored proposal for this RFP")]
    AwardWithoutProposal(String),
}
