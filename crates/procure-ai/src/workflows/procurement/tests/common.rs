use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::workflows::procurement::domain::{
    ProposalExtraction, ProposalId, ProposalRecord, RequestExtraction, RequestedItem,
    Requirements, RfpId, RfpRecord, RfpStatus, VendorId, VendorRecord,
};
use crate::workflows::procurement::generative::{
    CompletionError, CompletionGateway, CompletionRequest,
};
use crate::workflows::procurement::mail::{
    InboundEmail, MailError, MailReceipt, MailSender, MailboxPoller, OutboundEmail,
};
use crate::workflows::procurement::repository::{
    ProposalStore, RepositoryError, RfpRepository, VendorDirectory,
};
use crate::workflows::procurement::service::ProcurementService;

pub(super) const SAMPLE_REQUEST: &str = "We need 5 laptops with 16GB RAM and 2 monitors 24 inch, \
budget $10000, delivery in 2 weeks, Net 30 payment, 2 year warranty";

pub(super) fn sample_request_extraction() -> RequestExtraction {
    RequestExtraction {
        title: "Laptop and Monitor Procurement".to_string(),
        description: SAMPLE_REQUEST.to_string(),
        budget: Some(10_000),
        currency: "USD".to_string(),
        delivery_days: Some(14),
        items: vec![
            RequestedItem {
                name: "Laptop".to_string(),
                quantity: 5,
                specifications: "16GB RAM".to_string(),
            },
            RequestedItem {
                name: "Monitor".to_string(),
                quantity: 2,
                specifications: "24 inch".to_string(),
            },
        ],
        requirements: Requirements {
            payment_terms: Some("Net 30".to_string()),
            warranty: Some("2 years warranty".to_string()),
            delivery_location: None,
            additional_terms: Vec::new(),
        },
    }
}

pub(super) fn sample_rfp(suffix: &str) -> RfpRecord {
    RfpRecord {
        id: RfpId(format!("rfp-{suffix}")),
        request: sample_request_extraction(),
        status: RfpStatus::Draft,
        created_at: Utc::now() - Duration::hours(1),
    }
}

pub(super) fn vendor(suffix: &str, name: &str) -> VendorRecord {
    VendorRecord {
        id: VendorId(format!("vendor-{suffix}")),
        name: name.to_string(),
        email: format!("{suffix}@vendor.example"),
        category: None,
        active: true,
    }
}

pub(super) fn proposal(
    suffix: &str,
    total_price: Option<f64>,
    delivery_days: Option<u32>,
    warranty: Option<&str>,
) -> ProposalRecord {
    ProposalRecord {
        id: ProposalId(format!("prop-{suffix}")),
        rfp_id: RfpId("rfp-fixture".to_string()),
        vendor_id: VendorId(format!("vendor-{suffix}")),
        vendor_name: format!("Vendor {}", suffix.to_uppercase()),
        received_at: Utc::now(),
        raw_reply: String::new(),
        extraction: ProposalExtraction {
            total_price,
            delivery_days,
            warranty: warranty.map(str::to_string),
            ..ProposalExtraction::default()
        },
        used_fallback: true,
    }
}

pub(super) fn inbound(from: &str, text: &str) -> InboundEmail {
    InboundEmail {
        subject: "Re: Request for Proposal".to_string(),
        from_address: from.to_string(),
        received_at: Utc::now(),
        text: text.to_string(),
        html: None,
        attachments: Vec::new(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRfpRepository {
    records: Arc<Mutex<HashMap<RfpId, RfpRecord>>>,
}

impl RfpRepository for MemoryRfpRepository {
    fn insert(&self, record: RfpRecord) -> Result<RfpRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RfpRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &RfpId) -> Result<Option<RfpRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryVendorDirectory {
    records: Arc<Mutex<Vec<VendorRecord>>>,
}

impl VendorDirectory for MemoryVendorDirectory {
    fn insert(&self, record: VendorRecord) -> Result<VendorRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &VendorId) -> Result<Option<VendorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list_active(&self) -> Result<Vec<VendorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.iter().filter(|record| record.active).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProposalStore {
    records: Arc<Mutex<Vec<ProposalRecord>>>,
}

impl ProposalStore for MemoryProposalStore {
    fn insert(&self, record: ProposalRecord) -> Result<ProposalRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn for_rfp(&self, rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.rfp_id == rfp_id)
            .cloned()
            .collect())
    }
}

/// Mail sender fake that records every message and can reject addresses.
#[derive(Default, Clone)]
pub(super) struct RecordingMailSender {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    reject: Arc<Mutex<Vec<String>>>,
}

impl RecordingMailSender {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mail mutex poisoned").clone()
    }

    pub(super) fn reject_address(&self, address: &str) {
        self.reject
            .lock()
            .expect("mail mutex poisoned")
            .push(address.to_string());
    }
}

impl MailSender for RecordingMailSender {
    fn send(&self, message: OutboundEmail) -> Result<MailReceipt, MailError> {
        let rejected = self
            .reject
            .lock()
            .expect("mail mutex poisoned")
            .contains(&message.to);
        if rejected {
            return Err(MailError::Transport(format!(
                "relay refused recipient {}",
                message.to
            )));
        }

        let mut guard = self.sent.lock().expect("mail mutex poisoned");
        let message_id = format!("msg-{:04}", guard.len() + 1);
        guard.push(message);
        Ok(MailReceipt { message_id })
    }
}

/// Mailbox fake serving a fixed queue, filtered by the requested window.
#[derive(Default, Clone)]
pub(super) struct QueueMailbox {
    messages: Arc<Mutex<Vec<InboundEmail>>>,
}

impl QueueMailbox {
    pub(super) fn push(&self, message: InboundEmail) {
        self.messages
            .lock()
            .expect("mailbox mutex poisoned")
            .push(message);
    }
}

impl MailboxPoller for QueueMailbox {
    fn fetch_unseen_since(
        &self,
        since: chrono::DateTime<Utc>,
    ) -> Result<Vec<InboundEmail>, MailError> {
        let guard = self.messages.lock().expect("mailbox mutex poisoned");
        Ok(guard
            .iter()
            .filter(|message| message.received_at >= since)
            .cloned()
            .collect())
    }
}

/// Gateway fake that always answers with the scripted payload.
pub(super) struct ScriptedGateway {
    response: String,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub(super) fn new(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.response.clone())
    }
}

/// Gateway fake whose every call fails at the transport layer.
#[derive(Default)]
pub(super) struct FailingGateway {
    calls: AtomicUsize,
}

impl FailingGateway {
    pub(super) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompletionGateway for FailingGateway {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(CompletionError::Transport("connection refused".to_string()))
    }
}

pub(super) struct TestHarness {
    pub(super) service:
        ProcurementService<MemoryRfpRepository, MemoryVendorDirectory, MemoryProposalStore>,
    pub(super) rfps: Arc<MemoryRfpRepository>,
    pub(super) vendors: Arc<MemoryVendorDirectory>,
    pub(super) proposals: Arc<MemoryProposalStore>,
    pub(super) mail: RecordingMailSender,
    pub(super) mailbox: QueueMailbox,
}

pub(super) fn build_harness_with(gateway: Arc<dyn CompletionGateway>) -> TestHarness {
    build_harness(Some(gateway))
}

pub(super) fn build_harness(gateway: Option<Arc<dyn CompletionGateway>>) -> TestHarness {
    let rfps = Arc::new(MemoryRfpRepository::default());
    let vendors = Arc::new(MemoryVendorDirectory::default());
    let proposals = Arc::new(MemoryProposalStore::default());
    let mail = RecordingMailSender::default();
    let mailbox = QueueMailbox::default();

    let service = ProcurementService::new(
        rfps.clone(),
        vendors.clone(),
        proposals.clone(),
        Box::new(mail.clone()),
        Box::new(mailbox.clone()),
        gateway,
    );

    TestHarness {
        service,
        rfps,
        vendors,
        proposals,
        mail,
        mailbox,
    }
}
