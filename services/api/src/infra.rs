use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

use procure_ai::workflows::procurement::{
    InboundEmail, MailError, MailReceipt, MailSender, MailboxPoller, OutboundEmail,
    ProposalRecord, ProposalStore, RepositoryError, RfpId, RfpRecord, RfpRepository,
    VendorDirectory, VendorId, VendorRecord,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRfpRepository {
    records: Arc<Mutex<HashMap<RfpId, RfpRecord>>>,
}

impl RfpRepository for InMemoryRfpRepository {
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
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &RfpId) -> Result<Option<RfpRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVendorDirectory {
    records: Arc<Mutex<Vec<VendorRecord>>>,
}

impl VendorDirectory for InMemoryVendorDirectory {
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
        Ok(guard
            .iter()
            .filter(|record| record.active)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProposalStore {
    records: Arc<Mutex<Vec<ProposalRecord>>>,
}

impl ProposalStore for InMemoryProposalStore {
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

/// Stand-in transport until an SMTP adapter is wired up: logs the send and
/// hands back a synthetic receipt.
#[derive(Default, Clone)]
pub(crate) struct LoggingMailSender {
    sequence: Arc<AtomicU64>,
}

impl MailSender for LoggingMailSender {
    fn send(&self, message: OutboundEmail) -> Result<MailReceipt, MailError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let message_id = format!("local-{id:06}");
        info!(
            to = %message.to,
            subject = %message.subject,
            attachments = message.attachments.len(),
            %message_id,
            "outbound RFP email"
        );
        Ok(MailReceipt { message_id })
    }
}

/// Queue-backed inbox stand-in; the demo preloads it with vendor replies.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMailbox {
    messages: Arc<Mutex<Vec<InboundEmail>>>,
}

impl InMemoryMailbox {
    pub(crate) fn push(&self, message: InboundEmail) {
        self.messages
            .lock()
            .expect("mailbox mutex poisoned")
            .push(message);
    }
}

impl MailboxPoller for InMemoryMailbox {
    fn fetch_unseen_since(&self, since: DateTime<Utc>) -> Result<Vec<InboundEmail>, MailError> {
        let guard = self.messages.lock().expect("mailbox mutex poisoned");
        Ok(guard
            .iter()
            .filter(|message| message.received_at >= since)
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    raw.trim()
        .parse::<DateTime<Utc>>()
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
