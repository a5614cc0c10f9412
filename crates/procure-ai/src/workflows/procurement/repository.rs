use crate::workflows::procurement::domain::{
    ProposalRecord, RfpId, RfpRecord, VendorId, VendorRecord,
};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for RFP records so the service module can be exercised
/// in isolation.
pub trait RfpRepository: Send + Sync {
    fn insert(&self, record: RfpRecord) -> Result<RfpRecord, RepositoryError>;
    fn update(&self, record: RfpRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RfpId) -> Result<Option<RfpRecord>, RepositoryError>;
}

/// Vendor directory lookups used for dispatch and inbox matching.
pub trait VendorDirectory: Send + Sync {
    fn insert(&self, record: VendorRecord) -> Result<VendorRecord, RepositoryError>;
    fn fetch(&self, id: &VendorId) -> Result<Option<VendorRecord>, RepositoryError>;
    fn list_active(&self) -> Result<Vec<VendorRecord>, RepositoryError>;
}

/// Stored vendor proposals, keyed by the RFP they answer.
pub trait ProposalStore: Send + Sync {
    fn insert(&self, record: ProposalRecord) -> Result<ProposalRecord, RepositoryError>;
    fn for_rfp(&self, rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError>;
}
