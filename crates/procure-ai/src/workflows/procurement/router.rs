use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RfpId, VendorId, VendorSubmission};
use super::repository::{ProposalStore, RepositoryError, RfpRepository, VendorDirectory};
use super::service::{ProcurementError, ProcurementService};

/// Router builder exposing the procurement workflow over HTTP.
///
/// Every endpoint answers with the uniform envelope: successes carry
/// `{"success": true, "data": ...}` (plus `used_fallback` where an extraction
/// path ran), failures `{"success": false, "error": ...}`.
pub fn procurement_router<R, V, P>(service: Arc<ProcurementService<R, V, P>>) -> Router
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    Router::new()
        .route("/api/v1/procurement/rfps", post(ingest_handler::<R, V, P>))
        .route(
            "/api/v1/procurement/rfps/:rfp_id",
            get(status_handler::<R, V, P>),
        )
        .route(
            "/api/v1/procurement/rfps/:rfp_id/dispatch",
            post(dispatch_handler::<R, V, P>),
        )
        .route(
            "/api/v1/procurement/rfps/:rfp_id/replies",
            post(replies_handler::<R, V, P>),
        )
        .route(
            "/api/v1/procurement/rfps/:rfp_id/comparison",
            post(comparison_handler::<R, V, P>),
        )
        .route(
            "/api/v1/procurement/rfps/:rfp_id/award",
            post(award_handler::<R, V, P>),
        )
        .route(
            "/api/v1/procurement/vendors",
            get(list_vendors_handler::<R, V, P>).post(register_vendor_handler::<R, V, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct IngestRequestBody {
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DispatchBody {
    pub(crate) vendor_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RepliesBody {
    #[serde(default)]
    pub(crate) since: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AwardBody {
    pub(crate) vendor_id: String,
}

pub(crate) async fn ingest_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    axum::Json(body): axum::Json<IngestRequestBody>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.ingest_request(&body.text).await {
        Ok(parsed) => {
            let payload = json!({
                "success": true,
                "data": parsed.data,
                "used_fallback": parsed.used_fallback,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.get(&RfpId(rfp_id)) {
        Ok(record) => {
            let payload = json!({ "success": true, "data": record.status_view() });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dispatch_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    Path(rfp_id): Path<String>,
    axum::Json(body): axum::Json<DispatchBody>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    let vendor_ids: Vec<VendorId> = body.vendor_ids.into_iter().map(VendorId).collect();
    match service.dispatch(&RfpId(rfp_id), &vendor_ids, &[]).await {
        Ok(report) => {
            let payload = json!({ "success": true, "data": report });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn replies_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    Path(rfp_id): Path<String>,
    body: Option<axum::Json<RepliesBody>>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    let since = body.map(|axum::Json(body)| body.since).unwrap_or_default();
    match service.ingest_replies(&RfpId(rfp_id), since).await {
        Ok(proposals) => {
            let payload = json!({ "success": true, "data": proposals });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn comparison_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.compare(&RfpId(rfp_id)).await {
        Ok(parsed) => {
            let payload = json!({
                "success": true,
                "data": parsed.data,
                "used_fallback": parsed.used_fallback,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn award_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    Path(rfp_id): Path<String>,
    axum::Json(body): axum::Json<AwardBody>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.award(&RfpId(rfp_id), &VendorId(body.vendor_id)) {
        Ok(record) => {
            let payload = json!({ "success": true, "data": record.status_view() });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_vendor_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
    axum::Json(submission): axum::Json<VendorSubmission>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.register_vendor(submission) {
        Ok(record) => {
            let payload = json!({ "success": true, "data": record });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_vendors_handler<R, V, P>(
    State(service): State<Arc<ProcurementService<R, V, P>>>,
) -> Response
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
    P: ProposalStore + 'static,
{
    match service.vendors() {
        Ok(records) => {
            let payload = json!({ "success": true, "data": records });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ProcurementError) -> Response {
    let status = match &error {
        ProcurementError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProcurementError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ProcurementError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ProcurementError::Mail(_) => StatusCode::BAD_GATEWAY,
        ProcurementError::Comparison(_)
        | ProcurementError::NoVendorsSelected
        | ProcurementError::AwardWithoutProposal(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let payload = json!({ "success": false, "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
