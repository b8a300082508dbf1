use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApprovalId, CampaignId, InfluencerId, MetricId, SubmissionId, UserId,
};
use super::metrics::MetricSnapshot;
use super::registry::{CampaignRegistry, InfluencerRegistry};
use super::repository::SubmissionStore;
use super::service::{
    ContentWorkflow, ContentWorkflowError, CreateSubmissionRequest, DraftUpdate,
};

/// Promotion payload; the identity context supplies the acting user.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub submitted_by: UserId,
}

/// Reviewer approval payload.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub reviewer_id: UserId,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Reviewer rejection payload; comments are mandatory.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reviewer_id: UserId,
    pub comments: String,
}

/// Metric recording payload.
#[derive(Debug, Deserialize)]
pub struct RecordMetricsRequest {
    pub submission_id: SubmissionId,
    #[serde(flatten)]
    pub snapshot: MetricSnapshot,
}

/// Router builder exposing the content workflow over HTTP. Every payload is
/// a typed request structure validated before dispatch.
pub fn content_router<S, C, I>(workflow: Arc<ContentWorkflow<S, C, I>>) -> Router
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    Router::new()
        .route(
            "/api/content-submissions",
            post(create_submission_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/:id",
            get(get_submission_handler::<S, C, I>).delete(delete_submission_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/:id/caption",
            put(update_caption_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/:id/submit",
            post(submit_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/:id/versions",
            get(versions_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/campaign/:campaign_id",
            get(campaign_submissions_handler::<S, C, I>),
        )
        .route(
            "/api/content-submissions/influencer/:influencer_id",
            get(influencer_submissions_handler::<S, C, I>),
        )
        .route("/api/approvals/:id", get(get_approval_handler::<S, C, I>))
        .route(
            "/api/approvals/:id/approve",
            post(approve_handler::<S, C, I>),
        )
        .route("/api/approvals/:id/reject", post(reject_handler::<S, C, I>))
        .route(
            "/api/approvals/submission/:submission_id",
            get(submission_approvals_handler::<S, C, I>),
        )
        .route(
            "/api/approvals/pending/:reviewer_id",
            get(pending_approvals_handler::<S, C, I>),
        )
        .route(
            "/api/performance-metrics",
            post(record_metrics_handler::<S, C, I>),
        )
        .route(
            "/api/performance-metrics/:id",
            get(get_metric_handler::<S, C, I>),
        )
        .route(
            "/api/performance-metrics/submission/:submission_id",
            get(submission_metrics_handler::<S, C, I>),
        )
        .route(
            "/api/performance-metrics/submission/:submission_id/latest",
            get(latest_metric_handler::<S, C, I>),
        )
        .route(
            "/api/performance-metrics/submission/:submission_id/summary",
            get(metric_summary_handler::<S, C, I>),
        )
        .with_state(workflow)
}

fn error_response(err: ContentWorkflowError) -> Response {
    let status = match &err {
        ContentWorkflowError::SubmissionNotFound(_) => StatusCode::NOT_FOUND,
        ContentWorkflowError::CampaignNotFound(_)
        | ContentWorkflowError::InfluencerNotFound(_)
        | ContentWorkflowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ContentWorkflowError::IllegalState { .. } => StatusCode::CONFLICT,
        ContentWorkflowError::Registry(_) | ContentWorkflowError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

fn not_found(what: &str) -> Response {
    let payload = json!({ "error": format!("{what} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

type Workflow<S, C, I> = State<Arc<ContentWorkflow<S, C, I>>>;

pub(crate) async fn create_submission_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Json(request): Json<CreateSubmissionRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.create(request) {
        Ok(submission) => (StatusCode::CREATED, Json(submission)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_submission_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.get(&id) {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_submission_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.delete(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("submission"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_caption_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<SubmissionId>,
    Json(update): Json<DraftUpdate>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.update_draft(&id, update) {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<SubmissionId>,
    Json(request): Json<SubmitRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.submit(&id, &request.submitted_by) {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn versions_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.versions(&id) {
        Ok(versions) => (StatusCode::OK, Json(versions)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn campaign_submissions_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(campaign_id): Path<CampaignId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.list_for_campaign(&campaign_id) {
        Ok(submissions) => (StatusCode::OK, Json(submissions)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn influencer_submissions_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(influencer_id): Path<InfluencerId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.submissions.list_for_influencer(&influencer_id) {
        Ok(submissions) => (StatusCode::OK, Json(submissions)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_approval_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<ApprovalId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.approvals.get(&id) {
        Ok(Some(approval)) => (StatusCode::OK, Json(approval)).into_response(),
        Ok(None) => not_found("approval"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn approve_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
    Json(request): Json<ApproveRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow
        .approvals
        .approve(&submission_id, &request.reviewer_id, request.comments)
    {
        Ok(approval) => (StatusCode::CREATED, Json(approval)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reject_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
    Json(request): Json<RejectRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow
        .approvals
        .reject(&submission_id, &request.reviewer_id, request.comments)
    {
        Ok(approval) => (StatusCode::CREATED, Json(approval)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submission_approvals_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.approvals.list_for_submission(&submission_id) {
        Ok(approvals) => (StatusCode::OK, Json(approvals)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn pending_approvals_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(reviewer_id): Path<UserId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.approvals.pending_for_reviewer(&reviewer_id) {
        Ok(approvals) => (StatusCode::OK, Json(approvals)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_metrics_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Json(request): Json<RecordMetricsRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow
        .metrics
        .record(&request.submission_id, request.snapshot)
    {
        Ok(metric) => (StatusCode::CREATED, Json(metric)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_metric_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(id): Path<MetricId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.metrics.get(&id) {
        Ok(Some(metric)) => (StatusCode::OK, Json(metric)).into_response(),
        Ok(None) => not_found("performance metric"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submission_metrics_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.metrics.list_for_submission(&submission_id) {
        Ok(metrics) => (StatusCode::OK, Json(metrics)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn latest_metric_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.metrics.latest(&submission_id) {
        Ok(Some(metric)) => (StatusCode::OK, Json(metric)).into_response(),
        Ok(None) => not_found("performance metric"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn metric_summary_handler<S, C, I>(
    State(workflow): Workflow<S, C, I>,
    Path(submission_id): Path<SubmissionId>,
) -> Response
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    match workflow.metrics.summarize(&submission_id) {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => (StatusCode::OK, Json(json!({}))).into_response(),
        Err(err) => error_response(err),
    }
}
