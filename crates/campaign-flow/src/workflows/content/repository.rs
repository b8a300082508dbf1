use chrono::{DateTime, Utc};

use super::domain::{
    Approval, ApprovalId, CampaignId, ContentVersion, InfluencerId, MetricId, PerformanceMetric,
    Submission, SubmissionId, SubmissionState, UserId,
};

/// Durable storage for submissions, versions, approvals, and metric
/// snapshots, so the workflow services can be exercised in isolation.
///
/// Every mutating method is a single atomic unit against the backing store:
/// the state precondition, the state write, and any companion record insert
/// commit together or not at all. Implementations must serialize writers per
/// submission (a store-wide lock or a transactional compare-and-swap both
/// qualify). Reads return committed data only.
pub trait SubmissionStore: Send + Sync {
    fn insert_submission(&self, submission: Submission) -> Result<Submission, StoreError>;
    fn fetch_submission(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError>;
    fn submissions_by_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Submission>, StoreError>;
    fn submissions_by_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<Submission>, StoreError>;
    fn submissions_in_state(&self, state: SubmissionState) -> Result<Vec<Submission>, StoreError>;

    /// Overwrite the working caption of a draft. Fails with
    /// [`StoreError::InvalidState`] when the submission has left `Draft`.
    fn update_caption(&self, id: &SubmissionId, caption: String) -> Result<Submission, StoreError>;

    /// Promote a draft to `Submitted` in one commit: stamp `submitted_at`,
    /// advance `current_version_number`, and append the version snapshot of
    /// the working fields. No partial promotion is observable.
    fn promote(
        &self,
        id: &SubmissionId,
        submitted_at: DateTime<Utc>,
        author: UserId,
    ) -> Result<(Submission, ContentVersion), StoreError>;

    /// Move a submitted submission to its terminal state and append the
    /// approval record in one commit. `new_state` must be `Approved` or
    /// `Rejected`; the precondition is `state == Submitted`.
    fn record_decision(
        &self,
        id: &SubmissionId,
        new_state: SubmissionState,
        approval: Approval,
    ) -> Result<(Submission, Approval), StoreError>;

    /// Hard delete, any state. Returns false when the submission does not
    /// exist. Versions, approvals, and metrics for the id are left in place.
    fn delete_submission(&self, id: &SubmissionId) -> Result<bool, StoreError>;

    /// Append a version snapshot with the next version number (1 when none
    /// exist), keeping the submission's `current_version_number` in step.
    /// Fails with [`StoreError::NotFound`] when the submission is absent.
    fn append_version(
        &self,
        submission_id: &SubmissionId,
        caption: String,
        asset_path: Option<String>,
        author: UserId,
    ) -> Result<ContentVersion, StoreError>;

    /// Versions for a submission, ascending by version number.
    fn versions_for(&self, submission_id: &SubmissionId)
        -> Result<Vec<ContentVersion>, StoreError>;

    fn fetch_approval(&self, id: &ApprovalId) -> Result<Option<Approval>, StoreError>;

    /// Approvals for a submission, most recent decision first.
    fn approvals_for(&self, submission_id: &SubmissionId) -> Result<Vec<Approval>, StoreError>;

    fn approvals_by_reviewer(&self, reviewer_id: &UserId) -> Result<Vec<Approval>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the target submission is
    /// absent.
    fn insert_metric(&self, metric: PerformanceMetric)
        -> Result<PerformanceMetric, StoreError>;

    fn fetch_metric(&self, id: &MetricId) -> Result<Option<PerformanceMetric>, StoreError>;

    /// Metric snapshots for a submission, ascending by capture time.
    fn metrics_for(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<PerformanceMetric>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("submission is {actual}, operation requires {required}")]
    InvalidState {
        required: SubmissionState,
        actual: SubmissionState,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
