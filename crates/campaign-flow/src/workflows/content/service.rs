use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use super::approvals::ApprovalService;
use super::domain::{
    CampaignId, ContentVersion, DeliverableId, InfluencerId, Submission, SubmissionId,
    SubmissionState, UserId,
};
use super::metrics::MetricsService;
use super::registry::{CampaignRegistry, InfluencerRegistry, RegistryError};
use super::repository::{StoreError, SubmissionStore};

/// Typed creation payload; the referenced campaign and influencer must exist
/// in the external registries.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub campaign_id: CampaignId,
    pub influencer_id: InfluencerId,
    #[serde(default)]
    pub deliverable_id: Option<DeliverableId>,
    pub title: String,
    pub caption: String,
}

/// In-place edit of a draft's working fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftUpdate {
    #[serde(default)]
    pub caption: Option<String>,
}

/// State machine over content submissions: drafts are edited in place,
/// submitting snapshots the working fields into version 1, and reviewer
/// decisions (see [`ApprovalService`]) settle the terminal state.
pub struct ContentSubmissionService<S, C, I> {
    store: Arc<S>,
    campaigns: Arc<C>,
    influencers: Arc<I>,
}

impl<S, C, I> ContentSubmissionService<S, C, I>
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    pub fn new(store: Arc<S>, campaigns: Arc<C>, influencers: Arc<I>) -> Self {
        Self {
            store,
            campaigns,
            influencers,
        }
    }

    /// Create a new submission in `Draft` with no versions and no submit
    /// timestamp. Nothing is persisted when a reference check fails.
    pub fn create(
        &self,
        request: CreateSubmissionRequest,
    ) -> Result<Submission, ContentWorkflowError> {
        if !self.campaigns.campaign_exists(&request.campaign_id)? {
            return Err(ContentWorkflowError::CampaignNotFound(request.campaign_id));
        }
        if !self.influencers.influencer_exists(&request.influencer_id)? {
            return Err(ContentWorkflowError::InfluencerNotFound(
                request.influencer_id,
            ));
        }

        let submission = Submission {
            id: SubmissionId::new(),
            campaign_id: request.campaign_id,
            influencer_id: request.influencer_id,
            deliverable_id: request.deliverable_id,
            title: request.title,
            caption: request.caption,
            asset_path: None,
            state: SubmissionState::Draft,
            current_version_number: 0,
            submitted_at: None,
        };

        self.store
            .insert_submission(submission)
            .map_err(ContentWorkflowError::Store)
    }

    pub fn get(&self, id: &SubmissionId) -> Result<Submission, ContentWorkflowError> {
        self.store
            .fetch_submission(id)
            .map_err(ContentWorkflowError::Store)?
            .ok_or(ContentWorkflowError::SubmissionNotFound(*id))
    }

    /// Submissions visible to a campaign's reviewers; drafts stay private to
    /// the influencer and are excluded.
    pub fn list_for_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Submission>, ContentWorkflowError> {
        let submissions = self
            .store
            .submissions_by_campaign(campaign_id)
            .map_err(ContentWorkflowError::Store)?;
        Ok(submissions
            .into_iter()
            .filter(|submission| submission.state != SubmissionState::Draft)
            .collect())
    }

    pub fn list_for_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<Submission>, ContentWorkflowError> {
        self.store
            .submissions_by_influencer(influencer_id)
            .map_err(ContentWorkflowError::Store)
    }

    /// Edit the working caption of a draft. Does not create a version.
    pub fn update_draft(
        &self,
        id: &SubmissionId,
        update: DraftUpdate,
    ) -> Result<Submission, ContentWorkflowError> {
        let Some(caption) = update.caption else {
            return self.require_draft(id, "update_draft");
        };

        self.store
            .update_caption(id, caption)
            .map_err(|err| workflow_error("update_draft", *id, err))
    }

    /// Promote a draft to `Submitted`: stamps the submit timestamp, bumps the
    /// version counter to 1, and appends the version snapshot — atomically.
    /// The actor is recorded as the version author.
    pub fn submit(
        &self,
        id: &SubmissionId,
        actor: &UserId,
    ) -> Result<Submission, ContentWorkflowError> {
        let (submission, _version) = self
            .store
            .promote(id, Utc::now(), *actor)
            .map_err(|err| workflow_error("submit", *id, err))?;
        Ok(submission)
    }

    /// Unconditional hard delete, any state. Returns false when the
    /// submission does not exist. Versions, approvals, and metrics recorded
    /// against the id are intentionally left behind.
    pub fn delete(&self, id: &SubmissionId) -> Result<bool, ContentWorkflowError> {
        self.store
            .delete_submission(id)
            .map_err(ContentWorkflowError::Store)
    }

    /// Version history, ascending. An idempotent read; survives deletion of
    /// the submission row.
    pub fn versions(
        &self,
        id: &SubmissionId,
    ) -> Result<Vec<ContentVersion>, ContentWorkflowError> {
        self.store
            .versions_for(id)
            .map_err(ContentWorkflowError::Store)
    }

    fn require_draft(
        &self,
        id: &SubmissionId,
        operation: &'static str,
    ) -> Result<Submission, ContentWorkflowError> {
        let submission = self.get(id)?;
        if submission.state != SubmissionState::Draft {
            return Err(ContentWorkflowError::IllegalState {
                operation,
                required: SubmissionState::Draft,
                actual: submission.state,
            });
        }
        Ok(submission)
    }
}

/// Translate store-level failures into workflow errors carrying the
/// operation context.
pub(crate) fn workflow_error(
    operation: &'static str,
    id: SubmissionId,
    err: StoreError,
) -> ContentWorkflowError {
    match err {
        StoreError::NotFound => ContentWorkflowError::SubmissionNotFound(id),
        StoreError::InvalidState { required, actual } => ContentWorkflowError::IllegalState {
            operation,
            required,
            actual,
        },
        other => ContentWorkflowError::Store(other),
    }
}

/// Error raised by the content workflow services.
#[derive(Debug, thiserror::Error)]
pub enum ContentWorkflowError {
    #[error("campaign {0} not found")]
    CampaignNotFound(CampaignId),
    #[error("influencer {0} not found")]
    InfluencerNotFound(InfluencerId),
    #[error("submission {0} not found")]
    SubmissionNotFound(SubmissionId),
    #[error("{operation} requires a {required} submission, found {actual}")]
    IllegalState {
        operation: &'static str,
        required: SubmissionState,
        actual: SubmissionState,
    },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(StoreError),
}

/// The three workflow services over one shared store, wired by explicit
/// construction.
pub struct ContentWorkflow<S, C, I> {
    pub submissions: ContentSubmissionService<S, C, I>,
    pub approvals: ApprovalService<S>,
    pub metrics: MetricsService<S>,
}

impl<S, C, I> ContentWorkflow<S, C, I>
where
    S: SubmissionStore + 'static,
    C: CampaignRegistry + 'static,
    I: InfluencerRegistry + 'static,
{
    pub fn new(store: Arc<S>, campaigns: Arc<C>, influencers: Arc<I>) -> Self {
        Self {
            submissions: ContentSubmissionService::new(store.clone(), campaigns, influencers),
            approvals: ApprovalService::new(store.clone()),
            metrics: MetricsService::new(store),
        }
    }
}
