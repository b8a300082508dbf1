use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::domain::{
    Approval, ApprovalId, CampaignId, ContentVersion, InfluencerId, MetricId, PerformanceMetric,
    Submission, SubmissionId, SubmissionState, UserId, VersionId,
};
use super::repository::{StoreError, SubmissionStore};

#[derive(Default)]
struct StoreInner {
    submissions: HashMap<SubmissionId, Submission>,
    versions: HashMap<SubmissionId, Vec<ContentVersion>>,
    approvals: Vec<Approval>,
    metrics: Vec<PerformanceMetric>,
}

/// Reference store keeping all records behind one mutex, so each trait
/// method is a single atomic unit and writers are fully serialized.
#[derive(Default, Clone)]
pub struct InMemorySubmissionStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemorySubmissionStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

fn push_version(
    inner: &mut StoreInner,
    submission_id: SubmissionId,
    caption: String,
    asset_path: Option<String>,
    author: UserId,
    created_at: DateTime<Utc>,
) -> ContentVersion {
    let log = inner.versions.entry(submission_id).or_default();
    let version = ContentVersion {
        id: VersionId::new(),
        submission_id,
        version_number: log.len() as u32 + 1,
        caption,
        asset_path,
        created_at,
        created_by: author,
    };
    log.push(version.clone());
    version
}

impl SubmissionStore for InMemorySubmissionStore {
    fn insert_submission(&self, submission: Submission) -> Result<Submission, StoreError> {
        let mut inner = self.lock();
        if inner.submissions.contains_key(&submission.id) {
            return Err(StoreError::Conflict);
        }
        inner.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    fn fetch_submission(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        Ok(self.lock().submissions.get(id).cloned())
    }

    fn submissions_by_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .lock()
            .submissions
            .values()
            .filter(|submission| submission.campaign_id == *campaign_id)
            .cloned()
            .collect())
    }

    fn submissions_by_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .lock()
            .submissions
            .values()
            .filter(|submission| submission.influencer_id == *influencer_id)
            .cloned()
            .collect())
    }

    fn submissions_in_state(&self, state: SubmissionState) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .lock()
            .submissions
            .values()
            .filter(|submission| submission.state == state)
            .cloned()
            .collect())
    }

    fn update_caption(&self, id: &SubmissionId, caption: String) -> Result<Submission, StoreError> {
        let mut inner = self.lock();
        let submission = inner.submissions.get_mut(id).ok_or(StoreError::NotFound)?;
        if submission.state != SubmissionState::Draft {
            return Err(StoreError::InvalidState {
                required: SubmissionState::Draft,
                actual: submission.state,
            });
        }
        submission.caption = caption;
        Ok(submission.clone())
    }

    fn promote(
        &self,
        id: &SubmissionId,
        submitted_at: DateTime<Utc>,
        author: UserId,
    ) -> Result<(Submission, ContentVersion), StoreError> {
        let mut inner = self.lock();
        let submission = inner.submissions.get(id).ok_or(StoreError::NotFound)?;
        if submission.state != SubmissionState::Draft {
            return Err(StoreError::InvalidState {
                required: SubmissionState::Draft,
                actual: submission.state,
            });
        }
        let caption = submission.caption.clone();
        let asset_path = submission.asset_path.clone();

        let version = push_version(&mut inner, *id, caption, asset_path, author, submitted_at);

        let submission = inner.submissions.get_mut(id).ok_or(StoreError::NotFound)?;
        submission.state = SubmissionState::Submitted;
        submission.submitted_at = Some(submitted_at);
        submission.current_version_number = version.version_number;
        Ok((submission.clone(), version))
    }

    fn record_decision(
        &self,
        id: &SubmissionId,
        new_state: SubmissionState,
        approval: Approval,
    ) -> Result<(Submission, Approval), StoreError> {
        let mut inner = self.lock();
        let submission = inner.submissions.get_mut(id).ok_or(StoreError::NotFound)?;
        if submission.state != SubmissionState::Submitted {
            return Err(StoreError::InvalidState {
                required: SubmissionState::Submitted,
                actual: submission.state,
            });
        }
        submission.state = new_state;
        let submission = submission.clone();
        inner.approvals.push(approval.clone());
        Ok((submission, approval))
    }

    fn delete_submission(&self, id: &SubmissionId) -> Result<bool, StoreError> {
        Ok(self.lock().submissions.remove(id).is_some())
    }

    fn append_version(
        &self,
        submission_id: &SubmissionId,
        caption: String,
        asset_path: Option<String>,
        author: UserId,
    ) -> Result<ContentVersion, StoreError> {
        let mut inner = self.lock();
        if !inner.submissions.contains_key(submission_id) {
            return Err(StoreError::NotFound);
        }
        let version = push_version(
            &mut inner,
            *submission_id,
            caption,
            asset_path,
            author,
            Utc::now(),
        );
        let submission = inner
            .submissions
            .get_mut(submission_id)
            .ok_or(StoreError::NotFound)?;
        submission.current_version_number = version.version_number;
        Ok(version)
    }

    fn versions_for(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<ContentVersion>, StoreError> {
        Ok(self
            .lock()
            .versions
            .get(submission_id)
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_approval(&self, id: &ApprovalId) -> Result<Option<Approval>, StoreError> {
        Ok(self
            .lock()
            .approvals
            .iter()
            .find(|approval| approval.id == *id)
            .cloned())
    }

    fn approvals_for(&self, submission_id: &SubmissionId) -> Result<Vec<Approval>, StoreError> {
        let mut approvals: Vec<Approval> = self
            .lock()
            .approvals
            .iter()
            .filter(|approval| approval.submission_id == *submission_id)
            .cloned()
            .collect();
        approvals.sort_by(|a, b| b.decided_at.cmp(&a.decided_at));
        Ok(approvals)
    }

    fn approvals_by_reviewer(&self, reviewer_id: &UserId) -> Result<Vec<Approval>, StoreError> {
        Ok(self
            .lock()
            .approvals
            .iter()
            .filter(|approval| approval.reviewer_id == *reviewer_id)
            .cloned()
            .collect())
    }

    fn insert_metric(
        &self,
        metric: PerformanceMetric,
    ) -> Result<PerformanceMetric, StoreError> {
        let mut inner = self.lock();
        if !inner.submissions.contains_key(&metric.submission_id) {
            return Err(StoreError::NotFound);
        }
        inner.metrics.push(metric.clone());
        Ok(metric)
    }

    fn fetch_metric(&self, id: &MetricId) -> Result<Option<PerformanceMetric>, StoreError> {
        Ok(self
            .lock()
            .metrics
            .iter()
            .find(|metric| metric.id == *id)
            .cloned())
    }

    fn metrics_for(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<PerformanceMetric>, StoreError> {
        let mut metrics: Vec<PerformanceMetric> = self
            .lock()
            .metrics
            .iter()
            .filter(|metric| metric.submission_id == *submission_id)
            .cloned()
            .collect();
        metrics.sort_by(|a, b| a.captured_at.cmp(&b.captured_at));
        Ok(metrics)
    }
}
