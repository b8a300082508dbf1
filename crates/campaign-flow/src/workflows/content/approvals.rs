use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    Approval, ApprovalDecision, ApprovalId, SubmissionId, SubmissionState, UserId,
};
use super::repository::SubmissionStore;
use super::service::{workflow_error, ContentWorkflowError};

/// Append-only ledger of reviewer decisions. Each approve/reject settles the
/// submission's terminal state and files an immutable record in the same
/// commit; records are never updated afterwards.
pub struct ApprovalService<S> {
    store: Arc<S>,
}

impl<S> ApprovalService<S>
where
    S: SubmissionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Approve a submitted submission. Comments are optional.
    pub fn approve(
        &self,
        submission_id: &SubmissionId,
        reviewer_id: &UserId,
        comments: Option<String>,
    ) -> Result<Approval, ContentWorkflowError> {
        self.decide(
            submission_id,
            reviewer_id,
            ApprovalDecision::Approved,
            comments,
        )
    }

    /// Reject a submitted submission. Rejections must explain themselves:
    /// blank comments are a validation error, checked before any state read.
    pub fn reject(
        &self,
        submission_id: &SubmissionId,
        reviewer_id: &UserId,
        comments: String,
    ) -> Result<Approval, ContentWorkflowError> {
        if comments.trim().is_empty() {
            return Err(ContentWorkflowError::Validation(
                "rejection must include comments".to_string(),
            ));
        }
        self.decide(
            submission_id,
            reviewer_id,
            ApprovalDecision::Rejected,
            Some(comments),
        )
    }

    pub fn get(&self, id: &ApprovalId) -> Result<Option<Approval>, ContentWorkflowError> {
        self.store
            .fetch_approval(id)
            .map_err(ContentWorkflowError::Store)
    }

    /// Decision history for a submission, most recent first.
    pub fn list_for_submission(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Approval>, ContentWorkflowError> {
        self.store
            .approvals_for(submission_id)
            .map_err(ContentWorkflowError::Store)
    }

    /// Approvals this reviewer has already filed on submissions still in
    /// `Submitted` state. Note the intersection: this cannot surface
    /// submissions the reviewer has not decided yet.
    pub fn pending_for_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> Result<Vec<Approval>, ContentWorkflowError> {
        let submitted: Vec<SubmissionId> = self
            .store
            .submissions_in_state(SubmissionState::Submitted)
            .map_err(ContentWorkflowError::Store)?
            .into_iter()
            .map(|submission| submission.id)
            .collect();

        let approvals = self
            .store
            .approvals_by_reviewer(reviewer_id)
            .map_err(ContentWorkflowError::Store)?;

        Ok(approvals
            .into_iter()
            .filter(|approval| submitted.contains(&approval.submission_id))
            .collect())
    }

    fn decide(
        &self,
        submission_id: &SubmissionId,
        reviewer_id: &UserId,
        decision: ApprovalDecision,
        comments: Option<String>,
    ) -> Result<Approval, ContentWorkflowError> {
        let operation = match decision {
            ApprovalDecision::Approved => "approve",
            ApprovalDecision::Rejected => "reject",
        };
        let new_state = match decision {
            ApprovalDecision::Approved => SubmissionState::Approved,
            ApprovalDecision::Rejected => SubmissionState::Rejected,
        };

        let approval = Approval {
            id: ApprovalId::new(),
            submission_id: *submission_id,
            reviewer_id: *reviewer_id,
            decision,
            comments,
            decided_at: Utc::now(),
        };

        let (_submission, approval) = self
            .store
            .record_decision(submission_id, new_state, approval)
            .map_err(|err| workflow_error(operation, *submission_id, err))?;
        Ok(approval)
    }
}
