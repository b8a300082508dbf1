use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier for a content submission.
    SubmissionId
);
entity_id!(
    /// Identifier for an immutable content version.
    VersionId
);
entity_id!(
    /// Identifier for a reviewer decision record.
    ApprovalId
);
entity_id!(
    /// Identifier for a performance metric snapshot.
    MetricId
);
entity_id!(
    /// Identifier of a campaign owned by the external registry.
    CampaignId
);
entity_id!(
    /// Identifier of an influencer owned by the external registry.
    InfluencerId
);
entity_id!(
    /// Identifier of a campaign deliverable; never validated by the core.
    DeliverableId
);
entity_id!(
    /// Identity of an acting user, supplied by the caller.
    UserId
);

/// Lifecycle state of a content submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl SubmissionState {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionState::Draft => "draft",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Approved => "approved",
            SubmissionState::Rejected => "rejected",
        }
    }

    /// Approved and Rejected admit no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            SubmissionState::Approved | SubmissionState::Rejected
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reviewer verdict recorded in the approval ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl ApprovalDecision {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalDecision::Approved => "approved",
            ApprovalDecision::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A unit of content proposed by an influencer against a campaign.
///
/// The caption and asset path are working fields: drafts edit them in place,
/// and submitting snapshots them into an immutable [`ContentVersion`].
/// `current_version_number` is 0 exactly while the submission is a draft, and
/// `submitted_at` is stamped once, on the first submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub campaign_id: CampaignId,
    pub influencer_id: InfluencerId,
    pub deliverable_id: Option<DeliverableId>,
    pub title: String,
    pub caption: String,
    pub asset_path: Option<String>,
    pub state: SubmissionState,
    pub current_version_number: u32,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Immutable snapshot of a submission's working fields at submit time.
///
/// Version numbers are 1-based, dense, and unique per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentVersion {
    pub id: VersionId,
    pub submission_id: SubmissionId,
    pub version_number: u32,
    pub caption: String,
    pub asset_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}

/// A reviewer's binding decision on a submitted version. Never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub id: ApprovalId,
    pub submission_id: SubmissionId,
    pub reviewer_id: UserId,
    pub decision: ApprovalDecision,
    pub comments: Option<String>,
    pub decided_at: DateTime<Utc>,
}

/// Point-in-time measurement of a submission's real-world performance.
/// Append-only; recordable in any submission state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub id: MetricId,
    pub submission_id: SubmissionId,
    pub reach: u64,
    pub engagements: u64,
    pub saves: u64,
    pub shares: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub captured_at: DateTime<Utc>,
}
