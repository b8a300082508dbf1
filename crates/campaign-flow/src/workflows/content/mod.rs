//! Content submission workflow: drafts, versioned submissions, reviewer
//! decisions, and performance metrics.
//!
//! A submission moves `Draft -> Submitted -> {Approved, Rejected}`. Draft
//! edits mutate the working fields in place; submitting atomically snapshots
//! them into an append-only version log; reviewer decisions settle the
//! terminal state and land in an immutable approval ledger. Performance
//! snapshots accrue independently of the lifecycle and are aggregated on
//! demand. Campaigns and influencers live outside this module and are only
//! consulted through the read-only registry traits.

pub mod approvals;
pub mod domain;
pub mod memory;
pub mod metrics;
pub mod registry;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use approvals::ApprovalService;
pub use domain::{
    Approval, ApprovalDecision, ApprovalId, CampaignId, ContentVersion, DeliverableId,
    InfluencerId, MetricId, PerformanceMetric, Submission, SubmissionId, SubmissionState, UserId,
    VersionId,
};
pub use memory::InMemorySubmissionStore;
pub use metrics::{MetricSnapshot, MetricSummary, MetricsService};
pub use registry::{CampaignRegistry, InfluencerRegistry, RegistryError};
pub use repository::{StoreError, SubmissionStore};
pub use router::{
    content_router, ApproveRequest, RecordMetricsRequest, RejectRequest, SubmitRequest,
};
pub use service::{
    ContentSubmissionService, ContentWorkflow, ContentWorkflowError, CreateSubmissionRequest,
    DraftUpdate,
};
