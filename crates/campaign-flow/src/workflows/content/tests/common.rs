use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::content::domain::{
    CampaignId, InfluencerId, Submission, SubmissionId, UserId,
};
use crate::workflows::content::memory::InMemorySubmissionStore;
use crate::workflows::content::metrics::MetricSnapshot;
use crate::workflows::content::registry::{CampaignRegistry, InfluencerRegistry, RegistryError};
use crate::workflows::content::router::content_router;
use crate::workflows::content::service::{ContentWorkflow, CreateSubmissionRequest};

#[derive(Default)]
pub(super) struct MemoryCampaigns {
    active: Mutex<HashSet<CampaignId>>,
}

impl MemoryCampaigns {
    pub(super) fn add(&self, id: CampaignId) {
        self.active
            .lock()
            .expect("campaign registry mutex poisoned")
            .insert(id);
    }

    pub(super) fn retire(&self, id: &CampaignId) {
        self.active
            .lock()
            .expect("campaign registry mutex poisoned")
            .remove(id);
    }
}

impl CampaignRegistry for MemoryCampaigns {
    fn campaign_exists(&self, id: &CampaignId) -> Result<bool, RegistryError> {
        Ok(self
            .active
            .lock()
            .expect("campaign registry mutex poisoned")
            .contains(id))
    }
}

#[derive(Default)]
pub(super) struct MemoryInfluencers {
    active: Mutex<HashSet<InfluencerId>>,
}

impl MemoryInfluencers {
    pub(super) fn add(&self, id: InfluencerId) {
        self.active
            .lock()
            .expect("influencer registry mutex poisoned")
            .insert(id);
    }
}

impl InfluencerRegistry for MemoryInfluencers {
    fn influencer_exists(&self, id: &InfluencerId) -> Result<bool, RegistryError> {
        Ok(self
            .active
            .lock()
            .expect("influencer registry mutex poisoned")
            .contains(id))
    }
}

pub(super) type TestWorkflow =
    ContentWorkflow<InMemorySubmissionStore, MemoryCampaigns, MemoryInfluencers>;

pub(super) struct Fixture {
    pub(super) workflow: TestWorkflow,
    pub(super) store: Arc<InMemorySubmissionStore>,
    pub(super) campaigns: Arc<MemoryCampaigns>,
    pub(super) campaign_id: CampaignId,
    pub(super) influencer_id: InfluencerId,
    pub(super) reviewer_id: UserId,
    pub(super) author_id: UserId,
}

/// Workflow over fresh in-memory collaborators with one registered campaign
/// and influencer.
pub(super) fn fixture() -> Fixture {
    let store = Arc::new(InMemorySubmissionStore::default());
    let campaigns = Arc::new(MemoryCampaigns::default());
    let influencers = Arc::new(MemoryInfluencers::default());

    let campaign_id = CampaignId::new();
    let influencer_id = InfluencerId::new();
    campaigns.add(campaign_id);
    influencers.add(influencer_id);

    let workflow = ContentWorkflow::new(store.clone(), campaigns.clone(), influencers);

    Fixture {
        workflow,
        store,
        campaigns,
        campaign_id,
        influencer_id,
        reviewer_id: UserId::new(),
        author_id: UserId::new(),
    }
}

pub(super) fn create_request(fixture: &Fixture) -> CreateSubmissionRequest {
    CreateSubmissionRequest {
        campaign_id: fixture.campaign_id,
        influencer_id: fixture.influencer_id,
        deliverable_id: None,
        title: "Fall lookbook reel".to_string(),
        caption: "First cut of the lookbook reel".to_string(),
    }
}

pub(super) fn draft(fixture: &Fixture) -> Submission {
    fixture
        .workflow
        .submissions
        .create(create_request(fixture))
        .expect("draft creation succeeds")
}

pub(super) fn submitted(fixture: &Fixture) -> Submission {
    let submission = draft(fixture);
    fixture
        .workflow
        .submissions
        .submit(&submission.id, &fixture.author_id)
        .expect("submit succeeds")
}

pub(super) fn snapshot(reach: i64, engagements: i64) -> MetricSnapshot {
    MetricSnapshot {
        reach,
        engagements,
        ..MetricSnapshot::default()
    }
}

pub(super) fn router(fixture: Fixture) -> axum::Router {
    content_router(Arc::new(fixture.workflow))
}

pub(super) fn submission_path(id: &SubmissionId) -> String {
    format!("/api/content-submissions/{id}")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
