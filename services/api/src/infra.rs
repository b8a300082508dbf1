use campaign_flow::workflows::content::{
    CampaignId, CampaignRegistry, InfluencerId, InfluencerRegistry, RegistryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Campaign catalog stand-in; retiring an id marks the campaign
/// soft-deleted, which the existence check must exclude.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCampaignRegistry {
    active: Arc<Mutex<HashSet<CampaignId>>>,
}

impl InMemoryCampaignRegistry {
    pub(crate) fn register(&self, id: CampaignId) {
        self.active
            .lock()
            .expect("campaign registry mutex poisoned")
            .insert(id);
    }

    pub(crate) fn retire(&self, id: &CampaignId) {
        self.active
            .lock()
            .expect("campaign registry mutex poisoned")
            .remove(id);
    }
}

impl CampaignRegistry for InMemoryCampaignRegistry {
    fn campaign_exists(&self, id: &CampaignId) -> Result<bool, RegistryError> {
        Ok(self
            .active
            .lock()
            .expect("campaign registry mutex poisoned")
            .contains(id))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInfluencerRegistry {
    active: Arc<Mutex<HashSet<InfluencerId>>>,
}

impl InMemoryInfluencerRegistry {
    pub(crate) fn register(&self, id: InfluencerId) {
        self.active
            .lock()
            .expect("influencer registry mutex poisoned")
            .insert(id);
    }
}

impl InfluencerRegistry for InMemoryInfluencerRegistry {
    fn influencer_exists(&self, id: &InfluencerId) -> Result<bool, RegistryError> {
        Ok(self
            .active
            .lock()
            .expect("influencer registry mutex poisoned")
            .contains(id))
    }
}

/// Register one campaign and one influencer so the workflow is exercisable
/// against a fresh process.
pub(crate) fn seed_reference_data(
    campaigns: &InMemoryCampaignRegistry,
    influencers: &InMemoryInfluencerRegistry,
) -> (CampaignId, InfluencerId) {
    let campaign_id = CampaignId::new();
    let influencer_id = InfluencerId::new();
    campaigns.register(campaign_id);
    influencers.register(influencer_id);
    (campaign_id, influencer_id)
}
