use super::domain::{CampaignId, InfluencerId};

/// Read-only lookup into the campaign catalog, consulted only at submission
/// creation time. Implementations must exclude soft-deleted campaigns.
pub trait CampaignRegistry: Send + Sync {
    fn campaign_exists(&self, id: &CampaignId) -> Result<bool, RegistryError>;
}

/// Read-only lookup into the influencer directory, consulted only at
/// submission creation time. Implementations must exclude soft-deleted
/// influencers.
pub trait InfluencerRegistry: Send + Sync {
    fn influencer_exists(&self, id: &InfluencerId) -> Result<bool, RegistryError>;
}

/// Failure reaching a registry backend.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}
