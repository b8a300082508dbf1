use crate::cli::ServeArgs;
use crate::infra::{
    seed_reference_data, AppState, InMemoryCampaignRegistry, InMemoryInfluencerRegistry,
};
use crate::routes::with_content_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use campaign_flow::config::AppConfig;
use campaign_flow::error::AppError;
use campaign_flow::telemetry;
use campaign_flow::workflows::content::{ContentWorkflow, InMemorySubmissionStore};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySubmissionStore::default());
    let campaigns = Arc::new(InMemoryCampaignRegistry::default());
    let influencers = Arc::new(InMemoryInfluencerRegistry::default());
    let (campaign_id, influencer_id) = seed_reference_data(&campaigns, &influencers);

    let workflow = Arc::new(ContentWorkflow::new(store, campaigns, influencers));

    let app = with_content_routes(workflow)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "campaign content workflow service ready");
    info!(%campaign_id, %influencer_id, "seeded demo campaign and influencer");

    axum::serve(listener, app).await?;
    Ok(())
}
