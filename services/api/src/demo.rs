use crate::infra::{
    seed_reference_data, InMemoryCampaignRegistry, InMemoryInfluencerRegistry,
};
use chrono::{Duration, Utc};
use clap::Args;
use std::sync::Arc;

use campaign_flow::error::AppError;
use campaign_flow::workflows::content::{
    CampaignId, ContentWorkflow, CreateSubmissionRequest, DraftUpdate, InMemorySubmissionStore,
    MetricSnapshot, UserId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Title for the demo submission
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Final caption submitted for review
    #[arg(long)]
    pub(crate) caption: Option<String>,
    /// Have the reviewer reject the submission instead of approving it
    #[arg(long)]
    pub(crate) reject: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        title,
        caption,
        reject,
    } = args;

    let title = title.unwrap_or_else(|| "Fall lookbook reel".to_string());
    let caption = caption.unwrap_or_else(|| "Final cut with on-brand color grade".to_string());

    println!("Content submission workflow demo");

    let store = Arc::new(InMemorySubmissionStore::default());
    let campaigns = Arc::new(InMemoryCampaignRegistry::default());
    let influencers = Arc::new(InMemoryInfluencerRegistry::default());
    let (campaign_id, influencer_id) = seed_reference_data(&campaigns, &influencers);
    println!("- Seeded campaign {campaign_id} and influencer {influencer_id}");

    let retired_campaign = CampaignId::new();
    campaigns.register(retired_campaign);
    campaigns.retire(&retired_campaign);

    let workflow = ContentWorkflow::new(store, campaigns, influencers);
    let author = UserId::new();
    let reviewer = UserId::new();

    // reference checks exclude soft-deleted campaigns
    let rejected_create = workflow.submissions.create(CreateSubmissionRequest {
        campaign_id: retired_campaign,
        influencer_id,
        deliverable_id: None,
        title: title.clone(),
        caption: "draft".to_string(),
    });
    match rejected_create {
        Err(err) => println!("- Create against a retired campaign refused: {err}"),
        Ok(_) => println!("- Unexpected: retired campaign accepted a submission"),
    }

    let submission = match workflow.submissions.create(CreateSubmissionRequest {
        campaign_id,
        influencer_id,
        deliverable_id: None,
        title,
        caption: "First rough cut".to_string(),
    }) {
        Ok(submission) => submission,
        Err(err) => {
            println!("- Draft creation failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Created submission {} -> state {}, version {}",
        submission.id,
        submission.state.label(),
        submission.current_version_number
    );

    if let Err(err) = workflow.submissions.update_draft(
        &submission.id,
        DraftUpdate {
            caption: Some(caption),
        },
    ) {
        println!("- Draft edit failed: {err}");
        return Ok(());
    }
    println!("- Updated working caption in place (no version created)");

    let submission = match workflow.submissions.submit(&submission.id, &author) {
        Ok(submission) => submission,
        Err(err) => {
            println!("- Submit failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Submitted for review at {} -> state {}, version {}",
        submission
            .submitted_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string()),
        submission.state.label(),
        submission.current_version_number
    );

    match workflow.submissions.versions(&submission.id) {
        Ok(versions) => {
            for version in versions {
                println!(
                    "  - v{} \"{}\" by {}",
                    version.version_number, version.caption, version.created_by
                );
            }
        }
        Err(err) => println!("  Version log unavailable: {err}"),
    }

    let decision = if reject {
        workflow.approvals.reject(
            &submission.id,
            &reviewer,
            "Needs better lighting in the opening shot".to_string(),
        )
    } else {
        workflow
            .approvals
            .approve(&submission.id, &reviewer, Some("Great fit for the brief".to_string()))
    };
    let approval = match decision {
        Ok(approval) => approval,
        Err(err) => {
            println!("- Reviewer decision failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Reviewer {} filed {} at {}",
        approval.reviewer_id,
        approval.decision.label(),
        approval.decided_at.to_rfc3339()
    );

    // terminal states refuse further decisions
    if let Err(err) = workflow
        .approvals
        .approve(&submission.id, &reviewer, None)
    {
        println!("- Second decision refused as expected: {err}");
    }

    let yesterday = Utc::now() - Duration::days(1);
    let snapshots = [
        MetricSnapshot {
            reach: 10_000,
            engagements: 800,
            saves: 40,
            shares: 25,
            clicks: 310,
            conversions: 12,
            captured_at: Some(yesterday),
        },
        MetricSnapshot {
            reach: 12_000,
            engagements: 900,
            saves: 60,
            shares: 35,
            clicks: 290,
            conversions: 18,
            captured_at: None,
        },
    ];
    for snapshot in snapshots {
        if let Err(err) = workflow.metrics.record(&submission.id, snapshot) {
            println!("- Metric snapshot refused: {err}");
        }
    }

    match workflow.metrics.latest(&submission.id) {
        Ok(Some(latest)) => println!(
            "- Latest snapshot: reach {}, engagements {} ({})",
            latest.reach,
            latest.engagements,
            latest.captured_at.to_rfc3339()
        ),
        Ok(None) => println!("- No metric snapshots recorded"),
        Err(err) => println!("- Latest snapshot unavailable: {err}"),
    }

    match workflow.metrics.summarize(&submission.id) {
        Ok(Some(summary)) => {
            println!(
                "- Summary over {} snapshots: reach {}, engagements {}, saves {}, shares {}, clicks {}, conversions {}",
                summary.count,
                summary.total_reach,
                summary.total_engagements,
                summary.total_saves,
                summary.total_shares,
                summary.total_clicks,
                summary.total_conversions
            );
            println!(
                "  Average engagement rate {:.4} ({} -> {})",
                summary.average_engagement_rate,
                summary.first_captured.to_rfc3339(),
                summary.last_captured.to_rfc3339()
            );
        }
        Ok(None) => println!("- No metrics to summarize"),
        Err(err) => println!("- Summary unavailable: {err}"),
    }

    Ok(())
}
