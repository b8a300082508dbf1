use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{MetricId, PerformanceMetric, SubmissionId};
use super::repository::SubmissionStore;
use super::service::{workflow_error, ContentWorkflowError};

/// Incoming snapshot of real-world performance numbers. Fields arrive signed
/// so out-of-range input is rejected explicitly instead of wrapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricSnapshot {
    pub reach: i64,
    pub engagements: i64,
    pub saves: i64,
    pub shares: i64,
    pub clicks: i64,
    pub conversions: i64,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

/// Derived read-side aggregation over every snapshot of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub count: usize,
    pub total_reach: u64,
    pub total_engagements: u64,
    pub total_saves: u64,
    pub total_shares: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    /// `total_engagements / total_reach`, rounded to 4 decimal places;
    /// 0.0 when total reach is 0.
    pub average_engagement_rate: f64,
    pub first_captured: DateTime<Utc>,
    pub last_captured: DateTime<Utc>,
}

/// Append-only recorder and aggregator of performance snapshots. Metrics are
/// independent of the submission lifecycle and recordable in any state.
pub struct MetricsService<S> {
    store: Arc<S>,
}

impl<S> MetricsService<S>
where
    S: SubmissionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record a snapshot against an existing submission. Every numeric field
    /// must be non-negative; `captured_at` defaults to now.
    pub fn record(
        &self,
        submission_id: &SubmissionId,
        snapshot: MetricSnapshot,
    ) -> Result<PerformanceMetric, ContentWorkflowError> {
        let metric = PerformanceMetric {
            id: MetricId::new(),
            submission_id: *submission_id,
            reach: non_negative("reach", snapshot.reach)?,
            engagements: non_negative("engagements", snapshot.engagements)?,
            saves: non_negative("saves", snapshot.saves)?,
            shares: non_negative("shares", snapshot.shares)?,
            clicks: non_negative("clicks", snapshot.clicks)?,
            conversions: non_negative("conversions", snapshot.conversions)?,
            captured_at: snapshot.captured_at.unwrap_or_else(Utc::now),
        };

        self.store
            .insert_metric(metric)
            .map_err(|err| workflow_error("record_metrics", *submission_id, err))
    }

    pub fn get(&self, id: &MetricId) -> Result<Option<PerformanceMetric>, ContentWorkflowError> {
        self.store
            .fetch_metric(id)
            .map_err(ContentWorkflowError::Store)
    }

    /// All snapshots for a submission, ascending by capture time.
    pub fn list_for_submission(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<PerformanceMetric>, ContentWorkflowError> {
        self.store
            .metrics_for(submission_id)
            .map_err(ContentWorkflowError::Store)
    }

    /// The snapshot with the greatest capture time, if any.
    pub fn latest(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Option<PerformanceMetric>, ContentWorkflowError> {
        let metrics = self
            .store
            .metrics_for(submission_id)
            .map_err(ContentWorkflowError::Store)?;
        Ok(metrics.into_iter().max_by_key(|metric| metric.captured_at))
    }

    /// Aggregate every snapshot into totals and the average engagement rate.
    /// `None` when no metrics exist. Pure read; no side effects.
    pub fn summarize(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Option<MetricSummary>, ContentWorkflowError> {
        let metrics = self
            .store
            .metrics_for(submission_id)
            .map_err(ContentWorkflowError::Store)?;

        let (Some(first), Some(last)) = (metrics.first(), metrics.last()) else {
            return Ok(None);
        };

        let total_reach: u64 = metrics.iter().map(|m| m.reach).sum();
        let total_engagements: u64 = metrics.iter().map(|m| m.engagements).sum();
        let average_engagement_rate = if total_reach == 0 {
            0.0
        } else {
            round4(total_engagements as f64 / total_reach as f64)
        };

        Ok(Some(MetricSummary {
            count: metrics.len(),
            total_reach,
            total_engagements,
            total_saves: metrics.iter().map(|m| m.saves).sum(),
            total_shares: metrics.iter().map(|m| m.shares).sum(),
            total_clicks: metrics.iter().map(|m| m.clicks).sum(),
            total_conversions: metrics.iter().map(|m| m.conversions).sum(),
            average_engagement_rate,
            first_captured: first.captured_at,
            last_captured: last.captured_at,
        }))
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ContentWorkflowError> {
    u64::try_from(value)
        .map_err(|_| ContentWorkflowError::Validation(format!("{field} must be non-negative")))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::round4;

    #[test]
    fn round4_keeps_four_decimal_places() {
        assert_eq!(round4(1700.0 / 22000.0), 0.0773);
        assert_eq!(round4(0.0), 0.0);
        assert_eq!(round4(2.0 / 3.0), 0.6667);
        assert_eq!(round4(1.0 / 3.0), 0.3333);
    }
}
