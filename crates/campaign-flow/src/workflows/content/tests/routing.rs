use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::content::domain::{SubmissionId, UserId};

fn json_request(method: &str, uri: String, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

fn empty_request(method: &str, uri: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn post_submissions_creates_a_draft() {
    let fixture = fixture();
    let payload = json!({
        "campaign_id": fixture.campaign_id,
        "influencer_id": fixture.influencer_id,
        "title": "Fall lookbook reel",
        "caption": "First cut",
    });
    let router = router(fixture);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/content-submissions".to_string(),
            &payload,
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body.get("state"), Some(&json!("Draft")));
    assert_eq!(body.get("current_version_number"), Some(&json!(0)));
    assert_eq!(body.get("submitted_at"), Some(&Value::Null));
}

#[tokio::test]
async fn post_submissions_with_unknown_campaign_is_unprocessable() {
    let fixture = fixture();
    let payload = json!({
        "campaign_id": crate::workflows::content::domain::CampaignId::new(),
        "influencer_id": fixture.influencer_id,
        "title": "Fall lookbook reel",
        "caption": "First cut",
    });
    let router = router(fixture);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/content-submissions".to_string(),
            &payload,
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("not found"));
}

#[tokio::test]
async fn lifecycle_over_http_reaches_a_terminal_state() {
    let fixture = fixture();
    let reviewer_id = fixture.reviewer_id;
    let author_id = fixture.author_id;
    let submission = draft(&fixture);
    let router = router(fixture);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            format!("{}/caption", submission_path(&submission.id)),
            &json!({ "caption": "v1" }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            format!("{}/submit", submission_path(&submission.id)),
            &json!({ "submitted_by": author_id }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("state"), Some(&json!("Submitted")));
    assert!(body.get("submitted_at").is_some_and(|at| !at.is_null()));

    let response = router
        .clone()
        .oneshot(empty_request(
            "GET",
            format!("{}/versions", submission_path(&submission.id)),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let versions = read_json_body(response).await;
    assert_eq!(versions.as_array().map(Vec::len), Some(1));
    assert_eq!(versions[0].get("caption"), Some(&json!("v1")));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            format!("/api/approvals/{}/reject", submission.id),
            &json!({ "reviewer_id": reviewer_id, "comments": "needs better lighting" }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);
    let approval = read_json_body(response).await;
    assert_eq!(approval.get("decision"), Some(&json!("Rejected")));
    assert_eq!(
        approval.get("comments"),
        Some(&json!("needs better lighting"))
    );

    // terminal states refuse further decisions
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            format!("/api/approvals/{}/approve", submission.id),
            &json!({ "reviewer_id": reviewer_id }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reject_with_blank_comments_is_unprocessable() {
    let fixture = fixture();
    let reviewer_id = fixture.reviewer_id;
    let submission = submitted(&fixture);
    let router = router(fixture);

    let response = router
        .oneshot(json_request(
            "POST",
            format!("/api/approvals/{}/reject", submission.id),
            &json!({ "reviewer_id": reviewer_id, "comments": "   " }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_submission_is_not_found() {
    let fixture = fixture();
    let router = router(fixture);

    let response = router
        .oneshot(empty_request(
            "GET",
            submission_path(&SubmissionId::new()),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let fixture = fixture();
    let submission = draft(&fixture);
    let router = router(fixture);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", submission_path(&submission.id)))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request("DELETE", submission_path(&submission.id)))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_round_trip_and_summary() {
    let fixture = fixture();
    let submission = draft(&fixture);
    let router = router(fixture);

    let summary_uri = format!(
        "/api/performance-metrics/submission/{}/summary",
        submission.id
    );

    let response = router
        .clone()
        .oneshot(empty_request("GET", summary_uri.clone()))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({}));

    for (reach, engagements) in [(10_000, 800), (12_000, 900)] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/performance-metrics".to_string(),
                &json!({
                    "submission_id": submission.id,
                    "reach": reach,
                    "engagements": engagements,
                    "saves": 0,
                    "shares": 0,
                    "clicks": 0,
                    "conversions": 0,
                }),
            ))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .clone()
        .oneshot(empty_request("GET", summary_uri))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let summary = read_json_body(response).await;
    assert_eq!(summary.get("total_reach"), Some(&json!(22_000)));
    assert_eq!(summary.get("total_engagements"), Some(&json!(1_700)));
    assert_eq!(summary.get("average_engagement_rate"), Some(&json!(0.0773)));

    let response = router
        .oneshot(empty_request(
            "GET",
            format!(
                "/api/performance-metrics/submission/{}/latest",
                submission.id
            ),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let latest = read_json_body(response).await;
    assert_eq!(latest.get("reach"), Some(&json!(12_000)));
}

#[tokio::test]
async fn negative_metric_payload_is_unprocessable() {
    let fixture = fixture();
    let submission = draft(&fixture);
    let router = router(fixture);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/performance-metrics".to_string(),
            &json!({
                "submission_id": submission.id,
                "reach": -1,
                "engagements": 0,
                "saves": 0,
                "shares": 0,
                "clicks": 0,
                "conversions": 0,
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn pending_reviewer_queue_is_empty_by_construction() {
    let fixture = fixture();
    let reviewer_id = UserId::new();
    let _awaiting = submitted(&fixture);
    let router = router(fixture);

    let response = router
        .oneshot(empty_request(
            "GET",
            format!("/api/approvals/pending/{reviewer_id}"),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!([]));
}
