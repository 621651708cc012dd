use axum::http::StatusCode;
use eyre::eyre;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{MEMBER_TOKEN, TestContext, at, bearer, stored_meet};

#[tokio::test]
async fn test_availability_groups_by_date() {
    let mut ctx = TestContext::new();

    let mut late = stored_meet(1, "doc-7", at(2, 14, 0), at(2, 15, 30));
    late.title = "Afternoon".to_string();
    let mut early = stored_meet(2, "doc-7", at(2, 9, 0), at(2, 9, 45));
    early.title = "Morning".to_string();
    let next_day = stored_meet(3, "doc-7", at(3, 8, 0), at(3, 9, 0));

    ctx.meet_repo.expect_query_meets().never();
    ctx.meet_repo
        .expect_occupying_meets()
        .withf(|organizer_id, from, to| {
            organizer_id == "doc-7" && *from == at(2, 0, 0) && *to == at(8, 0, 0)
        })
        .times(1)
        .returning(move |_, _, _| Ok(vec![late.clone(), early.clone(), next_day.clone()]));

    let server = ctx.server();
    let (name, value) = bearer(MEMBER_TOKEN);
    // Members may read another organizer's calendar
    let response = server
        .get("/api/availability?uuid=doc-7&from=2025-06-02&to=2025-06-08")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "dates": [
                {
                    "label": "Mon Jun 02, 2025",
                    "value": "2025-06-02",
                    "title": "Morning",
                    "times": [
                        { "start": "09:00", "end": "09:45", "duration": "45m" },
                        { "start": "14:00", "end": "15:30", "duration": "90m" }
                    ]
                },
                {
                    "label": "Tue Jun 03, 2025",
                    "value": "2025-06-03",
                    "title": "Meet 3",
                    "times": [
                        { "start": "08:00", "end": "09:00", "duration": "60m" }
                    ]
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_availability_defaults_to_caller_and_week() {
    let mut ctx = TestContext::new();
    ctx.meet_repo
        .expect_occupying_meets()
        .withf(|organizer_id, from, to| {
            organizer_id == "org1" && *to - *from == chrono::Duration::days(6)
        })
        .returning(|_, _, _| Ok(vec![]));

    let server = ctx.server();
    let (name, value) = bearer(MEMBER_TOKEN);
    let response = server
        .get("/api/availability")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "dates": [] }));
}

#[tokio::test]
async fn test_availability_rejects_bad_dates() {
    let mut ctx = TestContext::new();
    ctx.meet_repo.expect_occupying_meets().never();

    let server = ctx.server();
    let (name, value) = bearer(MEMBER_TOKEN);
    let response = server
        .get("/api/availability?from=02-06-2025")
        .add_header(name.clone(), value.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: invalid from date, expected YYYY-MM-DD"
    );

    let response = server
        .get("/api/availability?from=2025-06-08&to=2025-06-02")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: from must not be after to"
    );
}

#[tokio::test]
async fn test_availability_storage_failure() {
    let mut ctx = TestContext::new();
    ctx.meet_repo
        .expect_occupying_meets()
        .returning(|_, _, _| Err(eyre!("pool timed out")));

    let server = ctx.server();
    let (name, value) = bearer(MEMBER_TOKEN);
    let response = server
        .get("/api/availability?uuid=doc-7")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Internal server error");
}
