//! Integration tests for board rendering: ordering, placeholders, session.
//!
//! Run with: cargo test --test board_integration

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_string, create_test_app, enter_new_group, get, location};
use domain::models::comment::NewComment;
use domain::models::update::NewUpdate;
use gateway::TableGateway;

fn new_update(name: &str, date: &str) -> NewUpdate {
    NewUpdate {
        name: name.to_string(),
        date: date.parse::<NaiveDate>().unwrap(),
        work_life: None,
        hobby_life: None,
        health_care: None,
        family_news: None,
        recent_interests: None,
    }
}

#[tokio::test]
async fn test_board_requires_a_selected_group() {
    let test = create_test_app();
    let response = get(&test.app, "/board", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");
}

#[tokio::test]
async fn test_root_redirects_by_session() {
    let test = create_test_app();

    let response = get(&test.app, "/", "").await;
    assert_eq!(location(&response), "/groups");

    let (cookies, _) = enter_new_group(&test, "모임").await;
    let response = get(&test.app, "/", &cookies).await;
    assert_eq!(location(&response), "/board");
}

#[tokio::test]
async fn test_stale_selection_is_cleared() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;

    // Simulate the group disappearing behind our back.
    test.gateway
        .delete("groups", gateway::Filter::new().eq("id", group_id))
        .await
        .unwrap();

    let response = get(&test.app, "/board", &cookies).await;
    assert_eq!(location(&response), "/groups");
    let cleared = common::cookies_from(&response);
    assert!(cleared.contains("mb_group_id="));
}

#[tokio::test]
async fn test_updates_render_newest_date_first_with_creation_tiebreak() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;
    let updates = test.updates();

    updates
        .create(group_id, &new_update("옛날", "2026-08-01"), &[])
        .await
        .unwrap();
    updates
        .create(group_id, &new_update("같은날-먼저", "2026-08-06"), &[])
        .await
        .unwrap();
    updates
        .create(group_id, &new_update("같은날-나중", "2026-08-06"), &[])
        .await
        .unwrap();

    let html = body_string(get(&test.app, "/board", &cookies).await).await;
    let late = html.find("같은날-나중").unwrap();
    let early = html.find("같은날-먼저").unwrap();
    let old = html.find("옛날").unwrap();
    assert!(late < early, "same-date updates: newest creation first");
    assert!(early < old, "older date renders last");
}

#[tokio::test]
async fn test_comments_render_oldest_first() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;

    let update = test
        .updates()
        .create(group_id, &new_update("김구", "2026-08-06"), &[])
        .await
        .unwrap();
    let comments = test.comments();
    comments
        .create(
            update.id,
            &NewComment {
                commenter_name: "김구".to_string(),
                content: "첫 번째 댓글".to_string(),
            },
        )
        .await
        .unwrap();
    comments
        .create(
            update.id,
            &NewComment {
                commenter_name: "조원일".to_string(),
                content: "두 번째 댓글".to_string(),
            },
        )
        .await
        .unwrap();

    let html = body_string(get(&test.app, "/board", &cookies).await).await;
    assert!(html.contains("댓글 (2)"));
    let first = html.find("첫 번째 댓글").unwrap();
    let second = html.find("두 번째 댓글").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_update_with_no_content_renders_placeholder() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;
    test.updates()
        .create(group_id, &new_update("김구", "2026-08-06"), &[])
        .await
        .unwrap();

    let html = body_string(get(&test.app, "/board", &cookies).await).await;
    assert!(html.contains("작성된 내용이 없습니다."));
}

#[tokio::test]
async fn test_legacy_single_image_column_still_renders() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;

    // A record written before multi-image support: only image_url is set.
    test.gateway
        .insert(
            "updates",
            vec![serde_json::json!({
                "group_id": group_id,
                "name": "김구",
                "date": "2026-08-06",
                "image_url": "https://cdn.example.com/legacy.png",
            })],
        )
        .await
        .unwrap();

    let html = body_string(get(&test.app, "/board", &cookies).await).await;
    assert!(html.contains("https://cdn.example.com/legacy.png"));
}

#[tokio::test]
async fn test_edit_then_cancel_changes_nothing() {
    let test = create_test_app();
    let (cookies, group_id) = enter_new_group(&test, "모임").await;
    let update = test
        .updates()
        .create(
            group_id,
            &NewUpdate {
                work_life: Some("원래 내용".to_string()),
                ..new_update("김구", "2026-08-06")
            },
            &[],
        )
        .await
        .unwrap();

    // Enter edit: the form is seeded from the record's current values.
    let html = body_string(
        get(&test.app, &format!("/board?edit={}", update.id), &cookies).await,
    )
    .await;
    assert!(html.contains(">원래 내용</textarea>"));

    // Cancel is a plain navigation back to the board: no mutation happened.
    let html = body_string(get(&test.app, "/board", &cookies).await).await;
    assert!(html.contains("원래 내용"));
    let stored = test.updates().find(update.id).await.unwrap().unwrap();
    assert_eq!(stored.work_life.as_deref(), Some("원래 내용"));
}

#[tokio::test]
async fn test_leave_group_clears_selection() {
    let test = create_test_app();
    let (cookies, _) = enter_new_group(&test, "모임").await;

    let response = common::post_form(&test.app, "/board/leave", &cookies, "").await;
    assert_eq!(location(&response), "/groups");
    let set = response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(set.contains("mb_group_id=;"));
    assert!(set.contains("Max-Age=0"));
}
