use crate::e2e::helpers;

use helpers::assertions::{article_titles, assert_view_response};
use helpers::fake_news_api::FakeReply;
use helpers::TestContext;
use hyper::StatusCode;
use newshub_backend::domain::news::CategoryKey;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

async fn open_session(ctx: &TestContext) -> (String, Value) {
    let response = ctx.client.post_empty("/api/sessions").await.unwrap();
    response.assert_status(StatusCode::CREATED);

    let body = response.json_body().clone();
    assert_view_response(&body);
    let id = body["session_id"].as_str().unwrap().to_string();
    (id, body)
}

fn script_four_each(ctx: &TestContext) {
    for key in CategoryKey::ALL {
        ctx.upstream
            .set(key, FakeReply::numbered(&format!("{} story", key.label()), 4));
    }
    ctx.upstream.set(
        CategoryKey::Tesla,
        FakeReply::titles(&[
            "Rocket delivery for Tesla",
            "Tesla rocket mode explained",
            "Model Y refresh",
            "Cybertruck range test",
        ]),
    );
    ctx.upstream.set(
        CategoryKey::Business,
        FakeReply::titles(&[
            "Markets ROCKET higher",
            "Rocketing rents squeeze tenants",
            "Oil prices slip",
            "Fed holds rates",
        ]),
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_aggregate_all_categories_on_create(ctx: &TestContext) {
    let (_, view) = open_session(ctx).await;

    assert_eq!(view["total_results"], 10);
    assert_eq!(view["page_count"], 2);
    assert_eq!(view["effective_page"], 1);
    assert_eq!(view["page_size"], 6);
    assert_eq!(view["selected_category"], "All");
    assert_eq!(view["search_text"], "");
    assert_eq!(view["run_status"], "success");
    assert!(view.get("quota_denial").is_none());

    // Category order, then provider order within a category
    assert_eq!(
        article_titles(&view),
        vec![
            "Apple headline 1",
            "Apple headline 2",
            "Tesla headline 1",
            "Tesla headline 2",
            "Business headline 1",
            "Business headline 2",
        ]
    );
    assert_eq!(view["articles"][0]["category"], "apple");
    assert_eq!(view["articles"][0]["category_label"], "Apple");

    let mut hits = ctx.upstream.hits();
    hits.sort();
    assert_eq!(hits, CategoryKey::ALL.to_vec());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_current_view(ctx: &TestContext) {
    let (id, created) = open_session(ctx).await;

    let response = ctx.client.get(&format!("/api/sessions/{}", id)).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_body(), &created);
    // Reading a view does not re-fetch
    assert_eq!(ctx.upstream.hits().len(), 5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_by_category_label_or_key(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;
    let path = format!("/api/sessions/{}", id);

    let response = ctx
        .client
        .patch(&path, &json!({ "category": "Wall Street Journal" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let view = response.json_body();
    assert_eq!(view["selected_category"], "Wall Street Journal");
    assert_eq!(view["total_results"], 2);
    assert_eq!(view["page_count"], 1);

    let response = ctx
        .client
        .patch(&path, &json!({ "category": "techcrunch" }))
        .await
        .unwrap();
    let view = response.json_body();
    assert_eq!(view["selected_category"], "TechCrunch");
    assert_eq!(
        article_titles(view),
        vec!["TechCrunch headline 1", "TechCrunch headline 2"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_match_nothing_for_an_unknown_label(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;

    let response = ctx
        .client
        .patch(&format!("/api/sessions/{}", id), &json!({ "category": "Bitcoin" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let view = response.json_body();
    assert_eq!(view["total_results"], 0);
    assert_eq!(view["page_count"], 1);
    assert_eq!(view["effective_page"], 1);
    assert!(article_titles(view).is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_search_titles_case_insensitively(ctx: &TestContext) {
    script_four_each(ctx);
    let (id, _) = open_session(ctx).await;

    let response = ctx
        .client
        .patch(&format!("/api/sessions/{}", id), &json!({ "search": "  rocket " }))
        .await
        .unwrap();

    let view = response.json_body();
    assert_eq!(view["total_results"], 4);
    assert_eq!(
        article_titles(view),
        vec![
            "Rocket delivery for Tesla",
            "Tesla rocket mode explained",
            "Markets ROCKET higher",
            "Rocketing rents squeeze tenants",
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_combine_category_and_search(ctx: &TestContext) {
    script_four_each(ctx);
    let (id, _) = open_session(ctx).await;

    let response = ctx
        .client
        .patch(
            &format!("/api/sessions/{}", id),
            &json!({ "category": "Business", "search": "rocket" }),
        )
        .await
        .unwrap();

    let view = response.json_body();
    assert_eq!(
        article_titles(view),
        vec!["Markets ROCKET higher", "Rocketing rents squeeze tenants"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reset_to_first_page_when_a_filter_changes(ctx: &TestContext) {
    script_four_each(ctx);
    let (id, created) = open_session(ctx).await;
    let path = format!("/api/sessions/{}", id);
    assert_eq!(created["page_count"], 4);

    let response = ctx.client.patch(&path, &json!({ "page": 3 })).await.unwrap();
    let view = response.json_body();
    assert_eq!(view["effective_page"], 3);
    assert_eq!(article_titles(view).len(), 6);

    let response = ctx
        .client
        .patch(&path, &json!({ "search": "rocket" }))
        .await
        .unwrap();
    let view = response.json_body();
    assert_eq!(view["effective_page"], 1);
    assert_eq!(view["page_count"], 1);
    assert_eq!(view["total_results"], 4);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_page_after_filters_in_one_update(ctx: &TestContext) {
    script_four_each(ctx);
    let (id, _) = open_session(ctx).await;

    let response = ctx
        .client
        .patch(
            &format!("/api/sessions/{}", id),
            &json!({ "page": 2, "category": "All", "search": "story" }),
        )
        .await
        .unwrap();

    // 12 "story" titles across Apple, TechCrunch and WSJ
    let view = response.json_body();
    assert_eq!(view["total_results"], 12);
    assert_eq!(view["effective_page"], 2);
    assert_eq!(
        article_titles(view).first().map(String::as_str),
        Some("TechCrunch story 3")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clamp_out_of_range_pages(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;
    let path = format!("/api/sessions/{}", id);

    let response = ctx.client.patch(&path, &json!({ "page": 99 })).await.unwrap();
    let view = response.json_body();
    assert_eq!(view["effective_page"], 2);
    assert_eq!(article_titles(view).len(), 4);

    let response = ctx.client.patch(&path, &json!({ "page": 0 })).await.unwrap();
    assert_eq!(response.json_body()["effective_page"], 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clamp_negative_and_huge_pages(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;
    let path = format!("/api/sessions/{}", id);

    let response = ctx.client.patch(&path, &json!({ "page": -1 })).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_body()["effective_page"], 1);

    let response = ctx.client.patch(&path, &json!({ "page": 1e30 })).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_body()["effective_page"], 2);

    let response = ctx.client.patch(&path, &json!({ "page": 1.5 })).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_body()["effective_page"], 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unreadable_updates_with_error_body(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;

    let response = ctx
        .client
        .patch(&format!("/api/sessions/{}", id), &json!({ "page": "two" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response
        .json_body()
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap();
    assert!(error.contains("page"), "unexpected error: {}", error);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_healthy_categories_when_some_fail(ctx: &TestContext) {
    let provider_message = "Requests from the browser are not allowed on the Developer plan.";
    ctx.upstream
        .set(CategoryKey::Tesla, FakeReply::quota_denied(provider_message));
    ctx.upstream.set(
        CategoryKey::Wsj,
        FakeReply::Raw {
            status: 502,
            body: "Bad Gateway".to_string(),
        },
    );

    let (_, view) = open_session(ctx).await;

    assert_eq!(view["run_status"], "partial");
    assert_eq!(view["total_results"], 6);
    assert_eq!(view["quota_denial"], provider_message);

    let statuses = &view["category_status"];
    assert_eq!(statuses["apple"]["status"], "ok");
    assert_eq!(statuses["apple"]["article_count"], 2);
    assert_eq!(statuses["tesla"]["status"], "quota_denied");
    assert_eq!(statuses["tesla"]["message"], provider_message);
    assert_eq!(statuses["wsj"]["status"], "failed");
    assert_eq!(statuses["wsj"]["kind"], "upstream_status");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_open_an_empty_session_when_every_category_fails(ctx: &TestContext) {
    for key in CategoryKey::ALL {
        ctx.upstream.set(
            key,
            FakeReply::Raw {
                status: 500,
                body: "boom".to_string(),
            },
        );
    }

    let (_, view) = open_session(ctx).await;

    assert_eq!(view["run_status"], "failed");
    assert_eq!(view["total_results"], 0);
    assert_eq!(view["page_count"], 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_and_return_to_first_page(ctx: &TestContext) {
    ctx.upstream.set(
        CategoryKey::Apple,
        FakeReply::Raw {
            status: 500,
            body: "boom".to_string(),
        },
    );
    let (id, created) = open_session(ctx).await;
    assert_eq!(created["run_status"], "partial");

    let path = format!("/api/sessions/{}", id);
    ctx.client.patch(&path, &json!({ "page": 2 })).await.unwrap();

    ctx.upstream
        .set(CategoryKey::Apple, FakeReply::numbered("Apple comeback", 3));

    let response = ctx
        .client
        .post_empty(&format!("{}/refresh", path))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let view = response.json_body();
    assert_eq!(view["run_status"], "success");
    assert_eq!(view["total_results"], 11);
    assert_eq!(view["effective_page"], 1);
    assert_eq!(
        article_titles(view).first().map(String::as_str),
        Some("Apple comeback 1")
    );
    assert_eq!(ctx.upstream.hits().len(), 10);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_end_a_session(ctx: &TestContext) {
    let (id, _) = open_session(ctx).await;
    let path = format!("/api/sessions/{}", id);

    let response = ctx.client.delete(&path).await.unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.client.get(&path).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx.client.delete(&path).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_session(ctx: &TestContext) {
    let path = format!("/api/sessions/{}", uuid::Uuid::new_v4());

    ctx.client
        .get(&path)
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
    ctx.client
        .patch(&path, &json!({ "page": 2 }))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
    ctx.client
        .post_empty(&format!("{}/refresh", path))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);

    assert!(ctx.upstream.hits().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_session_ids(ctx: &TestContext) {
    let response = ctx.client.get("/api/sessions/not-a-uuid").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}
