//! Integration tests for receipt generation and screenshot-text parsing.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, post_json};
use folio_icons::IconClient;
use httpmock::prelude::*;
use serde_json::json;

fn receipt_date(value: &serde_json::Value) -> NaiveDate {
    NaiveDate::parse_from_str(value.as_str().unwrap(), "%m/%d/%y").unwrap()
}

fn sum_of_minutes(data: &serde_json::Value) -> u64 {
    data["categories"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|c| c["apps"].as_array().unwrap())
        .map(|a| a["minutes"].as_u64().unwrap())
        .sum()
}

// ---------------------------------------------------------------------------
// POST /api/v1/receipts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn daily_receipt_covers_a_single_day() {
    let app = common::build_test_app(common::bare_state());
    let response = post_json(app, "/api/v1/receipts", json!({ "period": "daily" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];

    assert_eq!(data["period"], "daily");
    assert_eq!(receipt_date(&data["startDate"]), receipt_date(&data["endDate"]));

    // Synthetic roster: three fixed sections, all non-empty.
    let categories = data["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["name"], "SOCIAL & COMMUNICATION");
}

#[tokio::test]
async fn weekly_receipt_spans_seven_days() {
    let app = common::build_test_app(common::bare_state());
    let response = post_json(app, "/api/v1/receipts", json!({ "period": "weekly" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];

    let span = receipt_date(&data["endDate"]) - receipt_date(&data["startDate"]);
    assert_eq!(span.num_days(), 7);
}

#[tokio::test]
async fn grand_total_equals_recomputed_sum() {
    let app = common::build_test_app(common::bare_state());
    let response = post_json(app, "/api/v1/receipts", json!({ "period": "weekly" })).await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["grandTotalMinutes"].as_u64().unwrap(), sum_of_minutes(data));
    assert!(data["grandTotal"].as_str().unwrap().ends_with('m'));
    assert!(data["recommendation"]["headline"].is_string());
}

#[tokio::test]
async fn supplied_categories_pass_through_verbatim() {
    let categories = json!([{
        "name": "SOCIAL & COMMUNICATION",
        "apps": [{ "name": "INSTAGRAM", "category": "SOCIAL MEDIA", "minutes": 135, "icon": "instagram" }]
    }]);

    let app = common::build_test_app(common::bare_state());
    let response = post_json(
        app,
        "/api/v1/receipts",
        json!({ "period": "daily", "categories": categories }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["categories"], categories);
    assert_eq!(data["grandTotalMinutes"], 135);
    // 2h15m lands in the [2, 4) hour bracket.
    assert_eq!(data["recommendation"]["headline"], "NICE WORK!");
}

// ---------------------------------------------------------------------------
// POST /api/v1/receipts/parse
// ---------------------------------------------------------------------------

#[tokio::test]
async fn parse_extracts_apps_after_the_most_used_marker() {
    let text = "Screen Time\nToday\nMost Used\nINSTAGRAM\n2h 15m\nPickups";

    let app = common::build_test_app(common::bare_state());
    let response = post_json(app, "/api/v1/receipts/parse", json!({ "text": text })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];

    let apps = data["categories"][0]["apps"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["name"], "INSTAGRAM");
    assert_eq!(apps[0]["minutes"], 135);
    // No icon client configured: the bundled key is kept.
    assert_eq!(apps[0]["icon"], "instagram");
    assert_eq!(data["period"], "daily");
}

#[tokio::test]
async fn parse_rejects_text_without_screen_time_indicators() {
    let app = common::build_test_app(common::bare_state());
    let response = post_json(
        app,
        "/api/v1/receipts/parse",
        json!({ "text": "grocery list: eggs, milk, bread" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNPROCESSABLE");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Screen Time screenshot"));
}

#[tokio::test]
async fn parse_with_no_recognized_apps_is_unprocessable() {
    // Plausible Screen Time text, but the scan stops at Pickups before any
    // app/time pair appears.
    let text = "Screen Time\nMost Used\nPickups\nDaily Average";

    let app = common::build_test_app(common::bare_state());
    let response = post_json(app, "/api/v1/receipts/parse", json!({ "text": text })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Could not read app data"));
}

#[tokio::test]
async fn parse_validates_reported_dimensions() {
    let app = common::build_test_app(common::bare_state());
    let response = post_json(
        app,
        "/api/v1/receipts/parse",
        json!({
            "text": "Screen Time\nMost Used\nINSTAGRAM\n2h 15m",
            "imageWidth": 800,
            "imageHeight": 600
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("portrait"));
}

#[tokio::test]
async fn parse_resolves_fallback_icons_through_the_lookup_service() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("term", "SAFARI")
                .query_param("entity", "software");
            then.status(200).json_body(json!({
                "resultCount": 1,
                "results": [{ "artworkUrl512": "https://example.com/safari512.png" }]
            }));
        })
        .await;

    let state = common::test_state(
        common::test_sanity_config(),
        None,
        Some(IconClient::with_base_url(server.url("/search"))),
    );
    let app = common::build_test_app(state);

    let text = "Screen Time\nMost Used\nSAFARI\n1h 30m";
    let response = post_json(app, "/api/v1/receipts/parse", json!({ "text": text })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    let apps = data["categories"][0]["apps"].as_array().unwrap();
    assert_eq!(apps[0]["name"], "SAFARI");
    assert_eq!(apps[0]["icon"], "https://example.com/safari512.png");
    mock.assert_async().await;
}

#[tokio::test]
async fn parse_keeps_the_bundled_key_when_lookup_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(503);
        })
        .await;

    let state = common::test_state(
        common::test_sanity_config(),
        None,
        Some(IconClient::with_base_url(server.url("/search"))),
    );
    let app = common::build_test_app(state);

    let text = "Screen Time\nMost Used\nSAFARI\n1h 30m";
    let response = post_json(app, "/api/v1/receipts/parse", json!({ "text": text })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["categories"][0]["apps"][0]["icon"], "instagram");
}
