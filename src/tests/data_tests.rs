//! # End-to-end Test Suite for Tide Timings
//!
//! These tests push a realistic tide-timings page through the whole pipeline
//! (HTML parsing, extraction, JSON serialization and the HTTP API) without
//! touching the network.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tide_timings_lib::api::{router, ApiState};
use tide_timings_lib::tide_data::{parse_page, TimingsSource};
use tide_timings_lib::{TideError, TideMonth};
use tower::ServiceExt;

/// Two months as the source page lays them out: tab bar first, then one
/// content block per month with header, spacer and malformed rows mixed in.
const FIXTURE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Tide Timings</title></head>
<body>
  <div class="tab">
    <ul class="tab__nav">
      <li class="tab__nav-item is-active" data-box="tide-0">October 2026</li>
      <li class="tab__nav-item" data-box="tide-1">November 2026</li>
      <li class="tab__nav-item">Download</li>
    </ul>
  </div>

  <div class="forecast-widget__content" data-box="tide-0">
    <table class="table">
      <thead>
        <tr><th>Date</th><th>Time</th><th>Height (m)</th><th>Tide</th></tr>
      </thead>
      <tbody>
        <tr><td colspan="4">Heights above Chart Datum</td></tr>
        <tr><td>09:00</td><td>1.2</td><td>Low</td></tr>
        <tr><td>1</td><td>01:48</td><td>2.9</td><td>High</td></tr>
        <tr><td></td><td>08:12</td><td>0.6</td><td>Low</td></tr>
        <tr><td></td><td>14:30</td><td>2.6</td><td>High</td></tr>
        <tr><td></td><td>20:41</td><td>1.1</td><td>Low</td></tr>
        <tr><td>2</td><td>02:25</td><td>-</td><td>High</td></tr>
        <tr><td></td><td>08:50</td><td>0.5</td><td>Low</td></tr>
        <tr><td>N/A</td><td>10:00</td><td>9.9</td><td>High</td></tr>
        <tr><td></td><td>15:05</td><td>2.7</td><td>High</td></tr>
        <tr><td>3</td><td>03:01</td><td>oops</td><td>High</td></tr>
        <tr><td>4</td><td>03:40</td><td>1,001.5</td><td>High</td></tr>
        <tr><td>1</td><td>23:58</td><td>1.9</td><td>High</td></tr>
      </tbody>
    </table>
  </div>

  <div class="forecast-widget__content" id="tide-1">
    <table><tbody>
      <tr><td>1</td><td>02:10</td><td>3.0</td><td>High</td></tr>
      <tr><td>  </td><td>08:31</td><td>0.4</td><td>Low</td></tr>
    </tbody></table>
  </div>

  <div class="forecast-widget__content" data-box="tide-2">
    <p>Coming soon</p>
  </div>
</body>
</html>"#;

/// Source that parses a fixed page on every call.
struct PageSource(&'static str);

#[async_trait]
impl TimingsSource for PageSource {
    async fn tide_timings(&self) -> Result<Vec<TideMonth>, TideError> {
        parse_page(self.0)
    }
}

/// Test that the fixture yields both months with correctly grouped days.
#[test]
fn fixture_yields_two_months_in_page_order() {
    let months = parse_page(FIXTURE).expect("fixture should contain tide data");

    let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(
        labels,
        vec!["October 2026", "November 2026"],
        "Empty third section must not produce a month"
    );
}

/// Test the carry-forward rules on the first month.
///
/// Covers the leading orphan row, the bad first height of day 2, the "N/A"
/// marker, the day with no valid reading and the late reappearance of day 1.
#[test]
fn fixture_days_follow_carry_forward_rules() {
    let months = parse_page(FIXTURE).unwrap();
    let october = &months[0];

    let days: Vec<u32> = october.days.iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 4], "Day 3 has no valid reading");

    let day1 = &october.days[0];
    assert_eq!(day1.observations.len(), 5, "Late day-1 row joins the first entry");
    assert_eq!(day1.observations[0].time, "01:48");
    assert_eq!(day1.observations[4].time, "23:58");

    // "-" height dropped; the N/A row is skipped and day 2 stays open
    let day2 = &october.days[1];
    let times: Vec<&str> = day2.observations.iter().map(|o| o.time.as_str()).collect();
    assert_eq!(times, vec!["08:50", "15:05"]);

    let day4 = &october.days[2];
    assert_eq!(day4.observations[0].height, 1001.5);
}

/// Test that the id attribute stands in for a missing data-box key.
#[test]
fn fixture_second_month_resolved_by_id() {
    let months = parse_page(FIXTURE).unwrap();
    let november = &months[1];

    assert_eq!(november.days.len(), 1);
    assert_eq!(november.days[0].observations.len(), 2);
    assert_eq!(november.days[0].observations[1].level, "Low");
}

/// Test that the JSON shape uses the published field names.
#[test]
fn months_serialize_with_published_field_names() {
    let months = parse_page(FIXTURE).unwrap();
    let json = serde_json::to_value(&months[1]).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "month": "November 2026",
            "days": [{
                "day": 1,
                "observations": [
                    {"time": "02:10", "height": 3.0, "level": "High"},
                    {"time": "08:31", "height": 0.4, "level": "Low"}
                ]
            }]
        })
    );
}

/// Test the full HTTP path from request to extracted JSON.
#[tokio::test]
async fn api_serves_fixture_months() {
    let app = router(ApiState::new(Arc::new(PageSource(FIXTURE))));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/tide-timings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"][0]["days"][1]["day"], 2);
}

/// Test that a page with only decorative content surfaces as a gateway error.
#[tokio::test]
async fn api_reports_empty_page_as_bad_gateway() {
    let app = router(ApiState::new(Arc::new(PageSource(
        r#"<html><body><div class="forecast-widget__content" data-box="x">
             <table><tbody><tr><td>Date</td><td>Time</td></tr></tbody></table>
           </div></body></html>"#,
    ))));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/tide-timings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "no tide data found on page");
}
