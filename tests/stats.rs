//! Statistics requests against a mocked API.

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use wistia::{Account, DateInput, Media, Project, WistiaClient, WistiaError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn account(server: &MockServer) -> Account {
    let client = WistiaClient::new("key", &server.uri()).unwrap();
    Account::from_data(client, &serde_json::Map::new())
}

fn day_record(date: &str) -> serde_json::Value {
    json!({ "date": date, "load_count": 1, "play_count": 1, "hours_watched": 0.5 })
}

#[tokio::test]
async fn test_account_stats() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/account.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "load_count": 100,
            "play_count": 40,
            "hours_watched": 12.5,
            "unknown_metric": "ignored"
        })))
        .mount(&mock_server)
        .await;

    let stats = account(&mock_server).stats().await.unwrap();

    assert_eq!(stats.load_count, 100);
    assert_eq!(stats.play_count, 40);
    assert_eq!(stats.hours_watched, 12.5);
}

#[tokio::test]
async fn test_daily_stats_sends_same_day_for_every_date_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/account/by_date.json"))
        .and(query_param("start_date", "2012-10-12"))
        .and(query_param("end_date", "2012-10-12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([day_record("2012-10-12")])))
        .expect(4)
        .mount(&mock_server)
        .await;

    let account = account(&mock_server);
    let inputs: [DateInput; 4] = [
        DateInput::from(1_350_043_200_i64),
        DateInput::from("2012-10-12"),
        DateInput::from(NaiveDate::from_ymd_opt(2012, 10, 12).unwrap()),
        DateInput::from(Utc.with_ymd_and_hms(2012, 10, 12, 9, 15, 0).unwrap()),
    ];

    for input in inputs {
        let daily = account.daily_stats(input).await.unwrap();
        assert_eq!(daily.date.as_deref(), Some("2012-10-12"));
        assert_eq!(daily.stats.load_count, 1);
    }
}

#[tokio::test]
async fn test_daily_stats_without_record_is_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/account/by_date.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let daily = account(&mock_server).daily_stats("2013-01-05").await.unwrap();

    assert_eq!(daily.date.as_deref(), Some("2013-01-05"));
    assert_eq!(daily.stats.play_count, 0);
    assert_eq!(daily.stats.hours_watched, 0.0);
}

#[tokio::test]
async fn test_daily_stats_rejects_bad_date_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = account(&mock_server).daily_stats("next tuesday").await.unwrap_err();
    assert!(matches!(err, WistiaError::InvalidDate(_)));
}

#[tokio::test]
async fn test_monthly_stats_sums_every_day_of_leap_february() {
    let mock_server = MockServer::start().await;

    let days: Vec<_> = (1..=29)
        .map(|d| day_record(&format!("2012-02-{d:02}")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/stats/account/by_date.json"))
        .and(query_param("start_date", "2012-02-01"))
        .and(query_param("end_date", "2012-02-29"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(days)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let monthly = account(&mock_server).monthly_stats(2, 2012).await.unwrap();

    assert_eq!(monthly.month(), 2);
    assert_eq!(monthly.year(), 2012);
    assert_eq!(monthly.month_name(), "February");
    assert_eq!(monthly.stats.load_count, 29);
    assert_eq!(monthly.stats.play_count, 29);
    assert_eq!(monthly.stats.hours_watched, 14.5);
    assert_eq!(monthly.range_label(), "02/01/2012-02/29/2012");
}

#[tokio::test]
async fn test_monthly_stats_for_empty_month() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/account/by_date.json"))
        .and(query_param("end_date", "2011-02-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let monthly = account(&mock_server).monthly_stats(2, 2011).await.unwrap();

    assert_eq!(monthly.month(), 2);
    assert_eq!(monthly.year(), 2011);
    assert_eq!(monthly.stats.load_count, 0);
}

#[tokio::test]
async fn test_monthly_stats_rejects_month_thirteen() {
    let mock_server = MockServer::start().await;

    let err = account(&mock_server).monthly_stats(13, 2012).await.unwrap_err();
    assert!(matches!(err, WistiaError::InvalidDate(_)));
}

#[tokio::test]
async fn test_project_and_media_stats_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/projects/abc123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "load_count": 9, "play_count": 3, "hours_watched": 1.0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stats/medias/med1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "load_count": 4, "play_count": 2, "hours_watched": 0.25
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WistiaClient::new("key", &mock_server.uri()).unwrap();
    let project = Project::from_data(
        client.clone(),
        json!({ "publicId": "abc123" }).as_object().unwrap(),
    );
    let media = Media::from_data(client, json!({ "hashed_id": "med1" }).as_object().unwrap());

    assert_eq!(project.stats().await.unwrap().load_count, 9);
    assert_eq!(media.stats().await.unwrap().play_rate(), Some(0.5));
}
