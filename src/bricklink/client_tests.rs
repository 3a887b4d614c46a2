//! Tests for the BrickLink price guide client.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::models::ItemType;

fn test_settings(base_url: String, request_delay: Duration) -> Settings {
    Settings {
        credentials: Credentials {
            consumer_key: "consumer-key-0001".to_string(),
            consumer_secret: "consumer-secret-0001".to_string(),
            token_key: "token-key-0001".to_string(),
            token_secret: "token-secret-0001".to_string(),
        },
        base_url,
        request_delay,
    }
}

fn minifig(id: &str) -> LineItem {
    LineItem {
        item_type: ItemType::Minifig,
        item_id: id.to_string(),
        quantity: 1,
        condition: Condition::Used,
        color: Some("0".to_string()),
    }
}

fn price_body(condition: &str, avg: &str) -> String {
    serde_json::json!({
        "meta": {"description": "OK", "message": "OK", "code": 200},
        "data": {
            "item": {"no": "sw0001", "type": "MINIFIG"},
            "new_or_used": condition,
            "currency_code": "USD",
            "min_price": "1.0000",
            "max_price": "20.0000",
            "avg_price": avg,
            "qty_avg_price": avg,
            "unit_quantity": 7,
            "total_quantity": 9,
            "price_detail": []
        }
    })
    .to_string()
}

// ── parse_price_response ─────────────────────────────────────────────

#[test]
fn parse_success_envelope() {
    let guide = parse_price_response(reqwest::StatusCode::OK, &price_body("U", "10.0000")).unwrap();
    assert_eq!(guide.avg_price, Some(Decimal::new(10, 0)));
    assert_eq!(guide.total_quantity, 9);
}

#[test]
fn parse_meta_error() {
    let body = r#"{"meta": {"code": 404, "message": "RESOURCE_NOT_FOUND", "description": "Item not found"}}"#;
    match parse_price_response(reqwest::StatusCode::OK, body) {
        Err(ApiError::ApiResponse { code, message }) => {
            assert_eq!(code, 404);
            assert_eq!(message, "RESOURCE_NOT_FOUND - Item not found");
        }
        other => panic!("Expected ApiError::ApiResponse, got: {other:?}"),
    }
}

#[test]
fn parse_success_without_data_is_empty_guide() {
    let body = r#"{"meta": {"code": 200, "message": "OK"}}"#;
    let guide = parse_price_response(reqwest::StatusCode::OK, body).unwrap();
    assert!(!guide.has_data());
}

#[test]
fn parse_html_error_page_reports_status() {
    match parse_price_response(reqwest::StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") {
        Err(ApiError::HttpStatus(status)) => assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY),
        other => panic!("Expected ApiError::HttpStatus, got: {other:?}"),
    }
}

#[test]
fn parse_garbage_with_ok_status_is_parse_error() {
    match parse_price_response(reqwest::StatusCode::OK, "{ not json") {
        Err(ApiError::Parse(_)) => {}
        other => panic!("Expected ApiError::Parse, got: {other:?}"),
    }
}

// ── BricklinkClient::fetch_price_guide ───────────────────────────────

#[tokio::test]
async fn fetch_sends_signed_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/MINIFIG/sw0001/price"))
        .and(query_param("new_or_used", "U"))
        .and(query_param("guide_type", "stock"))
        .and(query_param("currency_code", "USD"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string(price_body("U", "10.0000")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = test_settings(mock_server.uri(), Duration::ZERO);
    let result = tokio::task::spawn_blocking(move || {
        let mut client = BricklinkClient::new(settings);
        client.fetch_price_guide(&minifig("sw0001"), Condition::Used)
    })
    .await
    .unwrap();

    let guide = result.unwrap();
    assert_eq!(guide.avg_price, Some(Decimal::new(10, 0)));
    assert_eq!(guide.new_or_used, Some(Condition::Used));

    let requests = mock_server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_consumer_key=\"consumer-key-0001\""));
    assert!(auth.contains("oauth_token=\"token-key-0001\""));
    assert!(auth.contains("oauth_signature=\""));
    assert!(!auth.contains("consumer-secret-0001"));
}

#[tokio::test]
async fn fetch_passes_color_for_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/PART/3001/price"))
        .and(query_param("color_id", "11"))
        .and(query_param("new_or_used", "N"))
        .respond_with(ResponseTemplate::new(200).set_body_string(price_body("N", "0.2500")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = test_settings(mock_server.uri(), Duration::ZERO);
    let item = LineItem {
        item_type: ItemType::Part,
        item_id: "3001".to_string(),
        quantity: 40,
        condition: Condition::New,
        color: Some("11".to_string()),
    };

    let result = tokio::task::spawn_blocking(move || {
        BricklinkClient::new(settings).fetch_price_guide(&item, Condition::New)
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap().avg_price, Some(Decimal::new(25, 2)));
}

#[tokio::test]
async fn fetch_maps_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"meta": {"code": 401, "message": "BAD_OAUTH_REQUEST", "description": "SIGNATURE_INVALID"}}"#,
        ))
        .mount(&mock_server)
        .await;

    let settings = test_settings(mock_server.uri(), Duration::ZERO);
    let result = tokio::task::spawn_blocking(move || {
        BricklinkClient::new(settings).fetch_price_guide(&minifig("sw0001"), Condition::Used)
    })
    .await
    .unwrap();

    match result {
        Err(ApiError::ApiResponse { code, message }) => {
            assert_eq!(code, 401);
            assert!(message.contains("SIGNATURE_INVALID"));
        }
        other => panic!("Expected ApiError::ApiResponse, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_maps_http_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let settings = test_settings(mock_server.uri(), Duration::ZERO);
    let result = tokio::task::spawn_blocking(move || {
        BricklinkClient::new(settings).fetch_price_guide(&minifig("sw0001"), Condition::Used)
    })
    .await
    .unwrap();

    match result {
        Err(ApiError::HttpStatus(status)) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("Expected ApiError::HttpStatus(500), got: {other:?}"),
    }
}

#[tokio::test]
async fn consecutive_requests_are_spaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(price_body("U", "1.0000")))
        .expect(3)
        .mount(&mock_server)
        .await;

    let delay = Duration::from_millis(60);
    let settings = test_settings(mock_server.uri(), delay);
    let elapsed = tokio::task::spawn_blocking(move || {
        let mut client = BricklinkClient::new(settings);
        let item = minifig("sw0001");
        let start = Instant::now();
        for _ in 0..3 {
            client.fetch_price_guide(&item, Condition::Used).unwrap();
        }
        start.elapsed()
    })
    .await
    .unwrap();

    // First request goes out immediately, the next two wait
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
}

#[test]
fn trailing_slash_is_trimmed_from_base_url() {
    let client = BricklinkClient::new(test_settings(
        "https://api.bricklink.com/api/store/v1/".to_string(),
        Duration::ZERO,
    ));
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
}
