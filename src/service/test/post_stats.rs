use super::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer};

/// Tests a plain successful post.
///
/// Verifies that the document is sent as JSON to the count endpoint with the bot
/// id as User-Agent.
///
/// Expected: Ok with one request carrying the document and headers
#[tokio::test]
async fn posts_document_with_headers() {
    let aggregator = MockAggregator::start().await;
    aggregator
        .mock_count(
            ResponseTemplate::new(200)
                .set_body_json(fixture::count_success(&["lbots.org", "discord.bots.gg"])),
        )
        .await;
    let client = client_for(&aggregator);

    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 42)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    assert!(result.is_ok(), "unexpected error: {:?}", result);
    let requests = aggregator.count_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0]
            .headers
            .get("user-agent")
            .and_then(|value| value.to_str().ok()),
        Some(BOT_ID)
    );
    assert_eq!(
        requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(
        aggregator.posted_documents().await[0],
        json!({
            "server_count": 42,
            "bot_id": BOT_ID,
            "lbots.org": "lbots-token",
            "discord.bots.gg": "dbgg-token"
        })
    );
}

/// Tests the exact request sent to the count endpoint.
///
/// Verifies that method, path, headers and body all match, using a mock that only
/// answers a request of exactly that shape.
///
/// Expected: Ok and the strict mock matched once
#[tokio::test]
async fn sends_exact_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/count"))
        .and(header("user-agent", BOT_ID))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "server_count": 1,
            "bot_id": BOT_ID,
            "lbots.org": "lbots-token",
            "discord.bots.gg": "dbgg-token"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    let client =
        StatsClient::with_base_url(reqwest::Client::new(), &format!("{}/api/", server.uri()));

    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    assert!(result.is_ok(), "unexpected error: {:?}", result);
}

/// Tests HTTP 429 from the count endpoint.
///
/// Expected: Err(RateLimited) carrying the raw body
#[tokio::test]
async fn rate_limit_carries_body() {
    let aggregator = MockAggregator::start().await;
    let body = fixture::rate_limited().to_string();
    aggregator
        .mock_count(ResponseTemplate::new(429).set_body_string(body.clone()))
        .await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    match result {
        Err(ReportError::RateLimited(raw)) => assert_eq!(raw, body),
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

/// Tests a non-2xx status other than 429.
///
/// Expected: Err(TransportFailure) with the status code
#[tokio::test]
async fn server_error_is_transport_failure() {
    let aggregator = MockAggregator::start().await;
    aggregator
        .mock_count(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    match result {
        Err(ReportError::TransportFailure { code, message }) => {
            assert_eq!(code, Some(502));
            assert!(message.contains("502"));
        }
        other => panic!("expected TransportFailure, got {:?}", other),
    }
}

/// Tests a successful status with an empty body.
///
/// Expected: Err(MalformedResponse)
#[tokio::test]
async fn empty_body_is_malformed() {
    let aggregator = MockAggregator::start().await;
    aggregator.mock_count(ResponseTemplate::new(200)).await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    assert!(matches!(result, Err(ReportError::MalformedResponse(_))));
}

/// Tests a failure envelope on a successful response.
///
/// Expected: Err(PartialPostFailure) naming the site, code and message
#[tokio::test]
async fn failure_envelope_is_partial_failure() {
    let aggregator = MockAggregator::start().await;
    aggregator
        .mock_count(
            ResponseTemplate::new(200)
                .set_body_json(json!({"failure": {"listA": [403, "Unauthorized"]}})),
        )
        .await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    match result {
        Err(ReportError::PartialPostFailure(message)) => {
            assert!(message.contains("Name: listA, Error code: 403, Error Message: Unauthorized"))
        }
        other => panic!("expected PartialPostFailure, got {:?}", other),
    }
}

/// Tests that every rejected site is part of the aggregated message.
///
/// Expected: entries joined by ", "
#[tokio::test]
async fn aggregates_all_site_failures() {
    let aggregator = MockAggregator::start().await;
    aggregator
        .mock_count(ResponseTemplate::new(200).set_body_json(fixture::failure_envelope(&[
            ("discord.bots.gg", 401, "Invalid token"),
            ("lbots.org", 404, "Bot not found"),
        ])))
        .await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    match result {
        Err(ReportError::PartialPostFailure(message)) => assert_eq!(
            message,
            "Name: discord.bots.gg, Error code: 401, Error Message: Invalid token, \
             Name: lbots.org, Error code: 404, Error Message: Bot not found"
        ),
        other => panic!("expected PartialPostFailure, got {:?}", other),
    }
}

/// Tests that a connection failure is a transport failure without status.
///
/// Expected: Err(TransportFailure) with code None
#[tokio::test]
async fn connection_failure_is_transport_failure() {
    // Nothing listens on the discard port locally
    let client = StatsClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9/api/");
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, BOT_ID).await;

    assert!(matches!(
        result,
        Err(ReportError::TransportFailure { code: None, .. })
    ));
}

/// Tests that an empty bot id is rejected before any request.
///
/// Expected: Err(ConfigErr(EmptyBotId)) and no request
#[tokio::test]
async fn empty_bot_id_sends_nothing() {
    let aggregator = MockAggregator::start().await;
    let client = client_for(&aggregator);
    let snapshot = StatsSnapshot::capture(&StaticStats::new(BOT_ID, 1)).unwrap();
    let document = build_status_document(&snapshot, &report_config()).unwrap();

    let result = client.post_stats(&document, "").await;

    assert!(matches!(
        result,
        Err(ReportError::ConfigErr(ConfigError::EmptyBotId))
    ));
    assert!(aggregator.requests().await.is_empty());
}
