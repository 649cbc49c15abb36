//! Fake BotBlock API for HTTP-level tests.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path of the stats posting endpoint.
pub const COUNT_PATH: &str = "/api/count";

/// Local server standing in for the BotBlock API.
///
/// Each test starts its own instance so expectations and recorded requests never
/// leak between tests.
pub struct MockAggregator {
    server: MockServer,
}

impl MockAggregator {
    /// Starts a new server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client, ending in `/api/` like the real one.
    pub fn base_url(&self) -> String {
        format!("{}/api/", self.server.uri())
    }

    /// Answers every `POST /api/count` with the given response.
    pub async fn mock_count(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(COUNT_PATH))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answers `GET /api/bots/{bot_id}` with the given response.
    pub async fn mock_bot(&self, bot_id: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/api/bots/{}", bot_id)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// All requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests received on the count endpoint.
    pub async fn count_requests(&self) -> Vec<Request> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.url.path() == COUNT_PATH)
            .collect()
    }

    /// JSON bodies posted to the count endpoint.
    ///
    /// # Panics
    /// - If a posted body is not valid JSON
    pub async fn posted_documents(&self) -> Vec<Value> {
        self.count_requests()
            .await
            .iter()
            .map(|request| {
                serde_json::from_slice(&request.body).expect("Posted body is not valid JSON")
            })
            .collect()
    }
}
