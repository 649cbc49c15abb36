//! BotBlock Reporter Test Utils
//!
//! Provides shared testing utilities for the reporting client: a fake BotBlock API
//! backed by a local `wiremock` server, JSON fixtures shaped like the real API's
//! responses, and factories for Serenity objects.
//!
//! # Overview
//!
//! - **MockAggregator**: local HTTP server answering the `count` and `bots/{id}` endpoints
//! - **fixture**: response bodies (bot records, failure envelopes)
//! - **serenity**: Serenity structs built from JSON, plus shard-aware guild ids
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::aggregator::MockAggregator;
//! use wiremock::ResponseTemplate;
//!
//! #[tokio::test]
//! async fn posts_stats() {
//!     let aggregator = MockAggregator::start().await;
//!     aggregator
//!         .mock_count(ResponseTemplate::new(200).set_body_string("{}"))
//!         .await;
//!
//!     // Point the client at `aggregator.base_url()` and post...
//!
//!     assert_eq!(aggregator.count_requests().await.len(), 1);
//! }
//! ```

pub mod aggregator;
pub mod fixture;
pub mod serenity;
