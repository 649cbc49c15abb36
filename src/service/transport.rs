//! HTTP transport to the BotBlock API.
//!
//! Both endpoints share one response classification: an empty body is malformed,
//! 429 is a rate limit carrying the raw body, any other non-2xx status is a
//! transport failure. Only the count endpoint additionally inspects the body for
//! a `failure` envelope listing sites that rejected the stats.

use reqwest::{header::USER_AGENT, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{
    error::{config::ConfigError, ReportError},
    model::{BotRecord, StatusDocument},
};

/// Base URL of the BotBlock API.
pub const BOTBLOCK_API_URL: &str = "https://botblock.org/api/";

/// Client for the BotBlock API.
///
/// Cheap to clone: `reqwest::Client` shares its connection pool between clones.
/// Every call makes exactly one request and never retries.
#[derive(Clone, Debug)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StatsClient {
    /// Creates a client for the public BotBlock API.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client, see `startup::setup_reqwest_client`
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: Url::parse(BOTBLOCK_API_URL).expect("BOTBLOCK_API_URL is a valid URL"),
        }
    }

    /// Creates a client for a different deployment of the API, such as a local fake.
    #[cfg(test)]
    pub(crate) fn with_base_url(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Url::parse(base_url).expect("test base URL is valid"),
        }
    }

    /// Posts a status document to the count endpoint.
    ///
    /// Sends the document as JSON with the bot id as `User-Agent`.
    ///
    /// # Arguments
    /// - `document` - Document built by `payload::build_status_document`
    /// - `bot_id` - Bot id used as `User-Agent`
    ///
    /// # Returns
    /// - `Ok(())` - Every site accepted the stats
    /// - `Err(ReportError::ConfigErr)` - Bot id is empty
    /// - `Err(ReportError::TransportFailure)` - Connection failed or non-2xx status other than 429
    /// - `Err(ReportError::RateLimited)` - HTTP 429, with the raw body
    /// - `Err(ReportError::MalformedResponse)` - Empty or non-JSON body
    /// - `Err(ReportError::PartialPostFailure)` - One or more sites rejected the stats
    pub async fn post_stats(
        &self,
        document: &StatusDocument,
        bot_id: &str,
    ) -> Result<(), ReportError> {
        if bot_id.is_empty() {
            return Err(ConfigError::EmptyBotId.into());
        }

        let response = self
            .http
            .post(self.endpoint(&["count"]))
            .header(USER_AGENT, bot_id)
            .json(document)
            .send()
            .await?;

        let body = read_body(response, "Couldn't post guild counts to BotBlockAPI!").await?;

        check_site_failures(&body)?;

        tracing::debug!(
            "Posted stats for bot {} ({} fields)",
            bot_id,
            document.len()
        );

        Ok(())
    }

    /// Fetches the aggregated record of a bot.
    ///
    /// # Arguments
    /// - `bot_id` - Bot to look up, also used as `User-Agent`
    ///
    /// # Returns
    /// - `Ok(BotRecord)` - Decoded record
    /// - `Err(ReportError::ConfigErr)` - Bot id is empty
    /// - `Err(ReportError::TransportFailure)` - Connection failed or non-2xx status other than 429
    /// - `Err(ReportError::RateLimited)` - HTTP 429, with the raw body
    /// - `Err(ReportError::MalformedResponse)` - Empty body or not a bot record
    pub async fn fetch_bot_record(&self, bot_id: &str) -> Result<BotRecord, ReportError> {
        if bot_id.is_empty() {
            return Err(ConfigError::EmptyBotId.into());
        }

        let response = self
            .http
            .get(self.endpoint(&["bots", bot_id]))
            .header(USER_AGENT, bot_id)
            .send()
            .await?;

        let body = read_body(response, "Couldn't get Bot information.").await?;

        serde_json::from_str(&body).map_err(|e| {
            ReportError::MalformedResponse(format!("Failed to decode bot record: {}", e))
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this only fails for unusable bases
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Reads the body once and classifies the response.
///
/// # Arguments
/// - `response` - Response to classify
/// - `context` - Prefix of the failure message for non-2xx statuses
///
/// # Returns
/// - `Ok(String)` - Non-empty body of a 2xx response
/// - `Err(ReportError)` - Classified failure
async fn read_body(response: Response, context: &str) -> Result<String, ReportError> {
    let status = response.status();
    let body = response.text().await?;

    if body.trim().is_empty() {
        return Err(ReportError::MalformedResponse(
            "Received empty body from BotBlock API.".to_string(),
        ));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ReportError::RateLimited(body));
    }

    if !status.is_success() {
        return Err(ReportError::TransportFailure {
            code: Some(status.as_u16()),
            message: format!(
                "{} Site responded with {} ({})",
                context,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        });
    }

    Ok(body)
}

/// Inspects a successful count response for per-site failures.
///
/// The envelope is `{"failure": {"<site>": [<code>, "<message>"]}}`. Entries of any
/// other shape are reported with their raw JSON.
///
/// # Returns
/// - `Ok(())` - No `failure` key, or it lists no sites
/// - `Err(ReportError::PartialPostFailure)` - All rejected sites in one message
/// - `Err(ReportError::MalformedResponse)` - Body is not JSON
fn check_site_failures(body: &str) -> Result<(), ReportError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        ReportError::MalformedResponse(format!("Failed to decode count response: {}", e))
    })?;

    let failures: Vec<String> = match json.get("failure") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(sites)) => sites
            .iter()
            .map(|(site, entry)| describe_site_failure(site, entry))
            .collect(),
        Some(other) => vec![format!("Errors: {}", other)],
    };

    if failures.is_empty() {
        return Ok(());
    }

    Err(ReportError::PartialPostFailure(failures.join(", ")))
}

fn describe_site_failure(site: &str, entry: &Value) -> String {
    let pair = entry.as_array().and_then(|entry| match entry.as_slice() {
        [code, message] => Some((error_code(code)?, message.as_str()?)),
        _ => None,
    });

    match pair {
        Some((code, message)) => format!(
            "Name: {}, Error code: {}, Error Message: {}",
            site, code, message
        ),
        None => format!("Name: {}, Errors: {}", site, entry),
    }
}

/// Error code of a failure entry, given either as a number or a numeric string.
fn error_code(code: &Value) -> Option<i64> {
    match code {
        Value::String(code) => code.trim().parse().ok(),
        code => code.as_i64(),
    }
}
