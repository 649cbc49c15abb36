//! Initialization of shared infrastructure for the host binary.

use std::time::Duration;

use crate::error::ReportError;

/// Builds the HTTP client shared by every request to the BotBlock API.
///
/// Redirects are disabled; the API never redirects and following one would send
/// the bot id to another host. The timeout bounds each request so a hanging
/// connection cannot stall a scheduled post forever.
///
/// # Arguments
/// - `timeout` - Total time allowed per request
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(ReportError::TransportFailure)` - TLS backend could not be initialized
pub fn setup_reqwest_client(timeout: Duration) -> Result<reqwest::Client, ReportError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()?;

    Ok(client)
}

/// Installs the global log subscriber.
///
/// Honors `RUST_LOG` and defaults to `info` for this crate.
#[cfg(feature = "bot")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,botblock_reporter=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
