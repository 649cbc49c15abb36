//! Response bodies shaped like the BotBlock API's.

use serde_json::{json, Map, Value};

/// Body of a successful `bots/{id}` lookup.
///
/// Lists two sites: `lbots.org` answered 200 and `discord.bots.gg` answered 404.
///
/// # Arguments
/// - `bot_id` - Id echoed in the record and the listing data
/// - `owners` - Owner ids, in the order the API returns them
pub fn bot_record(bot_id: &str, owners: &[&str]) -> Value {
    json!({
        "id": bot_id,
        "username": "Stats Bot",
        "discriminator": "0001",
        "owners": owners,
        "server_count": 120,
        "invite": format!("https://discord.com/oauth2/authorize?client_id={}&scope=bot", bot_id),
        "prefix": "!",
        "website": null,
        "list_data": {
            "lbots.org": [{ "id": bot_id, "guild_count": 120 }, 200],
            "discord.bots.gg": [{ "message": "Unknown bot" }, 404]
        }
    })
}

/// Success body of `count` with a `failure` entry per rejected site.
///
/// # Arguments
/// - `failures` - `(site, error code, error message)` per rejected site
pub fn failure_envelope(failures: &[(&str, u16, &str)]) -> Value {
    let failure: Map<String, Value> = failures
        .iter()
        .map(|(site, code, message)| (site.to_string(), json!([code, message])))
        .collect();

    json!({ "success": {}, "failure": failure })
}

/// Success body of `count` where every site accepted the stats.
pub fn count_success(sites: &[&str]) -> Value {
    let success: Map<String, Value> = sites
        .iter()
        .map(|site| (site.to_string(), json!([200, "{}"])))
        .collect();

    json!({ "success": success })
}

/// Body the API sends with HTTP 429.
pub fn rate_limited() -> Value {
    json!({
        "error": true,
        "status": 429,
        "retry_after": 1,
        "ratelimit_reset": 1_600_000_000,
        "ratelimit_ip": "127.0.0.1",
        "ratelimit_route": "/api/count",
        "ratelimit_bot_id": "123456789012345678"
    })
}
