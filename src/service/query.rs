//! Read-back queries on the aggregated bot record.
//!
//! Every query makes one `bots/{id}` request and projects the part of the record
//! the caller asked for. The bot can be named by id or by a stats source.

use std::collections::BTreeMap;

use crate::{
    error::ReportError,
    model::{BotRecord, Listing},
    service::transport::StatsClient,
    source::BotRef,
};

pub struct BotQueryService<'a> {
    client: &'a StatsClient,
}

impl<'a> BotQueryService<'a> {
    pub fn new(client: &'a StatsClient) -> Self {
        Self { client }
    }

    /// Fetches the full record of a bot.
    ///
    /// # Arguments
    /// - `bot` - Bot id, or a source the id is taken from (shard 0 for shard groups)
    ///
    /// # Returns
    /// - `Ok(BotRecord)` - Decoded record
    /// - `Err(ReportError::ConfigErr)` - No usable bot id
    /// - `Err(ReportError)` - Transport, rate limit or decoding failure
    pub async fn fetch_bot_record<'b>(
        &self,
        bot: impl Into<BotRef<'b>>,
    ) -> Result<BotRecord, ReportError> {
        let bot_id = bot.into().resolve()?;
        self.client.fetch_bot_record(&bot_id).await
    }

    /// Owner ids of a bot, in the order the API lists them.
    pub async fn owners<'b>(&self, bot: impl Into<BotRef<'b>>) -> Result<Vec<String>, ReportError> {
        Ok(self.fetch_bot_record(bot).await?.owners)
    }

    /// Listing data of every site that knows the bot.
    pub async fn all_listings<'b>(
        &self,
        bot: impl Into<BotRef<'b>>,
    ) -> Result<BTreeMap<String, Listing>, ReportError> {
        Ok(self.fetch_bot_record(bot).await?.list_data)
    }

    /// Listing data of one site.
    ///
    /// # Returns
    /// - `Ok(Listing)` - Raw data and status the site answered with
    /// - `Err(ReportError::NotFound)` - The site is not part of the listing data
    /// - `Err(ReportError)` - Any failure of `fetch_bot_record`
    pub async fn listing<'b>(
        &self,
        bot: impl Into<BotRef<'b>>,
        site: &str,
    ) -> Result<Listing, ReportError> {
        let mut listings = self.all_listings(bot).await?;

        listings
            .remove(site)
            .ok_or_else(|| ReportError::NotFound(site.to_string()))
    }
}
