//! Discord bot host that reports its own stats.
//!
//! The bot connects with the `GUILDS` intent only, which is enough for the cache
//! to know every guild. Once the first shard is ready, the whole cache is used as
//! the stats source and auto posting starts. Later `ready` events (reconnects,
//! further shards) reuse the running schedule.

pub mod start;
