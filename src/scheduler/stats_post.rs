use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{
    config::ReportConfig,
    error::{config::ConfigError, ReportError},
    service::{StatsClient, StatsReportService},
    source::BotStatsSource,
};

/// Starts posting the stats of a source on the configured interval.
///
/// The first post happens one full interval after start, then once per interval.
/// Each run captures fresh counters from the source. Failures of a run are logged
/// and never stop the schedule. A run that comes due while the previous one is
/// still waiting on the network is skipped.
///
/// # Arguments
/// - `client` - Client used for every post
/// - `source` - Bot whose counters are reported
/// - `config` - Site tokens and interval
///
/// # Returns
/// - `Ok(ScheduleHandle)` - Running schedule, stop it with `ScheduleHandle::stop`
/// - `Err(ReportError::ConfigErr)` - Source has no usable bot id or no site tokens are configured
/// - `Err(ReportError::SchedulerErr)` - The job scheduler could not be started
pub async fn start_auto_posting(
    client: StatsClient,
    source: Arc<dyn BotStatsSource>,
    config: Arc<ReportConfig>,
) -> Result<ScheduleHandle, ReportError> {
    let period = config.interval();
    start_with_period(client, source, config, period).await
}

pub(crate) async fn start_with_period(
    client: StatsClient,
    source: Arc<dyn BotStatsSource>,
    config: Arc<ReportConfig>,
    period: Duration,
) -> Result<ScheduleHandle, ReportError> {
    let bot_id = source.bot_id()?;
    if bot_id.is_empty() {
        return Err(ConfigError::EmptyBotId.into());
    }
    if config.auth_tokens().is_empty() {
        return Err(ConfigError::NoAuthTokens.into());
    }

    let scheduler = JobScheduler::new().await?;

    let job_task = Arc::new(PostTask::new(client, source, config));

    let job = Job::new_repeated_async(period, move |_uuid, _lock| {
        let task = job_task.clone();

        Box::pin(async move {
            task.run().await;
        })
    })?;

    let job_id = scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Stats auto posting started for bot {} every {} seconds",
        bot_id,
        period.as_secs()
    );

    Ok(ScheduleHandle::new(scheduler, job_id))
}

/// Outcome of one scheduled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    Posted,
    Failed,
    /// The previous run was still in flight.
    Skipped,
}

/// Work done on every tick of the schedule.
struct PostTask {
    client: StatsClient,
    source: Arc<dyn BotStatsSource>,
    config: Arc<ReportConfig>,
    in_flight: Mutex<()>,
}

impl PostTask {
    fn new(
        client: StatsClient,
        source: Arc<dyn BotStatsSource>,
        config: Arc<ReportConfig>,
    ) -> Self {
        Self {
            client,
            source,
            config,
            in_flight: Mutex::new(()),
        }
    }

    async fn run(&self) -> RunOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::warn!("Skipping stats post, the previous post is still in flight");
            return RunOutcome::Skipped;
        };

        match StatsReportService::new(&self.client)
            .post_guilds(self.source.as_ref(), &self.config)
            .await
        {
            Ok(()) => RunOutcome::Posted,
            Err(e) => {
                tracing::error!("Error posting bot stats: {}", e);
                RunOutcome::Failed
            }
        }
    }
}

/// Lifecycle handle of a running auto posting schedule.
///
/// Owned by whoever started the schedule. Dropping the handle does not stop the
/// schedule; call `stop`.
pub struct ScheduleHandle {
    scheduler: Mutex<Option<(JobScheduler, Uuid)>>,
    running: AtomicBool,
}

impl ScheduleHandle {
    fn new(scheduler: JobScheduler, job_id: Uuid) -> Self {
        Self {
            scheduler: Mutex::new(Some((scheduler, job_id))),
            running: AtomicBool::new(true),
        }
    }

    /// Whether the schedule is still active, i.e. `stop` has not been called yet.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the schedule.
    ///
    /// A post already in flight is allowed to finish; no further post starts.
    /// Calling `stop` again, or concurrently, is a no-op.
    ///
    /// # Returns
    /// - `Ok(())` - Schedule stopped, or was not running
    /// - `Err(ReportError::SchedulerErr)` - The job scheduler failed to shut down
    pub async fn stop(&self) -> Result<(), ReportError> {
        let Some((mut scheduler, job_id)) = self.scheduler.lock().await.take() else {
            return Ok(());
        };
        self.running.store(false, Ordering::SeqCst);

        scheduler.remove(&job_id).await?;
        scheduler.shutdown().await?;

        tracing::info!("Stats auto posting stopped");

        Ok(())
    }
}
