//! Cron-driven loop: each tick runs a quiz cycle, then a dashboard refresh.

use crate::runner::Runner;
use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;
use std::time::Duration;

/// Time from `now` until the schedule's next firing, if it fires again.
pub fn next_delay<Z: TimeZone>(schedule: &Schedule, now: &DateTime<Z>) -> Option<Duration> {
    let next = schedule.after(now).next()?;
    next.signed_duration_since(now.clone()).to_std().ok()
}

/// Run forever on `schedule`, in local time.
///
/// A failed tick is logged and the loop waits for the next one.
pub async fn run(schedule: Schedule, runner: Runner) {
    log::info!("[SCHEDULER] Started");
    loop {
        let Some(delay) = next_delay(&schedule, &Local::now()) else {
            log::warn!("[SCHEDULER] Schedule has no upcoming runs, stopping");
            return;
        };
        log::info!("[SCHEDULER] Next run in {}s", delay.as_secs());
        tokio::time::sleep(delay).await;

        run_tick(&runner).await;
    }
}

async fn run_tick(runner: &Runner) {
    let now = Local::now().naive_local();

    match runner.run_quiz_cycle(now).await {
        Ok(outcome) => log::info!(
            "[SCHEDULER] Quizzed '{}' ({} questions, posted={}, archived={}, tracked={})",
            outcome.title,
            outcome.item_count,
            outcome.posted,
            outcome.archived,
            outcome.tracked
        ),
        Err(e) => log::error!("[SCHEDULER] Quiz cycle failed: {}", e),
    }

    match runner.refresh_dashboard(now).await {
        Ok(true) => log::info!("[SCHEDULER] Dashboard refreshed"),
        Ok(false) => log::error!("[SCHEDULER] Dashboard publish failed"),
        Err(e) => log::error!("[SCHEDULER] Dashboard refresh failed: {}", e),
    }
}
