//! Timer-driven progress updates.
//!
//! A progress dialog is not awaited like the other dialogs. Instead a single
//! ticker task owns the handle, pushes one percent update per period, and
//! closes the dialog once it reaches 100.

use std::time::Duration;

use shared::error::DialogError;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::ProgressHandle;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);
pub const DEFAULT_STEP: u8 = 10;
const COMPLETE: u8 = 100;
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSchedule {
    pub period: Duration,
    pub step: u8,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            step: DEFAULT_STEP,
        }
    }
}

impl ProgressSchedule {
    pub fn new(period: Duration, step: u8) -> Self {
        Self { period, step }
    }

    /// Percent values pushed to the dialog, one per tick. Always ends at 100.
    pub fn percents(&self) -> Vec<u8> {
        let step = self.step.clamp(1, COMPLETE);
        let mut percents = Vec::with_capacity(usize::from(COMPLETE / step) + 1);
        let mut current = 0u8;
        while current < COMPLETE {
            current = current.saturating_add(step).min(COMPLETE);
            percents.push(current);
        }
        percents
    }
}

#[derive(Debug)]
pub struct ProgressTicker {
    task: JoinHandle<Result<u8, DialogError>>,
}

impl ProgressTicker {
    pub fn start(handle: Box<dyn ProgressHandle>, schedule: ProgressSchedule) -> Self {
        Self {
            task: tokio::spawn(run_ticker(handle, schedule)),
        }
    }

    /// Waits for the ticker to reach 100 and close the dialog.
    pub async fn finish(self) -> Result<u8, DialogError> {
        self.task
            .await
            .map_err(|err| DialogError::Ticker(err.to_string()))?
    }
}

async fn run_ticker(
    mut handle: Box<dyn ProgressHandle>,
    schedule: ProgressSchedule,
) -> Result<u8, DialogError> {
    let period = schedule.period.max(MIN_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = 0;
    for percent in schedule.percents() {
        ticker.tick().await;
        handle.set_percent(percent).await?;
        debug!(percent, "progress tick");
        last = percent;
    }
    drop(ticker);

    handle.close().await?;
    info!(percent = last, "progress dialog closed");
    Ok(last)
}
