use anyhow::{Context, Result};
use std::future::Future;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::Config;
use crate::fetcher::SynjonesFetcher;
use crate::sensor::ElectricitySensor;

/// Drives one sensor on its scan interval.
///
/// Polls never overlap: the next tick is only awaited after the previous
/// update has returned, and a late update pushes the schedule back instead
/// of triggering catch-up polls.
pub struct PollController {
    sensor: ElectricitySensor,
}

impl PollController {
    pub fn new(sensor: ElectricitySensor) -> Self {
        Self { sensor }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let fetcher = SynjonesFetcher::new(cfg.upstream.query_url.clone())
            .context("failed to build upstream HTTP client")?;
        let sensor = ElectricitySensor::new(
            cfg.sensor.name.clone(),
            cfg.sensor.query(),
            cfg.sensor.scan_interval(),
            Box::new(fetcher),
        );
        Ok(Self::new(sensor))
    }

    pub fn sensor(&self) -> &ElectricitySensor {
        &self.sensor
    }

    pub fn into_sensor(self) -> ElectricitySensor {
        self.sensor
    }

    /// Update once and report the resulting state.
    pub async fn poll_once(&mut self) {
        self.sensor.update().await;
        let Some(reading) = self.sensor.state() else {
            warn!(sensor = %self.sensor.name(), "sensor state unknown");
            return;
        };
        match reading.as_kwh() {
            Some(kwh) => info!(
                sensor = %self.sensor.name(),
                kwh,
                unit = self.sensor.unit_of_measurement(),
                "sensor state updated"
            ),
            None => warn!(
                sensor = %self.sensor.name(),
                state = %reading,
                "balance message carries no number"
            ),
        }
    }

    /// Poll until `shutdown` resolves. The first poll happens immediately.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        if !self.sensor.should_poll() {
            shutdown.await;
            return;
        }

        let mut ticker = interval(self.sensor.scan_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            sensor = %self.sensor.name(),
            query = %self.sensor.query(),
            scan_interval_secs = self.sensor.scan_interval().as_secs(),
            "starting poll loop"
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = self.poll_once() => {}
            }
        }

        info!(sensor = %self.sensor.name(), "poll loop stopped");
    }
}
