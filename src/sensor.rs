use chrono::{DateTime, Local};
use std::time::Duration;
use tracing::info;

use crate::domain::{Reading, RoomQuery};
use crate::fetcher::ElectricitySource;

pub const UNIT_OF_MEASUREMENT: &str = "kWh";
pub const DEFAULT_NAME: &str = "CSUST Electricity";
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);
pub const MIN_SCAN_INTERVAL_SECS: u64 = 5 * 60;

/// Dormitory electricity balance sensor.
///
/// Holds the identity it was configured with and the most recent reading.
/// Every `update` replaces the reading; a failed query leaves the state
/// unknown (`None`) until the next successful one.
pub struct ElectricitySensor {
    name: String,
    query: RoomQuery,
    scan_interval: Duration,
    source: Box<dyn ElectricitySource>,
    state: Option<Reading>,
    last_updated: Option<DateTime<Local>>,
}

impl ElectricitySensor {
    pub fn new(
        name: impl Into<String>,
        query: RoomQuery,
        scan_interval: Duration,
        source: Box<dyn ElectricitySource>,
    ) -> Self {
        Self {
            name: name.into(),
            query,
            scan_interval,
            source,
            state: None,
            last_updated: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &RoomQuery {
        &self.query
    }

    pub fn state(&self) -> Option<&Reading> {
        self.state.as_ref()
    }

    pub fn unit_of_measurement(&self) -> &'static str {
        UNIT_OF_MEASUREMENT
    }

    pub fn should_poll(&self) -> bool {
        true
    }

    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Time of the last completed update, successful or not
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Refresh the reading from the upstream.
    pub async fn update(&mut self) {
        info!(
            campus = %self.query.campus,
            building_id = %self.query.building_id,
            room_id = %self.query.room_id,
            "updating electricity balance"
        );
        self.state = self.source.fetch(&self.query).await;
        self.last_updated = Some(Local::now());
    }
}

impl std::fmt::Debug for ElectricitySensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElectricitySensor")
            .field("name", &self.name)
            .field("query", &self.query)
            .field("scan_interval", &self.scan_interval)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
