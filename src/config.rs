use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{path::Path, time::Duration};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::domain::{campus, RoomQuery};
use crate::fetcher::DEFAULT_QUERY_URL;
use crate::sensor::{DEFAULT_NAME, DEFAULT_SCAN_INTERVAL, MIN_SCAN_INTERVAL_SECS};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "CSUST__";

/// Id fields taken verbatim from the environment. Figment would parse
/// `0305` as the number 305 and reject `1.10`.
const VERBATIM_ENV_KEYS: [(&str, &str); 2] = [
    ("sensor.building_id", "SENSOR__BUILDING_ID"),
    ("sensor.room_id", "SENSOR__ROOM_ID"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub sensor: SensorConfig,
    #[serde(default)]
    #[validate(nested)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SensorConfig {
    #[serde(default = "default_name")]
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_campus"))]
    pub campus: String,
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1))]
    pub building_id: String,
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1))]
    pub room_id: String,
    #[serde(default = "default_scan_interval_secs")]
    #[validate(range(min = MIN_SCAN_INTERVAL_SECS))]
    pub scan_interval_secs: u64,
}

impl SensorConfig {
    pub fn query(&self) -> RoomQuery {
        RoomQuery::new(&self.campus, &self.building_id, &self.room_id)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpstreamConfig {
    #[validate(url)]
    pub query_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            query_url: DEFAULT_QUERY_URL.to_string(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_scan_interval_secs() -> u64 {
    DEFAULT_SCAN_INTERVAL.as_secs()
}

/// Ids may be written unquoted in TOML, e.g. `room_id = 305`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
    })
}

fn validate_campus(campus_name: &str) -> Result<(), ValidationError> {
    if campus::lookup(campus_name).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("unknown_campus");
    err.message = Some(
        format!(
            "unknown campus '{campus_name}', expected one of: {}",
            campus::known_campuses().join(", ")
        )
        .into(),
    );
    Err(err)
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Layer the TOML file at `path` under `CSUST__`-prefixed environment
    /// variables, e.g. `CSUST__SENSOR__ROOM_ID=305`.
    ///
    /// `building_id` and `room_id` from the environment are kept as written,
    /// so `CSUST__SENSOR__ROOM_ID=0305` stays `"0305"`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let env_ids: Vec<&str> = VERBATIM_ENV_KEYS.iter().map(|(_, var)| *var).collect();
        let mut figment = Figment::new()
            .merge(Serialized::default("upstream", UpstreamConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&env_ids).split("__"));

        for (key, var) in VERBATIM_ENV_KEYS {
            if let Ok(raw) = std::env::var(format!("{ENV_PREFIX}{var}")) {
                figment = figment.merge(Serialized::default(key, raw));
            }
        }
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
