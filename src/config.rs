use crate::pass_prediction::{ObserverLocation, PredictionProvider};
use std::str::FromStr;
use std::time::Duration;
use strum_macros::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    Missing(&'static str),
    /// A variable is set but cannot be used.
    Invalid(&'static str),
}

impl std::error::Error for ConfigError {}

/// Where the clock gets its time from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TimeSourceKind {
    Sntp,
    Http,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct FlyoverConfig {
    pub location: ObserverLocation,
    pub provider: PredictionProvider,
    pub api_key: String,
    pub api_url: Option<String>,
    pub norad_id: u32,
    pub lookahead_days: u8,
    pub min_visibility_seconds: u32,
    pub time_source: TimeSourceKind,
    pub ntp_server: String,
    pub time_api_url: String,
    pub utc_offset_minutes: i32,
    pub pixels: usize,
    pub brightness: u8,
    pub lookup_retry_delay: Duration,
}

impl FlyoverConfig {
    const DEFAULT_NORAD_ID: u32 = 25544;
    const DEFAULT_NTP_SERVER: &'static str = "pool.ntp.org:123";
    const DEFAULT_TIME_API_URL: &'static str = "http://worldtimeapi.org/api";
    const MAX_LOOKAHEAD_DAYS: u8 = 10;
    /// Offsets must stay within one day.
    const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// See [`FlyoverConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// `Missing` for an unset required variable, `Invalid` for a value that
    /// does not parse or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let latitude: f64 = env.required("FLYOVER_LATITUDE")?;
        let longitude: f64 = env.required("FLYOVER_LONGITUDE")?;
        let altitude: f64 = env.or("FLYOVER_ALTITUDE", 0.0)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Invalid("FLYOVER_LATITUDE"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Invalid("FLYOVER_LONGITUDE"));
        }
        if !altitude.is_finite() {
            return Err(ConfigError::Invalid("FLYOVER_ALTITUDE"));
        }

        let provider = match env.raw("FLYOVER_PROVIDER").as_deref() {
            None | Some("n2yo") => PredictionProvider::N2yo,
            Some("open-notify") => PredictionProvider::OpenNotify,
            Some(_) => return Err(ConfigError::Invalid("FLYOVER_PROVIDER")),
        };
        let api_key = env.raw("FLYOVER_API_KEY").unwrap_or_default();
        if provider == PredictionProvider::N2yo && api_key.is_empty() {
            return Err(ConfigError::Missing("FLYOVER_API_KEY"));
        }

        let lookahead_days: u8 = env.or("FLYOVER_LOOKAHEAD_DAYS", 1)?;
        if !(1..=Self::MAX_LOOKAHEAD_DAYS).contains(&lookahead_days) {
            return Err(ConfigError::Invalid("FLYOVER_LOOKAHEAD_DAYS"));
        }

        let time_source = match env.raw("FLYOVER_TIME_SOURCE").as_deref() {
            None | Some("sntp") => TimeSourceKind::Sntp,
            Some("http") => TimeSourceKind::Http,
            Some(_) => return Err(ConfigError::Invalid("FLYOVER_TIME_SOURCE")),
        };

        let utc_offset_minutes: i32 = env.or("FLYOVER_UTC_OFFSET_MINUTES", 0)?;
        if !(-Self::MAX_UTC_OFFSET_MINUTES..=Self::MAX_UTC_OFFSET_MINUTES).contains(&utc_offset_minutes) {
            return Err(ConfigError::Invalid("FLYOVER_UTC_OFFSET_MINUTES"));
        }
        let pixels: usize = env.or("FLYOVER_PIXELS", 12)?;
        if pixels == 0 {
            return Err(ConfigError::Invalid("FLYOVER_PIXELS"));
        }

        Ok(Self {
            location: ObserverLocation::new(latitude, longitude, altitude),
            provider,
            api_key,
            api_url: env.raw("FLYOVER_API_URL"),
            norad_id: env.or("FLYOVER_NORAD_ID", Self::DEFAULT_NORAD_ID)?,
            lookahead_days,
            min_visibility_seconds: env.or("FLYOVER_MIN_VISIBILITY", 180)?,
            time_source,
            ntp_server: env
                .raw("FLYOVER_NTP_SERVER")
                .unwrap_or_else(|| String::from(Self::DEFAULT_NTP_SERVER)),
            time_api_url: env
                .raw("FLYOVER_TIME_API_URL")
                .unwrap_or_else(|| String::from(Self::DEFAULT_TIME_API_URL)),
            utc_offset_minutes,
            pixels,
            brightness: env.or("FLYOVER_BRIGHTNESS", 100)?,
            lookup_retry_delay: Duration::from_secs(env.or("FLYOVER_LOOKUP_RETRY_SECS", 5)?),
        })
    }

    /// Base URL of the prediction service, honouring the override.
    pub fn prediction_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(self.provider.default_base_url())
    }
}

struct Env<F: Fn(&str) -> Option<String>>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Trimmed value, blank counts as unset.
    fn raw(&self, name: &str) -> Option<String> {
        (self.0)(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn required<T: FromStr>(&self, name: &'static str) -> Result<T, ConfigError> {
        let raw = self.raw(name).ok_or(ConfigError::Missing(name))?;
        raw.parse().map_err(|_| ConfigError::Invalid(name))
    }

    fn or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.raw(name) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
            None => Ok(default),
        }
    }
}
