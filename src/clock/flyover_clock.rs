use crate::{info, warn};
use async_trait::async_trait;
use std::time::Duration;
use strum_macros::Display;
use tokio::time::Instant;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// No sync has ever succeeded, there is no trustworthy time yet.
    Unsynchronized,
    /// The authority did not answer within the bounded wait.
    NoResponse,
    /// The authority answered with something that is not a time.
    MalformedResponse,
}

impl std::error::Error for ClockError {}

/// A network service that can tell the current time.
#[async_trait]
pub trait TimeAuthority: Send + Sync {
    /// Human readable name used in log output.
    fn name(&self) -> &str;
    /// Performs one exchange and returns the reported epoch seconds.
    async fn query(&self) -> Result<i64, ClockError>;
}

/// Pairs a monotonic instant with the epoch seconds valid at that instant.
#[derive(Debug, Clone, Copy)]
struct ClockAnchor {
    instant: Instant,
    epoch_seconds: i64,
}

/// Epoch-seconds clock derived from the monotonic clock and the last successful sync.
///
/// `now()` refuses to answer before the first sync. Once synchronized, time
/// never runs backwards: a sync reporting an earlier time than the current
/// reading keeps the current reading.
pub struct FlyoverClock {
    authority: Box<dyn TimeAuthority>,
    anchor: Option<ClockAnchor>,
    resync_interval: Duration,
    last_failure: Option<Instant>,
}

impl FlyoverClock {
    /// Bounded wait for a single authority exchange.
    pub const SYNC_TIMEOUT: Duration = Duration::from_millis(1500);
    /// Default drift bound between periodic re-syncs.
    pub const DEFAULT_RESYNC_INTERVAL: Duration = Duration::from_secs(6 * 3600);
    /// Minimum spacing between periodic re-sync attempts after a failed one.
    const RESYNC_RETRY_SPACING: Duration = Duration::from_secs(60);

    pub fn new(authority: Box<dyn TimeAuthority>) -> Self {
        Self {
            authority,
            anchor: None,
            resync_interval: Self::DEFAULT_RESYNC_INTERVAL,
            last_failure: None,
        }
    }

    #[must_use]
    pub fn with_resync_interval(mut self, resync_interval: Duration) -> Self {
        self.resync_interval = resync_interval;
        self
    }

    pub fn is_synchronized(&self) -> bool { self.anchor.is_some() }

    /// Epoch seconds stored by the last successful sync.
    pub fn last_sync_epoch_seconds(&self) -> Option<i64> { self.anchor.map(|a| a.epoch_seconds) }

    /// Current time in epoch seconds.
    ///
    /// # Errors
    /// `ClockError::Unsynchronized` until the first successful `sync`.
    pub fn now(&self) -> Result<i64, ClockError> {
        let anchor = self.anchor.ok_or(ClockError::Unsynchronized)?;
        let elapsed = i64::try_from(anchor.instant.elapsed().as_secs()).unwrap_or(i64::MAX);
        Ok(anchor.epoch_seconds.saturating_add(elapsed))
    }

    /// Queries the authority once and re-anchors the clock on success.
    ///
    /// # Errors
    /// `NoResponse` if the authority stays silent for `SYNC_TIMEOUT`,
    /// `MalformedResponse` if its answer cannot be decoded. The previous
    /// anchor stays in place on failure.
    pub async fn sync(&mut self) -> Result<(), ClockError> {
        let reported = tokio::time::timeout(Self::SYNC_TIMEOUT, self.authority.query())
            .await
            .map_err(|_| ClockError::NoResponse)
            .and_then(|reply| reply)
            .inspect_err(|_| self.last_failure = Some(Instant::now()))?;
        let epoch_seconds = match self.now() {
            Ok(current) if reported < current => {
                warn!(
                    "{} reported {reported}, {}s behind the local reading. Keeping {current}.",
                    self.authority.name(),
                    current - reported
                );
                current
            }
            _ => reported,
        };
        self.anchor = Some(ClockAnchor { instant: Instant::now(), epoch_seconds });
        self.last_failure = None;
        info!("Clock synchronized via {}: {epoch_seconds}", self.authority.name());
        Ok(())
    }

    /// Whether the periodic re-sync should run now.
    ///
    /// Always true while unsynchronized. After a failed periodic attempt the
    /// next one is held back for `RESYNC_RETRY_SPACING`.
    pub fn resync_due(&self) -> bool {
        let Some(anchor) = self.anchor else {
            return true;
        };
        anchor.instant.elapsed() >= self.resync_interval
            && self.last_failure.is_none_or(|t| t.elapsed() >= Self::RESYNC_RETRY_SPACING)
    }
}
