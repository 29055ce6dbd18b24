use crate::pass_prediction::ObserverLocation;
use std::time::Duration;

/// Parameters of every prediction lookup.
#[derive(Debug, Clone, Copy)]
pub struct LookupSettings {
    pub location: ObserverLocation,
    pub lookahead_days: u8,
    pub min_visibility_seconds: u32,
}

/// Delays and retry budget of the state machine.
#[derive(Debug, Clone, Copy)]
pub struct ControllerTiming {
    /// Period of countdown and progress updates.
    pub tick: Duration,
    /// Pause between two failed clock syncs.
    pub sync_retry_delay: Duration,
    /// Pause after a failed or empty lookup.
    pub lookup_retry_delay: Duration,
    /// Consecutive sync failures before connectivity is restarted.
    pub max_sync_failures: u32,
}

impl Default for ControllerTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            sync_retry_delay: Duration::from_secs(1),
            lookup_retry_delay: Duration::from_secs(5),
            max_sync_failures: 5,
        }
    }
}
