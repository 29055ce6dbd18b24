use chrono::{DateTime, FixedOffset};

/// One predicted pass window as returned by a prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassCandidate {
    /// Rise time in epoch seconds.
    start_time: i64,
    /// Length of the pass in seconds.
    duration: i32,
}

impl PassCandidate {
    pub fn new(start_time: i64, duration: i32) -> Self { Self { start_time, duration } }

    pub fn start_time(&self) -> i64 { self.start_time }
    pub fn duration(&self) -> i32 { self.duration }
}

/// The pass the controller is currently tracking.
///
/// Only ever built from a `PassCandidate` by the selector and replaced as a
/// whole on the next lookup. All countdown values are derived from it and the
/// current time on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedPass {
    start_time: i64,
    duration: i32,
}

impl SelectedPass {
    pub fn start_time(&self) -> i64 { self.start_time }
    pub fn duration(&self) -> i32 { self.duration }
    /// Saturates for rise times near the end of the representable range.
    pub fn end_time(&self) -> i64 { self.start_time.saturating_add(i64::from(self.duration)) }

    /// Seconds until rise. Zero or negative once the pass has started.
    pub fn time_until_start(&self, now: i64) -> i64 { self.start_time.saturating_sub(now) }

    /// Seconds left in the pass. Can exceed `duration` before the rise.
    pub fn time_remaining_in_pass(&self, now: i64) -> i64 {
        i64::from(self.duration).saturating_sub(now.saturating_sub(self.start_time))
    }

    /// Fraction of the pass already elapsed, clamped to `[0, 1]`.
    /// Degenerate passes (`duration <= 0`) count as fully elapsed.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn elapsed_fraction(&self, now: i64) -> f32 {
        if self.duration <= 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time) as f64 / f64::from(self.duration);
        elapsed.clamp(0.0, 1.0) as f32
    }

    /// Rise time rendered in the given local offset, `None` for out-of-range timestamps.
    pub fn local_start(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp(self.start_time, 0).map(|t| t.with_timezone(&offset))
    }
}

impl From<PassCandidate> for SelectedPass {
    fn from(value: PassCandidate) -> Self {
        Self { start_time: value.start_time, duration: value.duration }
    }
}

/// Splits a second count into `(hours, minutes, seconds)`. Negative input counts as zero.
pub(crate) fn split_hms(total_seconds: i64) -> (i64, i64, i64) {
    let t = total_seconds.max(0);
    (t / 3600, (t % 3600) / 60, t % 60)
}
