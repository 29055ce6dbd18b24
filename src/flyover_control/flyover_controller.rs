use super::{
    connectivity::Connectivity,
    controller_settings::{ControllerTiming, LookupSettings},
    flyover_state::FlyoverState,
};
use crate::clock::{ClockError, FlyoverClock};
use crate::indicator::ProgressIndicator;
use crate::pass_prediction::{FetchError, PassPredictor, SelectedPass, select, split_hms};
use crate::{error, event, info, log, pass, warn};
use chrono::FixedOffset;
use std::mem::discriminant;
use strum_macros::Display;
use tokio::time::{Instant, sleep, sleep_until};

/// Why a single lookup attempt did not produce a pass.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum LookupError {
    Clock(ClockError),
    Fetch(FetchError),
    /// The service answered, but every candidate has already risen.
    SelectionEmpty,
}

impl std::error::Error for LookupError {}

impl From<ClockError> for LookupError {
    fn from(value: ClockError) -> Self { LookupError::Clock(value) }
}

impl From<FetchError> for LookupError {
    fn from(value: FetchError) -> Self { LookupError::Fetch(value) }
}

/// Owns the tracker state and every collaborator it touches.
///
/// `step` performs exactly one transition. All waiting happens inside the
/// transitions, either as bounded network calls or as sleeps, so a caller
/// driving `step` in a loop gets the full behaviour.
pub struct FlyoverController {
    clock: FlyoverClock,
    predictor: Box<dyn PassPredictor>,
    indicator: ProgressIndicator,
    link: Box<dyn Connectivity>,
    lookup: LookupSettings,
    timing: ControllerTiming,
    /// Used for log output only, all computation is in epoch seconds.
    local_offset: FixedOffset,
    state: FlyoverState,
    sync_failures: u32,
    /// Deadline of the next countdown/progress tick.
    next_tick: Instant,
}

impl FlyoverController {
    pub fn new(
        clock: FlyoverClock,
        predictor: Box<dyn PassPredictor>,
        indicator: ProgressIndicator,
        link: Box<dyn Connectivity>,
        lookup: LookupSettings,
        timing: ControllerTiming,
        local_offset: FixedOffset,
    ) -> Self {
        Self {
            clock,
            predictor,
            indicator,
            link,
            lookup,
            timing,
            local_offset,
            state: FlyoverState::Init,
            sync_failures: 0,
            next_tick: Instant::now(),
        }
    }

    pub fn state(&self) -> FlyoverState { self.state }

    pub fn clock(&self) -> &FlyoverClock { &self.clock }

    /// Drives the state machine forever.
    pub async fn run(&mut self) {
        loop {
            self.step().await;
        }
    }

    /// Executes the current state's transition function once and returns the new state.
    pub async fn step(&mut self) -> FlyoverState {
        let next = match self.state {
            FlyoverState::Init => self.init(),
            FlyoverState::SyncTime => self.sync_time().await,
            FlyoverState::LookupPass => self.lookup_pass().await,
            FlyoverState::Wait(pass) => self.wait(pass).await,
            FlyoverState::PassActive(pass) => self.pass_active(pass).await,
            FlyoverState::Complete => self.complete(),
        };
        if discriminant(&next) != discriminant(&self.state) {
            log!("State {} -> {}", self.state, next);
        }
        self.state = next;
        next
    }

    fn init(&mut self) -> FlyoverState {
        self.sync_failures = 0;
        FlyoverState::SyncTime
    }

    async fn sync_time(&mut self) -> FlyoverState {
        info!("Synchronizing clock...");
        match self.clock.sync().await {
            Ok(()) => {
                self.sync_failures = 0;
                self.indicator.pulse(true).await;
                FlyoverState::LookupPass
            }
            Err(e) => {
                self.sync_failures += 1;
                warn!(
                    "Clock sync failed: {e} ({}/{})",
                    self.sync_failures, self.timing.max_sync_failures
                );
                self.indicator.pulse(false).await;
                if self.sync_failures >= self.timing.max_sync_failures {
                    error!("No time reference after {} attempts, restarting link", self.sync_failures);
                    self.link.restart().await;
                    return FlyoverState::Init;
                }
                sleep(self.timing.sync_retry_delay).await;
                FlyoverState::SyncTime
            }
        }
    }

    async fn lookup_pass(&mut self) -> FlyoverState {
        self.refresh_clock().await;
        if !self.clock.is_synchronized() {
            return FlyoverState::SyncTime;
        }
        info!("Looking up next flyover...");
        match self.lookup().await {
            Ok((selected, now)) => {
                self.indicator.pulse(true).await;
                self.announce(selected, now);
                self.next_tick = Instant::now();
                FlyoverState::Wait(selected)
            }
            Err(LookupError::Clock(e)) => {
                warn!("Clock unusable during lookup: {e}");
                FlyoverState::SyncTime
            }
            Err(e) => {
                match &e {
                    LookupError::SelectionEmpty => warn!("All predicted passes have already risen"),
                    _ => warn!("Pass lookup failed: {e:?}"),
                }
                self.indicator.pulse(false).await;
                if e == LookupError::Fetch(FetchError::TransportFailure) && !self.link.is_connected() {
                    error!("Link is down, restarting it");
                    self.link.restart().await;
                    return FlyoverState::Init;
                }
                sleep(self.timing.lookup_retry_delay).await;
                FlyoverState::LookupPass
            }
        }
    }

    /// Fetches candidates and selects against the time at which they arrived.
    async fn lookup(&mut self) -> Result<(SelectedPass, i64), LookupError> {
        let candidates = self
            .predictor
            .fetch_candidates(
                self.lookup.location,
                self.lookup.lookahead_days,
                self.lookup.min_visibility_seconds,
            )
            .await?;
        let now = self.clock.now()?;
        event!("Received {} candidate passes at {now}", candidates.len());
        for c in &candidates {
            event!("Candidate rising at {} for {}s", c.start_time(), c.duration());
        }
        let selected = select(now, &candidates).ok_or(LookupError::SelectionEmpty)?;
        Ok((selected, now))
    }

    async fn wait(&mut self, selected: SelectedPass) -> FlyoverState {
        let now = match self.clock.now() {
            Ok(now) => now,
            Err(e) => {
                warn!("Dropping tracked pass: {e}");
                return FlyoverState::SyncTime;
            }
        };
        let until = selected.time_until_start(now);
        if until <= 0 {
            pass!("Satellite overhead!");
            return FlyoverState::PassActive(selected);
        }
        self.indicator.render_countdown(until);
        let (h, m, s) = split_hms(until);
        event!("Next flyover in {h:02}:{m:02}:{s:02}");
        self.refresh_clock().await;
        self.tick().await;
        FlyoverState::Wait(selected)
    }

    async fn pass_active(&mut self, selected: SelectedPass) -> FlyoverState {
        if selected.duration() <= 0 {
            warn!("Pass at {} has no duration, skipping it", selected.start_time());
            return FlyoverState::Complete;
        }
        let now = match self.clock.now() {
            Ok(now) => now,
            Err(e) => {
                warn!("Dropping active pass: {e}");
                return FlyoverState::SyncTime;
            }
        };
        let remaining = selected.time_remaining_in_pass(now);
        if remaining <= 0 {
            return FlyoverState::Complete;
        }
        self.indicator.render_progress(selected.elapsed_fraction(now));
        let (_, m, s) = split_hms(remaining);
        event!("Pass time remaining: {m:02}m {s:02}s");
        self.tick().await;
        FlyoverState::PassActive(selected)
    }

    fn complete(&mut self) -> FlyoverState {
        self.indicator.clear();
        pass!("Flyover complete");
        FlyoverState::LookupPass
    }

    /// Runs the periodic re-sync if it is due. A failure keeps the previous
    /// synchronization, the clock itself spaces out further attempts.
    async fn refresh_clock(&mut self) {
        if self.clock.is_synchronized() && self.clock.resync_due() {
            if let Err(e) = self.clock.sync().await {
                warn!("Periodic clock re-sync failed: {e}, keeping previous sync");
            }
        }
    }

    /// Sleeps until the next tick deadline. Deadlines advance by a fixed
    /// period so the time spent in a step is absorbed. When a step overran
    /// the deadline, the schedule restarts from the present.
    async fn tick(&mut self) {
        self.next_tick = (self.next_tick + self.timing.tick).max(Instant::now());
        sleep_until(self.next_tick).await;
    }

    fn announce(&self, selected: SelectedPass, now: i64) {
        let (h, m, s) = split_hms(selected.time_until_start(now));
        let duration = i64::from(selected.duration());
        let local = selected.local_start(self.local_offset).map_or_else(
            || String::from("out of range"),
            |t| t.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
        );
        pass!(
            "Next flyover rises at {} (local {local}), {h:02}h {m:02}m {s:02}s from now, lasting {:02}m {:02}s until {}",
            selected.start_time(),
            duration / 60,
            duration % 60,
            selected.end_time()
        );
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: FlyoverState) {
        self.next_tick = Instant::now();
        self.state = state;
    }
}
