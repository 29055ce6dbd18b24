use super::connectivity::Connectivity;
use super::flyover_state::FlyoverState;
use super::*;
use crate::clock::{ClockError, FlyoverClock, TimeAuthority};
use crate::indicator::recording_indicator::{FrameLog, RecordingIndicator};
use crate::indicator::{ProgressIndicator, Rgb};
use crate::pass_prediction::{
    FetchError, ObserverLocation, PassCandidate, PassPredictor, SelectedPass,
};
use async_trait::async_trait;
use chrono::FixedOffset;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Answers every query with the same reply, `delay` after being asked.
struct FixedAuthority {
    reply: Result<i64, ClockError>,
    delay: Duration,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl TimeAuthority for FixedAuthority {
    fn name(&self) -> &str { "fixed" }

    async fn query(&self) -> Result<i64, ClockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.reply
    }
}

type Reply = Result<Vec<PassCandidate>, FetchError>;

/// Plays back scripted replies, repeating the last one once the script runs out.
struct ScriptedPredictor {
    replies: Mutex<VecDeque<Reply>>,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl PassPredictor for ScriptedPredictor {
    async fn fetch_candidates(
        &self,
        _location: ObserverLocation,
        _lookahead_days: u8,
        _min_visibility_seconds: u32,
    ) -> Result<Vec<PassCandidate>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap_or(Ok(vec![]))
        }
    }
}

struct CountingLink {
    connected: bool,
    restarts: Arc<AtomicU32>,
}

#[async_trait]
impl Connectivity for CountingLink {
    fn is_connected(&self) -> bool { self.connected }

    async fn restart(&mut self) { self.restarts.fetch_add(1, Ordering::SeqCst); }
}

struct Harness {
    ctl: FlyoverController,
    log: FrameLog,
    syncs: Arc<AtomicU32>,
    fetches: Arc<AtomicU32>,
    restarts: Arc<AtomicU32>,
}

impl Harness {
    fn new(clock_reply: Result<i64, ClockError>, replies: Vec<Reply>, connected: bool) -> Self {
        Self::with_resync(clock_reply, replies, connected, FlyoverClock::DEFAULT_RESYNC_INTERVAL)
    }

    fn with_resync(
        clock_reply: Result<i64, ClockError>,
        replies: Vec<Reply>,
        connected: bool,
        resync_interval: Duration,
    ) -> Self {
        Self::build(clock_reply, replies, connected, resync_interval, Duration::ZERO)
    }

    /// Clock whose every sync takes `sync_delay`, re-synced every `resync_interval`.
    fn with_slow_clock(replies: Vec<Reply>, resync_interval: Duration, sync_delay: Duration) -> Self {
        Self::build(Ok(1_000), replies, true, resync_interval, sync_delay)
    }

    fn build(
        clock_reply: Result<i64, ClockError>,
        replies: Vec<Reply>,
        connected: bool,
        resync_interval: Duration,
        sync_delay: Duration,
    ) -> Self {
        let syncs = Arc::new(AtomicU32::new(0));
        let fetches = Arc::new(AtomicU32::new(0));
        let restarts = Arc::new(AtomicU32::new(0));
        let clock = FlyoverClock::new(Box::new(FixedAuthority {
            reply: clock_reply,
            delay: sync_delay,
            calls: Arc::clone(&syncs),
        }))
        .with_resync_interval(resync_interval);
        let predictor = ScriptedPredictor {
            replies: Mutex::new(replies.into()),
            calls: Arc::clone(&fetches),
        };
        let link = CountingLink { connected, restarts: Arc::clone(&restarts) };
        let (device, log) = RecordingIndicator::new(12);
        let ctl = FlyoverController::new(
            clock,
            Box::new(predictor),
            ProgressIndicator::new(Box::new(device)),
            Box::new(link),
            LookupSettings {
                location: ObserverLocation::new(-33.87, 151.21, 100.0),
                lookahead_days: 1,
                min_visibility_seconds: 180,
            },
            ControllerTiming::default(),
            FixedOffset::east_opt(10 * 3600).unwrap(),
        );
        Self { ctl, log, syncs, fetches, restarts }
    }

    async fn steps(&mut self, n: usize) -> Vec<FlyoverState> {
        let mut seen = Vec::with_capacity(n);
        for _ in 0..n {
            seen.push(self.ctl.step().await);
        }
        seen
    }

    /// Steps until `pred` holds for the current state, panicking after `limit` steps.
    async fn step_until(&mut self, limit: usize, pred: impl Fn(FlyoverState) -> bool) {
        for _ in 0..limit {
            if pred(self.ctl.state()) {
                return;
            }
            self.ctl.step().await;
        }
        panic!("state {} not left within {limit} steps", self.ctl.state());
    }
}

fn pass_at(start_time: i64, duration: i32) -> SelectedPass {
    SelectedPass::from(PassCandidate::new(start_time, duration))
}

#[tokio::test(start_paused = true)]
async fn test_startup_runs_sync_before_lookup() {
    let mut h = Harness::new(Ok(1_000_000), vec![Ok(vec![PassCandidate::new(1_000_100, 30)])], true);
    assert_eq!(h.ctl.state(), FlyoverState::Init);
    let seen = h.steps(3).await;
    assert_eq!(seen[0], FlyoverState::SyncTime);
    assert_eq!(seen[1], FlyoverState::LookupPass);
    assert_eq!(seen[2], FlyoverState::Wait(pass_at(1_000_100, 30)));
    assert_eq!(h.syncs.load(Ordering::SeqCst), 1);
    assert_eq!(h.fetches.load(Ordering::SeqCst), 1);
    let colors = h.log.shown_colors();
    assert_eq!(colors.iter().filter(|c| **c == ProgressIndicator::SUCCESS_COLOR).count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unsynchronized_clock_never_reaches_lookup() {
    let mut h = Harness::new(
        Err(ClockError::NoResponse),
        vec![Ok(vec![PassCandidate::new(1_000_100, 30)])],
        true,
    );
    let seen = h.steps(60).await;
    assert!(seen.iter().all(|s| matches!(s, FlyoverState::Init | FlyoverState::SyncTime)));
    assert_eq!(h.fetches.load(Ordering::SeqCst), 0);
    assert!(!h.ctl.clock().is_synchronized());
    // one Init plus five failed syncs per restart
    assert_eq!(h.restarts.load(Ordering::SeqCst), 10);
}

#[tokio::test(start_paused = true)]
async fn test_sync_failures_back_off_before_retrying() {
    let mut h = Harness::new(Err(ClockError::MalformedResponse), vec![], true);
    h.steps(1).await;
    let started = Instant::now();
    assert_eq!(h.ctl.step().await, FlyoverState::SyncTime);
    let timing = ControllerTiming::default();
    assert!(started.elapsed() >= ProgressIndicator::PULSE_DURATION + timing.sync_retry_delay);
    assert_eq!(h.log.shown_colors()[0], ProgressIndicator::FAILURE_COLOR);
}

#[tokio::test(start_paused = true)]
async fn test_selection_skips_elapsed_candidate() {
    let mut h = Harness::new(
        Ok(150),
        vec![Ok(vec![PassCandidate::new(100, 30), PassCandidate::new(200, 30)])],
        true,
    );
    let seen = h.steps(3).await;
    assert_eq!(seen[2], FlyoverState::Wait(pass_at(200, 30)));
}

#[tokio::test(start_paused = true)]
async fn test_all_candidates_elapsed_reenters_lookup() {
    let mut h = Harness::new(Ok(150), vec![Ok(vec![PassCandidate::new(50, 30)])], true);
    let seen = h.steps(3).await;
    assert_eq!(seen[2], FlyoverState::LookupPass);
    assert_eq!(h.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(h.log.shown_colors().iter().rev().nth(1), Some(&ProgressIndicator::FAILURE_COLOR));

    assert_eq!(h.ctl.step().await, FlyoverState::LookupPass);
    assert_eq!(h.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_error_is_retried_after_delay() {
    let mut h = Harness::new(
        Ok(1_000),
        vec![Err(FetchError::ServerError(503)), Ok(vec![PassCandidate::new(2_000, 60)])],
        true,
    );
    h.steps(2).await;
    let started = Instant::now();
    assert_eq!(h.ctl.step().await, FlyoverState::LookupPass);
    assert!(started.elapsed() >= ControllerTiming::default().lookup_retry_delay);
    assert_eq!(h.ctl.step().await, FlyoverState::Wait(pass_at(2_000, 60)));
    assert_eq!(h.restarts.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_on_dead_link_restarts_from_init() {
    let mut h = Harness::new(Ok(1_000), vec![Err(FetchError::TransportFailure)], false);
    let seen = h.steps(4).await;
    assert_eq!(seen[2], FlyoverState::Init);
    assert_eq!(seen[3], FlyoverState::SyncTime);
    assert_eq!(h.restarts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_on_live_link_only_retries() {
    let mut h = Harness::new(Ok(1_000), vec![Err(FetchError::TransportFailure)], true);
    let seen = h.steps(3).await;
    assert_eq!(seen[2], FlyoverState::LookupPass);
    assert_eq!(h.restarts.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pass_starting_now_skips_countdown() {
    let mut h = Harness::new(Ok(5_000), vec![], true);
    h.steps(2).await;
    let now = h.ctl.clock().now().unwrap();
    h.log.clear();
    h.ctl.force_state(FlyoverState::Wait(pass_at(now, 30)));

    let started = Instant::now();
    assert_eq!(h.ctl.step().await, FlyoverState::PassActive(pass_at(now, 30)));
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert!(h.log.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_full_cycle_counts_down_and_tracks_pass() {
    let mut h = Harness::new(
        Ok(1_000_000),
        vec![Ok(vec![PassCandidate::new(1_000_010, 30)]), Err(FetchError::ServerError(500))],
        true,
    );
    h.step_until(10, |s| matches!(s, FlyoverState::Wait(_))).await;
    h.step_until(30, |s| matches!(s, FlyoverState::PassActive(_))).await;

    let countdown = h.log.texts();
    assert!(!countdown.is_empty());
    assert!(countdown.windows(2).all(|w| w[0] > w[1]), "countdown not decreasing: {countdown:?}");
    assert_eq!(countdown.last().map(String::as_str), Some("00:00:01"));

    h.log.clear();
    let mut ticks = 0;
    while matches!(h.ctl.step().await, FlyoverState::PassActive(_)) {
        ticks += 1;
        assert!(ticks <= 30, "pass outlived its duration");
    }
    assert_eq!(ticks, 30);
    assert_eq!(h.ctl.state(), FlyoverState::Complete);

    let progress = h.log.shown_colors();
    assert_eq!(progress.len(), 30);
    assert_eq!(progress[0], ProgressIndicator::progress_color(0.0));
    assert!(progress.windows(2).all(|w| w[0].r <= w[1].r && w[0].b >= w[1].b));

    assert_eq!(h.ctl.step().await, FlyoverState::LookupPass);
    assert_eq!(h.log.shown_colors().last(), Some(&Rgb::OFF));
    assert_eq!(h.syncs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_pass_completes_without_rendering() {
    let mut h = Harness::new(Ok(5_000), vec![], true);
    h.steps(2).await;
    h.log.clear();
    h.ctl.force_state(FlyoverState::PassActive(pass_at(5_000, 0)));
    assert_eq!(h.ctl.step().await, FlyoverState::Complete);
    assert!(h.log.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_complete_returns_to_lookup_without_resync() {
    let mut h = Harness::new(Ok(5_000), vec![], true);
    h.steps(2).await;
    h.ctl.force_state(FlyoverState::Complete);
    assert_eq!(h.ctl.step().await, FlyoverState::LookupPass);
    assert_eq!(h.syncs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pass_is_dropped_without_clock() {
    let mut h = Harness::new(Ok(5_000), vec![], true);
    h.ctl.force_state(FlyoverState::Wait(pass_at(6_000, 30)));
    assert_eq!(h.ctl.step().await, FlyoverState::SyncTime);
    h.ctl.force_state(FlyoverState::PassActive(pass_at(6_000, 30)));
    assert_eq!(h.ctl.step().await, FlyoverState::SyncTime);
}

#[tokio::test(start_paused = true)]
async fn test_periodic_resync_while_waiting() {
    let mut h = Harness::with_resync(
        Ok(1_000),
        vec![Ok(vec![PassCandidate::new(1_100, 30)])],
        true,
        Duration::from_secs(20),
    );
    h.step_until(10, |s| matches!(s, FlyoverState::Wait(_))).await;
    h.steps(50).await;
    assert!(h.syncs.load(Ordering::SeqCst) >= 3);
    assert!(matches!(h.ctl.state(), FlyoverState::Wait(_)));
}

/// Runs `n` steps in `Wait`, returning each step's duration and whether it re-synced.
async fn timed_wait_steps(h: &mut Harness, n: usize) -> Vec<(Duration, bool)> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let syncs = h.syncs.load(Ordering::SeqCst);
        let started = Instant::now();
        assert!(matches!(h.ctl.step().await, FlyoverState::Wait(_)));
        out.push((started.elapsed(), h.syncs.load(Ordering::SeqCst) > syncs));
    }
    out
}

fn close_to(actual: Duration, expected: Duration) -> bool {
    actual >= expected && actual < expected + Duration::from_millis(3)
}

#[tokio::test(start_paused = true)]
async fn test_tick_absorbs_slow_resync() {
    let mut h = Harness::with_slow_clock(
        vec![Ok(vec![PassCandidate::new(1_100, 30)])],
        Duration::from_secs(2),
        Duration::from_millis(400),
    );
    h.step_until(10, |s| matches!(s, FlyoverState::Wait(_))).await;

    let started = Instant::now();
    let steps = timed_wait_steps(&mut h, 10).await;
    assert!(steps.iter().filter(|(_, synced)| *synced).count() >= 3);
    // a re-syncing step takes no longer than any other, so nothing drifts
    assert!(steps.iter().all(|(d, _)| close_to(*d, Duration::from_secs(1))), "{steps:?}");
    assert!(close_to(started.elapsed(), Duration::from_secs(10)));
}

#[tokio::test(start_paused = true)]
async fn test_overrun_tick_restarts_schedule() {
    let mut h = Harness::with_slow_clock(
        vec![Ok(vec![PassCandidate::new(1_100, 30)])],
        Duration::from_secs(2),
        Duration::from_millis(1_200),
    );
    h.step_until(10, |s| matches!(s, FlyoverState::Wait(_))).await;

    let steps = timed_wait_steps(&mut h, 8).await;
    assert!(steps.iter().any(|(_, synced)| *synced));
    for (i, (d, synced)) in steps.iter().enumerate() {
        if *synced {
            // the sync already overran the deadline, no sleep follows it
            assert!(close_to(*d, Duration::from_millis(1_200)), "step {i}: {steps:?}");
        } else {
            assert!(close_to(*d, Duration::from_secs(1)), "step {i}: {steps:?}");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_far_future_pass_is_tracked_without_overflow() {
    let mut h = Harness::new(Ok(1_000), vec![Ok(vec![PassCandidate::new(i64::MAX, 30)])], true);
    let seen = h.steps(4).await;
    assert_eq!(seen[2], FlyoverState::Wait(pass_at(i64::MAX, 30)));
    assert_eq!(seen[3], FlyoverState::Wait(pass_at(i64::MAX, 30)));
    assert!(!h.log.texts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_host_link_restart_waits_for_settle() {
    let mut link = HostLink::new();
    assert!(link.is_connected());
    let started = Instant::now();
    link.restart().await;
    assert_eq!(started.elapsed(), HostLink::DEFAULT_SETTLE_DELAY);
}
