#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod clock;
mod config;
mod flyover_control;
mod http_handler;
mod indicator;
mod keychain;
mod logger;
mod pass_prediction;

use crate::clock::FlyoverClock;
use crate::config::FlyoverConfig;
use crate::flyover_control::{ControllerTiming, FlyoverController, HostLink, LookupSettings};
use crate::indicator::{ConsoleIndicator, ProgressIndicator};
use crate::keychain::Keychain;
use chrono::FixedOffset;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut controller = init();
    tokio::select! {
        () = controller.run() => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("Could not listen for shutdown signal: {e}");
            }
        }
    }
    match controller.clock().last_sync_epoch_seconds() {
        Some(t) => info!("Shutting down in state {}, last clock sync at {t}", controller.state()),
        None => info!("Shutting down in state {}, clock never synchronized", controller.state()),
    }
}

fn init() -> FlyoverController {
    let config = FlyoverConfig::from_env().unwrap_or_else(|e| fatal!("Invalid configuration: {e:?}"));
    let local_offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)
        .unwrap_or_else(|| fatal!("UTC offset of {} minutes is out of range", config.utc_offset_minutes));
    let keychain = Keychain::new(config).unwrap_or_else(|e| fatal!("HTTP client setup failed: {e}"));
    let settings = keychain.config();
    info!(
        "Tracking NORAD {} via {} from ({}, {}, {}m)",
        settings.norad_id,
        settings.provider,
        settings.location.latitude(),
        settings.location.longitude(),
        settings.location.altitude()
    );

    let timing = ControllerTiming { lookup_retry_delay: settings.lookup_retry_delay, ..ControllerTiming::default() };
    FlyoverController::new(
        FlyoverClock::new(keychain.time_authority()),
        keychain.predictor(),
        ProgressIndicator::new(Box::new(
            ConsoleIndicator::new(settings.pixels).with_brightness(settings.brightness),
        )),
        Box::new(HostLink::new()),
        LookupSettings {
            location: settings.location,
            lookahead_days: settings.lookahead_days,
            min_visibility_seconds: settings.min_visibility_seconds,
        },
        timing,
        local_offset,
    )
}
