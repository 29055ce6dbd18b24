use super::{Indicator, Rgb};
use crate::pass_prediction::split_hms;
use std::time::Duration;

/// Renders tracker state onto an `Indicator`.
///
/// During a pass every pixel shows the same colour, sweeping from blue at
/// rise to red at set. Pulses flash the whole strip for a fixed time.
pub struct ProgressIndicator {
    device: Box<dyn Indicator>,
}

impl ProgressIndicator {
    pub const PULSE_DURATION: Duration = Duration::from_millis(500);
    pub const SUCCESS_COLOR: Rgb = Rgb::new(0, 255, 0);
    pub const FAILURE_COLOR: Rgb = Rgb::new(255, 0, 0);
    /// Channel value at either end of the progress gradient.
    const GRADIENT_MAX: f32 = 200.0;

    pub fn new(device: Box<dyn Indicator>) -> Self { Self { device } }

    /// Gradient colour for an elapsed fraction. Red rises, blue falls.
    /// Values outside `[0, 1]` are clamped, NaN counts as zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress_color(elapsed_fraction: f32) -> Rgb {
        let f = if elapsed_fraction.is_nan() { 0.0 } else { elapsed_fraction.clamp(0.0, 1.0) };
        let rising = (f * Self::GRADIENT_MAX).round() as u8;
        let falling = ((1.0 - f) * Self::GRADIENT_MAX).round() as u8;
        Rgb::new(rising, 0, falling)
    }

    pub fn render_progress(&mut self, elapsed_fraction: f32) {
        self.fill(Self::progress_color(elapsed_fraction));
        self.device.show();
    }

    /// Shows the time left until rise as `HH:MM:SS`.
    pub fn render_countdown(&mut self, seconds_remaining: i64) {
        let (h, m, s) = split_hms(seconds_remaining);
        self.device.display_text(&format!("{h:02}:{m:02}:{s:02}"));
    }

    /// Flashes green or red for `PULSE_DURATION`, then goes dark.
    pub async fn pulse(&mut self, success: bool) {
        let color = if success { Self::SUCCESS_COLOR } else { Self::FAILURE_COLOR };
        self.fill(color);
        self.device.show();
        tokio::time::sleep(Self::PULSE_DURATION).await;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.fill(Rgb::OFF);
        self.device.show();
        self.device.display_text("");
    }

    fn fill(&mut self, color: Rgb) {
        for i in 0..self.device.pixel_count() {
            self.device.set_color(i, color);
        }
    }
}
