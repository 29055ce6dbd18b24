//! Visual output: the device capability and the pass progress rendering on top of it.
mod console_indicator;
mod progress_indicator;
#[cfg(test)]
pub(crate) mod recording_indicator;

pub use console_indicator::ConsoleIndicator;
pub use progress_indicator::ProgressIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

/// An addressable pixel strip with an optional scalar text display.
///
/// `set_color` only stages a value, nothing is visible before `show`.
/// Indices outside `0..pixel_count()` are ignored.
pub trait Indicator: Send {
    fn pixel_count(&self) -> usize;
    fn set_color(&mut self, index: usize, color: Rgb);
    fn show(&mut self);
    /// Writes to the text display, if the device has one.
    fn display_text(&mut self, _text: &str) {}
}
