use super::{Indicator, Rgb};
use crate::warn;
use std::io::Write;

/// Terminal stand-in for the LED ring: prints the ring as true-colour dots.
pub struct ConsoleIndicator {
    pixels: Vec<Rgb>,
    /// Global brightness, 255 is full scale.
    brightness: u8,
    last_shown: Option<Vec<Rgb>>,
    out: std::io::Stdout,
}

impl ConsoleIndicator {
    pub const DEFAULT_BRIGHTNESS: u8 = 100;

    pub fn new(pixel_count: usize) -> Self {
        Self {
            pixels: vec![Rgb::OFF; pixel_count],
            brightness: Self::DEFAULT_BRIGHTNESS,
            last_shown: None,
            out: std::io::stdout(),
        }
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn scale(&self, c: Rgb) -> Rgb {
        let s = |v: u8| (u16::from(v) * u16::from(self.brightness) / 255) as u8;
        Rgb::new(s(c.r), s(c.g), s(c.b))
    }

    fn frame(&self) -> String {
        let mut out = String::new();
        for p in &self.pixels {
            if *p == Rgb::OFF {
                out.push_str("\x1b[90m○");
            } else {
                let c = self.scale(*p);
                out.push_str(&format!("\x1b[38;2;{};{};{}m●", c.r, c.g, c.b));
            }
        }
        out.push_str("\x1b[0m");
        out
    }

    /// Writes `line` and flushes. A broken terminal must not stop the tracker.
    fn emit(&mut self, line: &str) {
        if let Err(e) = self.out.write_all(line.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("Console indicator output failed: {e}");
        }
    }
}

/// Erases the current terminal line and, for non-empty text, prints it in its place.
pub(super) fn display_line(text: &str) -> String {
    if text.is_empty() { String::from("\r\x1b[2K") } else { format!("\r\x1b[2K[DISPLAY] {text}") }
}

impl Indicator for ConsoleIndicator {
    fn pixel_count(&self) -> usize { self.pixels.len() }

    fn set_color(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    fn show(&mut self) {
        if self.last_shown.as_ref() == Some(&self.pixels) {
            return;
        }
        let line = format!("\r\x1b[2K[RING] {}\n", self.frame());
        self.emit(&line);
        self.last_shown = Some(self.pixels.clone());
    }

    fn display_text(&mut self, text: &str) { self.emit(&display_line(text)); }
}
