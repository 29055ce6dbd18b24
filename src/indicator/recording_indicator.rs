use super::{Indicator, Rgb};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    Pixels(Vec<Rgb>),
    Text(String),
}

/// Shared view on everything a `RecordingIndicator` was asked to show.
#[derive(Clone, Default)]
pub(crate) struct FrameLog(Arc<Mutex<Vec<Frame>>>);

impl FrameLog {
    pub(crate) fn frames(&self) -> Vec<Frame> { self.0.lock().unwrap().clone() }

    pub(crate) fn clear(&self) { self.0.lock().unwrap().clear(); }

    /// Non-empty display texts in order.
    pub(crate) fn texts(&self) -> Vec<String> {
        self.frames()
            .into_iter()
            .filter_map(|f| match f {
                Frame::Text(t) if !t.is_empty() => Some(t),
                _ => None,
            })
            .collect()
    }

    /// First pixel of every shown frame.
    pub(crate) fn shown_colors(&self) -> Vec<Rgb> {
        self.frames()
            .into_iter()
            .filter_map(|f| match f {
                Frame::Pixels(p) => p.first().copied(),
                Frame::Text(_) => None,
            })
            .collect()
    }
}

/// `Indicator` that records instead of lighting anything.
pub(crate) struct RecordingIndicator {
    pixels: Vec<Rgb>,
    log: FrameLog,
}

impl RecordingIndicator {
    pub(crate) fn new(pixel_count: usize) -> (Self, FrameLog) {
        let log = FrameLog::default();
        (Self { pixels: vec![Rgb::OFF; pixel_count], log: log.clone() }, log)
    }
}

impl Indicator for RecordingIndicator {
    fn pixel_count(&self) -> usize { self.pixels.len() }

    fn set_color(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    fn show(&mut self) { self.log.0.lock().unwrap().push(Frame::Pixels(self.pixels.clone())); }

    fn display_text(&mut self, text: &str) {
        self.log.0.lock().unwrap().push(Frame::Text(String::from(text)));
    }
}
