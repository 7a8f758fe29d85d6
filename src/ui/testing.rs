//! Host test doubles for the drawing and I/O traits.

use std::string::String;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;

use crate::geometry::Point;
use crate::ui::{Icon, PanelIo, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear(Rgb565),
    Foreground(Rgb565),
    FillRect(u16, u16, u16, u16),
    Icon(Point, Icon),
    Text(Point, String),
}

/// Records every primitive; optionally fails all fallible calls.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    pub fail: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> Vec<(u16, u16, u16, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillRect(x0, y0, x1, y1) => Some((*x0, *y0, *x1, *y1)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(_, t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn icons(&self) -> Vec<Icon> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Icon(_, i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn cleared(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, Call::Clear(_)))
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: Call) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    type Error = ();

    fn clear(&mut self, color: Rgb565) -> Result<(), ()> {
        self.record(Call::Clear(color))
    }

    fn set_foreground(&mut self, color: Rgb565) {
        self.calls.push(Call::Foreground(color));
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), ()> {
        self.record(Call::FillRect(x0, y0, x1, y1))
    }

    fn draw_icon(&mut self, origin: Point, icon: Icon) -> Result<(), ()> {
        self.record(Call::Icon(origin, icon))
    }

    fn draw_string(&mut self, origin: Point, text: &str) -> Result<(), ()> {
        self.record(Call::Text(origin, text.into()))
    }
}

/// Remembers the last value written to each output.
#[derive(Default, Debug)]
pub struct RecordingIo {
    pub tick_enabled: bool,
    pub tick_changes: usize,
    pub door_led: Option<bool>,
}

impl PanelIo for RecordingIo {
    fn set_tick_enabled(&mut self, enabled: bool) {
        self.tick_enabled = enabled;
        self.tick_changes += 1;
    }

    fn set_door_led(&mut self, on: bool) {
        self.door_led = Some(on);
    }
}
