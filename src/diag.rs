//! Diagnostic touch log on the serial port.
//!
//! Every release event produces one `"X:%3d Y:%3d \n"` line. Lines from one
//! poll are batched and written in a single go; the sink is best effort and
//! never reports failure back to the UI.

use core::fmt::Write;

use heapless::String;

use crate::config::{DIAG_LINE_CAPACITY, TOUCH_BATCH};
use crate::geometry::Point;

/// Somewhere to send diagnostic text.
pub trait DiagnosticSink {
    fn write_line(&mut self, line: &str);
}

/// One formatted log line.
pub type DiagLine = String<DIAG_LINE_CAPACITY>;

pub fn format_touch(point: Point) -> DiagLine {
    let mut line = String::new();
    // "X:65535 Y:65535 \n" is 17 bytes, well under capacity
    let _ = write!(line, "X:{:3} Y:{:3} \n", point.x, point.y);
    line
}

/// Lines collected during one touch poll.
#[derive(Debug, Default)]
pub struct TouchLog {
    buf: String<{ DIAG_LINE_CAPACITY * TOUCH_BATCH }>,
}

impl TouchLog {
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Append a line for `point`. Returns false if the batch is full.
    pub fn push(&mut self, point: Point) -> bool {
        self.buf.push_str(&format_touch(point)).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write everything collected to `sink` and start over.
    pub fn flush(&mut self, sink: &mut impl DiagnosticSink) {
        if !self.buf.is_empty() {
            sink.write_line(&self.buf);
            self.buf.clear();
        }
    }
}
