//! Touch input: the controller seam and the per-poll drain loop.

pub mod mxt;

use crate::config::{TOUCH_BATCH, TOUCH_STATUS_RELEASE};
use crate::diag::{DiagnosticSink, TouchLog};
use crate::error::TouchError;
use crate::geometry::{touch_to_screen, Point};
use crate::ui::panel::Panel;
use crate::ui::{PanelIo, Surface};

/// One decoded touch report, raw controller coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub status: u8,
    pub x: u16,
    pub y: u16,
}

impl TouchEvent {
    /// Finger lifted; the only status that triggers buttons.
    pub fn is_release(&self) -> bool {
        self.status == TOUCH_STATUS_RELEASE
    }

    pub fn screen_point(&self) -> Point {
        touch_to_screen(self.x, self.y)
    }
}

/// A touch controller with a message queue.
pub trait TouchController {
    /// At least one message is waiting to be read.
    fn is_message_pending(&mut self) -> bool;

    /// Read the next message and decode it as a touch report.
    fn read_touch_event(&mut self) -> Result<TouchEvent, TouchError>;
}

/// Drain up to [`TOUCH_BATCH`] messages and feed releases to `panel`.
///
/// Failed reads are dropped but still use up a slot in the batch. Every
/// sample read is logged to `sink`, even when a draw failed; only releases
/// reach the panel. Returns the number of releases handled.
pub fn poll<T, S, IO, D>(
    touch: &mut T,
    panel: &mut Panel,
    surface: &mut S,
    io: &mut IO,
    sink: &mut D,
) -> Result<usize, S::Error>
where
    T: TouchController,
    S: Surface,
    IO: PanelIo,
    D: DiagnosticSink,
{
    let mut log = TouchLog::new();
    let mut handled = 0;
    let mut result = Ok(());

    for _ in 0..TOUCH_BATCH {
        if !touch.is_message_pending() {
            break;
        }
        let event = match touch.read_touch_event() {
            Ok(event) => event,
            Err(e) => {
                warn!("touch: dropped sample: {}", e);
                continue;
            }
        };
        let point = event.screen_point();
        log.push(point);
        if !event.is_release() {
            trace!("touch: status {=u8:#x} ignored", event.status);
            continue;
        }

        handled += 1;
        if let Err(e) = panel.touch(point, surface, io) {
            result = Err(e);
            break;
        }
    }

    log.flush(sink);
    result.map(|()| handled)
}
