//! Pending-event flags shared between interrupt-side tasks and the UI loop.
//!
//! Producers only ever bump a counter; the UI loop drains the counters and
//! feeds the state machine. Each flag is owned by exactly one producer and
//! consumed by exactly one consumer, so plain atomics are enough and no
//! interrupt ever touches the panel state directly.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::ui::panel::Panel;
use crate::ui::{PanelIo, Surface};

/// Pending countdown ticks, door edges and release-button presses.
pub struct EventFlags {
    ticks: AtomicU32,
    door_edges: AtomicU32,
    release_presses: AtomicU32,
}

impl EventFlags {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            door_edges: AtomicU32::new(0),
            release_presses: AtomicU32::new(0),
        }
    }

    pub fn raise_tick(&self) {
        self.ticks.fetch_add(1, Ordering::AcqRel);
    }

    pub fn raise_door_edge(&self) {
        self.door_edges.fetch_add(1, Ordering::AcqRel);
    }

    pub fn raise_release_press(&self) {
        self.release_presses.fetch_add(1, Ordering::AcqRel);
    }

    /// Take and reset the pending tick count.
    pub fn take_ticks(&self) -> u32 {
        self.ticks.swap(0, Ordering::AcqRel)
    }

    pub fn take_door_edges(&self) -> u32 {
        self.door_edges.swap(0, Ordering::AcqRel)
    }

    /// Presses collapse: any number of them is one unlock request.
    pub fn take_release_press(&self) -> bool {
        self.release_presses.swap(0, Ordering::AcqRel) > 0
    }

    pub fn any_pending(&self) -> bool {
        self.ticks.load(Ordering::Acquire) > 0
            || self.door_edges.load(Ordering::Acquire) > 0
            || self.release_presses.load(Ordering::Acquire) > 0
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed everything pending into `panel`: ticks first, then door edges, then
/// the release button.
///
/// Ticks and door edges are replayed one by one so none is lost when the
/// loop falls behind; a door edge only means anything relative to the one
/// before it.
pub fn dispatch_pending<S: Surface, IO: PanelIo>(
    flags: &EventFlags,
    panel: &mut Panel,
    surface: &mut S,
    io: &mut IO,
) -> Result<(), S::Error> {
    let ticks = flags.take_ticks();
    if ticks > 1 {
        debug!("events: replaying {} ticks", ticks);
    }
    for _ in 0..ticks {
        panel.tick(surface, io)?;
    }

    for _ in 0..flags.take_door_edges() {
        panel.door_edge(surface, io)?;
    }

    if flags.take_release_press() {
        panel.release_button(surface)?;
    }
    Ok(())
}
