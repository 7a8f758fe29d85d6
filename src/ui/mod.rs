//! User interface subsystem - colour LCD + touch panel.
//!
//! The [`panel::Panel`] state machine reacts to touches, the countdown tick
//! and the door / release-button edges, rendering the current view through
//! the [`Surface`] drawing primitives.
//!
//! ## Components
//!
//! - **Buttons**: fixed touch regions and the active button set
//! - **Font**: segment digits for the countdown
//! - **Render**: one draw function per screen
//! - **Panel**: the state machine

pub mod buttons;
pub mod font;
pub mod panel;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

use embedded_graphics::pixelcolor::Rgb565;

use crate::geometry::Point;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Home - carousel over the three programs.
    CycleSelect,
    /// Start / home menu for the selected program.
    CycleMenu,
    /// Countdown of a running program.
    Running,
    /// Start refused because the door is open.
    DoorOpenWarning,
    /// Door opened mid-run; shown until the next tick.
    DoorLocked,
    /// Program finished.
    Done,
}

/// Pictures the renderer can place on screen.
///
/// Bitmaps are owned by the display side; the UI only refers to them by id
/// and knows their footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    Daily,
    Heavy,
    Quick,
    RightArrow,
    LeftArrow,
    Unlocked,
    Locked,
    Home,
    PlayPause,
    Ok,
    NoEntry,
}

impl Icon {
    /// Width and height in pixels.
    pub const fn size(self) -> (u16, u16) {
        match self {
            Icon::Daily | Icon::Heavy | Icon::Quick => (180, 180),
            Icon::RightArrow | Icon::LeftArrow => (75, 110),
            Icon::Unlocked | Icon::Locked => (70, 70),
            Icon::Home | Icon::PlayPause | Icon::Ok => (100, 100),
            Icon::NoEntry => (251, 251),
        }
    }
}

/// Drawing primitives the renderer needs from the LCD.
///
/// Filled shapes and text use the current foreground colour, mirroring the
/// controller's own "set colour, then draw" model.
pub trait Surface {
    type Error;

    /// Paint the whole panel with `color`.
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    fn set_foreground(&mut self, color: Rgb565);

    /// Fill the rectangle spanning `(x0, y0)..=(x1, y1)`.
    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error>;

    /// Place `icon` with its top-left corner at `origin`.
    fn draw_icon(&mut self, origin: Point, icon: Icon) -> Result<(), Self::Error>;

    /// Draw `text` with its top-left corner at `origin`.
    fn draw_string(&mut self, origin: Point, text: &str) -> Result<(), Self::Error>;
}

/// Outputs the state machine drives besides the screen.
pub trait PanelIo {
    /// Arm or disarm the one-second countdown tick.
    fn set_tick_enabled(&mut self, enabled: bool);

    /// "Safe to open" LED next to the door.
    fn set_door_led(&mut self, on: bool);
}
