//! On-screen buttons and the active button set.
//!
//! Every button is a fixed region on the 480×320 panel. Entering a screen
//! replaces the whole active set with that screen's buttons; the set is
//! never patched in place.

use heapless::Vec;

use crate::catalog::CycleKind;
use crate::config::MAX_BUTTONS;
use crate::geometry::{Hitbox, Rect};
use crate::ui::Icon;

/// What a button does when tapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Big cycle icon on the carousel - open that program's menu.
    OpenMenu,
    /// Carousel arrow to the right.
    CarouselRight,
    /// Carousel arrow to the left.
    CarouselLeft,
    /// Back to the carousel.
    Home,
    /// Start the selected program.
    Start,
    /// Dismiss the Done / door-open screens.
    Acknowledge,
    /// Padlock - lock the panel against touches.
    EngageLock,
    /// Lock badge; shows state only.
    LockIndicator,
}

/// A touchable region with its picture and action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub area: Rect,
    pub icon: Icon,
    pub action: Action,
}

impl Button {
    pub const fn new(area: Rect, icon: Icon, action: Action) -> Self {
        Self { area, icon, action }
    }
}

impl Hitbox for Button {
    fn hitbox(&self) -> Rect {
        self.area
    }
}

// Layout

/// Cycle icon area, shared by all three programs.
const CYCLE_AREA: Rect = Rect::new(150, 50, 180, 180);

pub const RIGHT_ARROW: Button =
    Button::new(Rect::new(400, 90, 75, 110), Icon::RightArrow, Action::CarouselRight);
pub const LEFT_ARROW: Button =
    Button::new(Rect::new(20, 90, 75, 110), Icon::LeftArrow, Action::CarouselLeft);
pub const PADLOCK: Button =
    Button::new(Rect::new(400, 240, 70, 70), Icon::Unlocked, Action::EngageLock);
pub const LOCK_BADGE: Button =
    Button::new(Rect::new(20, 240, 70, 70), Icon::Locked, Action::LockIndicator);
pub const HOME: Button = Button::new(Rect::new(20, 90, 100, 100), Icon::Home, Action::Home);
pub const START: Button =
    Button::new(Rect::new(380, 90, 100, 100), Icon::PlayPause, Action::Start);
pub const OK: Button = Button::new(Rect::new(175, 105, 100, 100), Icon::Ok, Action::Acknowledge);

/// The carousel button for `kind`.
pub const fn cycle_button(kind: CycleKind) -> Button {
    let icon = match kind {
        CycleKind::Daily => Icon::Daily,
        CycleKind::Heavy => Icon::Heavy,
        CycleKind::Quick => Icon::Quick,
    };
    Button::new(CYCLE_AREA, icon, Action::OpenMenu)
}

/// Carousel buttons, in hit priority order.
pub const fn carousel_layout(kind: CycleKind) -> [Button; 5] {
    [cycle_button(kind), RIGHT_ARROW, LEFT_ARROW, PADLOCK, LOCK_BADGE]
}

pub const MENU_LAYOUT: [Button; 4] = [HOME, START, PADLOCK, LOCK_BADGE];

/// Done and door-open screens only offer "OK".
pub const ACK_LAYOUT: [Button; 1] = [OK];

/// Fixed-capacity set of buttons that currently accept touches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonSet {
    buttons: Vec<Button, MAX_BUTTONS>,
}

impl ButtonSet {
    pub const fn new() -> Self {
        Self { buttons: Vec::new() }
    }

    /// Drop the current buttons and install `layout`.
    ///
    /// Layouts longer than [`MAX_BUTTONS`] are truncated.
    pub fn replace(&mut self, layout: &[Button]) {
        self.buttons.clear();
        for button in layout.iter().take(MAX_BUTTONS) {
            // capacity checked by take()
            let _ = self.buttons.push(*button);
        }
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    pub fn as_slice(&self) -> &[Button] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
