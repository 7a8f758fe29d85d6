//! The panel state machine.
//!
//! [`Panel`] owns the whole UI state: which screen is up, the selected
//! program, the countdown, the door and lock flags, and the active button
//! set. Every event handler updates the state first and then repaints, so a
//! failed draw leaves the state describing the screen that should be up.
//!
//! Touch handling is gated by the lock: while the panel is locked every tap
//! is ignored, and only the physical release button (with no program
//! running) unlocks it.

use crate::catalog::{total_duration, CycleKind};
use crate::geometry::{hit_test, Point};
use crate::ui::buttons::{carousel_layout, Action, Button, ButtonSet, ACK_LAYOUT, MENU_LAYOUT};
use crate::ui::{render, PanelIo, Screen, Surface};

/// Lock component.
///
/// The release button is only listened to while `release_armed` is set:
/// from the padlock tap until it has unlocked the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockState {
    pub unlocked: bool,
    pub release_armed: bool,
}

impl LockState {
    pub const fn new() -> Self {
        Self {
            unlocked: true,
            release_armed: false,
        }
    }
}

impl Default for LockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the renderer and the event handlers read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiState {
    pub screen: Screen,
    pub selected: CycleKind,
    /// Minutes left in the current run; 0 when idle.
    pub remaining: u32,
    /// Door sensor latch; see [`Panel::door_edge`].
    pub door_open: bool,
    pub lock: LockState,
    /// Countdown tick is enabled.
    pub tick_armed: bool,
}

impl UiState {
    pub const fn new() -> Self {
        Self {
            screen: Screen::CycleSelect,
            selected: CycleKind::Daily,
            remaining: 0,
            door_open: false,
            lock: LockState::new(),
            tick_armed: false,
        }
    }

    /// A program is counting down.
    pub fn running(&self) -> bool {
        self.remaining > 0
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen state machine plus its active buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    state: UiState,
    buttons: ButtonSet,
}

impl Panel {
    /// Panel on the carousel, daily program selected, unlocked.
    pub const fn new() -> Self {
        Self {
            state: UiState::new(),
            buttons: ButtonSet::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn buttons(&self) -> &[Button] {
        self.buttons.as_slice()
    }

    /// Draw the first screen and put the outputs in their idle state.
    pub fn boot<S: Surface, IO: PanelIo>(
        &mut self,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<(), S::Error> {
        info!("panel: boot");
        io.set_door_led(false);
        self.show_cycle_select(surface)
    }

    /// A finger was lifted at `point`. Returns the action that ran, if any.
    pub fn touch<S: Surface, IO: PanelIo>(
        &mut self,
        point: Point,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<Option<Action>, S::Error> {
        if !self.state.lock.unlocked {
            trace!("panel: locked, ignoring touch");
            return Ok(None);
        }
        let Some(button) = hit_test(self.buttons.as_slice(), point) else {
            return Ok(None);
        };
        let action = button.action;
        debug!("panel: touch {} -> {}", point, action);
        if self.dispatch(action, surface, io)? {
            Ok(Some(action))
        } else {
            Ok(None)
        }
    }

    /// Run `action` if the panel is unlocked and the current screen offers
    /// it. Returns whether anything happened.
    pub fn dispatch<S: Surface, IO: PanelIo>(
        &mut self,
        action: Action,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<bool, S::Error> {
        if !self.state.lock.unlocked || !self.offers(action) {
            return Ok(false);
        }
        match action {
            Action::CarouselRight => {
                self.state.selected = self.state.selected.next();
                self.show_cycle_select(surface)?;
            }
            Action::CarouselLeft => {
                self.state.selected = self.state.selected.prev();
                self.show_cycle_select(surface)?;
            }
            Action::OpenMenu => self.show_menu(surface)?,
            Action::Home | Action::Acknowledge => self.show_cycle_select(surface)?,
            Action::Start => self.start(surface, io)?,
            Action::EngageLock => self.engage_lock(surface)?,
            Action::LockIndicator => return Ok(false),
        }
        Ok(true)
    }

    /// One countdown tick. Ignored unless a run armed the tick.
    pub fn tick<S: Surface, IO: PanelIo>(
        &mut self,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<(), S::Error> {
        if !self.state.tick_armed {
            trace!("panel: stray tick");
            return Ok(());
        }
        self.state.remaining = self.state.remaining.saturating_sub(1);
        trace!("panel: tick, {} min left", self.state.remaining);
        if self.state.running() {
            self.enter(Screen::Running);
            render::clear_screen(surface)?;
            render::draw_countdown_page(surface, self.state.remaining)
        } else {
            self.finish_run(surface, io)
        }
    }

    /// Falling edge on the door sensor.
    ///
    /// Each edge flips the door latch. Opening the door mid-run shows the
    /// door-locked notice, costs one minute and re-latches the door as
    /// closed; with nothing running, an open door lights the LED.
    pub fn door_edge<S: Surface, IO: PanelIo>(
        &mut self,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<(), S::Error> {
        self.state.door_open = !self.state.door_open;
        debug!("panel: door edge, open={}", self.state.door_open);

        if !self.state.door_open {
            io.set_door_led(false);
            return Ok(());
        }
        if !self.state.running() {
            io.set_door_led(true);
            return Ok(());
        }

        warn!("panel: door opened mid-run");
        self.state.door_open = false;
        self.state.remaining -= 1;
        io.set_door_led(false);
        if !self.state.running() {
            return self.finish_run(surface, io);
        }
        self.enter(Screen::DoorLocked);
        render::clear_screen(surface)?;
        render::draw_door_locked_page(surface)
    }

    /// Falling edge on the physical release button. Returns whether the
    /// panel was unlocked.
    pub fn release_button<S: Surface>(&mut self, surface: &mut S) -> Result<bool, S::Error> {
        let lock = self.state.lock;
        if !lock.release_armed || lock.unlocked || self.state.running() {
            trace!("panel: release ignored");
            return Ok(false);
        }
        info!("panel: unlocked");
        self.state.lock = LockState {
            unlocked: true,
            release_armed: false,
        };
        render::draw_lock_badge(surface, true)?;
        Ok(true)
    }

    /// Whether the current screen has a button for `action`.
    fn offers(&self, action: Action) -> bool {
        use Action::*;
        match self.state.screen {
            Screen::CycleSelect => matches!(
                action,
                OpenMenu | CarouselRight | CarouselLeft | EngageLock | LockIndicator
            ),
            Screen::CycleMenu => matches!(action, Home | Start | EngageLock | LockIndicator),
            Screen::DoorOpenWarning | Screen::Done => action == Acknowledge,
            Screen::Running | Screen::DoorLocked => false,
        }
    }

    fn enter(&mut self, screen: Screen) {
        if self.state.screen != screen {
            info!("panel: {} -> {}", self.state.screen, screen);
        }
        self.state.screen = screen;
    }

    fn show_cycle_select<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.enter(Screen::CycleSelect);
        self.buttons.replace(&carousel_layout(self.state.selected));
        render::clear_screen(surface)?;
        render::draw_cycle_page(surface, self.state.selected, self.state.lock.unlocked)
    }

    fn show_menu<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.enter(Screen::CycleMenu);
        self.buttons.replace(&MENU_LAYOUT);
        render::clear_screen(surface)?;
        render::draw_menu_page(surface, self.state.selected, self.state.lock.unlocked)
    }

    fn start<S: Surface, IO: PanelIo>(
        &mut self,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<(), S::Error> {
        if self.state.door_open {
            warn!("panel: start refused, door open");
            self.enter(Screen::DoorOpenWarning);
            self.buttons.replace(&ACK_LAYOUT);
            render::clear_screen(surface)?;
            return render::draw_door_open_page(surface);
        }

        self.state.remaining = total_duration(self.state.selected.cycle());
        info!(
            "panel: start {}, {} min",
            self.state.selected, self.state.remaining
        );
        if !self.state.running() {
            return self.finish_run(surface, io);
        }
        self.buttons.clear();
        self.state.tick_armed = true;
        io.set_tick_enabled(true);
        self.enter(Screen::Running);
        render::clear_screen(surface)?;
        render::draw_countdown_page(surface, self.state.remaining)
    }

    fn finish_run<S: Surface, IO: PanelIo>(
        &mut self,
        surface: &mut S,
        io: &mut IO,
    ) -> Result<(), S::Error> {
        info!("panel: run complete");
        self.state.remaining = 0;
        if self.state.tick_armed {
            self.state.tick_armed = false;
            io.set_tick_enabled(false);
        }
        self.enter(Screen::Done);
        self.buttons.replace(&ACK_LAYOUT);
        render::clear_screen(surface)?;
        render::draw_done_page(surface)
    }

    fn engage_lock<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        info!("panel: locked");
        self.state.lock = LockState {
            unlocked: false,
            release_armed: true,
        };
        render::draw_lock_badge(surface, false)
    }
}
