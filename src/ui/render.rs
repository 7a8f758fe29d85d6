//! Screen rendering.
//!
//! Each `draw_*` function repaints its whole page from the arguments alone
//! and assumes a blank panel: call [`clear_screen`] first.

use core::fmt::Write;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use heapless::String;

use crate::catalog::{total_duration, CycleKind};
use crate::geometry::Point;
use crate::ui::buttons::{
    cycle_button, Button, HOME, LEFT_ARROW, LOCK_BADGE, OK, PADLOCK, RIGHT_ARROW, START,
};
use crate::ui::font::{self, LARGE, MEDIUM};
use crate::ui::{Icon, Surface};

pub const BACKGROUND: Rgb565 = Rgb565::WHITE;
pub const INK: Rgb565 = Rgb565::BLACK;

/// Gap between the picture and its caption.
const CAPTION_GAP: u16 = 10;

/// Digit spacing for both countdown fonts.
const DIGIT_SPACING: u16 = 1;

/// Origin of the "no entry" picture on the door-locked screen.
const NO_ENTRY_ORIGIN: Point = Point::new(115, 35);

fn origin(button: &Button) -> Point {
    Point::new(button.area.x, button.area.y)
}

fn draw_button<S: Surface>(surface: &mut S, button: &Button) -> Result<(), S::Error> {
    surface.draw_icon(origin(button), button.icon)
}

/// Caption under `button`'s picture, `indent` pixels in from its left edge.
fn caption<S: Surface>(
    surface: &mut S,
    button: &Button,
    indent: u16,
    text: &str,
) -> Result<(), S::Error> {
    let (_, h) = button.icon.size();
    let at = Point::new(button.area.x + indent, button.area.y + h + CAPTION_GAP);
    surface.draw_string(at, text)
}

/// `%02d` rendering of a minute count.
pub fn minutes_text(minutes: u32) -> String<12> {
    let mut text = String::new();
    // 10 digits max for u32, fits
    let _ = write!(text, "{:02}", minutes);
    text
}

pub fn clear_screen<S: Surface>(surface: &mut S) -> Result<(), S::Error> {
    surface.clear(BACKGROUND)
}

/// Blank both lock slots and show the icon for the current lock state.
///
/// Unlocked shows the padlock (tap to lock) on the right; locked shows the
/// closed lock badge on the left.
pub fn draw_lock_badge<S: Surface>(surface: &mut S, unlocked: bool) -> Result<(), S::Error> {
    surface.set_foreground(BACKGROUND);
    for slot in [&PADLOCK, &LOCK_BADGE] {
        let (w, h) = slot.icon.size();
        surface.fill_rect(
            slot.area.x,
            slot.area.y,
            slot.area.x + w,
            slot.area.y + h,
        )?;
    }
    if unlocked {
        draw_button(surface, &PADLOCK)
    } else {
        draw_button(surface, &LOCK_BADGE)
    }
}

/// Carousel page for `kind`.
pub fn draw_cycle_page<S: Surface>(
    surface: &mut S,
    kind: CycleKind,
    unlocked: bool,
) -> Result<(), S::Error> {
    let cycle_btn = cycle_button(kind);
    draw_button(surface, &cycle_btn)?;
    draw_button(surface, &RIGHT_ARROW)?;
    draw_button(surface, &LEFT_ARROW)?;

    surface.set_foreground(INK);
    caption(surface, &cycle_btn, 5, kind.cycle().name)?;

    draw_lock_badge(surface, unlocked)
}

/// Start / home menu, with the program's total run time.
pub fn draw_menu_page<S: Surface>(
    surface: &mut S,
    kind: CycleKind,
    unlocked: bool,
) -> Result<(), S::Error> {
    draw_button(surface, &HOME)?;
    draw_button(surface, &START)?;

    surface.set_foreground(INK);
    caption(surface, &HOME, 25, "HOME")?;
    caption(surface, &START, 5, "INICIAR")?;

    let total = minutes_text(total_duration(kind.cycle()));
    font::draw_text(surface, &MEDIUM, &total, Point::new(180, 150), DIGIT_SPACING)?;
    surface.draw_string(Point::new(225, 160), "MINUTOS")?;

    draw_lock_badge(surface, unlocked)
}

/// Running screen: remaining minutes in large digits.
pub fn draw_countdown_page<S: Surface>(surface: &mut S, remaining: u32) -> Result<(), S::Error> {
    surface.set_foreground(INK);
    let text = minutes_text(remaining);
    font::draw_text(surface, &LARGE, &text, Point::new(120, 90), DIGIT_SPACING)?;
    surface.draw_string(Point::new(210, 140), "MINUTOS RESTANTES")
}

pub fn draw_done_page<S: Surface>(surface: &mut S) -> Result<(), S::Error> {
    surface.set_foreground(INK);
    surface.draw_string(Point::new(135, 75), "LAVAGEM CONCLUIDA")?;
    draw_button(surface, &OK)
}

pub fn draw_door_open_page<S: Surface>(surface: &mut S) -> Result<(), S::Error> {
    surface.set_foreground(INK);
    surface.draw_string(Point::new(135, 75), "A PORTA ESTA ABERTA")?;
    draw_button(surface, &OK)
}

/// Shown when the door is forced mid-run.
pub fn draw_door_locked_page<S: Surface>(surface: &mut S) -> Result<(), S::Error> {
    surface.draw_icon(NO_ENTRY_ORIGIN, Icon::NoEntry)?;
    let (w, _) = Icon::NoEntry.size();
    surface.set_foreground(INK);
    surface.draw_string(
        Point::new(NO_ENTRY_ORIGIN.x + 20, NO_ENTRY_ORIGIN.y + w + CAPTION_GAP),
        "PORTA TRANCADA",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{Call, RecordingSurface};

    #[test]
    fn minutes_are_zero_padded() {
        assert_eq!(minutes_text(0).as_str(), "00");
        assert_eq!(minutes_text(7).as_str(), "07");
        assert_eq!(minutes_text(38).as_str(), "38");
        assert_eq!(minutes_text(120).as_str(), "120");
        assert_eq!(minutes_text(u32::MAX).as_str(), "4294967295");
    }

    #[test]
    fn cycle_page_shows_icon_arrows_and_name() {
        let mut s = RecordingSurface::new();
        draw_cycle_page(&mut s, CycleKind::Heavy, true).unwrap();
        assert_eq!(
            s.icons(),
            [Icon::Heavy, Icon::RightArrow, Icon::LeftArrow, Icon::Unlocked]
        );
        assert_eq!(s.texts(), ["LAVAGEM PESADA"]);
        assert!(!s.cleared());
    }

    #[test]
    fn cycle_page_while_locked_shows_badge() {
        let mut s = RecordingSurface::new();
        draw_cycle_page(&mut s, CycleKind::Daily, false).unwrap();
        assert_eq!(s.icons().last(), Some(&Icon::Locked));
        assert!(!s.icons().contains(&Icon::Unlocked));
    }

    #[test]
    fn lock_badge_blanks_both_slots_first() {
        let mut s = RecordingSurface::new();
        draw_lock_badge(&mut s, false).unwrap();
        assert_eq!(
            s.calls,
            [
                Call::Foreground(BACKGROUND),
                Call::FillRect(400, 240, 470, 310),
                Call::FillRect(20, 240, 90, 310),
                Call::Icon(Point::new(20, 240), Icon::Locked),
            ]
        );
    }

    #[test]
    fn menu_page_shows_total_minutes() {
        let mut s = RecordingSurface::new();
        draw_menu_page(&mut s, CycleKind::Daily, true).unwrap();
        assert_eq!(s.texts(), ["HOME", "INICIAR", "MINUTOS"]);
        assert!(s.icons().starts_with(&[Icon::Home, Icon::PlayPause]));
        // "38": 3 has five segments, 8 has seven; badge adds two blanking rects
        assert_eq!(s.rects().len(), 5 + 7 + 2);
    }

    #[test]
    fn countdown_page_draws_digits_in_ink() {
        let mut s = RecordingSurface::new();
        draw_countdown_page(&mut s, 5).unwrap();
        assert_eq!(s.calls.first(), Some(&Call::Foreground(INK)));
        // "05": 0 has six segments, 5 has five
        assert_eq!(s.rects().len(), 6 + 5);
        assert_eq!(s.texts(), ["MINUTOS RESTANTES"]);
    }

    #[test]
    fn ack_pages_offer_ok() {
        let mut s = RecordingSurface::new();
        draw_done_page(&mut s).unwrap();
        assert_eq!(s.icons(), [Icon::Ok]);
        assert_eq!(s.texts(), ["LAVAGEM CONCLUIDA"]);

        let mut s = RecordingSurface::new();
        draw_door_open_page(&mut s).unwrap();
        assert_eq!(s.icons(), [Icon::Ok]);
        assert_eq!(s.texts(), ["A PORTA ESTA ABERTA"]);
    }

    #[test]
    fn door_locked_caption_sits_under_picture() {
        let mut s = RecordingSurface::new();
        draw_door_locked_page(&mut s).unwrap();
        assert_eq!(
            s.calls.last(),
            Some(&Call::Text(Point::new(135, 296), "PORTA TRANCADA".into()))
        );
    }

    #[test]
    fn pages_are_idempotent() {
        let mut a = RecordingSurface::new();
        let mut b = RecordingSurface::new();
        draw_menu_page(&mut a, CycleKind::Quick, true).unwrap();
        draw_menu_page(&mut b, CycleKind::Quick, true).unwrap();
        draw_menu_page(&mut b, CycleKind::Quick, true).unwrap();
        assert_eq!(b.calls.len(), 2 * a.calls.len());
        assert_eq!(b.calls[..a.calls.len()], a.calls[..]);
        assert_eq!(b.calls[a.calls.len()..], a.calls[..]);
    }

    #[test]
    fn draw_errors_propagate() {
        let mut s = RecordingSurface {
            fail: true,
            ..Default::default()
        };
        assert!(draw_done_page(&mut s).is_err());
        assert!(clear_screen(&mut s).is_err());
    }
}
