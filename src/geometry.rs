//! Screen-space geometry and hit-testing.
//!
//! The touch controller reports 12-bit coordinates in its own orientation;
//! [`touch_to_screen`] maps them onto the landscape LCD, and [`hit_test`]
//! finds the interactive region under the finger.

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH, TOUCH_RAW_SPAN};

/// A pixel position on the LCD, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Both edges are inclusive: a 10-wide rect at
/// `x = 20` contains columns `20..=30`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Rightmost column covered by the rectangle.
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    /// Bottom row covered by the rectangle.
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Anything with a touchable area.
pub trait Hitbox {
    fn hitbox(&self) -> Rect;
}

impl Hitbox for Rect {
    fn hitbox(&self) -> Rect {
        *self
    }
}

/// Return the first item whose hitbox contains `point`.
///
/// Array order is priority order: overlapping items must be listed with the
/// preferred one first. An empty slice never matches.
pub fn hit_test<T: Hitbox>(items: &[T], point: Point) -> Option<&T> {
    items.iter().find(|item| item.hitbox().contains(point))
}

/// Map one raw controller axis (`0..4096`) onto `0..extent`, inverted.
///
/// Raw values above the 12-bit range are clamped; the result never leaves
/// the panel.
fn remap_inverted(raw: u16, extent: u16) -> u16 {
    let raw = u32::from(raw).min(TOUCH_RAW_SPAN - 1);
    let extent = u32::from(extent);
    let mapped = extent - extent * raw / TOUCH_RAW_SPAN;
    // raw = 0 lands one past the last pixel
    mapped.min(extent - 1) as u16
}

/// Convert raw touch controller coordinates to LCD pixels.
///
/// The sensor is mounted rotated against the panel, so both axes run
/// backwards relative to the LCD scan direction.
pub fn touch_to_screen(raw_x: u16, raw_y: u16) -> Point {
    Point {
        x: remap_inverted(raw_x, PANEL_WIDTH),
        y: remap_inverted(raw_y, PANEL_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rect_edges_are_inclusive() {
        let r = Rect::new(20, 240, 70, 70);
        assert!(r.contains(Point::new(20, 240)));
        assert!(r.contains(Point::new(90, 310)));
        assert!(!r.contains(Point::new(91, 310)));
        assert!(!r.contains(Point::new(90, 311)));
        assert!(!r.contains(Point::new(19, 250)));
    }

    #[test]
    fn rect_at_far_edge_does_not_overflow() {
        let r = Rect::new(u16::MAX - 5, u16::MAX - 5, 100, 100);
        assert_eq!(r.right(), u16::MAX);
        assert!(r.contains(Point::new(u16::MAX, u16::MAX)));
    }

    #[test]
    fn hit_test_empty_set_is_no_match() {
        let items: [Rect; 0] = [];
        assert!(hit_test(&items, Point::new(10, 10)).is_none());
    }

    #[test]
    fn hit_test_first_match_wins() {
        let items = [Rect::new(0, 0, 100, 100), Rect::new(50, 50, 100, 100)];
        let hit = hit_test(&items, Point::new(60, 60)).unwrap();
        assert_eq!(*hit, items[0]);
        let hit = hit_test(&items, Point::new(120, 120)).unwrap();
        assert_eq!(*hit, items[1]);
    }

    #[test]
    fn hit_test_far_out_of_range_is_no_match() {
        let items = [Rect::new(0, 0, 100, 100)];
        assert!(hit_test(&items, Point::new(u16::MAX, u16::MAX)).is_none());
    }

    #[test]
    fn touch_corners_map_inverted() {
        assert_eq!(touch_to_screen(4095, 4095), Point::new(1, 1));
        assert_eq!(touch_to_screen(0, 0), Point::new(479, 319));
        assert_eq!(touch_to_screen(2048, 2048), Point::new(240, 160));
    }

    #[test]
    fn touch_out_of_range_is_clamped() {
        assert_eq!(touch_to_screen(u16::MAX, 9000), touch_to_screen(4095, 4095));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (0u16..480, 0u16..320, 1u16..200, 1u16..200).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn point_inside_only_later_rect_hits_it(
            rects in proptest::collection::vec(rect_strategy(), 1..10),
            idx in 0usize..10,
            dx in 0u16..200,
            dy in 0u16..200,
        ) {
            let idx = idx % rects.len();
            let target = rects[idx];
            let p = Point::new(target.x + dx % (target.w + 1), target.y + dy % (target.h + 1));
            prop_assume!(rects[..idx].iter().all(|r| !r.contains(p)));
            let hit = hit_test(&rects, p).unwrap();
            prop_assert_eq!(*hit, target);
        }

        #[test]
        fn point_outside_all_rects_misses(
            rects in proptest::collection::vec(rect_strategy(), 0..10),
            x in 0u16..700,
            y in 0u16..500,
        ) {
            let p = Point::new(x, y);
            prop_assume!(rects.iter().all(|r| !r.contains(p)));
            prop_assert!(hit_test(&rects, p).is_none());
        }

        #[test]
        fn touch_always_lands_on_panel(x in any::<u16>(), y in any::<u16>()) {
            let p = touch_to_screen(x, y);
            prop_assert!(p.x < PANEL_WIDTH);
            prop_assert!(p.y < PANEL_HEIGHT);
        }
    }
}
