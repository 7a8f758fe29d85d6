//! Seven-segment digit font for the countdown.
//!
//! Glyphs are drawn with filled rectangles, so the font needs nothing from
//! the display beyond [`Surface::fill_rect`]. The glyph table is indexed by
//! character code; anything outside `'0'..='9'` is skipped.

use crate::geometry::Point;
use crate::ui::Surface;

// Segment bits:
//
//    aaa
//   f   b
//    ggg
//   e   c
//    ddd
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

static DIGITS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,
    SEG_A | SEG_B | SEG_G | SEG_C | SEG_D,
    SEG_F | SEG_G | SEG_B | SEG_C,
    SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,
    SEG_A | SEG_F | SEG_G | SEG_E | SEG_C | SEG_D,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// A fixed-width segment font.
#[derive(Debug)]
pub struct SegmentFont {
    pub width: u16,
    pub height: u16,
    /// Segment thickness.
    pub stroke: u16,
    first: u8,
    glyphs: &'static [u8],
}

/// Countdown on the running screen.
pub static LARGE: SegmentFont = SegmentFont {
    width: 44,
    height: 72,
    stroke: 8,
    first: b'0',
    glyphs: &DIGITS,
};

/// Total minutes on the cycle menu.
pub static MEDIUM: SegmentFont = SegmentFont {
    width: 22,
    height: 36,
    stroke: 4,
    first: b'0',
    glyphs: &DIGITS,
};

impl SegmentFont {
    /// Segment mask for `c`, if the font has it.
    pub fn glyph(&self, c: char) -> Option<u8> {
        let code = u32::from(c);
        let first = u32::from(self.first);
        if code < first {
            return None;
        }
        self.glyphs.get((code - first) as usize).copied()
    }

    fn draw_glyph<S: Surface>(&self, surface: &mut S, mask: u8, at: Point) -> Result<(), S::Error> {
        let (x, y) = (at.x, at.y);
        let w = self.width;
        let h = self.height;
        let t = self.stroke;
        let mid = h / 2;
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        let segments: [(u8, u16, u16, u16, u16); 7] = [
            (SEG_A, x, y, right, y.saturating_add(t - 1)),
            (SEG_B, right.saturating_sub(t - 1), y, right, y.saturating_add(mid)),
            (SEG_C, right.saturating_sub(t - 1), y.saturating_add(mid), right, bottom),
            (SEG_D, x, bottom.saturating_sub(t - 1), right, bottom),
            (SEG_E, x, y.saturating_add(mid), x.saturating_add(t - 1), bottom),
            (SEG_F, x, y, x.saturating_add(t - 1), y.saturating_add(mid)),
            (
                SEG_G,
                x,
                y.saturating_add(mid - t / 2),
                right,
                y.saturating_add(mid - t / 2 + t - 1),
            ),
        ];
        for (bit, x0, y0, x1, y1) in segments {
            if mask & bit != 0 {
                surface.fill_rect(x0, y0, x1, y1)?;
            }
        }
        Ok(())
    }
}

/// Draw `text` left to right starting at `origin`, `spacing` pixels apart.
///
/// Unsupported characters take no space. Returns the x position after the
/// last drawn glyph.
pub fn draw_text<S: Surface>(
    surface: &mut S,
    font: &SegmentFont,
    text: &str,
    origin: Point,
    spacing: u16,
) -> Result<u16, S::Error> {
    let mut x = origin.x;
    for c in text.chars() {
        let Some(mask) = font.glyph(c) else {
            continue;
        };
        font.draw_glyph(surface, mask, Point::new(x, origin.y))?;
        x = x.saturating_add(font.width + spacing);
    }
    Ok(x)
}
