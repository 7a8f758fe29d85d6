//! [`Surface`] on top of any embedded-graphics draw target.
//!
//! The firmware wraps the mipidsi ILI9488 driver; host tests wrap a plain
//! pixel buffer. Icons are drawn as flat vector pictures sized to each
//! icon's footprint.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{DrawTarget, Point as EgPoint, Primitive, Size};
use embedded_graphics::primitives::{
    Circle, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment, Triangle,
};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;

use crate::geometry::Point;
use crate::ui::{Icon, Surface};

/// Adapter from the UI drawing primitives to a [`DrawTarget`].
pub struct GraphicsSurface<T> {
    target: T,
    foreground: Rgb565,
}

impl<T> GraphicsSurface<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            foreground: Rgb565::BLACK,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

fn eg(p: Point) -> EgPoint {
    EgPoint::new(i32::from(p.x), i32::from(p.y))
}

fn rect(o: EgPoint, x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(o + EgPoint::new(x, y), Size::new(w, h))
}

fn circle(o: EgPoint, x: i32, y: i32, d: u32) -> Circle {
    Circle::new(o + EgPoint::new(x, y), d)
}

fn triangle(o: EgPoint, a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> Triangle {
    Triangle::new(
        o + EgPoint::new(a.0, a.1),
        o + EgPoint::new(b.0, b.1),
        o + EgPoint::new(c.0, c.1),
    )
}

/// Draw `icon` inside its footprint at `origin`.
fn draw_icon_shapes<D>(target: &mut D, origin: EgPoint, icon: Icon) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb565>,
{
    let fill = |c: Rgb565| PrimitiveStyle::<D::Color>::with_fill(c.into());
    let outline = |c: Rgb565, width: u32| {
        PrimitiveStyleBuilder::<D::Color>::new()
            .stroke_color(c.into())
            .stroke_width(width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build()
    };
    let o = origin;
    match icon {
        Icon::Daily | Icon::Heavy | Icon::Quick => {
            // machine front: cabinet, control strip, drum
            rect(o, 10, 10, 160, 160)
                .into_styled(outline(Rgb565::BLACK, 4))
                .draw(target)?;
            rect(o, 20, 20, 40, 12)
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
            circle(o, 40, 50, 100)
                .into_styled(outline(Rgb565::BLUE, 6))
                .draw(target)?;
            match icon {
                Icon::Daily => {
                    circle(o, 70, 85, 15)
                        .into_styled(fill(Rgb565::BLUE))
                        .draw(target)?;
                    circle(o, 95, 100, 20)
                        .into_styled(fill(Rgb565::BLUE))
                        .draw(target)?;
                }
                Icon::Heavy => {
                    circle(o, 65, 75, 50)
                        .into_styled(fill(Rgb565::BLUE))
                        .draw(target)?;
                }
                _ => {
                    triangle(o, (75, 70), (75, 130), (115, 100))
                        .into_styled(fill(Rgb565::BLUE))
                        .draw(target)?;
                }
            }
        }
        Icon::RightArrow => {
            triangle(o, (10, 10), (10, 100), (65, 55))
                .into_styled(fill(Rgb565::BLUE))
                .draw(target)?;
        }
        Icon::LeftArrow => {
            triangle(o, (65, 10), (65, 100), (10, 55))
                .into_styled(fill(Rgb565::BLUE))
                .draw(target)?;
        }
        Icon::Locked => {
            rect(o, 20, 8, 30, 30)
                .into_styled(outline(Rgb565::BLACK, 5))
                .draw(target)?;
            rect(o, 10, 32, 50, 30)
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
        }
        Icon::Unlocked => {
            rect(o, 20, 4, 30, 34)
                .into_styled(outline(Rgb565::BLACK, 5))
                .draw(target)?;
            // open the right leg of the shackle
            rect(o, 45, 20, 5, 12)
                .into_styled(fill(Rgb565::WHITE))
                .draw(target)?;
            rect(o, 10, 32, 50, 30)
                .into_styled(fill(Rgb565::GREEN))
                .draw(target)?;
        }
        Icon::Home => {
            triangle(o, (50, 10), (10, 50), (90, 50))
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
            rect(o, 22, 50, 56, 40)
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
            rect(o, 42, 65, 16, 25)
                .into_styled(fill(Rgb565::WHITE))
                .draw(target)?;
        }
        Icon::PlayPause => {
            triangle(o, (10, 15), (10, 85), (55, 50))
                .into_styled(fill(Rgb565::GREEN))
                .draw(target)?;
            rect(o, 62, 15, 10, 70)
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
            rect(o, 80, 15, 10, 70)
                .into_styled(fill(Rgb565::BLACK))
                .draw(target)?;
        }
        Icon::Ok => {
            circle(o, 5, 5, 90)
                .into_styled(fill(Rgb565::GREEN))
                .draw(target)?;
            let tick = [
                o + EgPoint::new(28, 50),
                o + EgPoint::new(45, 67),
                o + EgPoint::new(73, 35),
            ];
            Polyline::new(&tick)
                .into_styled(PrimitiveStyle::<D::Color>::with_stroke(Rgb565::WHITE.into(), 8))
                .draw(target)?;
        }
        Icon::NoEntry => {
            circle(o, 5, 5, 241)
                .into_styled(fill(Rgb565::RED))
                .draw(target)?;
            rect(o, 45, 105, 161, 41)
                .into_styled(fill(Rgb565::WHITE))
                .draw(target)?;
        }
    }
    Ok(())
}

impl<T> Surface for GraphicsSurface<T>
where
    T: DrawTarget,
    T::Color: From<Rgb565>,
{
    type Error = T::Error;

    fn clear(&mut self, color: Rgb565) -> Result<(), T::Error> {
        self.target.clear(color.into())
    }

    fn set_foreground(&mut self, color: Rgb565) {
        self.foreground = color;
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), T::Error> {
        if x1 < x0 || y1 < y0 {
            return Ok(());
        }
        Rectangle::with_corners(eg(Point::new(x0, y0)), eg(Point::new(x1, y1)))
            .into_styled(PrimitiveStyle::<T::Color>::with_fill(self.foreground.into()))
            .draw(&mut self.target)
    }

    fn draw_icon(&mut self, origin: Point, icon: Icon) -> Result<(), T::Error> {
        draw_icon_shapes(&mut self.target, eg(origin), icon)
    }

    fn draw_string(&mut self, origin: Point, text: &str) -> Result<(), T::Error> {
        let style = MonoTextStyle::<T::Color>::new(&FONT_10X20, self.foreground.into());
        Text::with_baseline(text, eg(origin), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_graphics::prelude::{OriginDimensions, Pixel};

    use super::*;
    use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};
    use crate::ui::panel::Panel;
    use crate::ui::testing::RecordingIo;

    const W: usize = PANEL_WIDTH as usize;
    const H: usize = PANEL_HEIGHT as usize;

    /// 480×320 framebuffer.
    struct Canvas {
        pixels: Vec<Rgb565>,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb565::BLACK; W * H],
            }
        }

        fn at(&self, x: usize, y: usize) -> Rgb565 {
            self.pixels[y * W + x]
        }

        /// Bounding box (x0, y0, x1, y1) of pixels not equal to `bg`.
        fn ink_bounds(&self, bg: Rgb565) -> Option<(usize, usize, usize, usize)> {
            let mut bounds: Option<(usize, usize, usize, usize)> = None;
            for y in 0..H {
                for x in 0..W {
                    if self.at(x, y) == bg {
                        continue;
                    }
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
            bounds
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
        where
            I: IntoIterator<Item = Pixel<Rgb565>>,
        {
            for Pixel(p, color) in pixels {
                if (0..W as i32).contains(&p.x) && (0..H as i32).contains(&p.y) {
                    self.pixels[p.y as usize * W + p.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    /// Rejects every draw.
    struct Broken;

    impl OriginDimensions for Broken {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Broken {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), ()>
        where
            I: IntoIterator<Item = Pixel<Rgb565>>,
        {
            Err(())
        }
    }

    fn surface() -> GraphicsSurface<Canvas> {
        GraphicsSurface::new(Canvas::new())
    }

    #[test]
    fn clear_paints_everything() {
        let mut s = surface();
        s.clear(Rgb565::WHITE).unwrap();
        assert!(s.target().pixels.iter().all(|&c| c == Rgb565::WHITE));
    }

    #[test]
    fn fill_rect_is_inclusive_and_uses_foreground() {
        let mut s = surface();
        s.clear(Rgb565::WHITE).unwrap();
        s.set_foreground(Rgb565::RED);
        s.fill_rect(10, 20, 12, 21).unwrap();
        assert_eq!(s.target().ink_bounds(Rgb565::WHITE), Some((10, 20, 12, 21)));
        assert_eq!(s.target().at(12, 21), Rgb565::RED);
    }

    #[test]
    fn inverted_rect_draws_nothing() {
        let mut s = surface();
        s.clear(Rgb565::WHITE).unwrap();
        s.fill_rect(20, 20, 10, 30).unwrap();
        assert_eq!(s.target().ink_bounds(Rgb565::WHITE), None);
    }

    #[test]
    fn icons_stay_inside_their_footprint() {
        let icons = [
            Icon::Daily,
            Icon::Heavy,
            Icon::Quick,
            Icon::RightArrow,
            Icon::LeftArrow,
            Icon::Unlocked,
            Icon::Locked,
            Icon::Home,
            Icon::PlayPause,
            Icon::Ok,
            Icon::NoEntry,
        ];
        for icon in icons {
            let mut s = surface();
            s.clear(Rgb565::WHITE).unwrap();
            s.draw_icon(Point::new(10, 10), icon).unwrap();
            let (w, h) = icon.size();
            let (x0, y0, x1, y1) = s.target().ink_bounds(Rgb565::WHITE).unwrap();
            assert!(x0 >= 10 && y0 >= 10, "{icon:?}");
            assert!(x1 < 10 + w as usize && y1 < 10 + h as usize, "{icon:?}");
        }
    }

    #[test]
    fn text_renders_below_origin() {
        let mut s = surface();
        s.clear(Rgb565::WHITE).unwrap();
        s.set_foreground(Rgb565::BLACK);
        s.draw_string(Point::new(100, 50), "OK").unwrap();
        let (x0, y0, x1, y1) = s.target().ink_bounds(Rgb565::WHITE).unwrap();
        assert!(x0 >= 100 && y0 >= 50);
        assert!(x1 < 120 && y1 < 70);
    }

    #[test]
    fn boot_screen_renders_on_canvas() {
        let mut s = surface();
        let mut panel = Panel::new();
        let mut io = RecordingIo::default();
        panel.boot(&mut s, &mut io).unwrap();
        // corners stay background, the drum is blue
        assert_eq!(s.target().at(0, 0), Rgb565::WHITE);
        assert_eq!(s.target().at(W - 1, H - 1), Rgb565::WHITE);
        assert!(s.target().pixels.contains(&Rgb565::BLUE));
    }

    #[test]
    fn target_errors_propagate() {
        let mut s = GraphicsSurface::new(Broken);
        assert_eq!(s.fill_rect(0, 0, 1, 1), Err(()));
        assert_eq!(s.draw_icon(Point::new(0, 0), Icon::Ok), Err(()));
        assert_eq!(s.draw_string(Point::new(0, 0), "A"), Err(()));
    }
}
