use crate::canvas::{Canvas, Color, Paint, PaintStyle, Rect};
use crate::math::{
    angle_in_sweep, angle_of, distance, distance_to_ellipse, distance_to_segment, ellipse_value,
    point_on_ellipse,
};

/// Software pixel buffer that rasterises canvas calls
pub struct Framebuffer {
    width: usize,
    height: usize,
    /// Logical units covered by one pixel
    scale: f64,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, scale: f64) -> Self {
        Framebuffer {
            width,
            height,
            scale,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour at a pixel, transparent when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::TRANSPARENT
        }
    }

    /// Logical point sampled by a pixel
    fn sample_point(&self, x: usize, y: usize) -> [f64; 2] {
        [(x as f64 + 0.5) * self.scale, (y as f64 + 0.5) * self.scale]
    }

    /// Paints every pixel of `bounds` (in logical units) for which `covered` holds
    fn fill_where<F>(&mut self, bounds: Rect, color: Color, covered: F)
    where
        F: Fn([f64; 2]) -> bool,
    {
        if self.width == 0 || self.height == 0 || self.scale <= 0.0 {
            return;
        }

        // Compute the pixel range of the bounding box
        let min_x = (bounds.left / self.scale).floor().max(0.0) as usize;
        let max_x = (bounds.right / self.scale)
            .ceil()
            .min(self.width as f64 - 1.0)
            .max(0.0) as usize;
        let min_y = (bounds.top / self.scale).floor().max(0.0) as usize;
        let max_y = (bounds.bottom / self.scale)
            .ceil()
            .min(self.height as f64 - 1.0)
            .max(0.0) as usize;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if covered(self.sample_point(x, y)) {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }
}

/// Grows a rectangle by `amount` on every side
fn outset(rect: Rect, amount: f64) -> Rect {
    Rect::new(
        rect.left - amount,
        rect.top - amount,
        rect.right + amount,
        rect.bottom + amount,
    )
}

/// Distance from `p` to the outline of a pie slice: the arc plus both radii
fn distance_to_pie(
    center: [f64; 2],
    rx: f64,
    ry: f64,
    start: f64,
    sweep: f64,
    p: [f64; 2],
) -> f64 {
    let angle = angle_of(center, p);
    let start_point = point_on_ellipse(center, rx, ry, start);
    let end_point = point_on_ellipse(center, rx, ry, start + sweep);

    let to_arc = if angle_in_sweep(angle, start, sweep) {
        distance_to_ellipse(center, rx, ry, p)
    } else {
        distance(start_point, p).min(distance(end_point, p))
    };
    if sweep.abs() >= 360.0 {
        return to_arc;
    }
    to_arc
        .min(distance_to_segment(center, start_point, p))
        .min(distance_to_segment(center, end_point, p))
}

impl Canvas for Framebuffer {
    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: &Paint,
    ) {
        let oval = oval.sorted();
        if oval.is_empty() || sweep_angle == 0.0 {
            return;
        }
        let center = oval.center();
        let rx = oval.width() / 2.0;
        let ry = oval.height() / 2.0;

        match paint.style {
            PaintStyle::Fill => {
                // Filled arcs are always rendered as pie slices
                self.fill_where(oval, paint.color, |p| {
                    ellipse_value(center, rx, ry, p) <= 1.0
                        && angle_in_sweep(angle_of(center, p), start_angle, sweep_angle)
                });
            }
            PaintStyle::Stroke { width } => {
                let half = width / 2.0;
                self.fill_where(outset(oval, half), paint.color, |p| {
                    let gap = if use_center {
                        distance_to_pie(center, rx, ry, start_angle, sweep_angle, p)
                    } else if angle_in_sweep(angle_of(center, p), start_angle, sweep_angle) {
                        distance_to_ellipse(center, rx, ry, p)
                    } else {
                        f64::INFINITY
                    };
                    gap <= half
                });
            }
        }
    }

    fn draw_oval(&mut self, oval: Rect, paint: &Paint) {
        let oval = oval.sorted();
        if oval.is_empty() {
            return;
        }
        let center = oval.center();
        let rx = oval.width() / 2.0;
        let ry = oval.height() / 2.0;

        match paint.style {
            PaintStyle::Fill => {
                self.fill_where(oval, paint.color, |p| {
                    ellipse_value(center, rx, ry, p) <= 1.0
                });
            }
            PaintStyle::Stroke { width } => {
                let half = width / 2.0;
                self.fill_where(outset(oval, half), paint.color, |p| {
                    distance_to_ellipse(center, rx, ry, p) <= half
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb8(255, 0, 0);

    #[test]
    fn filled_oval_covers_its_center_only() {
        let mut fb = Framebuffer::new(10, 10, 1.0);
        fb.draw_oval(Rect::new(2.0, 2.0, 8.0, 8.0), &Paint::fill(RED));
        assert_eq!(fb.pixel(5, 5), RED);
        assert_eq!(fb.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(fb.pixel(2, 2), Color::TRANSPARENT);
    }

    #[test]
    fn inverted_rect_is_sorted() {
        let mut fb = Framebuffer::new(10, 10, 1.0);
        fb.draw_oval(Rect::new(8.0, 2.0, 2.0, 8.0), &Paint::fill(RED));
        assert_eq!(fb.pixel(5, 5), RED);
    }

    #[test]
    fn empty_bounds_draw_nothing() {
        let mut fb = Framebuffer::new(10, 10, 1.0);
        fb.draw_arc(Rect::ZERO, 0.0, 360.0, true, &Paint::stroke(RED, 40.0));
        fb.draw_oval(Rect::new(5.0, 5.0, 5.0, 9.0), &Paint::fill(RED));
        assert!((0..10).all(|y| (0..10).all(|x| fb.pixel(x, y).is_transparent())));
    }

    #[test]
    fn filled_arc_respects_sweep() {
        let mut fb = Framebuffer::new(20, 20, 1.0);
        // right-hand quarter below the horizontal axis: 0..90
        let oval = Rect::new(0.0, 0.0, 20.0, 20.0);
        fb.draw_arc(oval, 0.0, 90.0, true, &Paint::fill(RED));
        assert_eq!(fb.pixel(14, 14), RED);
        assert!(fb.pixel(14, 5).is_transparent());
        assert!(fb.pixel(5, 14).is_transparent());

        // the mirrored call covers the quarter above instead
        let mut fb = Framebuffer::new(20, 20, 1.0);
        fb.draw_arc(oval, -0.0, -90.0, true, &Paint::fill(RED));
        assert_eq!(fb.pixel(14, 5), RED);
        assert!(fb.pixel(14, 14).is_transparent());
    }

    #[test]
    fn stroked_pie_draws_outline_and_radii() {
        let mut fb = Framebuffer::new(40, 40, 1.0);
        fb.draw_arc(
            Rect::new(10.0, 10.0, 30.0, 30.0),
            0.0,
            90.0,
            true,
            &Paint::stroke(RED, 2.0),
        );
        // on the radius running right from the center
        assert_eq!(fb.pixel(25, 19), RED);
        // on the arc at 45 degrees
        assert_eq!(fb.pixel(26, 26), RED);
        // inside the pie, away from the outline
        assert!(fb.pixel(23, 23).is_transparent());
        // opposite side of the circle, outside the sweep
        assert!(fb.pixel(10, 19).is_transparent());
    }

    #[test]
    fn scale_maps_pixels_to_logical_units() {
        let mut fb = Framebuffer::new(10, 10, 10.0);
        fb.draw_oval(Rect::new(0.0, 0.0, 100.0, 100.0), &Paint::fill(RED));
        assert_eq!(fb.pixel(5, 5), RED);
        assert!(fb.pixel(0, 0).is_transparent());
    }
}
