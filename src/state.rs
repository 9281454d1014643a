use crate::canvas::Color;

/// Margin between the disc and the edge of the surface, as a fraction of half the width
pub const MARGIN_COEFF: f64 = 0.8;
/// Width of the dark outline
pub const STROKE_WIDTH: f64 = 40.0;
/// Angle where the body arc starts
pub const BODY_START_ANGLE: f64 = 45.0;
/// Extent of the body arc and of each outline arc
pub const BODY_SWEEP_ANGLE: f64 = 270.0;
/// Extent of each mouth wedge, and the upper bound of the chewing motion
pub const MOUTH_SWEEP_ANGLE: f64 = 45.0;

/// Disc placement on the drawing surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Geometry {
    /// Lays the disc out on a `width` x `height` surface.
    ///
    /// The radius follows the width only, with the half-width rounded down.
    pub fn for_surface(width: u32, height: u32) -> Self {
        Geometry {
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            radius: (width / 2) as f64 * MARGIN_COEFF,
        }
    }
}

/// Colours and stroke width, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    pub disc_color: Color,
    pub eye_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl StyleConfig {
    /// Style with the given disc and eye colours and the fixed black outline
    pub fn new(disc_color: Color, eye_color: Color) -> Self {
        StyleConfig {
            disc_color,
            eye_color,
            ..StyleConfig::default()
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            disc_color: Color::TEAL,
            eye_color: Color::BLACK,
            stroke_color: Color::BLACK,
            stroke_width: STROKE_WIDTH,
        }
    }
}

/// Mouth angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Current start angle of the mouth wedges, in degrees
    pub mouth_start_angle: f64,
    /// Extent of each mouth wedge, in degrees
    pub mouth_sweep_angle: f64,
}

impl AnimationState {
    /// The outline follows the mouth
    pub fn stroke_start_angle(&self) -> f64 {
        self.mouth_start_angle
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState {
            mouth_start_angle: 0.0,
            mouth_sweep_angle: MOUTH_SWEEP_ANGLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_widths_round_the_half_width_down() {
        let geometry = Geometry::for_surface(301, 301);
        assert_eq!(geometry.center_x, 150.5);
        assert_eq!(geometry.radius, 150.0 * MARGIN_COEFF);
    }

    #[test]
    fn zero_surface_is_degenerate() {
        assert_eq!(Geometry::for_surface(0, 0), Geometry::default());
    }

    #[test]
    fn style_overrides_only_colors() {
        let style = StyleConfig::new(Color::WHITE, Color::TEAL);
        assert_eq!(style.disc_color, Color::WHITE);
        assert_eq!(style.eye_color, Color::TEAL);
        assert_eq!(style.stroke_color, Color::BLACK);
        assert_eq!(style.stroke_width, 40.0);
    }
}
