use crate::anim::{PingPong, DEFAULT_PERIOD};
use crate::canvas::{Canvas, Paint, Rect};
use crate::state::{AnimationState, Geometry, StyleConfig, BODY_START_ANGLE, BODY_SWEEP_ANGLE};
use log::{debug, info};
use std::time::Duration;

/// Animated Pacman: a disc with a chewing mouth, an outline and an eye.
///
/// The widget only holds state. The host reports the surface size through
/// [`PacmanWidget::on_size_changed`], feeds time through [`PacmanWidget::tick`] and asks for a
/// frame with [`PacmanWidget::draw`]. It is meant to be driven from a single thread.
#[derive(Debug, Clone)]
pub struct PacmanWidget {
    geometry: Geometry,
    style: StyleConfig,
    animation: AnimationState,
    /// Running mouth animation, if started
    animator: Option<PingPong>,
}

impl PacmanWidget {
    pub fn new(style: StyleConfig) -> Self {
        PacmanWidget {
            geometry: Geometry::default(),
            style,
            animation: AnimationState::default(),
            animator: None,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    /// Recomputes the layout for a new surface size
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.geometry = Geometry::for_surface(width, height);
        debug!(
            "surface resized to {}x{}, radius {:.2}",
            width, height, self.geometry.radius
        );
    }

    /// Square around the disc
    pub fn disc_bounds(&self) -> Rect {
        let Geometry {
            center_x,
            center_y,
            radius,
        } = self.geometry;
        Rect::new(
            center_x - radius,
            center_y - radius,
            center_x + radius,
            center_y + radius,
        )
    }

    /// Square around the outline; it shares the disc's bounds
    pub fn stroke_bounds(&self) -> Rect {
        self.disc_bounds()
    }

    /// Box of the eye, up and to the right of the center.
    ///
    /// Its left edge lies right of its right edge; canvases sort it when drawing.
    pub fn eye_bounds(&self) -> Rect {
        let Geometry {
            center_x,
            center_y,
            radius,
        } = self.geometry;
        Rect::new(
            center_x + radius * 0.3,
            center_y - radius * 0.8,
            center_x + radius * 0.1,
            center_y - radius * 0.5,
        )
    }

    /// Emits the frame: outline, body, mouth wedges and eye, in that order
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let stroke = Paint::stroke(self.style.stroke_color, self.style.stroke_width);
        let body = Paint::fill(self.style.disc_color);
        let eye = Paint::fill(self.style.eye_color);

        let stroke_bounds = self.stroke_bounds();
        let disc_bounds = self.disc_bounds();
        let stroke_start = self.animation.stroke_start_angle();
        let mouth_start = self.animation.mouth_start_angle;
        let mouth_sweep = self.animation.mouth_sweep_angle;

        // Outline, mirrored around the horizontal axis
        canvas.draw_arc(stroke_bounds, stroke_start, BODY_SWEEP_ANGLE, true, &stroke);
        canvas.draw_arc(
            stroke_bounds,
            -stroke_start,
            -BODY_SWEEP_ANGLE,
            true,
            &stroke,
        );

        canvas.draw_arc(disc_bounds, BODY_START_ANGLE, BODY_SWEEP_ANGLE, true, &body);

        // Mouth wedges in the body colour close the gap down to the current angle
        canvas.draw_arc(disc_bounds, mouth_start, mouth_sweep, true, &body);
        canvas.draw_arc(disc_bounds, -mouth_start, -mouth_sweep, true, &body);

        canvas.draw_oval(self.eye_bounds(), &eye);
    }

    /// Starts chewing. Later calls are ignored and leave the running animation untouched.
    ///
    /// Returns whether this call started the animation.
    pub fn start_animation(&mut self) -> bool {
        if self.animator.is_some() {
            debug!("mouth animation already running, ignoring start");
            return false;
        }
        let animator = PingPong::new(0.0, self.animation.mouth_sweep_angle, DEFAULT_PERIOD);
        info!(
            "starting mouth animation, period {} ms",
            animator.period().as_millis()
        );
        self.animation.mouth_start_angle = animator.value();
        self.animator = Some(animator);
        true
    }

    /// Advances the mouth animation by `dt`.
    ///
    /// Returns true when the frame has to be redrawn.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(animator) = self.animator.as_mut() else {
            return false;
        };
        self.animation.mouth_start_angle = animator.advance(dt);
        true
    }
}

impl Default for PacmanWidget {
    fn default() -> Self {
        PacmanWidget::new(StyleConfig::default())
    }
}
