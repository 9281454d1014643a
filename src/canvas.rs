//! Drawing vocabulary shared by the widget and its drawing targets.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba8(0, 0, 0, 0);
    /// The default disc colour
    pub const TEAL: Color = Color::rgb8(0x03, 0xda, 0xc5);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luminance(&self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, got {0} in {1:?}")]
    Length(usize, String),
    #[error("invalid hex digits in {0:?}")]
    Digit(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#RRGGBB` or `#RRGGBBAA`; the `#` is optional
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::Length(hex.len(), s.to_string()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorParseError::Digit(s.to_string()))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba8(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Rectangle given by its edges. The edges are kept as given, so `left` may exceed `right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Copy with `left <= right` and `top <= bottom`
    pub fn sorted(&self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).abs()
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Paint {
            color,
            style: PaintStyle::Fill,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Paint {
            color,
            style: PaintStyle::Stroke { width },
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PaintStyle::Fill => write!(f, "fill {}", self.color),
            PaintStyle::Stroke { width } => write!(f, "stroke({}) {}", width, self.color),
        }
    }
}

/// Anything that can render arcs and ovals.
///
/// Angles are in degrees, 0 at three o'clock, positive sweeps clockwise in y-down space.
pub trait Canvas {
    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: &Paint,
    );

    fn draw_oval(&mut self, oval: Rect, paint: &Paint);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Arc {
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: Paint,
    },
    Oval {
        oval: Rect,
        paint: Paint,
    },
}

impl DrawCommand {
    /// Replays this command onto another canvas
    pub fn replay(&self, canvas: &mut impl Canvas) {
        match self {
            DrawCommand::Arc {
                oval,
                start_angle,
                sweep_angle,
                use_center,
                paint,
            } => canvas.draw_arc(*oval, *start_angle, *sweep_angle, *use_center, paint),
            DrawCommand::Oval { oval, paint } => canvas.draw_oval(*oval, paint),
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Arc {
                oval,
                start_angle,
                sweep_angle,
                use_center,
                paint,
            } => write!(
                f,
                "arc {} start={} sweep={} center={} {}",
                oval, start_angle, sweep_angle, use_center, paint
            ),
            DrawCommand::Oval { oval, paint } => write!(f, "oval {} {}", oval, paint),
        }
    }
}

/// Recording canvas
impl Canvas for Vec<DrawCommand> {
    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        use_center: bool,
        paint: &Paint,
    ) {
        self.push(DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            use_center,
            paint: *paint,
        });
    }

    fn draw_oval(&mut self, oval: Rect, paint: &Paint) {
        self.push(DrawCommand::Oval {
            oval,
            paint: *paint,
        });
    }
}
