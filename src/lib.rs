//! Animated Pacman widget and a terminal host for it.
//!
//! [`widget::PacmanWidget`] holds all drawing and animation state and draws onto any
//! [`canvas::Canvas`]. [`graphics::Framebuffer`] rasterises those calls in software and
//! [`terminal`] puts the result on screen.

pub mod anim;
pub mod canvas;
pub mod graphics;
pub mod math;
pub mod state;
pub mod terminal;
pub mod widget;
