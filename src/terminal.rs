//! Terminal host for the widget.
//!
//! Each terminal cell shows two vertically stacked pixels through an upper half block glyph,
//! so a square of pixels occupies twice as many columns as rows.

use crate::canvas::{Color, DrawCommand};
use crate::graphics::Framebuffer;
use crate::widget::PacmanWidget;
use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::{debug, info};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Delay between frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Characters from dark to light used for plain-text frames
const ASCII_RAMP: &[u8] = b"@%#*+=-:.";

const HALF_BLOCK: char = '\u{2580}';

/// Side of the square drawing area in pixels; one row is kept for the status line
pub fn square_side(cols: u16, rows: u16) -> usize {
    (cols as usize).min(2 * (rows as usize).saturating_sub(1))
}

/// Size in logical units of a square of `side` pixels
pub fn logical_side(side: usize, scale: f64) -> u32 {
    (side as f64 * scale).round() as u32
}

fn term_color(color: Color) -> style::Color {
    if color.is_transparent() {
        style::Color::Reset
    } else {
        style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// Queues one row of cells (two pixel rows) of the framebuffer
fn queue_cell_row<W: Write>(out: &mut W, fb: &Framebuffer, row: usize) -> io::Result<()> {
    for x in 0..fb.width() {
        let top = fb.pixel(x, row * 2);
        let bottom = fb.pixel(x, row * 2 + 1);
        queue!(
            out,
            SetForegroundColor(term_color(top)),
            SetBackgroundColor(term_color(bottom)),
            Print(HALF_BLOCK)
        )?;
    }
    queue!(out, ResetColor)
}

fn cell_rows(fb: &Framebuffer) -> usize {
    fb.height().div_ceil(2)
}

/// Renders the framebuffer as plain text, one character per cell
pub fn ascii_frame(fb: &Framebuffer) -> String {
    let mut text = String::new();
    for row in 0..cell_rows(fb) {
        for x in 0..fb.width() {
            let top = fb.pixel(x, row * 2);
            let color = if top.is_transparent() {
                fb.pixel(x, row * 2 + 1)
            } else {
                top
            };
            if color.is_transparent() {
                text.push(' ');
            } else {
                let index =
                    (color.luminance() * (ASCII_RAMP.len() - 1) as f64).round() as usize;
                text.push(ASCII_RAMP[index.min(ASCII_RAMP.len() - 1)] as char);
            }
        }
        text.push('\n');
    }
    text
}

/// What a one-shot render prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnceOutput {
    Blocks,
    Ascii,
    Commands,
}

/// Renders a single frame `at` into the animation for a `cols` x `rows` terminal
pub fn render_once<W: Write>(
    out: &mut W,
    widget: &mut PacmanWidget,
    cols: u16,
    rows: u16,
    scale: f64,
    at: Duration,
    output: OnceOutput,
) -> Result<()> {
    let side = square_side(cols, rows);
    let logical = logical_side(side, scale);
    widget.on_size_changed(logical, logical);
    widget.start_animation();
    widget.tick(at);
    debug!(
        "one-shot frame at {} ms, {side} px for {cols}x{rows} cells",
        at.as_millis()
    );

    let mut commands: Vec<DrawCommand> = Vec::new();
    widget.draw(&mut commands);
    let rasterize = || {
        let mut fb = Framebuffer::new(side, side, scale);
        for command in &commands {
            command.replay(&mut fb);
        }
        fb
    };

    match output {
        OnceOutput::Commands => {
            for command in &commands {
                writeln!(out, "{command}")?;
            }
        }
        OnceOutput::Ascii => {
            out.write_all(ascii_frame(&rasterize()).as_bytes())?;
        }
        OnceOutput::Blocks => {
            let fb = rasterize();
            for row in 0..cell_rows(&fb) {
                queue_cell_row(out, &fb, row)?;
                queue!(out, Print('\n'))?;
            }
        }
    }
    out.flush().context("writing frame")?;
    Ok(())
}

/// Frames-per-second bookkeeping
struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    fn new() -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    fn frame(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }
}

/// Interactive host: owns the widget, the terminal layout and the frame loop
pub struct TerminalHost {
    widget: PacmanWidget,
    scale: f64,
    cols: u16,
    rows: u16,
    side: usize,
    paused: bool,
    debug: bool,
    /// Overlays present on screen after the last frame
    shown_paused: bool,
    shown_debug: bool,
    fps: FpsCounter,
}

impl TerminalHost {
    pub fn new(widget: PacmanWidget, scale: f64) -> Self {
        TerminalHost {
            widget,
            scale,
            cols: 0,
            rows: 0,
            side: 0,
            paused: false,
            debug: false,
            shown_paused: false,
            shown_debug: false,
            fps: FpsCounter::new(),
        }
    }

    /// Fits the square into a `cols` x `rows` terminal and tells the widget
    fn layout(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.side = square_side(cols, rows);
        let logical = logical_side(self.side, self.scale);
        debug!("layout {cols}x{rows} cells, {} px square", self.side);
        self.widget.on_size_changed(logical, logical);
    }

    /// Takes over the terminal until the user quits
    pub fn run(mut self) -> Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let result = execute!(stdout, EnterAlternateScreen, Hide)
            .context("entering alternate screen")
            .and_then(|_| self.event_loop(&mut stdout));

        let restored = execute!(stdout, ResetColor, Show, LeaveAlternateScreen)
            .context("leaving alternate screen")
            .and_then(|_| terminal::disable_raw_mode().context("disabling raw mode"));
        info!("terminal host stopped");
        result.and(restored)
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let (cols, rows) = terminal::size().context("querying terminal size")?;
        self.layout(cols, rows);
        info!("terminal host started with {cols}x{rows} cells");
        self.widget.start_animation();

        let mut last_tick = Instant::now();
        let mut dirty = true;
        loop {
            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            self.paused = !self.paused;
                            dirty = true;
                        }
                        KeyCode::Char('d') | KeyCode::Char('D') => {
                            self.debug = !self.debug;
                            dirty = true;
                        }
                        _ => {}
                    },
                    Event::Resize(cols, rows) => {
                        self.layout(cols, rows);
                        queue!(out, Clear(ClearType::All))?;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last_tick);
            last_tick = now;
            if !self.paused {
                dirty |= self.widget.tick(dt);
            }
            if dirty {
                self.present(out)?;
                dirty = false;
            }
        }
        Ok(())
    }

    /// Draws the widget, the overlays and the status line
    fn present<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.fps.frame();

        // Overlay text outside the square is not repainted by the image
        if (self.shown_debug && !self.debug) || (self.shown_paused && !self.paused) {
            queue!(out, Clear(ClearType::All))?;
        }
        self.shown_debug = self.debug;
        self.shown_paused = self.paused;

        let mut fb = Framebuffer::new(self.side, self.side, self.scale);
        self.widget.draw(&mut fb);

        let left = (self.cols as usize).saturating_sub(self.side) / 2;
        for row in 0..cell_rows(&fb) {
            queue!(out, MoveTo(left as u16, row as u16))?;
            queue_cell_row(out, &fb, row)?;
        }

        if self.debug {
            let geometry = self.widget.geometry();
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Mouth: {:.2}", self.widget.animation().mouth_start_angle),
                format!(
                    "Center: ({:.1}, {:.1}) Radius: {:.1}",
                    geometry.center_x, geometry.center_y, geometry.radius
                ),
                format!("FPS: {:.2}", self.fps.fps),
            ];
            for (i, line) in lines.iter().enumerate() {
                queue!(out, MoveTo(0, i as u16), Print(line))?;
            }
        }

        if self.paused {
            let text = "Paused";
            let col = (self.cols as usize).saturating_sub(text.len()) / 2;
            let row = cell_rows(&fb) / 2;
            queue!(
                out,
                MoveTo(col as u16, row as u16),
                SetForegroundColor(term_color(Color::WHITE)),
                Print(text),
                ResetColor
            )?;
        }

        let status = "q quit  p pause  d debug";
        queue!(
            out,
            MoveTo(0, self.rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        out.flush().context("flushing frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_fits_both_dimensions() {
        // 80 columns, 23 usable rows of two pixels each
        assert_eq!(square_side(80, 24), 46);
        assert_eq!(square_side(40, 100), 40);
        assert_eq!(square_side(10, 0), 0);
        assert_eq!(logical_side(46, 6.0), 276);
    }

    #[test]
    fn ascii_frame_has_one_line_per_cell_row() {
        let mut widget = PacmanWidget::default();
        widget.on_size_changed(300, 300);
        let mut fb = Framebuffer::new(30, 30, 10.0);
        widget.draw(&mut fb);

        let text = ascii_frame(&fb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() == 30));
        assert_eq!(lines[0].chars().next(), Some(' '));
        // body and outline/eye use distinct glyphs
        assert!(text.contains('='));
        assert!(text.contains('@'));
    }

    fn present_frame(host: &mut TerminalHost) -> String {
        let mut out = Vec::new();
        host.present(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn clear_all() -> String {
        let mut out = Vec::new();
        queue!(out, Clear(ClearType::All)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hiding_debug_overlay_clears_screen() {
        let clear_all = clear_all();
        let mut host = TerminalHost::new(PacmanWidget::default(), 6.0);
        // wide terminal: the overlay sits left of the square
        host.layout(200, 24);
        assert!(host.side < host.cols as usize);

        host.debug = true;
        let shown = present_frame(&mut host);
        assert!(shown.contains("FPS:"));
        assert!(!shown.contains(&clear_all));

        host.debug = false;
        let hidden = present_frame(&mut host);
        assert!(hidden.contains(&clear_all));
        assert!(!hidden.contains("FPS:"));

        // only the frame that removes the overlay clears
        assert!(!present_frame(&mut host).contains(&clear_all));
    }

    #[test]
    fn resuming_clears_paused_banner() {
        let mut host = TerminalHost::new(PacmanWidget::default(), 6.0);
        host.layout(200, 24);
        host.paused = true;
        assert!(present_frame(&mut host).contains("Paused"));
        host.paused = false;
        let resumed = present_frame(&mut host);
        assert!(!resumed.contains("Paused"));
        assert!(resumed.contains(&clear_all()));
    }

    #[test]
    fn once_dumps_commands() {
        let mut out = Vec::new();
        let mut widget = PacmanWidget::default();
        render_once(
            &mut out,
            &mut widget,
            80,
            24,
            6.0,
            Duration::from_millis(1000),
            OnceOutput::Commands,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("start=45 sweep=45"));
        assert!(lines[4].contains("start=-45 sweep=-45"));
        assert!(lines[5].starts_with("oval "));
    }

    #[test]
    fn once_replays_recorded_frame() {
        let mut out = Vec::new();
        let mut widget = PacmanWidget::default();
        let at = Duration::from_millis(700);
        render_once(&mut out, &mut widget, 60, 31, 8.0, at, OnceOutput::Ascii).unwrap();

        // drawing straight onto a framebuffer gives the same picture
        let side = square_side(60, 31);
        let mut fb = Framebuffer::new(side, side, 8.0);
        widget.draw(&mut fb);
        assert_eq!(String::from_utf8(out).unwrap(), ascii_frame(&fb));
    }

    #[test]
    fn once_renders_blocks() {
        let mut out = Vec::new();
        let mut widget = PacmanWidget::default();
        render_once(
            &mut out,
            &mut widget,
            20,
            11,
            10.0,
            Duration::ZERO,
            OnceOutput::Blocks,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 10);
        assert_eq!(text.matches(HALF_BLOCK).count(), 200);
    }
}
