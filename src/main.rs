use anyhow::{Context, Result};
use clap::Parser;
use pacman::canvas::Color;
use pacman::state::StyleConfig;
use pacman::terminal::{self, OnceOutput, TerminalHost};
use pacman::widget::PacmanWidget;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Animated Pacman in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Body colour as #RRGGBB or #RRGGBBAA
    #[arg(long, default_value = "#03DAC5")]
    disc_color: Color,

    /// Eye colour as #RRGGBB or #RRGGBBAA
    #[arg(long, default_value = "#000000")]
    eye_color: Color,

    /// Logical units per terminal pixel
    #[arg(long, default_value_t = 6.0, value_parser = parse_scale)]
    scale: f64,

    /// Print a single frame and exit
    #[arg(long)]
    once: bool,

    /// With --once, print plain characters instead of coloured blocks
    #[arg(long)]
    ascii: bool,

    /// Animation time of the frame printed by --once, in milliseconds
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Print the drawing commands of a single frame and exit
    #[arg(long)]
    dump_commands: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got {scale}"))
    }
}

/// Sets up `env_logger`, defaulting to warnings unless RUST_LOG says otherwise
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("initializing logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut widget = PacmanWidget::new(StyleConfig::new(args.disc_color, args.eye_color));

    if args.once || args.dump_commands {
        let output = if args.dump_commands {
            OnceOutput::Commands
        } else if args.ascii {
            OnceOutput::Ascii
        } else {
            OnceOutput::Blocks
        };
        let (cols, rows) = termsize::get()
            .map(|size| (size.cols, size.rows))
            .unwrap_or((80, 24));
        let mut stdout = std::io::stdout().lock();
        return terminal::render_once(
            &mut stdout,
            &mut widget,
            cols,
            rows,
            args.scale,
            Duration::from_millis(args.at_ms),
            output,
        );
    }

    TerminalHost::new(widget, args.scale).run()
}
