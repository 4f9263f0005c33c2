use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use chronoline_core::Direction;
use config::Config;

#[derive(Parser)]
#[command(name = "chronoline")]
#[command(about = "Chronoline - record events and export timeline charts")]
#[command(version)]
#[command(long_about = "
Chronoline records timestamped named events into a local store and renders
them as a timeline chart with auto-fit sizing and self-contained SVG export.

Examples:
  chronoline add standup
  chronoline list
  chronoline export --out timeline.svg --direction right
  chronoline clear
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an event at the current instant
    Add {
        /// Event name (may be empty)
        name: String,
    },

    /// Print the recorded events
    List,

    /// Drop every recorded event and remove the persistent slot
    Clear,

    /// Render the timeline and write a self-contained SVG file
    Export {
        /// Output file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Axis orientation
        #[arg(long)]
        direction: Option<DirectionArg>,

        /// Auto-fit floor width in pixels
        #[arg(long)]
        width: Option<f32>,

        /// Auto-fit floor height in pixels
        #[arg(long)]
        height: Option<f32>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum DirectionArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Load configuration
    let config = Config::load(cli.config.as_ref().map(|v| v.as_path()))?;

    // Execute the requested command
    match cli.command {
        Commands::Add { name } => {
            commands::add::execute(&config, name)?;
        }

        Commands::List => {
            commands::list::execute(&config)?;
        }

        Commands::Clear => {
            commands::clear::execute(&config)?;
        }

        Commands::Export {
            out,
            direction,
            width,
            height,
        } => {
            commands::export::execute(&config, out, direction.map(Into::into), width, height)?;
        }
    }

    Ok(())
}
