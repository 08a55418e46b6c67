use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod color;
mod config;
mod controller;
mod display;
mod geometry;
mod panel;
mod renderer;
mod surface;

use color::Theme;
use config::{Config, Variant};
use display::DisplayMode;
use geometry::AngleUnit;

#[derive(Parser, Debug)]
#[command(name = "unitrig")]
#[command(author, version, about = "Interactive unit circle with live trigonometric values")]
struct Args {
    /// Display mode: terminal or snapshot
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Function set: classic (sin, cos, tan) or extended (all six)
    #[arg(long)]
    variant: Option<Variant>,

    /// Unit the toggle starts in
    #[arg(short, long)]
    unit: Option<AngleUnit>,

    /// Neutral colors for a dark or light terminal
    #[arg(long)]
    theme: Option<Theme>,

    /// Snapshot mode: angle in degrees to point at
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    angle: f64,

    /// Snapshot mode: character grid, e.g. 60x30
    #[arg(long)]
    size: Option<String>,

    /// Background grid spacing in canvas pixels
    #[arg(long)]
    grid_step: Option<f64>,

    /// Hide the background grid
    #[arg(long)]
    no_grid: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a commented config template to ~/.config/unitrig/config.toml and exit
    #[arg(long)]
    init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // The terminal UI owns the screen, so stderr only gets warnings by default
    let default_directive = if log_file.is_some() {
        "unitrig=info"
    } else {
        "unitrig=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "unitrig", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args)?;
    config.validate()?;

    info!("Starting unitrig in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(config)?,
        DisplayMode::Snapshot => {
            display::snapshot::run(&config, args.angle, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}
