use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use droplist_core::gesture::{DEFAULT_DRAG_THRESHOLD, GestureConfig};
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::replay::{self, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "droplist-demo",
    about = "Replay a pointer script against a draggable list panel",
    version
)]
pub struct Cli {
    /// JSON array of records. Defaults to a built-in sample.
    #[arg(long, env = "DROPLIST_ITEMS")]
    pub items: Option<PathBuf>,

    /// JSON array of pointer events. Defaults to a tap followed by a drag.
    #[arg(long, env = "DROPLIST_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Group records by this field.
    #[arg(long, env = "DROPLIST_GROUP_BY")]
    pub group_by: Option<String>,

    /// Panel title.
    #[arg(long, env = "DROPLIST_TITLE")]
    pub title: Option<String>,

    /// Per-axis movement that turns a press into a drag.
    #[arg(long, env = "DROPLIST_THRESHOLD", default_value_t = DEFAULT_DRAG_THRESHOLD)]
    pub threshold: f32,

    /// Frame width in cells.
    #[arg(long, env = "DROPLIST_WIDTH", default_value_t = 48)]
    pub width: u16,

    /// Frame height in cells.
    #[arg(long, env = "DROPLIST_HEIGHT", default_value_t = 20)]
    pub height: u16,

    /// Panel width in cells.
    #[arg(long, env = "DROPLIST_PANEL_WIDTH", default_value_t = 24)]
    pub panel_width: u16,

    /// Print the frame after every event, not just the last.
    #[arg(long)]
    pub frames: bool,

    /// Print every gesture transition as a JSON line.
    #[arg(long)]
    pub transitions: bool,

    #[arg(long, value_enum, env = "DROPLIST_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);
    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}

/// Install the global subscriber. Logs go to stderr, filtered by `RUST_LOG`.
///
/// Returns `false` if another subscriber was already installed; events then
/// go to that one.
pub fn init_logging(format: LogFormat) -> bool {
    let installed = match format {
        LogFormat::Json => droplist_core::logging::init_json_subscriber(),
        LogFormat::Pretty => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .is_ok()
        }
    };
    if !installed {
        tracing::warn!(
            message = "demo.logging_not_installed",
            format = ?format
        );
    }
    installed
}

pub fn scenario(cli: &Cli) -> Result<Scenario> {
    let items = match &cli.items {
        Some(path) => replay::load_items(path)?,
        None => replay::sample_items()?,
    };
    let script = match &cli.script {
        Some(path) => replay::load_script(path)?,
        None => replay::sample_script()?,
    };
    Ok(Scenario {
        items,
        script,
        group_by: cli.group_by.clone(),
        title: cli.title.clone(),
        config: GestureConfig::new(cli.threshold)?,
        width: cli.width,
        height: cli.height,
        panel_width: Some(cli.panel_width),
    })
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let scenario = scenario(cli)?;
    let replay = replay::run(&scenario)?;

    if cli.transitions {
        for transition in &replay.transitions {
            writeln!(out, "{}", serde_json::to_string(transition)?)?;
        }
    }
    for note in &replay.notifications {
        writeln!(out, "{note}")?;
    }
    if cli.frames {
        for (i, frame) in replay.frames.iter().enumerate() {
            writeln!(out, "-- frame {i} --")?;
            writeln!(out, "{frame}")?;
        }
    } else {
        writeln!(out, "{}", replay.final_frame())?;
    }
    Ok(())
}
