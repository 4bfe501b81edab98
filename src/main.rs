//! feedwall - Entry Point

use clap::Parser;
use feedwall::config::loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
};
use feedwall::integration::{run_session, SessionScript};
use feedwall::model::AppError;
use feedwall::source::ItemStore;
use feedwall::view::SimConfig;
use feedwall::view_state::Viewport;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// feedwall - replay a scripted scroll session over a feed and report what
/// the virtualization engine did
#[derive(Parser, Debug)]
#[command(name = "feedwall")]
#[command(version)]
#[command(about = "Drive the feed virtualization engine over a JSON feed and print a JSON report")]
pub struct Args {
    /// Path to the feed JSON file
    pub file: PathBuf,

    /// Number of feed columns
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// Items appended per batch
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_size: Option<u32>,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Pixels scrolled per step
    #[arg(long, default_value_t = 1000.0)]
    pub scroll_step: f64,

    /// Steps scrolled down before returning to the top
    #[arg(long, default_value_t = 20)]
    pub steps: usize,

    /// Show translations instead of original text
    #[arg(long)]
    pub translation: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged)?;
        apply_cli_overrides(
            with_env,
            args.columns.map(|c| c as usize),
            args.batch_size.map(|b| b as usize),
        )
    };
    config.validate()?;

    feedwall::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let store = ItemStore::from_path(&args.file)?;

    let script = SessionScript {
        viewport: Viewport::new(
            config.column_width * config.engine.columns as f64,
            args.viewport_height,
        ),
        scroll_step: args.scroll_step,
        steps: args.steps,
        translation: args.translation,
        ..SessionScript::default()
    };
    let sim = SimConfig::with_column_width(config.column_width);
    let report = run_session(store, config.engine, sim, &script);

    let json = serde_json::to_string_pretty(&report).map_err(AppError::Report)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(())
}
