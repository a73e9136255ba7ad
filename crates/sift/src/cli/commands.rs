//! # CLI Layer
//!
//! The only place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Discovers config files on disk
//! - Installs the log subscriber
//!
//! ## Config Discovery
//!
//! 1. `--config PATH` (must exist)
//! 2. `./sift.toml`
//! 3. `sift.toml` in the user config directory (e.g. `~/.config/sift/`)
//! 4. Compiled defaults
//!
//! `SIFT_MAX_CANDIDATES` overrides the file in every case.

use super::render::{render_candidates, render_kinds, render_view};
use super::setup::{Cli, Commands, FacetArg, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use siftapp::chip::ChipAction;
use siftapp::config::PanelConfig;
use siftapp::event::FacetEvent;
use siftapp::facets::FacetType;
use siftapp::session::FilterSession;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "sift.toml";
const LOG_ENV: &str = "SIFT_LOG";

/// One entry of an `apply` script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Chip { chip: String, action: ChipAction },
    Event(FacetEvent),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    tracing::debug!(path = ?config_path, "resolved config file");
    let config = PanelConfig::load(config_path.as_deref())?;

    match cli.command {
        Commands::Kinds => {
            print!("{}", render_kinds());
            Ok(())
        }
        Commands::Config => handle_config(&config),
        Commands::Search { query, output } => handle_search(config, &query, output),
        Commands::Apply {
            script,
            subject,
            facets,
            output,
        } => handle_apply(config, script.as_deref(), subject, &facets, output),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!(error = %err, "log subscriber already installed");
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(ProjectDirs::from("org", "sift", "sift")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .filter(|path| path.exists()))
}

/// Print the configuration with every default filled in.
fn handle_config(config: &PanelConfig) -> Result<()> {
    let resolved = PanelConfig {
        enabled: Some(config.enabled_facets()),
        max_candidates: config.max_candidates,
        boolean_groups: Some(config.boolean_groups()),
        single_select: Some(config.single_select()),
        refine_tree: Some(config.refine_tree().roots().to_vec()),
        taxa: Some(config.taxa.clone().unwrap_or_default()),
    };
    let text = toml::to_string_pretty(&resolved).context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}

fn handle_search(config: PanelConfig, query: &str, output: OutputFormat) -> Result<()> {
    let index = config.search_index();
    let mut session = FilterSession::new(config);
    session.open("search", Some(&[FacetType::Classification]))?;

    let panel = session.panel_mut()?;
    let candidates = panel.search_with(&index, query)?;
    print!("{}", render_candidates(candidates, output)?);
    Ok(())
}

fn handle_apply(
    config: PanelConfig,
    script: Option<&Path>,
    subject: String,
    facets: &[FacetArg],
    output: OutputFormat,
) -> Result<()> {
    let steps = read_script(script)?;

    let facets: Vec<FacetType> = facets.iter().copied().map(FacetType::from).collect();
    let mut session = FilterSession::new(config);
    session.open(subject, (!facets.is_empty()).then_some(facets.as_slice()))?;

    for (i, step) in steps.into_iter().enumerate() {
        let changed = match step {
            ScriptStep::Chip { chip, action } => session.activate_chip(&chip, action),
            ScriptStep::Event(event) => session.apply(event),
        }
        .with_context(|| format!("Step {} failed", i + 1))?;
        tracing::debug!(step = i + 1, changed, "script step applied");
    }

    print!("{}", render_view(&session.view()?, output)?);
    Ok(())
}

fn read_script(path: Option<&Path>) -> Result<Vec<ScriptStep>> {
    let body = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read script from stdin")?;
            body
        }
    };
    serde_json::from_str(&body).context("Script must be a JSON array of facet events or chip actions")
}
