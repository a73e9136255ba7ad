//! # CLI Behavior
//!
//! This is **one possible UI client** for siftapp, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Commands
//!
//! - `sift kinds`: every facet kind a clause can carry, including all taxonomic ranks.
//! - `sift config`: the resolved panel configuration, as TOML.
//! - `sift search <query>`: candidates from the configured taxon index.
//! - `sift apply [SCRIPT]`: open a panel, replay a JSON array of steps (from the file, or
//!   stdin when absent or `-`), and print the resulting clauses and chips.
//!
//! A script step is either a facet event or a chip activation:
//!
//! ```json
//! [
//!   {"type": "toggle_trait", "group": "data_types", "name": "Locus", "active": true},
//!   {"chip": "trait:data_types:Locus", "action": "switch"}
//! ]
//! ```
//!
//! ## Logging
//!
//! Log output goes to stderr through `tracing-subscriber`. The filter comes from
//! `SIFT_LOG` (e.g. `SIFT_LOG=siftapp=debug`); without it the level is `warn`, or
//! `debug` with `--verbose`.
//!
//! ## Module Structure
//!
//! - `commands`: config resolution, logging setup, per-command handlers
//! - `render`: text and JSON output
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
