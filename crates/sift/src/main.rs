//! # Sift CLI Architecture
//!
//! Sift ships with a small CLI client so a filter panel can be driven from the shell:
//! replay a script of facet events, inspect the resulting clauses and chips, query the
//! built-in taxon index, or print the resolved configuration. The binary is thin: the
//! CLI lives in `src/cli/`, while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/siftapp/`: Core library: clause model, facets, panel, session, config
//! - `crates/sift/`: This CLI tool, depends on the `siftapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/sift/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config resolution, logging, dispatch (commands.rs)       │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (crates/siftapp/src/session.rs)              │
//! │  - Opens a panel for a subject, applies events and chips    │
//! │  - Returns the `PanelView` (clauses + chips)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `siftapp` inward is UI agnostic and never prints. The CLI layer owns
//! all user-facing concerns: argument parsing, config file discovery, the log
//! subscriber, error reporting, and rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
