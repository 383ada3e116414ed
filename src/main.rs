//! Story console server (v1)
//!
//! Serves route resolution and composite loading for the story editor.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                STORY CONSOLE                 │
//!                    │                                              │
//!   Navigation host  │  ┌────────┐    ┌──────────┐    ┌───────────┐ │
//!   ─────────────────┼─▶│  http  │───▶│ routing  │───▶│ template +│ │
//!   /api/resolve     │  │ server │    │  table   │    │ controller│ │
//!                    │  └───┬────┘    └──────────┘    └───────────┘ │
//!                    │      │                                       │
//!   Controller       │      ▼                                       │
//!   ─────────────────┼─▶┌──────────────┐    ┌────────────────┐      │    Upstream
//!   /api/composites  │  │  composites  │───▶│ HTTP source    │──────┼──▶ /composites
//!                    │  │ loader       │◀───│ (no cache)     │      │
//!                    │  │ + fallback   │    └────────────────┘      │
//!                    │  └──────────────┘                            │
//!                    │                                              │
//!                    │  config (TOML, hot reload) · observability   │
//!                    │  lifecycle (signals, shutdown)               │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Configuration is read from the path given as first argument or in
//! `STORY_CONSOLE_CONFIG`; without either the built-in defaults are used.

use std::path::PathBuf;

use story_console::config::{load_config, ConsoleConfig};
use story_console::lifecycle::startup;
use story_console::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("STORY_CONSOLE_CONFIG"))
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ConsoleConfig::default(),
    };

    logging::init(&config.observability)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?config_path,
        "story-console starting"
    );

    startup::run(config, config_path.as_deref()).await
}
