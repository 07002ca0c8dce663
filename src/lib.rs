//! # CircuitPainter
//!
//! Procedural circuit board layout. Programs describe board geometry in
//! nested local coordinate frames and CircuitPainter resolves every call
//! into absolute board coordinates:
//! - Tracks, arc tracks, vias and copper zones with named nets
//! - Graphic lines, arcs, circles, polygons and text on any board layer
//! - Footprints with `LED?`-style designators and per-pad net assignment
//! - Placement callbacks spaced evenly along open or closed paths
//!
//! ## Architecture
//!
//! CircuitPainter is organized as a workspace with multiple crates:
//!
//! 1. **circuitpainter-core** - Error taxonomy, board units and layers
//! 2. **circuitpainter-settings** - Painter configuration (JSON/TOML files)
//! 3. **circuitpainter-designer** - Frames, path sampling, drawing session, backends
//! 4. **circuitpainter** - This facade and the demo runner binary

use std::path::Path;

use anyhow::Context;

pub use circuitpainter_designer as designer;
pub use circuitpainter_settings as settings;

pub use circuitpainter_core::{
    BackendError, BoardLayer, BoardPoint, ConfigurationError, Error, FrameError,
    PreconditionError, Result,
};
pub use circuitpainter_designer::{
    BoardBackend, BoardSummary, CircuitPainter, DemoLayout, FootprintOptions, MemoryBoard,
    PathSampler, Point, TextStyle, DEMOS,
};
pub use circuitpainter_settings::PainterConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Honors `RUST_LOG`; falls back to `info` when it is unset or invalid.
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Session config for the binary
///
/// An explicit `path` must exist. Without one the platform config file is
/// used when present, and the built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PainterConfig> {
    let config = match path {
        Some(path) => PainterConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match PainterConfig::default_config_path() {
            Ok(default_path) => PainterConfig::load_or_default(&default_path)?,
            Err(e) => {
                tracing::warn!("{}, using built-in defaults", e);
                PainterConfig::default()
            }
        },
    };
    Ok(config)
}

/// Build the demo called `name` and report what ended up on the board
pub fn run_demo(name: &str, config: &PainterConfig) -> anyhow::Result<BoardSummary> {
    let demo = circuitpainter_designer::find_demo(name).ok_or_else(|| {
        let known: Vec<&str> = DEMOS.iter().map(|d| d.name).collect();
        anyhow::anyhow!("unknown demo '{}' (available: {})", name, known.join(", "))
    })?;

    tracing::info!("Building {}: {}", demo.name, demo.description);
    let painter = demo
        .build(config)
        .with_context(|| format!("demo '{}' failed", demo.name))?;
    let summary = painter.backend().summary();
    tracing::info!("{}: {}", demo.name, summary);
    Ok(summary)
}
