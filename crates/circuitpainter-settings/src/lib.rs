//! CircuitPainter Settings Crate
//!
//! Handles layout session configuration: footprint library location,
//! drawing defaults, output precision and frame stack strictness.

pub mod config;
pub mod error;

pub use config::{
    DesignatorSettings, DrawingDefaults, FrameSettings, GeometrySettings, PainterConfig,
    ViaDefaults,
};
pub use error::{SettingsError, SettingsResult};
