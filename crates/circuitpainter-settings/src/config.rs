//! Configuration for CircuitPainter layout sessions
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Drawing defaults (layer, stroke width, fill, designator visibility)
//! - Via defaults (drill and annular ring diameters)
//! - Geometry settings (output precision, tolerances, approximation)
//! - Frame stack behaviour
//! - Designator allocation

use circuitpainter_core::BoardLayer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Default KiCad footprint library location on Linux installs
pub const DEFAULT_LIBRARY_BASE: &str = "/usr/share/kicad/footprints/";

/// Drawing defaults applied to a fresh session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingDefaults {
    /// Initial drawing layer
    pub layer: BoardLayer,
    /// Initial stroke width (mm)
    pub width: f64,
    /// Whether closed shapes start filled
    pub fill: bool,
    /// Whether placed footprints show their reference designator
    pub show_designators: bool,
}

impl Default for DrawingDefaults {
    fn default() -> Self {
        Self {
            layer: BoardLayer::FCu,
            width: 0.1,
            fill: false,
            show_designators: true,
        }
    }
}

/// Via dimensions used when a script does not give its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaDefaults {
    /// Drill diameter (mm)
    pub drill: f64,
    /// Annular ring diameter (mm)
    pub diameter: f64,
}

impl Default for ViaDefaults {
    fn default() -> Self {
        Self {
            drill: 0.3,
            diameter: 0.6,
        }
    }
}

/// Numeric geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Decimal places kept (in mm) when projecting to board coordinates
    pub precision: u32,
    /// Maximum end-to-start distance for a path to count as closed (mm)
    pub closed_path_tolerance: f64,
    /// Edge length used to approximate circular zones (mm)
    pub circle_zone_resolution: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            precision: 3,
            closed_path_tolerance: 0.001,
            circle_zone_resolution: 0.5,
        }
    }
}

/// Frame stack behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Report an unbalanced pop as an error instead of resetting to identity
    pub strict_pop: bool,
}

/// Reference designator allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignatorSettings {
    /// Prefix used for footprints placed without a reference
    pub anonymous_prefix: String,
}

impl Default for DesignatorSettings {
    fn default() -> Self {
        Self {
            anonymous_prefix: "P_".to_string(),
        }
    }
}

/// Complete painter configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Root directory of the footprint libraries
    pub library_base: PathBuf,
    /// Drawing defaults
    pub drawing: DrawingDefaults,
    /// Via defaults
    pub via: ViaDefaults,
    /// Geometry settings
    pub geometry: GeometrySettings,
    /// Frame stack behaviour
    pub frames: FrameSettings,
    /// Designator allocation
    pub designators: DesignatorSettings,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            library_base: PathBuf::from(DEFAULT_LIBRARY_BASE),
            drawing: DrawingDefaults::default(),
            via: ViaDefaults::default(),
            geometry: GeometrySettings::default(),
            frames: FrameSettings::default(),
            designators: DesignatorSettings::default(),
        }
    }
}

impl PainterConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the `.pretty` footprint library named `library`
    pub fn library_path(&self, library: &str) -> PathBuf {
        self.library_base.join(format!("{library}.pretty"))
    }

    /// Platform location of the user config file, if the platform has one
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("circuitpainter").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded painter config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!(
                "No config at {}, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.drawing.width.is_finite() && self.drawing.width > 0.0) {
            return Err(SettingsError::invalid("drawing.width", "must be > 0"));
        }

        if !(self.via.drill.is_finite() && self.via.drill > 0.0) {
            return Err(SettingsError::invalid("via.drill", "must be > 0"));
        }

        if !(self.via.diameter.is_finite() && self.via.diameter > 0.0) {
            return Err(SettingsError::invalid("via.diameter", "must be > 0"));
        }

        if self.via.drill >= self.via.diameter {
            return Err(SettingsError::invalid(
                "via.drill",
                "must be smaller than via.diameter",
            ));
        }

        if self.geometry.precision > 9 {
            return Err(SettingsError::invalid(
                "geometry.precision",
                "board units resolve at most 9 decimal places",
            ));
        }

        if !(self.geometry.closed_path_tolerance.is_finite()
            && self.geometry.closed_path_tolerance > 0.0)
        {
            return Err(SettingsError::invalid(
                "geometry.closed_path_tolerance",
                "must be > 0",
            ));
        }

        if !(self.geometry.circle_zone_resolution.is_finite()
            && self.geometry.circle_zone_resolution > 0.0)
        {
            return Err(SettingsError::invalid(
                "geometry.circle_zone_resolution",
                "must be > 0",
            ));
        }

        let prefix = &self.designators.anonymous_prefix;
        if prefix.is_empty() || prefix.ends_with('?') {
            return Err(SettingsError::invalid(
                "designators.anonymous_prefix",
                "must be non-empty and must not end with '?'",
            ));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
