//! Active drawing style.
//!
//! Layer, stroke width, fill and designator visibility apply to every
//! subsequent drawing call. They are deliberately separate from the frame
//! stack: `push_matrix`/`pop_matrix` never touch them.

use circuitpainter_core::{BoardLayer, ConfigurationError};
use circuitpainter_settings::DrawingDefaults;

/// Style applied to the next drawn primitive
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    layer: BoardLayer,
    width: f64,
    fill: bool,
    show_designators: bool,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::from_defaults(&DrawingDefaults::default())
    }
}

impl DrawingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from configured defaults
    pub fn from_defaults(defaults: &DrawingDefaults) -> Self {
        Self {
            layer: defaults.layer,
            width: defaults.width,
            fill: defaults.fill,
            show_designators: defaults.show_designators,
        }
    }

    /// Select the active layer by its board name, e.g. `"F_SilkS"`
    ///
    /// An unknown name leaves the current layer unchanged.
    pub fn set_layer(&mut self, name: &str) -> Result<(), ConfigurationError> {
        self.layer = name.parse()?;
        tracing::debug!("Active layer set to {}", self.layer);
        Ok(())
    }

    pub fn set_layer_id(&mut self, layer: BoardLayer) {
        self.layer = layer;
    }

    /// Set the stroke width in millimetres
    pub fn set_width(&mut self, width: f64) -> Result<(), ConfigurationError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigurationError::InvalidWidth { width });
        }
        self.width = width;
        Ok(())
    }

    pub fn enable_fill(&mut self) {
        self.fill = true;
    }

    pub fn disable_fill(&mut self) {
        self.fill = false;
    }

    pub fn show_designators(&mut self) {
        self.show_designators = true;
    }

    pub fn hide_designators(&mut self) {
        self.show_designators = false;
    }

    pub fn layer(&self) -> BoardLayer {
        self.layer
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn designators_visible(&self) -> bool {
        self.show_designators
    }
}
