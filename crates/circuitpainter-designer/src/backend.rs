//! # Board Backend Contract
//!
//! The layout engine resolves every drawing call to absolute geometry and
//! hands it to a [`BoardBackend`]. The backend owns the board: it stores
//! primitives and footprints, loads footprint pad lists, keeps the net table
//! and answers position queries. Coordinates crossing this boundary are
//! integer nanometres ([`BoardPoint`]); lengths are nanometres as `i64`.
//!
//! Items are referred to by opaque [`ItemHandle`]s and nets by
//! [`NetHandle`]s. Nothing in the engine inspects a handle's contents.

use std::fmt;
use std::path::{Path, PathBuf};

use circuitpainter_core::{BoardLayer, BoardPoint, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle to an item placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemHandle(Uuid);

impl ItemHandle {
    /// Fresh random handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an electrical net, carrying the backend's net code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetHandle(u32);

impl NetHandle {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

/// Text rendering flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStyle {
    pub mirrored: bool,
    pub bold: bool,
    pub italic: bool,
    pub knockout: bool,
}

impl TextStyle {
    /// Mirrored text, as used on bottom-side silkscreen
    pub fn mirrored() -> Self {
        Self {
            mirrored: true,
            ..Self::default()
        }
    }
}

/// Kind of a board primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Track,
    ArcTrack,
    Via,
    Zone,
    Line,
    Arc,
    Circle,
    Polygon,
    Text,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Track => "track",
            PrimitiveKind::ArcTrack => "arc-track",
            PrimitiveKind::Via => "via",
            PrimitiveKind::Zone => "zone",
            PrimitiveKind::Line => "line",
            PrimitiveKind::Arc => "arc",
            PrimitiveKind::Circle => "circle",
            PrimitiveKind::Polygon => "polygon",
            PrimitiveKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Fully resolved board primitive in absolute coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Straight copper track
    Track {
        start: BoardPoint,
        end: BoardPoint,
        layer: BoardLayer,
        width: i64,
        net: Option<NetHandle>,
    },
    /// Copper track along a circular arc through three points
    ArcTrack {
        start: BoardPoint,
        mid: BoardPoint,
        end: BoardPoint,
        layer: BoardLayer,
        width: i64,
        net: Option<NetHandle>,
    },
    /// Plated through via
    Via {
        position: BoardPoint,
        drill: i64,
        diameter: i64,
        net: Option<NetHandle>,
    },
    /// Copper zone outline
    Zone {
        outline: Vec<BoardPoint>,
        layer: BoardLayer,
        net: Option<NetHandle>,
    },
    /// Graphic line segment
    Line {
        start: BoardPoint,
        end: BoardPoint,
        layer: BoardLayer,
        width: i64,
    },
    /// Graphic arc given by centre, start and end points (counter-clockwise)
    Arc {
        center: BoardPoint,
        start: BoardPoint,
        end: BoardPoint,
        layer: BoardLayer,
        width: i64,
    },
    /// Graphic circle given by its centre and a point on its edge
    Circle {
        center: BoardPoint,
        edge: BoardPoint,
        layer: BoardLayer,
        width: i64,
        fill: bool,
    },
    /// Graphic polygon
    Polygon {
        points: Vec<BoardPoint>,
        layer: BoardLayer,
        width: i64,
        fill: bool,
    },
    /// Text label
    Text {
        position: BoardPoint,
        text: String,
        angle: f64,
        layer: BoardLayer,
        style: TextStyle,
    },
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Track { .. } => PrimitiveKind::Track,
            Primitive::ArcTrack { .. } => PrimitiveKind::ArcTrack,
            Primitive::Via { .. } => PrimitiveKind::Via,
            Primitive::Zone { .. } => PrimitiveKind::Zone,
            Primitive::Line { .. } => PrimitiveKind::Line,
            Primitive::Arc { .. } => PrimitiveKind::Arc,
            Primitive::Circle { .. } => PrimitiveKind::Circle,
            Primitive::Polygon { .. } => PrimitiveKind::Polygon,
            Primitive::Text { .. } => PrimitiveKind::Text,
        }
    }

    /// Position reported for this primitive
    ///
    /// Centre for circles and arcs, start for segments and the first vertex
    /// for outlines.
    pub fn anchor(&self) -> BoardPoint {
        match self {
            Primitive::Track { start, .. }
            | Primitive::ArcTrack { start, .. }
            | Primitive::Line { start, .. } => *start,
            Primitive::Via { position, .. } | Primitive::Text { position, .. } => *position,
            Primitive::Arc { center, .. } | Primitive::Circle { center, .. } => *center,
            Primitive::Zone { outline, .. } => outline.first().copied().unwrap_or_default(),
            Primitive::Polygon { points, .. } => points.first().copied().unwrap_or_default(),
        }
    }

    /// Layer the primitive is drawn on; vias span every copper layer
    pub fn layer(&self) -> Option<BoardLayer> {
        match self {
            Primitive::Via { .. } => None,
            Primitive::Track { layer, .. }
            | Primitive::ArcTrack { layer, .. }
            | Primitive::Zone { layer, .. }
            | Primitive::Line { layer, .. }
            | Primitive::Arc { layer, .. }
            | Primitive::Circle { layer, .. }
            | Primitive::Polygon { layer, .. }
            | Primitive::Text { layer, .. } => Some(*layer),
        }
    }

    /// Net of a conductive primitive
    pub fn net(&self) -> Option<NetHandle> {
        match self {
            Primitive::Track { net, .. }
            | Primitive::ArcTrack { net, .. }
            | Primitive::Via { net, .. }
            | Primitive::Zone { net, .. } => *net,
            _ => None,
        }
    }
}

/// Pad of a footprint as loaded from a library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadInfo {
    /// Pad number or name, e.g. `"1"` or `"A2"`
    pub number: String,
}

/// Everything needed to place one footprint
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintPlacement {
    pub library_path: PathBuf,
    pub part: String,
    pub position: BoardPoint,
    /// Absolute orientation in degrees
    pub angle: f64,
    pub reference: String,
    pub reference_visible: bool,
    /// One net per pad, in pad order
    pub nets: Option<Vec<NetHandle>>,
}

/// Board storage and lookup collaborator
pub trait BoardBackend {
    /// Store a resolved primitive
    fn emit_primitive(&mut self, primitive: Primitive) -> Result<ItemHandle>;

    /// Pad list of `part` in the library at `library_path`
    ///
    /// Fails with a backend error when the library or part is unknown.
    fn load_pads(&self, library_path: &Path, part: &str) -> Result<Vec<PadInfo>>;

    /// Place a footprint and return its handle
    fn emit_footprint(&mut self, placement: FootprintPlacement) -> Result<ItemHandle>;

    /// Pad handles of the footprint carrying `reference`, in pad order
    fn footprint_pads(&self, reference: &str) -> Result<Vec<ItemHandle>>;

    /// Absolute position of any placed item, footprint or pad
    fn resolve_position(&self, handle: ItemHandle) -> Result<BoardPoint>;

    /// Net named `name`, created if it does not exist yet
    fn find_or_create_net(&mut self, name: &str) -> Result<NetHandle>;
}
