//! # CircuitPainter Designer
//!
//! This crate is the layout engine behind CircuitPainter. A program describes
//! circuit-board geometry (tracks, vias, zones, outlines, labels and
//! footprints) in a local, composable coordinate frame; the engine resolves
//! every call into absolute board coordinates and hands the result to a
//! board backend.
//!
//! ## Core Components
//!
//! ### Coordinate Frames
//! - **AffineFrame**: Rigid 2D transform (rotation + translation)
//! - **FrameStack**: Current frame with nested save/restore
//! - **FrameGuard**: Scoped frame that restores itself on drop
//!
//! ### Session State
//! - **DrawingState**: Active layer, stroke width, fill and designator visibility
//! - **NetRegistry**: Net names to backend net handles
//! - **DesignatorAllocator**: `LED?`-style reference numbering
//!
//! ### Placement
//! - **PathSampler**: Arc-length placement along open or closed polylines
//! - **CircuitPainter**: The drawing session tying everything together
//!
//! ### Backends
//! - **BoardBackend**: Contract for storing primitives and footprints
//! - **MemoryBoard**: In-memory backend with a footprint catalog
//!
//! ## Architecture
//!
//! ```text
//! CircuitPainter (Session)
//!   ├── FrameStack (Local → board coordinates)
//!   ├── DrawingState (Style of the next primitive)
//!   ├── NetRegistry / DesignatorAllocator
//!   └── BoardBackend (MemoryBoard, ...)
//!
//! PathSampler
//!   └── runs callbacks on any FrameHost, one frame per sample
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use circuitpainter_designer::{CircuitPainter, FootprintOptions};
//!
//! let mut painter = CircuitPainter::new();
//! painter.translate(50.0, 50.0);
//! painter.layer("Edge_Cuts")?;
//! painter.rect(0.0, 0.0, 50.0, 20.0)?;
//! painter.footprint(30.0, 10.0, "LED_THT", "LED_D5.0mm",
//!     FootprintOptions::new().angle(90.0).nets(["gnd", "vbat"]))?;
//! ```

pub mod backend;
pub mod demos;
pub mod designators;
pub mod drawing_state;
pub mod frame_stack;
pub mod geometry;
pub mod memory_board;
pub mod nets;
pub mod painter;
pub mod path;
pub mod transform;

// Re-export all public types from submodules
pub use backend::{
    BoardBackend, FootprintPlacement, ItemHandle, NetHandle, PadInfo, Primitive, PrimitiveKind,
    TextStyle,
};
pub use demos::{
    demo_catalog, demo_painter, find_demo, AsterixParams, DemoLayout, HexPerfboardParams,
    PerfboardParams, DEMOS,
};
pub use designators::DesignatorAllocator;
pub use drawing_state::DrawingState;
pub use frame_stack::{FrameGuard, FrameHost, FrameStack};
pub use geometry::Point;
pub use memory_board::{
    BoardSummary, FootprintCatalog, MemoryBoard, PadTemplate, PlacedFootprint, PlacedPad,
};
pub use nets::NetRegistry;
pub use painter::{CircuitPainter, FootprintOptions};
pub use path::{PathSample, PathSampler, Samples, DEFAULT_CLOSED_TOLERANCE};
pub use transform::AffineFrame;
