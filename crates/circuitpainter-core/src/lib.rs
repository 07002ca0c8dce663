//! # CircuitPainter Core
//!
//! Core types shared by every CircuitPainter crate.
//! Provides the error taxonomy, board coordinate units and the fixed set
//! of board layers that drawing commands may target.

pub mod error;
pub mod layers;
pub mod units;

pub use error::{
    BackendError, ConfigurationError, Error, FrameError, PreconditionError, Result,
};
pub use layers::BoardLayer;
pub use units::{mm_to_nm, nm_to_mm, round_to_precision, BoardPoint, NM_PER_MM};
