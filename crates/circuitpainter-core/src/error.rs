//! Error handling for CircuitPainter
//!
//! Provides the error types for every layer of the layout engine:
//! - Configuration errors (unknown layers, invalid stroke widths)
//! - Precondition errors (malformed paths, net count mismatches)
//! - Frame errors (unbalanced frame stack in strict mode)
//! - Backend errors (parts or handles the board backend cannot resolve)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Raised by the call that introduced a bad setting. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Layer name is not one of the known board layers
    #[error("Unknown layer: {name}")]
    UnknownLayer {
        /// The layer name that was requested.
        name: String,
    },

    /// Stroke width must be positive and finite
    #[error("Invalid width {width}: width must be positive")]
    InvalidWidth {
        /// The rejected width in millimetres.
        width: f64,
    },

    /// A configuration value is outside its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Precondition error type
///
/// The calling script asked for something that cannot be drawn as stated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreconditionError {
    /// Footprint net list does not match its pad count
    #[error("Incorrect number of nets for {part}: expected {expected}, got {actual}")]
    NetCountMismatch {
        /// The part being placed.
        part: String,
        /// Number of pads reported by the backend.
        expected: usize,
        /// Number of nets supplied by the caller.
        actual: usize,
    },

    /// A path needs at least two points
    #[error("Path needs at least 2 points, got {count}")]
    TooFewPoints {
        /// The number of points supplied.
        count: usize,
    },

    /// Every segment of the path has zero length
    #[error("Path has zero total length")]
    ZeroLengthPath,

    /// Spacing along a path must be positive and finite
    #[error("Invalid spacing {spacing}: spacing must be positive")]
    InvalidSpacing {
        /// The rejected spacing.
        spacing: f64,
    },

    /// Placement count is too small for the path
    #[error("Invalid placement count {count}: need at least {minimum} for this path")]
    InvalidCount {
        /// The requested count.
        count: usize,
        /// The smallest count accepted for this path.
        minimum: usize,
    },

    /// Segment index is past the end of the path
    #[error("Segment {segment} out of range: path has {segments} segments")]
    SegmentOutOfRange {
        /// The requested segment index.
        segment: usize,
        /// Number of segments in the path.
        segments: usize,
    },

    /// Geometry argument cannot describe a real shape
    #[error("Invalid geometry for {shape}: {reason}")]
    InvalidGeometry {
        /// The shape being drawn.
        shape: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Frame stack error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Pop requested with nothing saved
    #[error("Frame stack underflow: pop without matching push")]
    StackUnderflow,
}

/// Board backend error type
///
/// Lookup failures reported by the board backend. Recoverable by the caller;
/// the engine never substitutes a default part.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Footprint part not found in the library
    #[error("Footprint '{part}' not found in library {library}")]
    FootprintNotFound {
        /// The library path that was searched.
        library: String,
        /// The part name that was requested.
        part: String,
    },

    /// No item with this handle exists on the board
    #[error("Unknown item handle: {handle}")]
    UnknownHandle {
        /// The handle that could not be resolved.
        handle: String,
    },

    /// No footprint carries this reference designator
    #[error("No footprint with reference {reference}")]
    UnknownReference {
        /// The reference designator that was requested.
        reference: String,
    },

    /// Footprint catalog data could not be read
    #[error("Invalid footprint catalog: {reason}")]
    InvalidCatalog {
        /// Why the catalog was rejected.
        reason: String,
    },
}

/// Main error type for CircuitPainter
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Precondition error
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Frame stack error
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Board backend error
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Check if this is a precondition error
    pub fn is_precondition_error(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }

    /// Check if this is a frame stack error
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Error::Frame(_))
    }

    /// Check if this is a backend lookup failure
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
