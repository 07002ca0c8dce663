//! Board unit conversion utilities
//!
//! Scripts work in millimetres. Board backends store positions as integer
//! nanometres, the way KiCad does internally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nanometres per millimetre
pub const NM_PER_MM: f64 = 1_000_000.0;

/// Convert millimetres to whole nanometres (round half away from zero)
pub fn mm_to_nm(mm: f64) -> i64 {
    (mm * NM_PER_MM).round() as i64
}

/// Convert nanometres to millimetres
pub fn nm_to_mm(nm: i64) -> f64 {
    nm as f64 / NM_PER_MM
}

/// Round a value to a fixed number of decimal places
///
/// * `value` - Value to round
/// * `decimals` - Number of digits kept after the decimal point
pub fn round_to_precision(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid handing out negative zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Absolute board coordinate in nanometres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardPoint {
    pub x: i64,
    pub y: i64,
}

impl BoardPoint {
    /// Creates a board point from nanometre components.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Creates a board point from millimetre components.
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self {
            x: mm_to_nm(x),
            y: mm_to_nm(y),
        }
    }

    /// Returns the point in millimetres.
    pub fn to_mm(self) -> (f64, f64) {
        (nm_to_mm(self.x), nm_to_mm(self.y))
    }
}

impl fmt::Display for BoardPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_mm();
        write!(f, "({:.6}, {:.6}) mm", x, y)
    }
}
