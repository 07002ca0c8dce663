//! # Rigid 2D Transforms
//!
//! [`AffineFrame`] is a 3×3 homogeneous matrix restricted to rotation and
//! translation. The bottom row is always `[0, 0, 1]` and the upper-left 2×2
//! block is always a pure rotation; none of the public constructors can
//! introduce scale or shear, so the frame is always invertible.

use nalgebra::{Matrix3, Vector3};

use crate::geometry::Point;

/// Rigid (rotation + translation) coordinate frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineFrame {
    matrix: Matrix3<f64>,
}

impl Default for AffineFrame {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineFrame {
    /// The frame that maps every point to itself
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Pure translation by `(dx, dy)`
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                1.0, 0.0, dx, //
                0.0, 1.0, dy, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Pure counter-clockwise rotation by `degrees` about the origin
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            matrix: Matrix3::new(
                cos, -sin, 0.0, //
                sin, cos, 0.0, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Matrix product `self · other`
    ///
    /// Points are mapped by `other` first and then by `self`, so `other` is
    /// interpreted in the local axes established by `self`.
    pub fn compose(&self, other: &AffineFrame) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// This frame followed by a translation along its own axes
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        self.compose(&Self::translation(dx, dy))
    }

    /// This frame followed by a rotation about its own origin
    pub fn rotated(&self, degrees: f64) -> Self {
        self.compose(&Self::rotation(degrees))
    }

    /// Map a local point into the parent frame
    pub fn apply(&self, x: f64, y: f64) -> Point {
        let v = self.matrix * Vector3::new(x, y, 1.0);
        Point::new(v.x, v.y)
    }

    /// Map a parent-frame point back into local coordinates
    ///
    /// Uses the closed-form rigid inverse `Rᵀ · (p - t)`.
    pub fn apply_inverse(&self, x: f64, y: f64) -> Point {
        let m = &self.matrix;
        let dx = x - m[(0, 2)];
        let dy = y - m[(1, 2)];
        Point::new(
            m[(0, 0)] * dx + m[(1, 0)] * dy,
            m[(0, 1)] * dx + m[(1, 1)] * dy,
        )
    }

    /// The inverse frame, built from the transposed rotation
    pub fn inverse(&self) -> Self {
        let m = &self.matrix;
        let (tx, ty) = (m[(0, 2)], m[(1, 2)]);
        Self {
            matrix: Matrix3::new(
                m[(0, 0)],
                m[(1, 0)],
                -(m[(0, 0)] * tx + m[(1, 0)] * ty),
                m[(0, 1)],
                m[(1, 1)],
                -(m[(0, 1)] * tx + m[(1, 1)] * ty),
                0.0,
                0.0,
                1.0,
            ),
        }
    }

    /// Rotation of the local X axis relative to the parent frame, in degrees
    /// within `(-180, 180]`
    pub fn angle(&self) -> f64 {
        self.matrix[(1, 0)].atan2(self.matrix[(0, 0)]).to_degrees()
    }

    /// Origin of the local frame in parent coordinates
    pub fn origin(&self) -> Point {
        Point::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    /// Underlying homogeneous matrix
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}
