//! Frame stack for nested local coordinate systems.
//!
//! Holds the current [`AffineFrame`] plus a stack of saved frames. Every
//! `translate`/`rotate` is composed in local-frame order
//! (`current = current · op`), so `rotate(90); translate(10, 0)` moves ten
//! units along the rotated X axis.

use std::ops::{Deref, DerefMut};

use circuitpainter_core::FrameError;

use crate::geometry::Point;
use crate::transform::AffineFrame;

/// Current frame plus saved frames
#[derive(Debug, Clone, Default)]
pub struct FrameStack {
    current: AffineFrame,
    saved: Vec<AffineFrame>,
}

impl FrameStack {
    /// Identity frame, nothing saved
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current frame
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved frame
    ///
    /// With nothing saved, the current frame is reset to identity instead.
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(frame) => self.current = frame,
            None => {
                tracing::warn!("Frame stack pop without matching push, resetting to identity");
                self.current = AffineFrame::identity();
            }
        }
    }

    /// Restore the last saved frame, failing on an empty stack
    pub fn try_pop(&mut self) -> Result<(), FrameError> {
        let frame = self.saved.pop().ok_or(FrameError::StackUnderflow)?;
        self.current = frame;
        Ok(())
    }

    /// Discard every saved frame and return to identity
    pub fn reset(&mut self) {
        self.current = AffineFrame::identity();
        self.saved.clear();
    }

    /// Number of saved frames
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Pop until only `depth` frames remain saved
    ///
    /// Restores the frame that was current when the stack was last at
    /// `depth + 1` entries, i.e. right before the matching `push`.
    pub fn unwind_to(&mut self, depth: usize) {
        if self.saved.len() <= depth {
            if self.saved.len() < depth {
                tracing::warn!(
                    "Frame stack unwound below its saved depth ({} < {})",
                    self.saved.len(),
                    depth
                );
            }
            return;
        }
        self.saved.truncate(depth + 1);
        if let Some(frame) = self.saved.pop() {
            self.current = frame;
        }
    }

    /// Move the local origin by `(dx, dy)` along the local axes
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.translated(dx, dy);
    }

    /// Rotate the local axes by `degrees`, counter-clockwise
    pub fn rotate(&mut self, degrees: f64) {
        self.current = self.current.rotated(degrees);
    }

    /// Local point to world coordinates
    pub fn project(&self, x: f64, y: f64) -> Point {
        self.current.apply(x, y)
    }

    /// World point to local coordinates
    pub fn inverse_project(&self, x: f64, y: f64) -> Point {
        self.current.apply_inverse(x, y)
    }

    /// Rotation of the current local frame, in degrees
    pub fn current_angle(&self) -> f64 {
        self.current.angle()
    }

    pub fn current(&self) -> &AffineFrame {
        &self.current
    }
}

/// Anything that carries a [`FrameStack`] that scoped placement can borrow
pub trait FrameHost {
    fn frames(&self) -> &FrameStack;
    fn frames_mut(&mut self) -> &mut FrameStack;
}

impl FrameHost for FrameStack {
    fn frames(&self) -> &FrameStack {
        self
    }

    fn frames_mut(&mut self) -> &mut FrameStack {
        self
    }
}

/// Pushes a frame on creation and unwinds to the prior depth on drop
///
/// Restoration happens on every exit path, including early returns through
/// `?` and panics inside the scope.
pub struct FrameGuard<'a, T: FrameHost + ?Sized> {
    host: &'a mut T,
    depth: usize,
}

impl<'a, T: FrameHost + ?Sized> FrameGuard<'a, T> {
    pub fn new(host: &'a mut T) -> Self {
        let depth = host.frames().depth();
        host.frames_mut().push();
        Self { host, depth }
    }
}

impl<T: FrameHost + ?Sized> Deref for FrameGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.host
    }
}

impl<T: FrameHost + ?Sized> DerefMut for FrameGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.host
    }
}

impl<T: FrameHost + ?Sized> Drop for FrameGuard<'_, T> {
    fn drop(&mut self) {
        self.host.frames_mut().unwind_to(self.depth);
    }
}
