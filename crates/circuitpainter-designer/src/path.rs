//! # Path Sampling
//!
//! Places repeated elements at regular arc-length intervals along a
//! polyline. The polyline may be open or closed (last point back on the
//! first). Each placement runs inside its own frame, translated to the
//! sample point and rotated to the local tangent, so the placed element is
//! drawn at the origin facing +X.
//!
//! ## Sampling rule
//!
//! Distance travelled since the last placement starts out equal to the
//! spacing, so the first placement lands on the first point. Placements then
//! follow every `spacing` units of arc length, carrying leftover distance
//! across segment boundaries, and include the end point when the length is
//! an exact multiple of the spacing. On a closed path a placement that lands
//! on the end point (within one board nanometre) repeats the first one and
//! is dropped; placements short of the end are always kept.

use circuitpainter_core::{PreconditionError, Result};

use crate::frame_stack::{FrameGuard, FrameHost};
use crate::geometry::Point;

/// Default end-to-start distance under which a path counts as closed (mm)
pub const DEFAULT_CLOSED_TOLERANCE: f64 = 0.001;

/// Smallest accepted spacing (mm), one board nanometre
pub const MIN_SPACING: f64 = 1e-6;

const EPS: f64 = 1e-9;

/// One placement along a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Segment the sample lies on
    pub segment: usize,
    /// Distance from the start of that segment
    pub offset: f64,
    /// Distance from the start of the path
    pub distance: f64,
    /// Sample point in path coordinates
    pub position: Point,
    /// Tangent direction in degrees, counter-clockwise from +X
    pub angle: f64,
}

/// Arc-length sampler over a fixed polyline
#[derive(Debug, Clone)]
pub struct PathSampler {
    points: Vec<Point>,
    lengths: Vec<f64>,
    total: f64,
    tolerance: f64,
}

impl PathSampler {
    /// Build a sampler over `points`
    ///
    /// Needs at least two points and a non-zero total length.
    pub fn new(points: Vec<Point>) -> std::result::Result<Self, PreconditionError> {
        if points.len() < 2 {
            return Err(PreconditionError::TooFewPoints {
                count: points.len(),
            });
        }

        let lengths: Vec<f64> = points.windows(2).map(|w| w[0].distance_to(&w[1])).collect();
        let total: f64 = lengths.iter().sum();
        if total <= EPS {
            return Err(PreconditionError::ZeroLengthPath);
        }

        Ok(Self {
            points,
            lengths,
            total,
            tolerance: DEFAULT_CLOSED_TOLERANCE,
        })
    }

    /// Replace the closed-path tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn segment_length(&self, segment: usize) -> std::result::Result<f64, PreconditionError> {
        self.lengths
            .get(segment)
            .copied()
            .ok_or(PreconditionError::SegmentOutOfRange {
                segment,
                segments: self.lengths.len(),
            })
    }

    pub fn total_length(&self) -> f64 {
        self.total
    }

    /// Whether the last point lies within tolerance of the first
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance_to(last) < self.tolerance,
            _ => false,
        }
    }

    /// Point `distance` along `segment`
    pub fn point_at(
        &self,
        segment: usize,
        distance: f64,
    ) -> std::result::Result<Point, PreconditionError> {
        let length = self.segment_length(segment)?;
        let start = self.points[segment];
        if length <= EPS {
            return Ok(start);
        }
        Ok(start.lerp(&self.points[segment + 1], distance / length))
    }

    /// Tangent direction on `segment`, in degrees within `(-180, 180]`
    ///
    /// Constant along a segment. A zero-length segment takes the direction of
    /// the nearest earlier segment with length, or failing that the nearest
    /// later one.
    pub fn angle_at(
        &self,
        segment: usize,
        _distance: f64,
    ) -> std::result::Result<f64, PreconditionError> {
        self.segment_length(segment)?;
        Ok(self.direction(segment))
    }

    fn direction(&self, segment: usize) -> f64 {
        let chosen = (0..=segment)
            .rev()
            .chain(segment + 1..self.lengths.len())
            .find(|&s| self.lengths[s] > EPS)
            .unwrap_or(segment);
        let (a, b) = (self.points[chosen], self.points[chosen + 1]);
        (b.y - a.y).atan2(b.x - a.x).to_degrees()
    }

    /// Lazily yield placements every `spacing` units of arc length
    pub fn samples(&self, spacing: f64) -> std::result::Result<Samples<'_>, PreconditionError> {
        if !(spacing.is_finite() && spacing >= MIN_SPACING) {
            return Err(PreconditionError::InvalidSpacing { spacing });
        }

        Ok(Samples {
            path: self,
            closed: self.is_closed(),
            spacing,
            segment: 0,
            offset: 0.0,
            remaining: self.lengths[0],
            deficit: spacing,
            travelled: 0.0,
            emitted: 0,
        })
    }

    /// Spacing that spreads `count` placements over the whole path
    ///
    /// A closed path divides its length by `count`, an open one by
    /// `count - 1` so both ends get a placement.
    pub fn spacing_for(&self, count: usize) -> std::result::Result<f64, PreconditionError> {
        if self.is_closed() {
            if count < 1 {
                return Err(PreconditionError::InvalidCount { count, minimum: 1 });
            }
            Ok(self.total / count as f64)
        } else {
            if count < 2 {
                return Err(PreconditionError::InvalidCount { count, minimum: 2 });
            }
            Ok(self.total / (count - 1) as f64)
        }
    }

    /// Run `place` at every sample, inside a frame moved onto the sample
    ///
    /// The frame is restored after each call, also when `place` fails; the
    /// first error stops the walk. On a closed path the end point is skipped
    /// since it coincides with the start. Returns the number of placements
    /// made.
    pub fn place_every<T, F>(&self, host: &mut T, spacing: f64, mut place: F) -> Result<usize>
    where
        T: FrameHost + ?Sized,
        F: FnMut(&mut T, &PathSample) -> Result<()>,
    {
        let mut placed = 0;
        for sample in self.samples(spacing)? {
            let mut scope = FrameGuard::new(&mut *host);
            scope.frames_mut().translate(sample.position.x, sample.position.y);
            scope.frames_mut().rotate(sample.angle);
            place(&mut *scope, &sample)?;
            placed += 1;
        }
        tracing::debug!(
            "Placed {} elements along a {:.3} mm path at {:.3} mm spacing",
            placed,
            self.total,
            spacing
        );
        Ok(placed)
    }

    /// Place `count` elements evenly along the whole path
    pub fn place_evenly<T, F>(&self, host: &mut T, count: usize, place: F) -> Result<usize>
    where
        T: FrameHost + ?Sized,
        F: FnMut(&mut T, &PathSample) -> Result<()>,
    {
        let spacing = self.spacing_for(count)?;
        self.place_every(host, spacing, place)
    }

    fn sample(&self, segment: usize, offset: f64, distance: f64) -> PathSample {
        let length = self.lengths[segment];
        let start = self.points[segment];
        let position = if length <= EPS {
            start
        } else {
            start.lerp(&self.points[segment + 1], offset / length)
        };
        PathSample {
            segment,
            offset,
            distance,
            position,
            angle: self.direction(segment),
        }
    }
}

/// Iterator over the placements of a [`PathSampler`]
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    path: &'a PathSampler,
    closed: bool,
    spacing: f64,
    segment: usize,
    /// Position of the last sample on the current segment
    offset: f64,
    /// Length left on the current segment past `offset`
    remaining: f64,
    /// Distance travelled since the last sample
    deficit: f64,
    /// Summed length of the segments before the current one
    travelled: f64,
    emitted: usize,
}

impl Iterator for Samples<'_> {
    type Item = PathSample;

    fn next(&mut self) -> Option<PathSample> {
        let lengths = &self.path.lengths;
        while self.segment < lengths.len() {
            if self.deficit + self.remaining >= self.spacing - EPS {
                let travel = (self.spacing - self.deficit).max(0.0);
                let length = lengths[self.segment];
                self.offset = (self.offset + travel).min(length);
                self.remaining = (self.remaining - travel).max(0.0);
                self.deficit = 0.0;

                let distance = self.travelled + self.offset;
                if self.closed && self.emitted > 0 && self.path.total - distance < MIN_SPACING {
                    self.segment = lengths.len();
                    return None;
                }

                self.emitted += 1;
                return Some(self.path.sample(self.segment, self.offset, distance));
            }

            self.deficit += self.remaining;
            self.travelled += lengths[self.segment];
            self.segment += 1;
            self.offset = 0.0;
            self.remaining = lengths.get(self.segment).copied().unwrap_or(0.0);
        }
        None
    }
}
