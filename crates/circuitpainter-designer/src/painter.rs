//! # Layout Session
//!
//! [`CircuitPainter`] is the scripting surface of the engine. It owns one
//! board backend together with the frame stack, the drawing style, the net
//! table and the designator counters, and turns local drawing calls into
//! absolute primitives.
//!
//! All coordinates passed in are millimetres in the current local frame.
//! Projection rounds to the configured precision and converts to board
//! nanometres before anything reaches the backend.
//!
//! Every drawing call validates its arguments first and only then touches
//! the backend, so a rejected call leaves the board as it was.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut painter = CircuitPainter::new();
//! painter.translate(50.0, 50.0);
//! painter.layer("Edge_Cuts")?;
//! painter.rect(0.0, 0.0, 50.0, 20.0)?;
//! painter.layer("F_Cu")?;
//! painter.rect_zone(0.0, 0.0, 50.0, 20.0, Some("vbat"))?;
//! ```

use std::f64::consts::TAU;

use circuitpainter_core::{mm_to_nm, round_to_precision, BoardPoint, PreconditionError, Result};
use circuitpainter_settings::PainterConfig;

use crate::backend::{BoardBackend, FootprintPlacement, ItemHandle, NetHandle, Primitive, TextStyle};
use crate::designators::{DesignatorAllocator, WILDCARD};
use crate::drawing_state::DrawingState;
use crate::frame_stack::{FrameGuard, FrameHost, FrameStack};
use crate::geometry::Point;
use crate::memory_board::MemoryBoard;
use crate::nets::NetRegistry;
use crate::path::PathSampler;

/// Optional arguments for [`CircuitPainter::footprint`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootprintOptions {
    /// Reference designator; a trailing `?` is numbered automatically.
    /// Without one the footprint gets an anonymous designator.
    pub reference: Option<String>,
    /// Rotation relative to the current frame (degrees)
    pub angle: f64,
    /// One net name per pad, in pad order
    pub nets: Option<Vec<String>>,
}

impl FootprintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn nets<I, S>(mut self, nets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nets = Some(nets.into_iter().map(Into::into).collect());
        self
    }
}

/// One layout session drawing onto a board backend
#[derive(Debug)]
pub struct CircuitPainter<B: BoardBackend = MemoryBoard> {
    backend: B,
    config: PainterConfig,
    frames: FrameStack,
    state: DrawingState,
    nets: NetRegistry,
    designators: DesignatorAllocator,
    items: Vec<ItemHandle>,
}

impl CircuitPainter<MemoryBoard> {
    /// Session on an empty in-memory board with default settings
    pub fn new() -> Self {
        Self::with_backend(MemoryBoard::new())
    }
}

impl Default for CircuitPainter<MemoryBoard> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BoardBackend> CircuitPainter<B> {
    /// Session on `backend` with default settings
    pub fn with_backend(backend: B) -> Self {
        Self::build(backend, PainterConfig::default())
    }

    /// Session on `backend` with validated settings
    pub fn with_config(backend: B, config: PainterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(backend, config))
    }

    fn build(backend: B, config: PainterConfig) -> Self {
        tracing::info!(
            "Starting layout session (library base {}, layer {})",
            config.library_base.display(),
            config.drawing.layer
        );
        Self {
            state: DrawingState::from_defaults(&config.drawing),
            backend,
            config,
            frames: FrameStack::new(),
            nets: NetRegistry::new(),
            designators: DesignatorAllocator::new(),
            items: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// End the session and hand back the board
    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn net_registry(&self) -> &NetRegistry {
        &self.nets
    }

    /// Every item added in this session, in order
    pub fn items(&self) -> &[ItemHandle] {
        &self.items
    }

    // Frame stack

    /// Save the current frame
    pub fn push_matrix(&mut self) {
        self.frames.push();
    }

    /// Restore the last saved frame
    ///
    /// An unbalanced pop resets to the identity frame, or fails when
    /// `frames.strict_pop` is set.
    pub fn pop_matrix(&mut self) -> Result<()> {
        if self.config.frames.strict_pop {
            self.frames.try_pop()?;
        } else {
            self.frames.pop();
        }
        Ok(())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.frames.translate(dx, dy);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.frames.rotate(degrees);
    }

    /// Push a frame that is restored when the returned guard drops
    pub fn scoped_frame(&mut self) -> FrameGuard<'_, Self> {
        FrameGuard::new(self)
    }

    /// Rotation of the current frame relative to the board (degrees)
    pub fn current_angle(&self) -> f64 {
        self.frames.current_angle()
    }

    // Drawing style

    /// Select the active layer by name, e.g. `"F_Cu"` or `"Edge_Cuts"`
    pub fn layer(&mut self, name: &str) -> Result<()> {
        self.state.set_layer(name)?;
        Ok(())
    }

    /// Set the stroke width (mm)
    pub fn width(&mut self, width: f64) -> Result<()> {
        self.state.set_width(width)?;
        Ok(())
    }

    pub fn fill(&mut self) {
        self.state.enable_fill();
    }

    pub fn no_fill(&mut self) {
        self.state.disable_fill();
    }

    /// Show reference designators on footprints placed from now on
    pub fn designators(&mut self) {
        self.state.show_designators();
    }

    pub fn no_designators(&mut self) {
        self.state.hide_designators();
    }

    // Coordinates

    /// Local point to absolute board coordinates
    pub fn local_to_world(&self, x: f64, y: f64) -> BoardPoint {
        let p = self.frames.project(x, y);
        let precision = self.config.geometry.precision;
        BoardPoint::from_mm(
            round_to_precision(p.x, precision),
            round_to_precision(p.y, precision),
        )
    }

    /// Absolute board coordinates to a local point
    pub fn world_to_local(&self, point: BoardPoint) -> Point {
        let (x, y) = point.to_mm();
        self.frames.inverse_project(x, y)
    }

    /// Position of a placed item (footprint, pad or primitive) in local
    /// coordinates
    pub fn object_position(&self, handle: ItemHandle) -> Result<Point> {
        let world = self.backend.resolve_position(handle)?;
        Ok(self.world_to_local(world))
    }

    fn width_nm(&self) -> i64 {
        mm_to_nm(self.state.width())
    }

    fn net(&mut self, name: Option<&str>) -> Result<Option<NetHandle>> {
        name.map(|name| self.nets.find_or_create(name, &mut self.backend))
            .transpose()
    }

    fn project_all(&self, points: &[Point]) -> Vec<BoardPoint> {
        points
            .iter()
            .map(|p| self.local_to_world(p.x, p.y))
            .collect()
    }

    fn emit(&mut self, primitive: Primitive) -> Result<ItemHandle> {
        let kind = primitive.kind();
        let anchor = primitive.anchor();
        let handle = self.backend.emit_primitive(primitive)?;
        tracing::debug!("Added {} at {} on {}", kind, anchor, self.state.layer());
        self.items.push(handle);
        Ok(handle)
    }

    // Copper

    /// Straight copper track from `(x1, y1)` to `(x2, y2)`
    pub fn track(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        net: Option<&str>,
    ) -> Result<ItemHandle> {
        let start = self.local_to_world(x1, y1);
        let end = self.local_to_world(x2, y2);
        let net = self.net(net)?;
        self.emit(Primitive::Track {
            start,
            end,
            layer: self.state.layer(),
            width: self.width_nm(),
            net,
        })
    }

    /// Copper track along an arc around `(x, y)` from angle `start` to `end`
    /// (degrees)
    pub fn arc_track(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        net: Option<&str>,
    ) -> Result<ItemHandle> {
        check_radius("arc track", radius)?;
        let center = Point::new(x, y);
        let (a, m, b) = (
            center.polar_offset(radius, start),
            center.polar_offset(radius, (start + end) / 2.0),
            center.polar_offset(radius, end),
        );
        let primitive = Primitive::ArcTrack {
            start: self.local_to_world(a.x, a.y),
            mid: self.local_to_world(m.x, m.y),
            end: self.local_to_world(b.x, b.y),
            layer: self.state.layer(),
            width: self.width_nm(),
            net: self.net(net)?,
        };
        self.emit(primitive)
    }

    /// Via with the configured drill and diameter
    pub fn via(&mut self, x: f64, y: f64, net: Option<&str>) -> Result<ItemHandle> {
        let (drill, diameter) = (self.config.via.drill, self.config.via.diameter);
        self.via_with(x, y, net, drill, diameter)
    }

    /// Via with an explicit drill and annular ring diameter (mm)
    pub fn via_with(
        &mut self,
        x: f64,
        y: f64,
        net: Option<&str>,
        drill: f64,
        diameter: f64,
    ) -> Result<ItemHandle> {
        if !(drill.is_finite() && drill > 0.0 && diameter.is_finite() && diameter > drill) {
            return Err(PreconditionError::InvalidGeometry {
                shape: "via".to_string(),
                reason: format!("drill {drill} must be positive and below diameter {diameter}"),
            }
            .into());
        }
        let position = self.local_to_world(x, y);
        let net = self.net(net)?;
        self.emit(Primitive::Via {
            position,
            drill: mm_to_nm(drill),
            diameter: mm_to_nm(diameter),
            net,
        })
    }

    /// Copper or graphic zone with a polygonal outline
    pub fn poly_zone(&mut self, points: &[Point], net: Option<&str>) -> Result<ItemHandle> {
        check_polygon("zone", points)?;
        let outline = self.project_all(points);
        let net = self.net(net)?;
        self.emit(Primitive::Zone {
            outline,
            layer: self.state.layer(),
            net,
        })
    }

    /// Rectangular zone between two corners
    pub fn rect_zone(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        net: Option<&str>,
    ) -> Result<ItemHandle> {
        self.poly_zone(&rect_corners(x1, y1, x2, y2), net)
    }

    /// Circular zone, approximated by a polygon with edges of about the
    /// configured resolution
    pub fn circle_zone(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        net: Option<&str>,
    ) -> Result<ItemHandle> {
        check_radius("circle zone", radius)?;
        let resolution = self.config.geometry.circle_zone_resolution;
        let count = ((TAU * radius / resolution).floor() as usize).max(3);
        let center = Point::new(x, y);
        let points: Vec<Point> = (0..count)
            .map(|i| center.polar_offset(radius, 360.0 * i as f64 / count as f64))
            .collect();
        self.poly_zone(&points, net)
    }

    // Graphics

    /// Graphic line segment
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<ItemHandle> {
        let primitive = Primitive::Line {
            start: self.local_to_world(x1, y1),
            end: self.local_to_world(x2, y2),
            layer: self.state.layer(),
            width: self.width_nm(),
        };
        self.emit(primitive)
    }

    /// Connected line segments through `points`
    pub fn polyline(&mut self, points: &[Point]) -> Result<Vec<ItemHandle>> {
        if points.len() < 2 {
            return Err(PreconditionError::TooFewPoints {
                count: points.len(),
            }
            .into());
        }
        points
            .windows(2)
            .map(|w| self.line(w[0].x, w[0].y, w[1].x, w[1].y))
            .collect()
    }

    /// Graphic arc around `(x, y)` from angle `start` to `end` (degrees)
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<ItemHandle> {
        check_radius("arc", radius)?;
        let center = Point::new(x, y);
        let (a, b) = (
            center.polar_offset(radius, start),
            center.polar_offset(radius, end),
        );
        let primitive = Primitive::Arc {
            center: self.local_to_world(x, y),
            start: self.local_to_world(a.x, a.y),
            end: self.local_to_world(b.x, b.y),
            layer: self.state.layer(),
            width: self.width_nm(),
        };
        self.emit(primitive)
    }

    /// Graphic circle, filled when fill is on
    pub fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<ItemHandle> {
        check_radius("circle", radius)?;
        let primitive = Primitive::Circle {
            center: self.local_to_world(x, y),
            edge: self.local_to_world(x, y + radius),
            layer: self.state.layer(),
            width: self.width_nm(),
            fill: self.state.fill(),
        };
        self.emit(primitive)
    }

    /// Graphic polygon, filled when fill is on
    pub fn poly(&mut self, points: &[Point]) -> Result<ItemHandle> {
        check_polygon("polygon", points)?;
        let primitive = Primitive::Polygon {
            points: self.project_all(points),
            layer: self.state.layer(),
            width: self.width_nm(),
            fill: self.state.fill(),
        };
        self.emit(primitive)
    }

    /// Rectangle between two corners, drawn as a polygon so it follows the
    /// frame rotation
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<ItemHandle> {
        self.poly(&rect_corners(x1, y1, x2, y2))
    }

    /// Single-line text label, rotated by `angle` relative to the frame
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        message: &str,
        angle: f64,
        style: TextStyle,
    ) -> Result<ItemHandle> {
        let primitive = Primitive::Text {
            position: self.local_to_world(x, y),
            text: message.to_string(),
            angle: self.current_angle() + angle,
            layer: self.state.layer(),
            style,
        };
        self.emit(primitive)
    }

    // Footprints

    /// Place `part` from footprint library `library` at `(x, y)`
    ///
    /// When nets are given there must be exactly one per pad; a mismatch is
    /// reported before anything is placed and without consuming a
    /// designator number. A designator number is only consumed once the
    /// backend has placed the footprint. Nets named here are registered
    /// before placement and stay registered if the backend then fails.
    pub fn footprint(
        &mut self,
        x: f64,
        y: f64,
        library: &str,
        part: &str,
        options: FootprintOptions,
    ) -> Result<ItemHandle> {
        let library_path = self.config.library_path(library);
        let pads = self.backend.load_pads(&library_path, part)?;

        if let Some(nets) = &options.nets {
            if nets.len() != pads.len() {
                return Err(PreconditionError::NetCountMismatch {
                    part: part.to_string(),
                    expected: pads.len(),
                    actual: nets.len(),
                }
                .into());
            }
        }

        // The number is only taken once the backend accepts the footprint.
        let requested = match &options.reference {
            Some(requested) => requested.clone(),
            None => format!("{}{}", self.config.designators.anonymous_prefix, WILDCARD),
        };
        let reference = self.designators.peek(&requested);

        let nets = match &options.nets {
            Some(names) => Some(
                names
                    .iter()
                    .map(|name| self.nets.find_or_create(name, &mut self.backend))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        let placement = FootprintPlacement {
            library_path,
            part: part.to_string(),
            position: self.local_to_world(x, y),
            angle: options.angle + self.current_angle(),
            reference: reference.clone(),
            reference_visible: self.state.designators_visible(),
            nets,
        };
        let position = placement.position;
        let handle = self.backend.emit_footprint(placement)?;
        self.designators.resolve(&requested);
        tracing::info!(
            "Placed {} ({}:{}) with {} pads at {}",
            reference,
            library,
            part,
            pads.len(),
            position
        );
        self.items.push(handle);
        Ok(handle)
    }

    /// Path sampler over `points` using the configured closed-path tolerance
    pub fn path(&self, points: Vec<Point>) -> Result<PathSampler> {
        let sampler = PathSampler::new(points)?
            .with_tolerance(self.config.geometry.closed_path_tolerance);
        Ok(sampler)
    }

    /// Pads of the footprint carrying `reference`, in pad order
    pub fn get_pads(&self, reference: &str) -> Result<Vec<ItemHandle>> {
        self.backend.footprint_pads(reference)
    }
}

impl<B: BoardBackend> FrameHost for CircuitPainter<B> {
    fn frames(&self) -> &FrameStack {
        &self.frames
    }

    fn frames_mut(&mut self) -> &mut FrameStack {
        &mut self.frames
    }
}

fn rect_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> [Point; 4] {
    [
        Point::new(x1, y1),
        Point::new(x1, y2),
        Point::new(x2, y2),
        Point::new(x2, y1),
    ]
}

fn check_radius(shape: &str, radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        return Ok(());
    }
    Err(PreconditionError::InvalidGeometry {
        shape: shape.to_string(),
        reason: format!("radius {radius} must be positive"),
    }
    .into())
}

fn check_polygon(shape: &str, points: &[Point]) -> Result<()> {
    if points.len() >= 3 {
        return Ok(());
    }
    Err(PreconditionError::InvalidGeometry {
        shape: shape.to_string(),
        reason: format!("needs at least 3 points, got {}", points.len()),
    }
    .into())
}
