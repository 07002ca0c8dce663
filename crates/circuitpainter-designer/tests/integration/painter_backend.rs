// CircuitPainter against the backend contract

use std::path::Path;

use circuitpainter_core::{BackendError, BoardPoint, Error, PreconditionError, Result};
use circuitpainter_designer::{
    BoardBackend, CircuitPainter, FootprintCatalog, FootprintOptions, FootprintPlacement,
    ItemHandle, MemoryBoard, NetHandle, PadInfo, PadTemplate, PathSampler, Point, Primitive,
    PrimitiveKind,
};
use circuitpainter_settings::PainterConfig;

/// Memory board that counts the calls it receives
#[derive(Default)]
struct RecordingBoard {
    inner: MemoryBoard,
    primitive_calls: usize,
    footprint_calls: usize,
    net_calls: usize,
}

impl BoardBackend for RecordingBoard {
    fn emit_primitive(&mut self, primitive: Primitive) -> Result<ItemHandle> {
        self.primitive_calls += 1;
        self.inner.emit_primitive(primitive)
    }

    fn load_pads(&self, library_path: &Path, part: &str) -> Result<Vec<PadInfo>> {
        self.inner.load_pads(library_path, part)
    }

    fn emit_footprint(&mut self, placement: FootprintPlacement) -> Result<ItemHandle> {
        self.footprint_calls += 1;
        self.inner.emit_footprint(placement)
    }

    fn footprint_pads(&self, reference: &str) -> Result<Vec<ItemHandle>> {
        self.inner.footprint_pads(reference)
    }

    fn resolve_position(&self, handle: ItemHandle) -> Result<BoardPoint> {
        self.inner.resolve_position(handle)
    }

    fn find_or_create_net(&mut self, name: &str) -> Result<NetHandle> {
        self.net_calls += 1;
        self.inner.find_or_create_net(name)
    }
}

fn led_catalog(config: &PainterConfig) -> FootprintCatalog {
    let mut catalog = FootprintCatalog::new();
    catalog.register(
        config.library_path("LED_SMD"),
        "LED_0805_2012Metric",
        vec![
            PadTemplate::new("1", -1.0, 0.0),
            PadTemplate::new("2", 1.0, 0.0),
        ],
    );
    catalog
}

fn recording_painter() -> CircuitPainter<RecordingBoard> {
    let config = PainterConfig::default();
    let board = RecordingBoard {
        inner: MemoryBoard::with_catalog(led_catalog(&config)),
        ..RecordingBoard::default()
    };
    CircuitPainter::with_config(board, config).unwrap()
}

fn led_painter() -> CircuitPainter {
    let config = PainterConfig::default();
    let board = MemoryBoard::with_catalog(led_catalog(&config));
    CircuitPainter::with_config(board, config).unwrap()
}

#[test]
fn test_net_count_mismatch_never_reaches_backend() {
    let mut painter = recording_painter();

    let err = painter
        .footprint(
            0.0,
            0.0,
            "LED_SMD",
            "LED_0805_2012Metric",
            FootprintOptions::new()
                .reference("LED?")
                .nets(["gnd", "vcc", "extra"]),
        )
        .unwrap_err();

    assert_eq!(
        err,
        Error::Precondition(PreconditionError::NetCountMismatch {
            part: "LED_0805_2012Metric".to_string(),
            expected: 2,
            actual: 3,
        })
    );
    let message = err.to_string();
    assert!(message.contains("expected 2") && message.contains("got 3"));

    let board = painter.backend();
    assert_eq!(board.footprint_calls, 0);
    assert_eq!(board.net_calls, 0);
    assert!(painter.items().is_empty());

    // The failed call did not consume a designator number.
    painter
        .footprint(
            0.0,
            0.0,
            "LED_SMD",
            "LED_0805_2012Metric",
            FootprintOptions::new().reference("LED?"),
        )
        .unwrap();
    assert!(painter.backend().inner.footprint("LED1").is_some());
}

#[test]
fn test_unknown_footprint_is_a_backend_error() {
    let mut painter = recording_painter();
    let err = painter
        .footprint(0.0, 0.0, "LED_SMD", "LED_1206", FootprintOptions::new())
        .unwrap_err();
    match err {
        Error::Backend(BackendError::FootprintNotFound { library, part }) => {
            assert!(library.ends_with("LED_SMD.pretty"));
            assert_eq!(part, "LED_1206");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(painter.backend().footprint_calls, 0);
}

#[test]
fn test_footprint_pose_and_pads() {
    let mut painter = led_painter();
    painter.translate(20.0, 10.0);
    painter.rotate(90.0);
    painter.no_designators();

    painter
        .footprint(
            5.0,
            0.0,
            "LED_SMD",
            "LED_0805_2012Metric",
            FootprintOptions::new()
                .reference("D1")
                .angle(30.0)
                .nets(["a", "b"]),
        )
        .unwrap();

    let board = painter.backend();
    let placed = board.footprint("D1").unwrap();
    assert_eq!(placed.position, BoardPoint::from_mm(20.0, 15.0));
    assert!((placed.angle - 120.0).abs() < 1e-9);
    assert!(!placed.reference_visible);
    assert_eq!(board.net_name(placed.pads[1].net.unwrap()), Some("b"));

    // Pad positions read back in the local frame of the caller.
    let pads = painter.get_pads("D1").unwrap();
    assert_eq!(pads.len(), 2);
    let pad = painter.object_position(pads[0]).unwrap();
    let expected = Point::new(5.0, 0.0).polar_offset(1.0, 210.0);
    assert!((pad.x - expected.x).abs() < 1e-5);
    assert!((pad.y - expected.y).abs() < 1e-5);
}

#[test]
fn test_anonymous_designators_use_configured_prefix() {
    let mut config = PainterConfig::default();
    config.designators.anonymous_prefix = "U".to_string();
    let board = MemoryBoard::with_catalog(led_catalog(&config));
    let mut painter = CircuitPainter::with_config(board, config).unwrap();

    for _ in 0..2 {
        painter
            .footprint(0.0, 0.0, "LED_SMD", "LED_0805_2012Metric", FootprintOptions::new())
            .unwrap();
    }
    let references: Vec<&str> = painter
        .backend()
        .footprints()
        .iter()
        .map(|f| f.reference.as_str())
        .collect();
    assert_eq!(references, vec!["U1", "U2"]);
}

#[test]
fn test_unknown_reference_and_handle() {
    let painter = led_painter();
    assert!(matches!(
        painter.get_pads("Q7"),
        Err(Error::Backend(BackendError::UnknownReference { .. }))
    ));
    assert!(painter.object_position(ItemHandle::new()).is_err());
}

#[test]
fn test_layer_and_width_errors_leave_style_unchanged() {
    let mut painter = led_painter();
    painter.layer("F_SilkS").unwrap();
    painter.width(0.3).unwrap();

    assert!(painter.layer("Silkscreen").unwrap_err().is_configuration_error());
    assert!(painter.width(0.0).unwrap_err().is_configuration_error());

    let handle = painter.line(0.0, 0.0, 1.0, 0.0).unwrap();
    match painter.backend().primitive(handle) {
        Some(Primitive::Line { layer, width, .. }) => {
            assert_eq!(layer.name(), "F_SilkS");
            assert_eq!(*width, 300_000);
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn test_frames_do_not_carry_style() {
    let mut painter = led_painter();
    painter.layer("B_Cu").unwrap();
    painter.push_matrix();
    painter.layer("F_Cu").unwrap();
    painter.fill();
    painter.pop_matrix().unwrap();
    assert_eq!(painter.state().layer().name(), "F_Cu");
    assert!(painter.state().fill());
}

#[test]
fn test_world_local_round_trip_through_painter() {
    let mut painter = led_painter();
    painter.translate(12.5, -3.0);
    painter.rotate(-33.0);

    let world = painter.local_to_world(4.0, 7.0);
    let local = painter.world_to_local(world);
    // Board coordinates are rounded to 1 µm.
    assert!((local.x - 4.0).abs() < 1e-3);
    assert!((local.y - 7.0).abs() < 1e-3);
}

#[test]
fn test_shapes_follow_rotation() {
    let mut painter = led_painter();
    painter.rotate(90.0);
    let rect = painter.rect(0.0, 0.0, 2.0, 1.0).unwrap();
    let zone = painter.rect_zone(0.0, 0.0, 2.0, 1.0, Some("gnd")).unwrap();

    let board = painter.backend();
    match board.primitive(rect) {
        Some(Primitive::Polygon { points, .. }) => {
            assert_eq!(
                points,
                &vec![
                    BoardPoint::from_mm(0.0, 0.0),
                    BoardPoint::from_mm(-1.0, 0.0),
                    BoardPoint::from_mm(-1.0, 2.0),
                    BoardPoint::from_mm(0.0, 2.0),
                ]
            );
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
    assert_eq!(board.primitive(zone).unwrap().kind(), PrimitiveKind::Zone);
    assert!(board.primitive(zone).unwrap().net().is_some());
    assert_eq!(painter.items(), &[rect, zone]);
}

#[test]
fn test_arc_track_through_midpoint() {
    let mut painter = led_painter();
    let handle = painter.arc_track(0.0, 0.0, 2.0, 0.0, 180.0, None).unwrap();
    match painter.backend().primitive(handle) {
        Some(Primitive::ArcTrack { start, mid, end, .. }) => {
            assert_eq!(*start, BoardPoint::from_mm(2.0, 0.0));
            assert_eq!(*mid, BoardPoint::from_mm(0.0, 2.0));
            assert_eq!(*end, BoardPoint::from_mm(-2.0, 0.0));
        }
        other => panic!("expected an arc track, got {other:?}"),
    }
}

#[test]
fn test_place_along_path_with_painter() {
    let mut painter = led_painter();
    let path = PathSampler::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 20.0)]).unwrap();

    let placed = path
        .place_evenly(&mut painter, 3, |p: &mut CircuitPainter, _| {
            p.footprint(
                0.0,
                0.0,
                "LED_SMD",
                "LED_0805_2012Metric",
                FootprintOptions::new().reference("LED?"),
            )?;
            Ok(())
        })
        .unwrap();
    assert_eq!(placed, 3);

    let board = painter.backend();
    let positions: Vec<BoardPoint> = board.footprints().iter().map(|f| f.position).collect();
    assert_eq!(
        positions,
        vec![
            BoardPoint::from_mm(0.0, 0.0),
            BoardPoint::from_mm(0.0, 10.0),
            BoardPoint::from_mm(0.0, 20.0),
        ]
    );
    for f in board.footprints() {
        assert!((f.angle - 90.0).abs() < 1e-9);
    }
    assert_eq!(board.footprints()[2].reference, "LED3");
}

#[test]
fn test_catalog_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{ "libraries": { "Diode_SMD": { "D_SOD-123": [
            { "number": "1", "x": -1.6, "y": 0.0 },
            { "number": "2", "x": 1.6, "y": 0.0 }
        ] } } }"#,
    )
    .unwrap();

    let config = PainterConfig::default();
    let catalog = FootprintCatalog::from_json_file(&path, &config).unwrap();
    assert_eq!(catalog.len(), 1);

    let mut painter =
        CircuitPainter::with_config(MemoryBoard::with_catalog(catalog), config).unwrap();
    painter
        .footprint(
            0.0,
            0.0,
            "Diode_SMD",
            "D_SOD-123",
            FootprintOptions::new().reference("D?").nets(["k", "a"]),
        )
        .unwrap();
    assert_eq!(painter.get_pads("D1").unwrap().len(), 2);
    assert_eq!(painter.net_registry().len(), 2);

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ libraries: [").unwrap();
    let err = FootprintCatalog::from_json_file(&broken, &PainterConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Backend(BackendError::InvalidCatalog { .. })
    ));
}

#[test]
fn test_session_paths_use_configured_tolerance() {
    let almost = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 0.05),
    ];

    let default_session = led_painter();
    let open = default_session.path(almost.clone()).unwrap();
    assert!(!open.is_closed());

    let mut config = PainterConfig::default();
    config.geometry.closed_path_tolerance = 0.1;
    let loose_session =
        CircuitPainter::with_config(MemoryBoard::with_catalog(led_catalog(&config)), config)
            .unwrap();
    let closed = loose_session.path(almost).unwrap();
    assert!(closed.is_closed());

    // A closed path spreads the count over the whole loop instead of
    // pinning both ends.
    assert!(closed.spacing_for(4).unwrap() < open.spacing_for(4).unwrap());
    assert!(loose_session.path(vec![Point::new(1.0, 1.0)]).is_err());
}

/// Backend that refuses every footprint after looking it up
#[derive(Default)]
struct RejectingBoard {
    inner: MemoryBoard,
}

impl BoardBackend for RejectingBoard {
    fn emit_primitive(&mut self, primitive: Primitive) -> Result<ItemHandle> {
        self.inner.emit_primitive(primitive)
    }

    fn load_pads(&self, library_path: &Path, part: &str) -> Result<Vec<PadInfo>> {
        self.inner.load_pads(library_path, part)
    }

    fn emit_footprint(&mut self, placement: FootprintPlacement) -> Result<ItemHandle> {
        Err(Error::other(format!("board is locked, cannot place {}", placement.reference)))
    }

    fn footprint_pads(&self, reference: &str) -> Result<Vec<ItemHandle>> {
        self.inner.footprint_pads(reference)
    }

    fn resolve_position(&self, handle: ItemHandle) -> Result<BoardPoint> {
        self.inner.resolve_position(handle)
    }

    fn find_or_create_net(&mut self, name: &str) -> Result<NetHandle> {
        self.inner.find_or_create_net(name)
    }
}

#[test]
fn test_rejected_footprint_keeps_designator_free() {
    let config = PainterConfig::default();
    let board = RejectingBoard {
        inner: MemoryBoard::with_catalog(led_catalog(&config)),
    };
    let mut painter = CircuitPainter::with_config(board, config).unwrap();

    let options = || FootprintOptions::new().reference("LED?");
    let err = painter
        .footprint(0.0, 0.0, "LED_SMD", "LED_0805_2012Metric", options())
        .unwrap_err();
    assert!(err.to_string().contains("LED1"));

    // The number was never handed out, so the retry asks for LED1 again.
    let err = painter
        .footprint(0.0, 0.0, "LED_SMD", "LED_0805_2012Metric", options())
        .unwrap_err();
    assert!(err.to_string().contains("LED1"));
    assert!(painter.items().is_empty());
}
