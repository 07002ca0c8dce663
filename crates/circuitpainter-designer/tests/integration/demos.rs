// Every bundled demo builds and produces the expected board

use circuitpainter_core::BoardPoint;
use circuitpainter_designer::demos::{
    asterix, hello_painter, hex_perfboard, lotus_leds, path_demo, perfboard,
};
use circuitpainter_designer::{
    AsterixParams, BoardSummary, HexPerfboardParams, PerfboardParams, Primitive, PrimitiveKind,
    DEMOS,
};
use circuitpainter_settings::PainterConfig;

fn config() -> PainterConfig {
    PainterConfig::default()
}

#[test]
fn test_all_demos_build() {
    for demo in DEMOS {
        let painter = demo
            .build(&config())
            .unwrap_or_else(|e| panic!("{} failed: {e}", demo.name));
        let summary = painter.backend().summary();
        assert!(summary.primitives > 0, "{} drew nothing", demo.name);
    }
}

#[test]
fn test_hello_painter() {
    let painter = hello_painter(&config()).unwrap();
    let board = painter.backend();
    assert_eq!(
        board.summary(),
        BoardSummary {
            primitives: 3,
            footprints: 2,
            pads: 5,
            nets: 2,
        }
    );
    assert_eq!(board.net_names(), &["vbat".to_string(), "gnd".to_string()]);

    // Anonymous references and the board offset.
    let references: Vec<&str> = board.footprints().iter().map(|f| f.reference.as_str()).collect();
    assert_eq!(references, vec!["P_1", "P_2"]);
    assert_eq!(board.footprints()[1].position, BoardPoint::from_mm(80.0, 60.0));
    assert!((board.footprints()[1].angle - 90.0).abs() < 1e-9);
}

#[test]
fn test_perfboard_counts() {
    let painter = perfboard(&config(), &PerfboardParams::default()).unwrap();
    let board = painter.backend();
    assert_eq!(board.count_of(PrimitiveKind::Via), 90);
    assert_eq!(board.count_of(PrimitiveKind::Circle), 180);
    assert_eq!(board.summary().primitives, 271);

    let small = perfboard(&config(), &PerfboardParams {
        columns: 2,
        rows: 3,
        ..PerfboardParams::default()
    })
    .unwrap();
    assert_eq!(small.backend().count_of(PrimitiveKind::Via), 6);

    let empty = PerfboardParams {
        rows: 0,
        ..PerfboardParams::default()
    };
    assert!(perfboard(&config(), &empty).unwrap_err().is_precondition_error());
}

#[test]
fn test_perfboard_vias_are_untented() {
    let params = PerfboardParams {
        columns: 1,
        rows: 1,
        ..PerfboardParams::default()
    };
    let painter = perfboard(&config(), &params).unwrap();
    let layers: Vec<String> = painter
        .backend()
        .primitives()
        .filter(|p| p.kind() == PrimitiveKind::Circle)
        .filter_map(|p| p.layer().map(|l| l.name().to_string()))
        .collect();
    assert_eq!(layers, vec!["F_Mask", "B_Mask"]);
}

#[test]
fn test_hex_perfboard_counts() {
    let painter = hex_perfboard(&config(), &HexPerfboardParams::default()).unwrap();
    let board = painter.backend();
    // Centre hole plus six triangular sectors of 9 + 8 + ... + 1 holes.
    assert_eq!(board.count_of(PrimitiveKind::Via), 1 + 6 * 45);
    assert_eq!(board.count_of(PrimitiveKind::Line), 6);
    assert_eq!(board.summary().primitives, 819);

    let small = hex_perfboard(&config(), &HexPerfboardParams {
        rings: 2,
        ..HexPerfboardParams::default()
    })
    .unwrap();
    assert_eq!(small.backend().count_of(PrimitiveKind::Via), 1 + 6 * 3);
}

#[test]
fn test_hex_perfboard_outline_is_closed() {
    let painter = hex_perfboard(&config(), &HexPerfboardParams::default()).unwrap();
    let edges: Vec<(BoardPoint, BoardPoint)> = painter
        .backend()
        .primitives()
        .filter_map(|p| match p {
            Primitive::Line { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
        .collect();
    assert_eq!(edges.first().map(|e| e.0), edges.last().map(|e| e.1));
    for pair in edges.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
}

#[test]
fn test_lotus_leds() {
    let painter = lotus_leds(&config()).unwrap();
    let board = painter.backend();
    let summary = board.summary();
    assert_eq!(summary.footprints, 19);
    assert_eq!(summary.primitives, 67);
    assert_eq!(board.count_of(PrimitiveKind::ArcTrack), 27);
    assert_eq!(board.count_of(PrimitiveKind::Text), 2);
    assert!(board.footprints().iter().all(|f| !f.reference_visible));

    let ring = board
        .primitives()
        .find_map(|p| match p {
            Primitive::Zone { outline, .. } => Some(outline.len()),
            _ => None,
        })
        .unwrap();
    // floor(2 * pi * 18 / 0.5)
    assert_eq!(ring, 226);
}

#[test]
fn test_asterix_default() {
    let painter = asterix(&config(), &AsterixParams::default()).unwrap();
    let board = painter.backend();
    let summary = board.summary();
    assert_eq!(summary.footprints, 251);
    assert_eq!(summary.primitives, 976);
    // 5V, gnd and one data net between each pair of neighbours.
    assert_eq!(summary.nets, 253);
    assert!(board.footprint("J1").is_some());
    assert!(board.footprint("LED250").is_some());
    assert!(board.footprint("LED251").is_none());
}

#[test]
fn test_asterix_rejects_bad_params() {
    let two_arms = AsterixParams {
        arms: 2,
        ..AsterixParams::default()
    };
    assert!(asterix(&config(), &two_arms).unwrap_err().is_precondition_error());

    let inverted = AsterixParams {
        min_leds: 5,
        max_leds: 4,
        ..AsterixParams::default()
    };
    assert!(asterix(&config(), &inverted).unwrap_err().is_precondition_error());
}

#[test]
fn test_arc_grid_counts() {
    let painter = circuitpainter_designer::find_demo("arc_grid")
        .unwrap()
        .build(&config())
        .unwrap();
    let board = painter.backend();
    assert_eq!(board.count_of(PrimitiveKind::Via), 90);
    assert_eq!(board.count_of(PrimitiveKind::ArcTrack), 90);
    assert_eq!(board.summary().primitives, 273);
}

#[test]
fn test_path_demo_spreads_leds() {
    let painter = path_demo(&config()).unwrap();
    let board = painter.backend();
    assert_eq!(board.summary().footprints, 16 + 50);
    assert_eq!(board.count_of(PrimitiveKind::Line), 10 + 12);

    // Ring LEDs sit on the 15 mm circle and never double up at the seam.
    let ring = &board.footprints()[..16];
    for f in ring {
        let (x, y) = f.position.to_mm();
        let r = (x * x + y * y).sqrt();
        assert!(r <= 15.0 + 1e-3 && r > 14.0, "radius {r}");
    }
    assert_ne!(ring[0].position, ring[15].position);

    // The zigzag is open so both of its ends carry an LED.
    let zigzag = &board.footprints()[16..];
    assert_eq!(zigzag[0].position, BoardPoint::from_mm(0.0, 37.0));
    assert_eq!(zigzag[49].position, BoardPoint::from_mm(120.0, 37.0));
}

#[test]
fn test_demos_follow_the_session_config() {
    let mut config = config();
    config.library_base = "/opt/footprints".into();
    config.designators.anonymous_prefix = "U".to_string();
    config.frames.strict_pop = true;

    let painter = hello_painter(&config).unwrap();
    let board = painter.backend();
    let references: Vec<&str> = board.footprints().iter().map(|f| f.reference.as_str()).collect();
    assert_eq!(references, vec!["U1", "U2"]);
    assert!(board
        .footprints()
        .iter()
        .all(|f| f.library_path.starts_with("/opt/footprints")));

    for demo in DEMOS {
        assert!(demo.build(&config).is_ok(), "{} failed", demo.name);
    }
}
