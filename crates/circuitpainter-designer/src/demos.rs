//! # Demo Layouts Module
//!
//! Complete example boards built with [`CircuitPainter`] on a
//! [`MemoryBoard`]. Each demo exercises a different part of the engine:
//!
//! - `hello_painter`: outline, copper pours and two footprints with nets
//! - `perfboard`: grid of untented vias
//! - `hex_perfboard`: hexagonal via grid built from rotated frames
//! - `lotus_leds`: circular LED ring with arc tracks and mirrored labels
//! - `asterix`: star-shaped LED strip chained through pad positions
//! - `arc_grid`: serpentine arc tracks over via islands
//! - `path_demo`: LEDs spread evenly along a closed and an open path
//!
//! Footprints come from a small bundled catalog, so every demo runs without
//! a footprint library installed.

use std::f64::consts::PI;

use circuitpainter_core::{BackendError, BoardPoint, PreconditionError, Result};
use circuitpainter_settings::PainterConfig;

use crate::backend::TextStyle;
use crate::geometry::Point;
use crate::memory_board::{FootprintCatalog, MemoryBoard};
use crate::painter::{CircuitPainter, FootprintOptions};
use crate::path::PathSample;

const DEMO_CATALOG: &str = include_str!("../assets/demo_footprints.json");

/// Footprint catalog covering every part the demos place
pub fn demo_catalog(config: &PainterConfig) -> Result<FootprintCatalog> {
    FootprintCatalog::from_json(DEMO_CATALOG, config)
}

/// Fresh session on an in-memory board that knows the demo footprints
pub fn demo_painter(config: &PainterConfig) -> Result<CircuitPainter> {
    let board = MemoryBoard::with_catalog(demo_catalog(config)?);
    CircuitPainter::with_config(board, config.clone())
}

/// A named demo layout
#[derive(Debug, Clone, Copy)]
pub struct DemoLayout {
    /// Name used to select the demo
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    build: fn(&PainterConfig) -> Result<CircuitPainter>,
}

impl DemoLayout {
    /// Build the layout with its default parameters
    pub fn build(&self, config: &PainterConfig) -> Result<CircuitPainter> {
        (self.build)(config)
    }
}

/// Every demo layout, in presentation order
pub const DEMOS: &[DemoLayout] = &[
    DemoLayout {
        name: "hello_painter",
        description: "50x20 mm board with a battery holder and an LED",
        build: hello_painter,
    },
    DemoLayout {
        name: "perfboard",
        description: "Rectangular perfboard of untented vias",
        build: default_perfboard,
    },
    DemoLayout {
        name: "hex_perfboard",
        description: "Hexagonal perfboard built from rotated frames",
        build: default_hex_perfboard,
    },
    DemoLayout {
        name: "lotus_leds",
        description: "Ring of LEDs and resistors on a round board",
        build: lotus_leds,
    },
    DemoLayout {
        name: "asterix",
        description: "Star of addressable LED strips chained through pad positions",
        build: default_asterix,
    },
    DemoLayout {
        name: "arc_grid",
        description: "Serpentine arc track over a grid of via islands",
        build: arc_grid,
    },
    DemoLayout {
        name: "path_demo",
        description: "LEDs spaced evenly along a circle and a zigzag",
        build: path_demo,
    },
];

/// Look up a demo by name
pub fn find_demo(name: &str) -> Option<&'static DemoLayout> {
    DEMOS.iter().find(|demo| demo.name == name)
}

fn invalid(shape: &str, reason: impl Into<String>) -> circuitpainter_core::Error {
    PreconditionError::InvalidGeometry {
        shape: shape.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Local position of pad `index` of the footprint `reference`
fn pad_position(painter: &CircuitPainter, reference: &str, index: usize) -> Result<Point> {
    let pads = painter.get_pads(reference)?;
    let pad = pads
        .get(index)
        .copied()
        .ok_or_else(|| BackendError::UnknownHandle {
            handle: format!("{reference} pad #{index}"),
        })?;
    painter.object_position(pad)
}

/// Via with soldermask openings on both sides
fn untented_via(
    painter: &mut CircuitPainter,
    x: f64,
    y: f64,
    drill: f64,
    ring: f64,
) -> Result<()> {
    painter.layer("F_Cu")?;
    painter.via_with(x, y, None, drill, ring)?;

    // Vias are tented by default; open the mask over each one.
    painter.fill();
    painter.layer("F_Mask")?;
    painter.circle(x, y, ring / 2.0)?;
    painter.layer("B_Mask")?;
    painter.circle(x, y, ring / 2.0)?;
    Ok(())
}

pub fn hello_painter(config: &PainterConfig) -> Result<CircuitPainter> {
    let mut painter = demo_painter(config)?;

    // Keep the board away from the sheet corner.
    painter.translate(50.0, 50.0);

    painter.layer("Edge_Cuts")?;
    painter.rect(0.0, 0.0, 50.0, 20.0)?;

    painter.layer("F_Cu")?;
    painter.rect_zone(0.0, 0.0, 50.0, 20.0, Some("vbat"))?;
    painter.layer("B_Cu")?;
    painter.rect_zone(0.0, 0.0, 50.0, 20.0, Some("gnd"))?;

    painter.footprint(
        10.0,
        10.0,
        "Battery",
        "BatteryHolder_Keystone_3001_1x12mm",
        FootprintOptions::new().nets(["gnd", "gnd", "vbat"]),
    )?;
    painter.footprint(
        30.0,
        10.0,
        "LED_THT",
        "LED_D5.0mm",
        FootprintOptions::new().angle(90.0).nets(["gnd", "vbat"]),
    )?;

    Ok(painter)
}

/// Parameters for rectangular perfboards
#[derive(Debug, Clone, PartialEq)]
pub struct PerfboardParams {
    /// Number of holes along X
    pub columns: usize,
    /// Number of holes along Y
    pub rows: usize,
    /// Hole pitch (mm)
    pub spacing: f64,
    /// Drill diameter (mm)
    pub hole_diameter: f64,
    /// Annular ring diameter (mm)
    pub ring_diameter: f64,
}

impl Default for PerfboardParams {
    fn default() -> Self {
        Self {
            columns: 9,
            rows: 10,
            spacing: 2.54,
            hole_diameter: 1.02,
            ring_diameter: 2.0,
        }
    }
}

fn default_perfboard(config: &PainterConfig) -> Result<CircuitPainter> {
    perfboard(config, &PerfboardParams::default())
}

pub fn perfboard(config: &PainterConfig, params: &PerfboardParams) -> Result<CircuitPainter> {
    if params.columns == 0 || params.rows == 0 {
        return Err(invalid("perfboard", "needs at least one row and column"));
    }

    let mut painter = demo_painter(config)?;
    let spacing = params.spacing;

    painter.layer("Edge_Cuts")?;
    painter.rect(
        0.0,
        0.0,
        spacing * params.columns as f64,
        spacing * params.rows as f64,
    )?;

    painter.width(0.05)?;
    for column in 0..params.columns {
        for row in 0..params.rows {
            untented_via(
                &mut painter,
                spacing * (column as f64 + 0.5),
                spacing * (row as f64 + 0.5),
                params.hole_diameter,
                params.ring_diameter,
            )?;
        }
    }

    Ok(painter)
}

/// Parameters for hexagonal perfboards
#[derive(Debug, Clone, PartialEq)]
pub struct HexPerfboardParams {
    /// Number of hex rings around the centre hole
    pub rings: usize,
    /// Hole pitch (mm)
    pub spacing: f64,
    /// Drill diameter (mm)
    pub hole_diameter: f64,
    /// Annular ring diameter (mm)
    pub ring_diameter: f64,
}

impl Default for HexPerfboardParams {
    fn default() -> Self {
        Self {
            rings: 9,
            spacing: 2.54,
            hole_diameter: 1.02,
            ring_diameter: 2.0,
        }
    }
}

fn default_hex_perfboard(config: &PainterConfig) -> Result<CircuitPainter> {
    hex_perfboard(config, &HexPerfboardParams::default())
}

pub fn hex_perfboard(
    config: &PainterConfig,
    params: &HexPerfboardParams,
) -> Result<CircuitPainter> {
    let mut painter = demo_painter(config)?;
    let spacing = params.spacing;

    // Outline corners, collected in board coordinates.
    painter.layer("Edge_Cuts")?;
    let corners: Vec<BoardPoint> = (0..=6)
        .map(|step| {
            let mut frame = painter.scoped_frame();
            frame.rotate(60.0 * step as f64);
            frame.local_to_world((params.rings + 1) as f64 * spacing, 0.0)
        })
        .collect();
    for edge in corners.windows(2) {
        let a = painter.world_to_local(edge[0]);
        let b = painter.world_to_local(edge[1]);
        painter.line(a.x, a.y, b.x, b.y)?;
    }

    painter.width(0.05)?;
    untented_via(&mut painter, 0.0, 0.0, params.hole_diameter, params.ring_diameter)?;

    // One sixth of the grid per rotation.
    let (sin60, cos60) = 60f64.to_radians().sin_cos();
    for sector in 0..6 {
        let mut frame = painter.scoped_frame();
        frame.rotate(60.0 * sector as f64);
        frame.translate(spacing, 0.0);
        for row in 0..params.rings {
            for column in 0..params.rings - row {
                untented_via(
                    &mut frame,
                    column as f64 * spacing,
                    0.0,
                    params.hole_diameter,
                    params.ring_diameter,
                )?;
            }
            frame.translate(spacing * cos60, -spacing * sin60);
        }
    }

    Ok(painter)
}

pub fn lotus_leds(config: &PainterConfig) -> Result<CircuitPainter> {
    let mut painter = demo_painter(config)?;
    painter.no_designators();

    let radius = 18.0;
    let leds = 9;
    let step = (360.0 / leds as f64).ceil() as usize;

    let start_angle = 190.0;
    let end_angle = 300.0;
    let resistor_angle = (end_angle - start_angle) / 3.0 + start_angle;
    let led_angle = (end_angle - start_angle) * 2.0 / 3.0 + start_angle;

    for angle in (0..360).step_by(step) {
        let led_net = format!("led_{angle}");
        painter.layer("F_Cu")?;
        painter.width(0.3)?;

        {
            let mut petal = painter.scoped_frame();
            petal.rotate(angle as f64);
            petal.translate(radius / 2.0, 0.0);

            for (at, library, part, nets) in [
                (
                    resistor_angle,
                    "Resistor_SMD",
                    "R_0805_2012Metric",
                    ["gnd".to_string(), led_net.clone()],
                ),
                (
                    led_angle,
                    "LED_SMD",
                    "LED_0805_2012Metric",
                    [led_net.clone(), "vcc".to_string()],
                ),
            ] {
                let mut part_frame = petal.scoped_frame();
                part_frame.rotate(at);
                part_frame.translate(radius / 2.0, 0.0);
                part_frame.rotate(90.0);
                part_frame.footprint(0.0, 0.0, library, part, FootprintOptions::new().nets(nets))?;
            }

            petal.arc_track(0.0, 0.0, radius / 2.0, end_angle, led_angle + 3.0, None)?;
            petal.arc_track(0.0, 0.0, radius / 2.0, led_angle - 3.0, resistor_angle + 3.0, None)?;
            petal.arc_track(0.0, 0.0, radius / 2.0, resistor_angle - 3.0, start_angle, None)?;

            for at in [start_angle, end_angle] {
                let mut via_frame = petal.scoped_frame();
                via_frame.rotate(at);
                via_frame.translate(radius / 2.0, 0.0);
                via_frame.via(0.0, 0.0, None)?;
            }

            petal.layer("F_SilkS")?;
            petal.width(0.6)?;
            petal.arc(0.0, 0.0, radius / 2.0, start_angle, end_angle)?;
        }

        let mut mirror = painter.scoped_frame();
        mirror.rotate(angle as f64);
        mirror.translate(-radius / 2.0, 0.0);
        mirror.arc(0.0, 0.0, radius / 2.0, 180.0 - end_angle, 180.0 - start_angle)?;
    }

    // Back side is one big vcc pour carrying the coin cell.
    painter.layer("B_Cu")?;
    painter.circle_zone(0.0, 0.0, radius, Some("vcc"))?;
    painter.footprint(
        0.0,
        0.0,
        "Battery",
        "BatteryHolder_Keystone_3002_1x2032",
        FootprintOptions::new().nets(["vcc", "vcc", "gnd"]),
    )?;

    painter.layer("B_SilkS")?;
    painter.text(0.0, 12.0, "Made with CircuitPainter", 0.0, TextStyle::mirrored())?;
    painter.text(0.0, 14.0, "HaD Berlin 2024", 0.0, TextStyle::mirrored())?;

    painter.layer("Edge_Cuts")?;
    painter.circle(0.0, 0.0, radius)?;

    Ok(painter)
}

/// Parameters for the asterix LED star
#[derive(Debug, Clone, PartialEq)]
pub struct AsterixParams {
    /// Number of arms
    pub arms: usize,
    /// Fewest LEDs on one arm
    pub min_leds: usize,
    /// Most LEDs on one arm
    pub max_leds: usize,
}

impl Default for AsterixParams {
    fn default() -> Self {
        Self {
            arms: 25,
            min_leds: 8,
            max_leds: 12,
        }
    }
}

impl AsterixParams {
    /// LEDs on `arm`, cycling through the allowed range
    pub fn leds_on_arm(&self, arm: usize) -> usize {
        self.min_leds + arm % (self.max_leds - self.min_leds + 1)
    }
}

fn default_asterix(config: &PainterConfig) -> Result<CircuitPainter> {
    asterix(config, &AsterixParams::default())
}

pub fn asterix(config: &PainterConfig, params: &AsterixParams) -> Result<CircuitPainter> {
    let AsterixParams {
        arms,
        min_leds,
        max_leds,
    } = *params;
    if arms < 3 {
        return Err(invalid("asterix", format!("needs at least 3 arms, got {arms}")));
    }
    if min_leds == 0 || min_leds > max_leds {
        return Err(invalid(
            "asterix",
            format!("LED range {min_leds}..={max_leds} is empty"),
        ));
    }

    const LED_LIBRARY: &str = "LED_SMD";
    const LED_PART: &str = "LED_WS2812B_PLCC4_5.0x5.0mm_P3.2mm";
    let led_spacing = 10.0;
    let arm_width = 8.0;
    let half = arm_width / 2.0;

    let mut painter = demo_painter(config)?;
    painter.translate(100.0, 100.0);

    let sides = arms as f64;
    let hub_radius = half / (PI / sides).tan();
    let corner_radius = half / (PI / sides).sin();
    let origin = Point::new(0.0, 0.0);
    let hub: Vec<Point> = (0..arms)
        .map(|i| origin.polar_offset(corner_radius, 360.0 / sides * (i as f64 + 0.5)))
        .collect();

    painter.layer("F_Cu")?;
    painter.poly_zone(&hub, Some("5V"))?;
    painter.layer("B_Cu")?;
    painter.poly_zone(&hub, Some("gnd"))?;

    let mut led_num = 1;

    {
        let mut frame = painter.scoped_frame();
        frame.translate(hub_radius - 4.0, 0.0);
        frame.footprint(
            0.0,
            2.0,
            "Connector_JST",
            "JST_PH_B3B-PH-K_1x03_P2.00mm_Vertical",
            FootprintOptions::new()
                .angle(90.0)
                .nets(["5V".to_string(), format!("d{led_num}"), "gnd".to_string()])
                .reference("J1"),
        )?;

        frame.layer("B_SilkS")?;
        frame.text(-5.0, -2.0, "GND", 0.0, TextStyle::mirrored())?;
        frame.text(-5.0, 0.0, "DIN", 0.0, TextStyle::mirrored())?;
        frame.text(-5.0, 2.0, "5V", 0.0, TextStyle::mirrored())?;
    }

    let mut last_data: Option<BoardPoint> = None;

    // Walk the arms backwards so the data chain runs around the hub.
    for arm in (0..arms).rev() {
        let leds = params.leds_on_arm(arm);
        let arm_length = leds as f64 * led_spacing;

        let mut frame = painter.scoped_frame();
        frame.rotate((arm + 1) as f64 / sides * 360.0);
        frame.translate(hub_radius, 0.0);

        frame.width(0.1)?;
        frame.layer("Edge_Cuts")?;
        frame.line(0.0, half, arm_length, half)?;
        frame.line(arm_length, half, arm_length, -half)?;
        frame.line(arm_length, -half, 0.0, -half)?;

        frame.layer("F_Cu")?;
        frame.rect_zone(0.0, -half, arm_length, half, Some("5V"))?;
        frame.layer("B_Cu")?;
        frame.rect_zone(0.0, -half, arm_length, half, Some("gnd"))?;

        frame.width(0.254)?;
        frame.layer("F_Cu")?;
        let first_led = led_num;
        for led in 0..leds {
            let reference = format!("LED{led_num}");
            frame.footprint(
                (led as f64 + 0.5) * led_spacing,
                0.0,
                LED_LIBRARY,
                LED_PART,
                FootprintOptions::new()
                    .angle(180.0)
                    .nets([
                        "5V".to_string(),
                        format!("d{}", led_num + 1),
                        "gnd".to_string(),
                        format!("d{led_num}"),
                    ])
                    .reference(reference.as_str()),
            )?;

            // Ground via beside each LED.
            let gnd = pad_position(&frame, &reference, 2)?;
            frame.track(gnd.x, gnd.y, gnd.x + 1.5, gnd.y, None)?;
            frame.via(gnd.x + 1.5, gnd.y, None)?;

            led_num += 1;
        }
        let last_led = led_num - 1;

        for a in first_led..last_led {
            let src = pad_position(&frame, &format!("LED{a}"), 1)?;
            let dst = pad_position(&frame, &format!("LED{}", a + 1), 3)?;
            frame.track(src.x, src.y, dst.x, dst.y, None)?;
        }

        let first = pad_position(&frame, &format!("LED{first_led}"), 3)?;
        if arm == arms - 1 {
            let din = pad_position(&frame, "J1", 1)?;
            frame.track(first.x, first.y, din.x, din.y, None)?;
        } else {
            frame.track(first.x, first.y, first.x, half - 1.0, None)?;
            frame.track(first.x, half - 1.0, -1.0, half - 1.0, None)?;
        }

        if let Some(world) = last_data.take() {
            let from = frame.world_to_local(world);
            frame.track(from.x, from.y, -1.0, half - 1.0, None)?;
        }

        if arm != 0 {
            let last = pad_position(&frame, &format!("LED{last_led}"), 1)?;
            frame.track(last.x, last.y, last.x, -half + 1.0, None)?;
            frame.track(last.x, -half + 1.0, -1.0, -half + 1.0, None)?;
            last_data = Some(frame.local_to_world(-1.0, -half + 1.0));
        }
    }

    Ok(painter)
}

pub fn arc_grid(config: &PainterConfig) -> Result<CircuitPainter> {
    let mut painter = demo_painter(config)?;
    painter.translate(50.0, 50.0);

    let columns = 9;
    let rows = 10;
    let spacing = 5.0;
    let (right, bottom) = (columns as f64 * spacing, rows as f64 * spacing);

    painter.layer("Edge_Cuts")?;
    painter.rect(-spacing, -spacing, right, bottom)?;
    painter.layer("F_Cu")?;
    painter.rect_zone(-spacing, -spacing, right, bottom, Some("vbat"))?;
    painter.layer("B_Cu")?;
    painter.rect_zone(-spacing, -spacing, right, bottom, Some("gnd"))?;

    painter.layer("F_Cu")?;
    painter.width(0.4)?;
    for column in 0..columns {
        for row in 0..rows {
            let mut cell = painter.scoped_frame();
            cell.translate(column as f64 * spacing, row as f64 * spacing);

            cell.via(0.0, 0.0, Some("gnd"))?;
            cell.circle_zone(0.0, 0.0, 2.0, Some("gnd"))?;

            let even = column % 2 == 0;
            let (start, end) = if row == 0 && even {
                (180.0, 450.0)
            } else if row == rows - 1 && even {
                (0.0, 270.0)
            } else if row == rows - 1 {
                (180.0, 270.0)
            } else if row == 0 {
                (0.0, 90.0)
            } else if row % 2 == 0 {
                (270.0, 450.0)
            } else {
                (90.0, 270.0)
            };
            cell.arc_track(0.0, 0.0, spacing / 2.0, start, end, None)?;
        }
    }

    Ok(painter)
}

pub fn path_demo(config: &PainterConfig) -> Result<CircuitPainter> {
    let mut painter = demo_painter(config)?;
    painter.layer("F_Cu")?;

    let place_led = |p: &mut CircuitPainter, _: &PathSample| -> Result<()> {
        p.footprint(
            0.0,
            0.0,
            "LED_SMD",
            "LED_0805_2012Metric",
            FootprintOptions::new().nets(["led_x", "vcc"]),
        )?;
        Ok(())
    };

    let radius = 15.0;
    let divisions = 10;
    let ring = painter.path(
        (0..=divisions)
            .map(|d| Point::default().polar_offset(radius, 360.0 * d as f64 / divisions as f64))
            .collect(),
    )?;
    painter.polyline(ring.points())?;
    ring.place_evenly(&mut painter, 16, place_led)?;

    let zigzag = painter.path(
        (0..13)
            .map(|i| Point::new(10.0 * i as f64, if i % 2 == 1 { 13.0 } else { -13.0 }))
            .collect(),
    )?;
    painter.translate(0.0, 50.0);
    painter.polyline(zigzag.points())?;
    zigzag.place_evenly(&mut painter, 50, place_led)?;

    Ok(painter)
}
