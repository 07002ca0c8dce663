// Path sampler behaviour: spacing rule, closed paths and frame handling around callbacks

use circuitpainter_core::{Error, PreconditionError};
use circuitpainter_designer::{FrameHost, FrameStack, PathSampler, Point};
use proptest::prelude::*;

fn sampler(points: &[(f64, f64)]) -> PathSampler {
    PathSampler::new(points.iter().copied().map(Point::from).collect()).unwrap()
}

fn square() -> PathSampler {
    sampler(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0),
    ])
}

#[test]
fn test_place_every_projects_each_sample() {
    let line = sampler(&[(0.0, 0.0), (10.0, 0.0)]);
    let mut frames = FrameStack::new();
    let mut placed = Vec::new();

    let count = line
        .place_every(&mut frames, 5.0, |frames: &mut FrameStack, _| {
            placed.push(frames.project(0.0, 0.0));
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        placed,
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0)
        ]
    );
    assert_eq!(frames.depth(), 0);
}

#[test]
fn test_callback_frame_faces_along_the_path() {
    let up = sampler(&[(2.0, 0.0), (2.0, 6.0)]);
    let mut frames = FrameStack::new();
    let mut ahead = Vec::new();

    up.place_every(&mut frames, 3.0, |frames: &mut FrameStack, sample| {
        assert!((frames.current_angle() - sample.angle).abs() < 1e-9);
        // One unit along local +X is one unit further up the path.
        ahead.push(frames.project(1.0, 0.0));
        Ok(())
    })
    .unwrap();

    assert_eq!(ahead.len(), 3);
    for (p, y) in ahead.iter().zip([1.0, 4.0, 7.0]) {
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!((p.y - y).abs() < 1e-9);
    }
}

#[test]
fn test_closed_square_place_evenly_four() {
    let path = square();
    let mut frames = FrameStack::new();
    let mut corners = Vec::new();

    let count = path
        .place_evenly(&mut frames, 4, |frames: &mut FrameStack, sample| {
            assert!((sample.distance - 10.0 * corners.len() as f64).abs() < 1e-9);
            corners.push(frames.project(0.0, 0.0));
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 4);
    assert!((corners[0].x).abs() < 1e-9 && (corners[0].y).abs() < 1e-9);
    assert!((corners[2].x - 10.0).abs() < 1e-9 && (corners[2].y - 10.0).abs() < 1e-9);
}

#[test]
fn test_open_path_place_evenly_hits_both_ends() {
    let path = sampler(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
    let distances: Vec<f64> = path
        .samples(path.spacing_for(5).unwrap())
        .unwrap()
        .map(|s| s.distance)
        .collect();
    assert_eq!(distances.len(), 5);
    assert!(distances[0].abs() < 1e-9);
    assert!((distances[4] - 11.0).abs() < 1e-9);
}

#[test]
fn test_callback_error_stops_and_restores() {
    let line = sampler(&[(0.0, 0.0), (10.0, 0.0)]);
    let mut frames = FrameStack::new();
    frames.translate(1.0, 1.0);
    let mut calls = 0;

    let err = line
        .place_every(&mut frames, 2.0, |frames: &mut FrameStack, _| {
            calls += 1;
            frames.push();
            frames.push();
            if calls == 2 {
                return Err(Error::other("stop"));
            }
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err, Error::other("stop"));
    assert_eq!(calls, 2);
    assert_eq!(frames.frames().depth(), 0);
    assert_eq!(frames.project(0.0, 0.0), Point::new(1.0, 1.0));
}

#[test]
fn test_precondition_errors() {
    let mut frames = FrameStack::new();
    let line = sampler(&[(0.0, 0.0), (10.0, 0.0)]);

    let err = line
        .place_every(&mut frames, 0.0, |_: &mut FrameStack, _| Ok(()))
        .unwrap_err();
    assert!(err.is_precondition_error());

    let err = line
        .place_evenly(&mut frames, 1, |_: &mut FrameStack, _| Ok(()))
        .unwrap_err();
    assert_eq!(
        err,
        Error::Precondition(PreconditionError::InvalidCount {
            count: 1,
            minimum: 2
        })
    );

    assert_eq!(
        square().spacing_for(0).unwrap_err(),
        PreconditionError::InvalidCount {
            count: 0,
            minimum: 1
        }
    );

    assert_eq!(
        PathSampler::new(Vec::new()).unwrap_err(),
        PreconditionError::TooFewPoints { count: 0 }
    );
}

#[test]
fn test_closed_tolerance_is_configurable() {
    let almost = sampler(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.01)]);
    assert!(!almost.is_closed());
    assert!(almost.with_tolerance(0.1).is_closed());
}

#[test]
fn test_closed_path_keeps_samples_just_short_of_the_end() {
    let distances: Vec<f64> = square()
        .samples(39.9995)
        .unwrap()
        .map(|s| s.distance)
        .collect();
    assert_eq!(distances.len(), 2);
    assert_eq!(distances[0], 0.0);
    assert!((distances[1] - 39.9995).abs() < 1e-9);
}

#[test]
fn test_closed_path_fine_spacing_drops_only_the_end() {
    let samples: Vec<f64> = square()
        .samples(0.0005)
        .unwrap()
        .map(|s| s.distance)
        .collect();
    assert_eq!(samples.len(), 80_000);
    let last = samples.last().copied().unwrap();
    assert!((last - 39.9995).abs() < 1e-6, "last sample at {last}");
}

#[test]
fn test_closed_path_within_tolerance_drops_end_sample() {
    // Ends 0.5 mm short of the start; closed only with a wider tolerance.
    let loose = sampler(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.5)]);
    let total = loose.total_length();
    assert_eq!(loose.samples(total / 4.0).unwrap().count(), 5);

    let closed = loose.with_tolerance(1.0);
    assert!(closed.is_closed());
    assert_eq!(closed.samples(total / 4.0).unwrap().count(), 4);
}

proptest! {
    #[test]
    fn total_length_is_sum_of_segments(
        points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..20),
    ) {
        let points: Vec<Point> = points.into_iter().map(Point::from).collect();
        prop_assume!(points.windows(2).any(|w| w[0].distance_to(&w[1]) > 1e-6));
        let path = PathSampler::new(points).unwrap();

        let sum: f64 = (0..path.segment_count())
            .map(|i| path.segment_length(i).unwrap())
            .sum();
        prop_assert!((path.total_length() - sum).abs() < 1e-9);
    }

    #[test]
    fn samples_are_spaced_evenly(
        length in 1.0f64..200.0,
        spacing in 0.5f64..20.0,
    ) {
        let path = PathSampler::new(vec![Point::new(0.0, 0.0), Point::new(length, 0.0)]).unwrap();
        let distances: Vec<f64> = path.samples(spacing).unwrap().map(|s| s.distance).collect();

        prop_assert_eq!(distances.len(), (length / spacing + 1e-9).floor() as usize + 1);
        for (i, d) in distances.iter().enumerate() {
            prop_assert!((d - i as f64 * spacing).abs() < 1e-6);
        }
    }
}
