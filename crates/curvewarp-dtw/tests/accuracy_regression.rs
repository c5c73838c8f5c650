//! Accuracy regression tests for curvewarp-dtw.
//!
//! These tests verify that algorithmic changes do not degrade DTW accuracy.
//! Reference values were computed from the implementation and are hardcoded
//! to catch regressions.

use curvewarp_dtw::{Dtw, WarpingPath, WarpingStep, dtw, dtw_owp, sdtw, sdtw_owp};
use curvewarp_geom::Curve;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn curve(rows: Vec<Vec<f64>>) -> Curve {
    Curve::try_from(rows).expect("valid test curve")
}

fn linspace(from: [f64; 2], to: [f64; 2], n: usize) -> Curve {
    let rows = (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            vec![from[0] + (to[0] - from[0]) * t, from[1] + (to[1] - from[1]) * t]
        })
        .collect();
    curve(rows)
}

fn random_curve(rng: &mut ChaCha8Rng, dim: usize) -> Curve {
    let n = rng.gen_range(1..=8);
    let coords: Vec<f64> = (0..n * dim).map(|_| rng.gen_range(-2.0..2.0)).collect();
    Curve::new(coords, dim).expect("finite random coordinates")
}

// ---------------------------------------------------------------------------
// a) dtw_distances_match_known_values
// ---------------------------------------------------------------------------

/// Euclidean and squared DTW for hand-picked pairs in one to three dimensions.
#[test]
fn dtw_distances_match_known_values() {
    let cases: Vec<(Curve, Curve, f64, f64)> = vec![
        // constant offset
        (
            curve(vec![vec![0.0], vec![0.0], vec![0.0]]),
            curve(vec![vec![1.0], vec![1.0], vec![1.0]]),
            3.0,
            3.0,
        ),
        // reversed
        (
            curve(vec![vec![1.0], vec![2.0], vec![3.0]]),
            curve(vec![vec![3.0], vec![2.0], vec![1.0]]),
            4.0,
            8.0,
        ),
        // planar polylines of different lengths
        (
            curve(vec![vec![0.0, 0.0], vec![1.0, 2.0], vec![3.0, 1.0]]),
            curve(vec![
                vec![0.5, 0.0],
                vec![2.0, 1.0],
                vec![2.5, 3.0],
                vec![3.0, 0.5],
            ]),
            4.21698920010509,
            5.75,
        ),
        // three dimensions
        (
            curve(vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 1.0, 1.0],
                vec![2.0, 0.0, 2.0],
            ]),
            curve(vec![vec![0.0, 0.0, 1.0], vec![2.0, 1.0, 1.0]]),
            3.414213562373095,
            4.0,
        ),
        // densely sampled line against its offset chord
        (
            curve(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]]),
            curve(vec![vec![0.0, 1.0], vec![3.0, 1.0]]),
            4.82842712474619,
            6.000000000000001,
        ),
    ];

    for (i, (a, b, exp_dtw, exp_sdtw)) in cases.iter().enumerate() {
        let d = dtw(a, b).unwrap();
        assert!(
            (d - exp_dtw).abs() < 1e-10,
            "pair {i}: dtw {d:.15}, expected {exp_dtw:.15}"
        );
        let s = sdtw(a, b).unwrap();
        assert!(
            (s - exp_sdtw).abs() < 1e-10,
            "pair {i}: sdtw {s:.15}, expected {exp_sdtw:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// b) offset_lines_of_different_resolution
// ---------------------------------------------------------------------------

/// Two parallel unit-offset lines sampled with 10 and 20 vertices: every one
/// of the 20 path steps pays at least the unit offset.
#[test]
fn offset_lines_of_different_resolution() {
    let a = linspace([0.0, 0.0], [1.0, 0.0], 10);
    let b = linspace([0.0, 1.0], [1.0, 1.0], 20);

    let (d, path) = dtw_owp(&a, &b).unwrap();
    assert!((d - 20.009742110434196).abs() < 1e-10, "got {d:.15}");
    assert_eq!(path.len(), 20);

    let (s, _) = sdtw_owp(&a, &b).unwrap();
    assert!((s - 20.019493177387915).abs() < 1e-10, "got {s:.15}");
    assert!((s / path.len() as f64).sqrt() >= 0.0);
}

// ---------------------------------------------------------------------------
// c) rolling_matches_full_matrix
// ---------------------------------------------------------------------------

/// `distance()` (rolling buffer) must match `distance_and_path().0` (full
/// matrix) exactly on random curves.
#[test]
fn rolling_matches_full_matrix() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for trial in 0..25 {
        let dim = rng.gen_range(1..=4);
        let a = random_curve(&mut rng, dim);
        let b = random_curve(&mut rng, dim);
        for calc in [Dtw::euclidean(), Dtw::squared()] {
            let rolling = calc.distance(a.as_view(), b.as_view()).unwrap();
            let (full, _) = calc.distance_and_path(a.as_view(), b.as_view()).unwrap();
            assert_eq!(
                rolling.to_bits(),
                full.to_bits(),
                "trial {trial}: rolling {rolling:.15} != full {full:.15}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// d) random_curves_properties
// ---------------------------------------------------------------------------

/// Identity, symmetry and warping path shape on seeded random curves.
#[test]
fn random_curves_properties() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for trial in 0..25 {
        let dim = rng.gen_range(1..=3);
        let a = random_curve(&mut rng, dim);
        let b = random_curve(&mut rng, dim);

        assert_eq!(dtw(&a, &a).unwrap(), 0.0, "trial {trial}");
        assert_eq!(sdtw(&a, &a).unwrap(), 0.0, "trial {trial}");

        let ab = dtw(&a, &b).unwrap();
        let ba = dtw(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-12, "trial {trial}: {ab} vs {ba}");

        let (_, path) = dtw_owp(&a, &b).unwrap();
        check_path(&path, a.len(), b.len());
    }
}

fn check_path(path: &WarpingPath, n: usize, m: usize) {
    let steps = path.steps();
    assert_eq!(steps.first(), Some(&WarpingStep { a: 0, b: 0 }));
    assert_eq!(steps.last(), Some(&WarpingStep { a: n - 1, b: m - 1 }));
    for w in steps.windows(2) {
        let da = w[1].a - w[0].a;
        let db = w[1].b - w[0].b;
        assert!(da <= 1 && db <= 1 && da + db >= 1, "bad step {w:?}");
    }
    assert!(path.len() >= n.max(m) && path.len() <= n + m - 1);
}

// ---------------------------------------------------------------------------
// e) pairwise_matrix
// ---------------------------------------------------------------------------

#[test]
fn pairwise_matrix_matches_individual() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut curves: Vec<Curve> = (0..8).map(|_| random_curve(&mut rng, 2)).collect();
    curves.push(Curve::empty(2).unwrap());

    let calc = Dtw::squared();
    let dm = calc.pairwise(&curves).unwrap();
    assert_eq!(dm.len(), curves.len());
    for (i, j, d) in dm.iter() {
        let expected = calc.distance(curves[i].as_view(), curves[j].as_view()).unwrap();
        if expected.is_nan() {
            assert!(d.is_nan(), "pair ({i}, {j}) should be NaN");
        } else {
            assert_eq!(d.to_bits(), expected.to_bits(), "pair ({i}, {j})");
        }
    }
}

// ---------------------------------------------------------------------------
// f) warping_path_serializes
// ---------------------------------------------------------------------------

#[test]
fn warping_path_serializes() {
    let a = curve(vec![vec![0.0], vec![1.0], vec![2.0]]);
    let b = curve(vec![vec![0.0], vec![2.0]]);
    let (_, path) = dtw_owp(&a, &b).unwrap();
    let json = serde_json::to_string(&path).unwrap();
    let back: WarpingPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
}
