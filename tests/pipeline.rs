//! End-to-end pipeline tests: image in, transformed image out.

use quantum_blur::{decode, encode, evolve, Axis, ChannelStates, HeightMap, ImageGrid};

/// 4x4 grayscale image with a single bright pixel at (2, 2).
fn single_bright_pixel() -> ImageGrid {
    let mut image = ImageGrid::new(4, 4, 1);
    image.set(2, 2, 0, 255);
    image
}

#[test]
fn test_blur_spreads_to_neighbors() {
    let image = single_bright_pixel();
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    states.blur(0.5, Axis::X).unwrap();
    let out = states.to_image().unwrap();

    // The bright pixel stays the brightest,
    // strictly above its 4-adjacent neighbors.
    let center = out.get(2, 2, 0);
    assert_eq!(center, 255);
    for (nx, ny) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        let neighbor = out.get(nx, ny, 0);
        assert!(neighbor > 0, "neighbor ({}, {}) stayed black", nx, ny);
        assert!(neighbor < center);
    }
    // Every other pixel is darker than the direct neighbors are bright.
    for x in 0..4 {
        for y in 0..4 {
            assert!(out.get(x, y, 0) <= center);
        }
    }
}

#[test]
fn test_blur_y_axis_spreads_too() {
    let image = single_bright_pixel();
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    states.blur(0.5, Axis::Y).unwrap();
    let out = states.to_image().unwrap();
    assert_eq!(out.get(2, 2, 0), 255);
    assert!(out.get(1, 2, 0) > 0);
    assert!(out.get(2, 3, 0) > 0);
}

#[test]
fn test_grayscale_round_trip_matches_single_channel() {
    let mut image = ImageGrid::new(4, 4, 1);
    for x in 0..4 {
        for y in 0..4 {
            image.set(x, y, 0, (16 * (x + 4 * y)) as u8);
        }
    }

    // Single-channel pipeline by hand.
    let mut heights = HeightMap::new();
    for x in 0..4 {
        for y in 0..4 {
            heights.insert((x, y), image.get(x, y, 0) as f64);
        }
    }
    let direct = decode::decode(&encode::encode(&heights, false).unwrap()).unwrap();

    // Orchestrated pipeline.
    let states = ChannelStates::from_image(&image, false).unwrap();
    let out = states.to_image().unwrap();

    assert_eq!(out.channels(), 3);
    for x in 0..4 {
        for y in 0..4 {
            let expected = (255.0 * direct[&(x, y)]) as u8;
            assert_eq!(out.get(x, y, 0), expected);
            assert_eq!(out.get(x, y, 1), 0);
            assert_eq!(out.get(x, y, 2), 0);
        }
    }
}

#[test]
fn test_rotate_fraction_zero_is_identity() {
    let mut image = ImageGrid::new(4, 4, 3);
    for x in 0..4 {
        for y in 0..4 {
            image.set(x, y, 0, (60 + 10 * x) as u8);
            image.set(x, y, 1, (30 + 20 * y) as u8);
            image.set(x, y, 2, 200);
        }
    }
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    let before = states.to_image().unwrap();
    states.rotate(0.0, Axis::X).unwrap();
    let after = states.to_image().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_rotate_moves_probability() {
    let image = single_bright_pixel();
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    states.rotate(0.25, Axis::X).unwrap();
    let out = states.to_image().unwrap();
    // A quarter-pi sweep leaks brightness off the single bright pixel.
    let lit = (0..4)
        .flat_map(|x| (0..4).map(move |y| (x, y)))
        .filter(|&(x, y)| out.get(x, y, 0) > 0)
        .count();
    assert!(lit > 1);
}

#[test]
fn test_log_mode_end_to_end() {
    let mut image = ImageGrid::new(4, 4, 1);
    for x in 0..4 {
        for y in 0..4 {
            image.set(x, y, 0, (1 + 16 * (x + 4 * y)) as u8);
        }
    }
    let mut states = ChannelStates::from_image(&image, true).unwrap();
    assert!(states.log_mode());
    states.blur(0.1, Axis::X).unwrap();
    let out = states.to_image().unwrap();
    // Log decode keeps the output within range and non-degenerate.
    let lit = out.data().iter().filter(|&&v| v > 0).count();
    assert!(lit > 0);
}

#[test]
fn test_repeated_blur_keeps_state_normalized() {
    let image = single_bright_pixel();
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    for _ in 0..3 {
        states.blur(0.2, Axis::X).unwrap();
    }
    for state in states.states() {
        let total: f64 = state.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_custom_transform_via_apply() {
    let image = single_bright_pixel();
    let mut states = ChannelStates::from_image(&image, false).unwrap();
    // A bespoke transform: rotate only bit 0.
    states
        .apply(|state| evolve::apply_rotation(state, 0, 0.7, Axis::Y))
        .unwrap();
    let out = states.to_image().unwrap();
    assert_eq!(out.get(2, 2, 0), 255);
}
