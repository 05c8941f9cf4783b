//! Probability extraction and height-map reconstruction.

use crate::error::{BlurError, Result};
use crate::grid::GridMap;
use crate::height::HeightMap;
use crate::state::QuantumState;

/// Decode a state back into a height map using its own grid size.
pub fn decode(state: &QuantumState) -> Result<HeightMap> {
    probs_to_height(
        &state.probabilities(),
        Some(state.shape()),
        state.log_mode(),
    )
}

/// Reconstruct a height map from a probability vector.
///
/// When `size` is `None` a square grid is inferred from the bit width, each
/// axis taking half the bits, as a fallback for callers that lost the size
/// metadata. Every rectangle coordinate is present in the output. Heights
/// are the probabilities rescaled by the vector's maximum, so the brightest
/// point is exactly 1.0 whenever the maximum falls inside the rectangle;
/// probabilities at padding indices contribute to the denominator but are
/// otherwise ignored, matching the reference behavior.
///
/// Log mode inverts the logarithmic encoding: with `min_h` the smallest
/// nonzero height and `base = 1 / min_h`, every nonzero height becomes
/// `max(ln(h / min_h) / ln(base), 0)`. Zero stays zero. When every nonzero
/// height equals `min_h` the base degenerates to 1 and the heights are
/// returned unchanged.
///
/// # Errors
/// - `SizeMismatch` if `size` does not fit the vector's bit width, or the
///   vector length is not a power of two.
/// - `DegenerateState` if every probability is zero.
pub fn probs_to_height(
    probs: &[f64],
    size: Option<(usize, usize)>,
    log_mode: bool,
) -> Result<HeightMap> {
    if probs.is_empty() {
        return Err(BlurError::DegenerateState);
    }
    let n_bits = probs.len().trailing_zeros() as usize;
    let (lx, ly) = match size {
        Some(size) => size,
        None => {
            let l = 1usize << (n_bits / 2);
            (l, l)
        }
    };
    let grid = GridMap::new(lx, ly)?;
    if grid.n_bits() != n_bits || probs.len() != grid.len() {
        return Err(BlurError::SizeMismatch { lx, ly, n_bits });
    }

    let max_p = probs.iter().cloned().fold(0.0, f64::max);
    if max_p == 0.0 {
        return Err(BlurError::DegenerateState);
    }

    let mut height = HeightMap::with_capacity(lx * ly);
    for x in 0..lx {
        for y in 0..ly {
            height.insert((x, y), 0.0);
        }
    }
    for (index, coord) in grid.iter() {
        height.insert(coord, probs[index] / max_p);
    }

    if log_mode {
        let min_h = height
            .values()
            .filter(|&&h| h != 0.0)
            .cloned()
            .fold(f64::INFINITY, f64::min);
        let log_base = (1.0 / min_h).ln();
        if log_base > 0.0 {
            for h in height.values_mut() {
                if *h > 0.0 {
                    *h = ((*h / min_h).ln() / log_base).max(0.0);
                }
            }
        }
    }

    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;

    fn square_heights(values: [f64; 4]) -> HeightMap {
        let mut height = HeightMap::new();
        height.insert((0, 0), values[0]);
        height.insert((0, 1), values[1]);
        height.insert((1, 0), values[2]);
        height.insert((1, 1), values[3]);
        height
    }

    #[test]
    fn test_linear_round_trip_ordering() {
        let input = square_heights([10.0, 20.0, 30.0, 40.0]);
        let state = encode::encode(&input, false).unwrap();
        let output = decode(&state).unwrap();
        // Max rescale puts the largest height at exactly 1.0 and preserves
        // the relative ordering.
        assert_eq!(output[&(1, 1)], 1.0);
        assert!(output[&(1, 1)] > output[&(1, 0)]);
        assert!(output[&(1, 0)] > output[&(0, 1)]);
        assert!(output[&(0, 1)] > output[&(0, 0)]);
        // Linear probabilities are proportional to input heights.
        assert!((output[&(0, 0)] - 0.25).abs() < 1e-9);
        assert!((output[&(0, 1)] - 0.5).abs() < 1e-9);
        assert!((output[&(1, 0)] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_decode_fills_missing_coordinates() {
        let mut input = HeightMap::new();
        input.insert((2, 1), 5.0);
        let state = encode::encode(&input, false).unwrap();
        let output = decode(&state).unwrap();
        // Every coordinate of the 3x2 rectangle is present.
        assert_eq!(output.len(), 6);
        assert_eq!(output[&(2, 1)], 1.0);
        assert_eq!(output[&(0, 0)], 0.0);
        assert_eq!(output[&(1, 0)], 0.0);
    }

    #[test]
    fn test_decode_square_inference() {
        // Size metadata lost: 4 bits infer a 4x4 grid.
        let state = {
            let mut input = HeightMap::new();
            input.insert((3, 3), 2.0);
            encode::encode(&input, false).unwrap()
        };
        let output = probs_to_height(&state.probabilities(), None, false).unwrap();
        assert_eq!(output.len(), 16);
        assert_eq!(output[&(3, 3)], 1.0);
    }

    #[test]
    fn test_decode_size_mismatch() {
        let probs = vec![0.25; 16];
        assert_eq!(
            probs_to_height(&probs, Some((2, 2)), false).unwrap_err(),
            BlurError::SizeMismatch {
                lx: 2,
                ly: 2,
                n_bits: 4
            }
        );
    }

    #[test]
    fn test_decode_all_zero_probabilities() {
        let probs = vec![0.0; 16];
        assert_eq!(
            probs_to_height(&probs, Some((4, 4)), false).unwrap_err(),
            BlurError::DegenerateState
        );
    }

    #[test]
    fn test_log_round_trip_recovers_scale() {
        // Log encode then log decode recovers heights proportional to the
        // rescaled input (up to the shared log base).
        let input = square_heights([100.0, 50.0, 25.0, 12.5]);
        let state = encode::encode(&input, true).unwrap();
        let output = decode(&state).unwrap();
        assert!((output[&(0, 0)] - 1.0).abs() < 1e-9);
        assert!(output[&(0, 0)] > output[&(0, 1)]);
        assert!(output[&(0, 1)] > output[&(1, 0)]);
        assert!(output[&(1, 0)] > output[&(1, 1)]);
        // All log-decoded heights are clamped to non-negative.
        assert!(output.values().all(|&h| h >= 0.0));
    }

    #[test]
    fn test_log_decode_zero_stays_zero() {
        let mut probs = vec![0.0; 4];
        probs[0] = 0.8;
        probs[1] = 0.2;
        let output = probs_to_height(&probs, Some((2, 2)), true).unwrap();
        let zeros = output.values().filter(|&&h| h == 0.0).count();
        assert_eq!(zeros, 3);
    }

    #[test]
    fn test_log_decode_degenerate_base() {
        // Two equal nonzero heights: min_h = 1.0, base = 1. Heights pass
        // through unchanged instead of dividing by ln(1) = 0.
        let probs = vec![0.5, 0.5, 0.0, 0.0];
        let output = probs_to_height(&probs, Some((2, 2)), true).unwrap();
        let ones = output.values().filter(|&&h| h == 1.0).count();
        assert_eq!(ones, 2);
    }
}
