//! Per-bit unitary rotations and the gradient-driven blur transform.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::encode;
use crate::error::{BlurError, Result};
use crate::grid::GridMap;
use crate::height::{self, HeightMap};
use crate::state::QuantumState;

/// Rotation generator for single-bit gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Apply a single-bit rotation to every amplitude pair differing at `bit`.
///
/// `Axis::X` applies `Rx(theta)`, `Axis::Y` applies `Ry(theta)`, both with
/// the usual half-angle convention. All other bits are left fixed, so
/// rotations on distinct bits commute and may be composed in any order.
///
/// # Errors
/// `BitOutOfRange` if `bit >= state.n_bits()`.
pub fn apply_rotation(
    state: &QuantumState,
    bit: usize,
    theta: f64,
    axis: Axis,
) -> Result<QuantumState> {
    let n_bits = state.n_bits();
    if bit >= n_bits {
        return Err(BlurError::BitOutOfRange { bit, n_bits });
    }

    let half = theta / 2.0;
    let cos = half.cos();
    let sin = half.sin();
    let mask = 1usize << bit;

    let mut amps = state.amplitudes().to_vec();
    for low in 0..amps.len() {
        if low & mask != 0 {
            continue;
        }
        let high = low | mask;
        let (a, b) = (amps[low], amps[high]);
        let (a_next, b_next) = match axis {
            Axis::X => {
                // Rx = [[cos, -i sin], [-i sin, cos]]
                let off = Complex64::new(0.0, -sin);
                (a * cos + b * off, a * off + b * cos)
            }
            // Ry = [[cos, -sin], [sin, cos]]
            Axis::Y => (a * cos - b * sin, a * sin + b * cos),
        };
        amps[low] = a_next;
        amps[high] = b_next;
    }

    Ok(state.with_amplitudes(amps))
}

/// Rotate every bit by `fraction * pi`, the uniform "rotate" effect.
pub fn rotate_all(state: &QuantumState, fraction: f64, axis: Axis) -> Result<QuantumState> {
    let theta = fraction * PI;
    let mut out = state.clone();
    for bit in 0..state.n_bits() {
        out = apply_rotation(&out, bit, theta, axis)?;
    }
    Ok(out)
}

/// Per-bit blur rates from the spatial gradient of `height`.
///
/// Every rectangle point with a present height adds that height to the rate
/// of each bit position on which its address differs from an in-bounds
/// 4-neighbor's. The Gray-code construction makes that exactly one bit per
/// neighbor, but the accumulation tolerates more. Rates are normalized by
/// their maximum; an all-zero rate vector is returned as-is and yields a
/// no-op blur.
pub fn blur_rates(height: &HeightMap, grid: &GridMap) -> Vec<f64> {
    let (lx, ly) = grid.shape();
    let mut rates = vec![0.0; grid.n_bits()];

    for x in 0..lx {
        for y in 0..ly {
            let Some(&h) = height.get(&(x, y)) else {
                continue;
            };
            let here = grid
                .bit_index(x, y)
                .expect("loop bounds keep coordinates inside the rectangle");
            let mut neighbors = Vec::with_capacity(4);
            if x + 1 < lx {
                neighbors.push((x + 1, y));
            }
            if x > 0 {
                neighbors.push((x - 1, y));
            }
            if y + 1 < ly {
                neighbors.push((x, y + 1));
            }
            if y > 0 {
                neighbors.push((x, y - 1));
            }
            for (nx, ny) in neighbors {
                let there = grid
                    .bit_index(nx, ny)
                    .expect("neighbors are clipped to the rectangle");
                let mut diff = here ^ there;
                while diff != 0 {
                    let bit = diff.trailing_zeros() as usize;
                    rates[bit] += h;
                    diff &= diff - 1;
                }
            }
        }
    }

    let max_rate = rates.iter().cloned().fold(0.0, f64::max);
    if max_rate > 0.0 {
        for rate in rates.iter_mut() {
            *rate /= max_rate;
        }
    }
    rates
}

/// Gradient-driven blur: derive per-bit rotation angles from `height` and
/// compose them onto `existing`, or onto a fresh encode of `height` when no
/// state is supplied.
///
/// The angle for bit `j` is `pi * rate[j] * pi * xi`. The doubled-pi factor
/// reproduces the reference behavior verbatim; downstream output depends on
/// this exact scaling.
///
/// # Errors
/// - `SizeMismatch` if `existing` has a different bit width than the grid
///   implied by `height`.
/// - Any error from encoding `height` when `existing` is absent.
pub fn blur(
    height: &HeightMap,
    xi: f64,
    axis: Axis,
    existing: Option<&QuantumState>,
    log_mode: bool,
) -> Result<QuantumState> {
    let (lx, ly) = height::grid_size(height);
    let grid = GridMap::new(lx, ly)?;
    let rates = blur_rates(height, &grid);

    let mut state = match existing {
        Some(state) => {
            if state.n_bits() != grid.n_bits() {
                return Err(BlurError::SizeMismatch {
                    lx,
                    ly,
                    n_bits: state.n_bits(),
                });
            }
            state.clone()
        }
        None => encode::encode(height, log_mode)?,
    };

    for (bit, &rate) in rates.iter().enumerate() {
        let theta = PI * rate * PI * xi;
        state = apply_rotation(&state, bit, theta, axis)?;
    }
    Ok(state)
}
