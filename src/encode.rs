//! Height-map to amplitude-vector encoding.

use num_complex::Complex64;

use crate::error::{BlurError, Result};
use crate::grid::GridMap;
use crate::height::{self, HeightMap};
use crate::state::QuantumState;

/// Default cutoff below which rescaled heights are excluded from the
/// log-mode minimum.
pub const DEFAULT_EPS: f64 = 1e-2;

/// Encode a height map with the default log-mode epsilon.
pub fn encode(height: &HeightMap, log_mode: bool) -> Result<QuantumState> {
    encode_with_eps(height, log_mode, DEFAULT_EPS)
}

/// Encode a height map into a normalized amplitude vector.
///
/// Linear mode stores `sqrt(h)` at each occupied bit index, so basis-state
/// probabilities are proportional to the original heights.
///
/// Log mode first rescales every height by the maximum, then takes `min_h`
/// as the smallest rescaled height strictly greater than `eps` and stores
/// `sqrt(base^(h / min_h))` with `base = 1 / min_h`. Heights at or below
/// `eps` are excluded from the minimum but still receive amplitudes from
/// the same formula. This spreads amplitudes over many orders of magnitude,
/// approximating a perceptual brightness scale.
///
/// # Errors
/// `DegenerateState` if the map is empty, all heights are zero, or (log
/// mode) `eps` excludes every rescaled height.
pub fn encode_with_eps(height: &HeightMap, log_mode: bool, eps: f64) -> Result<QuantumState> {
    if height::is_all_zero(height) {
        return Err(BlurError::DegenerateState);
    }
    let (lx, ly) = height::grid_size(height);
    let grid = GridMap::new(lx, ly)?;

    let mut amps = vec![Complex64::new(0.0, 0.0); grid.len()];
    if log_mode {
        let max_h = height.values().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_h = height
            .values()
            .map(|&h| h / max_h)
            .filter(|&h| h > eps)
            .fold(f64::INFINITY, f64::min);
        if !min_h.is_finite() {
            return Err(BlurError::DegenerateState);
        }
        let base = 1.0 / min_h;
        for (&(x, y), &h) in height {
            let scaled = h / max_h;
            let amp = base.powf(scaled / min_h).sqrt();
            amps[grid.bit_index(x, y)?] = Complex64::new(amp, 0.0);
        }
    } else {
        for (&(x, y), &h) in height {
            amps[grid.bit_index(x, y)?] = Complex64::new(h.sqrt(), 0.0);
        }
    }

    QuantumState::from_amplitudes(amps, (lx, ly), grid.n_bits(), log_mode)
}
