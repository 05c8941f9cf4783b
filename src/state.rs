//! Amplitude-vector state carried between the encoder, evolver and decoder.

use num_complex::Complex64;

use crate::error::{BlurError, Result};

/// Normalized amplitude vector plus the grid metadata needed to decode it.
///
/// The grid size travels as an explicit field at all times rather than being
/// stashed in a printable label. Every transform produces a new state
/// (functional update), so there are no partial-application hazards.
#[derive(Debug, Clone)]
pub struct QuantumState {
    amps: Vec<Complex64>,
    shape: (usize, usize),
    n_bits: usize,
    log_mode: bool,
}

impl QuantumState {
    /// Build a state from raw amplitudes, normalizing in place.
    ///
    /// # Errors
    /// `DegenerateState` if the vector has zero norm.
    pub(crate) fn from_amplitudes(
        mut amps: Vec<Complex64>,
        shape: (usize, usize),
        n_bits: usize,
        log_mode: bool,
    ) -> Result<Self> {
        debug_assert_eq!(amps.len(), 1usize << n_bits);
        normalize(&mut amps)?;
        Ok(Self {
            amps,
            shape,
            n_bits,
            log_mode,
        })
    }

    /// New state with the same metadata and different amplitudes.
    pub(crate) fn with_amplitudes(&self, amps: Vec<Complex64>) -> Self {
        debug_assert_eq!(amps.len(), self.amps.len());
        Self {
            amps,
            shape: self.shape,
            n_bits: self.n_bits,
            log_mode: self.log_mode,
        }
    }

    /// The amplitude vector, length `2^n_bits`.
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    /// Grid rectangle this state was encoded from.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Bit width of a basis index.
    #[inline]
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    /// Whether the state was encoded logarithmically.
    #[inline]
    pub fn log_mode(&self) -> bool {
        self.log_mode
    }

    /// Number of basis states, `2^n_bits`.
    #[inline]
    pub fn len(&self) -> usize {
        self.amps.len()
    }

    /// Never true: a state has at least four basis entries.
    pub fn is_empty(&self) -> bool {
        self.amps.is_empty()
    }

    /// Squared magnitude of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }
}

/// Scale `amps` to unit norm.
///
/// # Errors
/// `DegenerateState` if the vector has zero norm.
pub(crate) fn normalize(amps: &mut [Complex64]) -> Result<()> {
    let norm_sq: f64 = amps.iter().map(|a| a.norm_sqr()).sum();
    if norm_sq == 0.0 {
        return Err(BlurError::DegenerateState);
    }
    let inv = 1.0 / norm_sq.sqrt();
    for a in amps.iter_mut() {
        *a *= inv;
    }
    Ok(())
}
