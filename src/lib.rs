//! quantum-blur - Gray-code amplitude encoding of image channels with
//! per-bit rotation transforms.
//!
//! An image channel becomes a normalized amplitude vector indexed by a
//! Gray-code grid bijection: 4-adjacent pixels get addresses differing in
//! exactly one bit, so a small rotation on a single bit diffuses amplitude
//! between neighboring pixels. The pipeline is encode -> transform ->
//! decode, and every transform produces a new immutable state.
//!
//! # Usage
//! ```
//! use quantum_blur::{decode, encode, evolve, Axis, HeightMap};
//!
//! let mut heights = HeightMap::new();
//! heights.insert((0, 0), 10.0);
//! heights.insert((1, 1), 40.0);
//!
//! let state = encode::encode(&heights, false)?;
//! let blurred = evolve::blur(&heights, 0.05, Axis::X, Some(&state), false)?;
//! let out = decode::decode(&blurred)?;
//! assert!(out[&(1, 1)] > out[&(0, 1)]);
//! # Ok::<(), quantum_blur::BlurError>(())
//! ```
//!
//! Whole images go through [`ChannelStates`], which splits the channels,
//! drives the pipeline per channel, and recombines the results into an RGB
//! [`ImageGrid`].
//!
//! # Scaling
//! The amplitude vector has `2^n` entries for an n-bit grid address
//! (`n = bits(width) + bits(height)`), and every operation is `O(2^n)` or
//! `O(2^n * n)`. Callers must bound image size before encoding; memory is
//! the hard limit, not time.

pub mod channels;
pub mod decode;
pub mod encode;
pub mod error;
pub mod evolve;
pub mod grid;
pub mod height;
pub mod state;

pub use channels::{ChannelStates, ImageGrid};
pub use error::{BlurError, Result};
pub use evolve::Axis;
pub use height::HeightMap;
pub use state::QuantumState;
