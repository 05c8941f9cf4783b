//! Channel splitting, recombination, and whole-image transforms.

use rayon::prelude::*;

use crate::decode;
use crate::encode;
use crate::error::{BlurError, Result};
use crate::evolve::{self, Axis};
use crate::height::{self, HeightMap};
use crate::state::QuantumState;

/// Dense pixel grid with 1 (grayscale) or 3 (RGB) channels of `u8`.
///
/// Row-major storage: `data[(y * width + x) * channels + c]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGrid {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl ImageGrid {
    /// All-black image.
    ///
    /// # Panics
    /// Panics if a dimension is zero or `channels` is neither 1 nor 3.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        assert!(
            channels == 1 || channels == 3,
            "expected 1 or 3 channels, got {}",
            channels
        );
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Wrap raw row-major pixel data.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height * channels`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Self {
        let mut image = Self::new(width, height, channels);
        assert_eq!(
            data.len(),
            width * height * channels,
            "data length {} doesn't match {}x{}x{}",
            data.len(),
            width,
            height,
            channels
        );
        image.data = data;
        image
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, c: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        (y * self.width + x) * self.channels + c
    }

    /// Pixel value at `(x, y)` for channel `c`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[self.offset(x, y, c)]
    }

    /// Set the pixel value at `(x, y)` for channel `c`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: u8) {
        let offset = self.offset(x, y, c);
        self.data[offset] = value;
    }
}

/// Per-channel encoded states for one image.
///
/// Retains each channel's source height map alongside its state, because
/// the blur transform derives its rotation angles from the heights. Channels
/// that are uniformly zero are dropped at split time; their original indices
/// are recorded so reconstruction can zero-fill the right slots.
#[derive(Debug, Clone)]
pub struct ChannelStates {
    states: Vec<QuantumState>,
    heights: Vec<HeightMap>,
    kept: Vec<usize>,
    log_mode: bool,
}

impl ChannelStates {
    /// Split an image into per-channel height maps, drop all-zero channels,
    /// and encode the rest.
    pub fn from_image(image: &ImageGrid, log_mode: bool) -> Result<Self> {
        let mut split: Vec<HeightMap> = vec![HeightMap::new(); image.channels()];
        for x in 0..image.width() {
            for y in 0..image.height() {
                for (c, map) in split.iter_mut().enumerate() {
                    map.insert((x, y), image.get(x, y, c) as f64);
                }
            }
        }

        let mut states = Vec::new();
        let mut heights = Vec::new();
        let mut kept = Vec::new();
        for (c, map) in split.into_iter().enumerate() {
            if height::is_all_zero(&map) {
                continue;
            }
            states.push(encode::encode(&map, log_mode)?);
            heights.push(map);
            kept.push(c);
        }

        Ok(Self {
            states,
            heights,
            kept,
            log_mode,
        })
    }

    /// The retained channels' states, in `kept_channels` order.
    #[inline]
    pub fn states(&self) -> &[QuantumState] {
        &self.states
    }

    /// Original channel indices of the retained channels.
    #[inline]
    pub fn kept_channels(&self) -> &[usize] {
        &self.kept
    }

    #[inline]
    pub fn log_mode(&self) -> bool {
        self.log_mode
    }

    /// Apply a caller-supplied transform to every retained state.
    ///
    /// Channels are independent, so they are processed in parallel.
    pub fn apply<F>(&mut self, transform: F) -> Result<()>
    where
        F: Fn(&QuantumState) -> Result<QuantumState> + Sync,
    {
        self.states = self
            .states
            .par_iter()
            .map(&transform)
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    /// Uniform partial rotation of every bit in every channel by
    /// `fraction * pi`. This is the "rotate" effect; it does not depend on
    /// the pixel data.
    pub fn rotate(&mut self, fraction: f64, axis: Axis) -> Result<()> {
        self.apply(|state| evolve::rotate_all(state, fraction, axis))
    }

    /// Blur every channel, each driven by its own height map and composed
    /// onto its current state.
    pub fn blur(&mut self, xi: f64, axis: Axis) -> Result<()> {
        self.states = self
            .heights
            .par_iter()
            .zip(self.states.par_iter())
            .map(|(heights, state)| evolve::blur(heights, xi, axis, Some(state), self.log_mode))
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    /// Decode every retained channel and recombine into an RGB image.
    ///
    /// Output is always 3-channel. Each decoded channel is rescaled to
    /// `[0, 255]` and written back to its original slot; slots dropped at
    /// split time stay zero. A grayscale input therefore comes back with
    /// its data in channel 0 and channels 1 and 2 black.
    ///
    /// # Errors
    /// `DegenerateState` if no channels were retained.
    pub fn to_image(&self) -> Result<ImageGrid> {
        let (lx, ly) = self
            .states
            .first()
            .map(|state| state.shape())
            .ok_or(BlurError::DegenerateState)?;

        let decoded: Vec<HeightMap> = self
            .states
            .par_iter()
            .map(decode::decode)
            .collect::<Result<Vec<_>>>()?;

        let mut image = ImageGrid::new(lx, ly, 3);
        for (heights, &c) in decoded.iter().zip(&self.kept) {
            let max_h = heights.values().cloned().fold(0.0, f64::max);
            if max_h == 0.0 {
                continue;
            }
            for (&(x, y), &h) in heights {
                image.set(x, y, c, (255.0 * h / max_h) as u8);
            }
        }
        Ok(image)
    }
}
