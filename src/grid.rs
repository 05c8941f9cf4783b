//! Gray-code grid addressing.
//!
//! Maps 2D grid coordinates to n-bit indices such that 4-adjacent points
//! differ in exactly one bit: each axis gets a binary reflected Gray code
//! and the two codes are concatenated, x in the high bits and y in the low
//! bits. Power-of-two padding indices map to no coordinate and are ignored
//! by the encoder and decoder.

use crate::error::{BlurError, Result};

/// Number of bits needed to address `length` positions along one axis.
/// A single-point axis still occupies one bit.
#[inline]
pub(crate) fn axis_bits(length: usize) -> u32 {
    length.next_power_of_two().trailing_zeros().max(1)
}

/// Binary reflected Gray code for one axis.
///
/// `code(i)` and `code(i + 1)` differ in exactly one bit, and all entries
/// are unique `bits()`-wide values. The sequence covers the whole
/// power-of-two range, so `len()` may exceed the requested axis length;
/// excess codes are simply unused by the grid.
#[derive(Debug, Clone)]
pub struct AxisLine {
    codes: Vec<usize>,
    bits: u32,
}

impl AxisLine {
    /// Build the Gray code covering at least `length` positions.
    ///
    /// # Errors
    /// `EmptyAxis` if `length` is zero.
    pub fn new(length: usize) -> Result<Self> {
        if length < 1 {
            return Err(BlurError::EmptyAxis);
        }
        let bits = axis_bits(length);
        let codes = (0..1usize << bits).map(|i| i ^ (i >> 1)).collect();
        Ok(Self { codes, bits })
    }

    /// Bit width of every code.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Gray code at position `i`.
    #[inline]
    pub fn code(&self, i: usize) -> usize {
        self.codes[i]
    }

    /// Number of codes (always a power of two).
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Never true: a valid line has at least two codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Bijection between an `lx × ly` grid rectangle and n-bit indices.
#[derive(Debug, Clone)]
pub struct GridMap {
    shape: (usize, usize),
    x_line: AxisLine,
    y_line: AxisLine,
    n_bits: usize,
    /// Coordinate for each bit index; `None` for power-of-two padding.
    coords: Vec<Option<(usize, usize)>>,
}

impl GridMap {
    /// Build the bijection for an `lx × ly` grid.
    ///
    /// # Errors
    /// `EmptyAxis` if either side is zero.
    pub fn new(lx: usize, ly: usize) -> Result<Self> {
        let x_line = AxisLine::new(lx)?;
        let y_line = AxisLine::new(ly)?;
        let n_bits = (x_line.bits() + y_line.bits()) as usize;

        let mut coords = vec![None; 1usize << n_bits];
        for x in 0..lx {
            for y in 0..ly {
                let index = (x_line.code(x) << y_line.bits()) | y_line.code(y);
                coords[index] = Some((x, y));
            }
        }

        Ok(Self {
            shape: (lx, ly),
            x_line,
            y_line,
            n_bits,
            coords,
        })
    }

    /// Square grid of side `l`.
    pub fn square(l: usize) -> Result<Self> {
        Self::new(l, l)
    }

    /// Grid rectangle `(lx, ly)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Total bit width of an index.
    #[inline]
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    /// Size of the index space, `2^n_bits`.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Never true: the index space has at least four entries.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Bit index addressing `(x, y)`.
    ///
    /// # Errors
    /// `CoordOutOfBounds` if the coordinate lies outside the rectangle.
    pub fn bit_index(&self, x: usize, y: usize) -> Result<usize> {
        let (lx, ly) = self.shape;
        if x >= lx || y >= ly {
            return Err(BlurError::CoordOutOfBounds { x, y, lx, ly });
        }
        Ok((self.x_line.code(x) << self.y_line.bits()) | self.y_line.code(y))
    }

    /// Coordinate for a bit index, or `None` for padding indices.
    #[inline]
    pub fn coord(&self, index: usize) -> Option<(usize, usize)> {
        self.coords.get(index).copied().flatten()
    }

    /// Iterate `(bit index, coordinate)` over the occupied indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_ {
        self.coords
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|coord| (i, coord)))
    }
}
