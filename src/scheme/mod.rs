//! Lane index schemes for the MAC intrinsics.
//!
//! Each scheme maps a logical (row, column) position of a vector register to an index into a
//! flattened data buffer, so that the hardware lane layout of a particular instruction shape can
//! be hand-encoded into the offset/start/step arguments of that instruction. Every element is
//! derived independently from its flattened position.

#[cfg(test)]
mod test;

use crate::error::{require, Error};
use crate::geometry::Geometry;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// Per-row lane displacements for the low 8 rows of the 16b x 16b scheme.
pub const OFFSETS_16B_LO: [usize; 8] = [0x0, 0x7, 0x1, 0x7, 0x2, 0x7, 0x3, 0x7];
/// Per-row lane displacements for the high 8 rows of the 16b x 16b scheme.
pub const OFFSETS_16B_HI: [usize; 8] = [0x4, 0x7, 0x5, 0x7, 0x6, 0x7, 0x7, 0x7];
/// Little-endian row offsets for the 32-bit lane layouts.
pub const OFFSETS_32B: [usize; 8] = [0x0, 0x1, 0x2, 0x3, 0x0, 0x0, 0x0, 0x0];
/// Offsets of the 8-bit data scheme, one per pair of rows.
pub const OFFSETS_8X8: [usize; 4] = [0, 0, 0, 0];

/// Width of the data buffer the 8 x 8 scheme addresses.
const DATA_8X8_BUFFER_BITS: usize = 128;

/// A rows x cols table of buffer indices, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexScheme {
    cols: usize,
    values: Vec<usize>,
}

impl IndexScheme {
    fn from_fn<F>(geom: &Geometry, f: F) -> IndexScheme
    where
        F: Fn(usize, usize) -> usize,
    {
        let values = (0..geom.num_elems())
            .map(|i| {
                let (r, c) = geom.row_col(i);
                f(r, c)
            })
            .collect::<Vec<usize>>();
        IndexScheme {
            cols: geom.cols(),
            values,
        }
    }
    pub fn num_rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.values.len() / self.cols
        }
    }
    pub fn num_cols(&self) -> usize {
        self.cols
    }
    pub fn row(&self, r: usize) -> &[usize] {
        &self.values[r * self.cols..(r + 1) * self.cols]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.num_rows()).map(move |r| self.row(r))
    }
    pub fn values(&self) -> &[usize] {
        &self.values
    }
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
    /// Formats the scheme as a right-aligned table, `width` characters per value.
    pub fn to_table(&self, width: usize) -> String {
        self.rows()
            .map(|row| {
                let mut line = row
                    .iter()
                    .map(|v| format!("{:>width$} ", v, width = width))
                    .join("");
                line.push('\n');
                line
            })
            .join("")
    }
}

impl fmt::Display for IndexScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "[{}]", row.iter().join(", "))?;
        }
        Ok(())
    }
}

/// Computes the 16b x 16b lane scheme.
///
/// Rows 0..8 take their base displacement from `offset`, the rest from `offset_hi`. Odd rows are
/// placed past the two-lane block of the preceding even row. Columns advance in pairs: the second
/// of a pair is the adjacent lane, the next pair is `step` further. All indices wrap by the buffer
/// size of `geom`.
pub fn compute_scheme(geom: &Geometry, offset: &[usize], offset_hi: &[usize]) -> IndexScheme {
    debug_assert!(geom.buffer_size() > 0);
    debug_assert!(geom.rows() == 0 || offset.len() >= 8);
    debug_assert!(geom.rows() <= 8 || offset_hi.len() >= 8);

    IndexScheme::from_fn(geom, |r, c| {
        let base = if r < 8 { offset } else { offset_hi };

        let offset_val = if r % 2 == 0 {
            base[r % 8] * 2
        } else {
            base[r % 8] * 2 + (base[(r - 1) % 8] + 1) * 2
        };
        let xstep = (c / 2) * geom.step() + (c % 2);

        (geom.start() + offset_val + xstep) % geom.buffer_size()
    })
}

/// Computes the coarse 32-bit lane scheme, `start + offset[r] + step * c`.
///
/// No wrap-around is applied; the buffer size of `geom` is ignored.
pub fn general_scheme(geom: &Geometry, offset: &[usize]) -> IndexScheme {
    debug_assert!(offset.len() >= geom.rows());

    IndexScheme::from_fn(geom, |r, c| geom.start() + offset[r] + geom.step() * c)
}

/// Computes the 8 x 8 data scheme.
///
/// Each offset entry covers two rows, and rows come in groups of four: rows 2 and 3 of a group
/// skip past the 4-lane block addressed by the entry before theirs. Columns advance in pairs
/// of two lanes, the next pair is `step` further.
pub fn data_scheme_8x8(geom: &Geometry, offsets: &[usize]) -> IndexScheme {
    debug_assert!(geom.buffer_size() > 0);
    debug_assert!(offsets.len() >= (geom.rows() + 1) / 2);

    let prev = |rx: usize| offsets[(rx + offsets.len() - 1) % offsets.len()];

    IndexScheme::from_fn(geom, |r, c| {
        let rx = r / 2;
        let offset_val = match r % 4 {
            0 => offsets[rx] * 4,
            1 => offsets[rx] * 4 + 1,
            2 => offsets[rx] * 4 + (prev(rx) + 1) * 4,
            _ => offsets[rx] * 4 + (prev(rx) + 1) * 4 + 1,
        };
        let xstep = (c / 2) * geom.step() + (c % 2) * 2;

        (geom.start() + offset_val + xstep) % geom.buffer_size()
    })
}

/// The number of columns of the 8 x 8 data scheme for `lanes` lanes.
///
/// `multiplier` doubles for each of 32-bit data, 32-bit coefficients, complex data and complex
/// coefficients.
pub fn data_8x8_cols(multiplier: usize, lanes: usize) -> usize {
    DATA_8X8_BUFFER_BITS / (multiplier * lanes)
}

/// The hand-derived parameter sets each scheme ships with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 16b x 16b data for mac16 on int16.
    Int16Pair,
    /// 32-bit lanes for lmac4/lmac8.
    General32,
    /// 8-bit data in 8 x 8 blocks.
    Data8x8,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Int16Pair => "16bx16b",
            Preset::General32 => "general",
            Preset::Data8x8 => "8x8",
        }
    }
    pub fn title(self) -> &'static str {
        match self {
            Preset::Int16Pair => "16bx16b Scheme Indices:",
            Preset::General32 => "General Scheme Indices:",
            Preset::Data8x8 => "8x8 Data Scheme Indices:",
        }
    }
    pub fn geometry(self) -> Geometry {
        match self {
            Preset::Int16Pair => Geometry::new(16, 2, 0, 0, 32),
            Preset::General32 => Geometry::new(4, 2, 0, 16, 16),
            Preset::Data8x8 => {
                let lanes = 8;
                Geometry::new(lanes, data_8x8_cols(1, lanes), 0, 16, 128)
            }
        }
    }
    /// The number of rows the offset tables of this preset cover. Rows of the 16b x 16b scheme
    /// cycle through the high table, so it has no limit.
    pub fn max_rows(self) -> Option<usize> {
        match self {
            Preset::Int16Pair => None,
            Preset::General32 => Some(OFFSETS_32B.len()),
            Preset::Data8x8 => Some(OFFSETS_8X8.len() * 2),
        }
    }
    /// An upper bound of `start + offset + column stride` over `geom`, or `None` if it does not
    /// fit a `usize`.
    fn index_bound(self, geom: &Geometry) -> Option<usize> {
        let last_col = geom.cols().saturating_sub(1);
        let (offset, stride) = match self {
            Preset::Int16Pair => {
                let m = *OFFSETS_16B_LO.iter().chain(OFFSETS_16B_HI.iter()).max()?;
                (m * 2 + (m + 1) * 2, (last_col / 2).checked_mul(geom.step())?.checked_add(1)?)
            }
            Preset::General32 => (
                *OFFSETS_32B.iter().max()?,
                last_col.checked_mul(geom.step())?,
            ),
            Preset::Data8x8 => {
                let m = *OFFSETS_8X8.iter().max()?;
                (m * 4 + (m + 1) * 4 + 1, (last_col / 2).checked_mul(geom.step())?.checked_add(2)?)
            }
        };
        geom.start().checked_add(offset)?.checked_add(stride)
    }
    /// Computes the scheme of this preset over `geom`, checking `geom` against the offset tables.
    pub fn compute(self, geom: &Geometry) -> Result<IndexScheme, Error> {
        if let Some(max_rows) = self.max_rows() {
            require(
                geom.rows() <= max_rows,
                &format!("{} scheme covers at most {} rows", self.name(), max_rows),
            )?;
        }
        require(
            self == Preset::General32 || geom.buffer_size() > 0,
            "buffer size must be nonzero",
        )?;
        require(
            self.index_bound(geom).is_some(),
            "start and step overflow the index range",
        )?;
        Ok(match self {
            Preset::Int16Pair => compute_scheme(geom, &OFFSETS_16B_LO, &OFFSETS_16B_HI),
            Preset::General32 => general_scheme(geom, &OFFSETS_32B),
            Preset::Data8x8 => data_scheme_8x8(geom, &OFFSETS_8X8),
        })
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Preset::Int16Pair, Preset::General32, Preset::Data8x8]
            .iter()
            .cloned()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::Geometry(format!("Unknown scheme \"{}\"", s)))
    }
}
