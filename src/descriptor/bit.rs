//! Local binary pattern summary descriptor.
//!
//! Every interior pixel gets an 8-bit code: one bit per neighbour in the
//! 3x3 window, set when the neighbour is at least as bright as the centre.
//! Neighbours are visited clockwise from the top-left, which maps to the
//! most significant bit. The codes are summarized rather than histogrammed
//! so the vector stays short.

use crate::image::GridView;
use crate::util::math::circular_transitions;

/// Length of the bit-pattern feature vector.
pub const BIT_LEN: usize = 3;

/// Side length of the comparison window.
pub const WINDOW: usize = 3;

/// Computes the LBP code of every interior pixel in row-major order.
///
/// Returns an empty vector when the grid is smaller than the window.
pub fn lbp_codes(grid: GridView<'_>) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    if width < WINDOW || height < WINDOW {
        return Vec::new();
    }

    let mut codes = Vec::with_capacity((width - 2) * (height - 2));
    for y in 1..height - 1 {
        let (Some(above), Some(row), Some(below)) = (grid.row(y - 1), grid.row(y), grid.row(y + 1))
        else {
            continue;
        };
        for x in 1..width - 1 {
            let centre = row[x];
            let neighbours = [
                above[x - 1],
                above[x],
                above[x + 1],
                row[x + 1],
                below[x + 1],
                below[x],
                below[x - 1],
                row[x - 1],
            ];
            let code = neighbours
                .iter()
                .fold(0u8, |acc, &n| (acc << 1) | u8::from(n >= centre));
            codes.push(code);
        }
    }
    codes
}

/// Summary of a grid's LBP codes, each component in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BitStats {
    /// Mean code divided by 255.
    pub mean_code: f64,
    /// Mean fraction of set bits per code.
    pub mean_ones: f64,
    /// Fraction of codes with at most two circular bit transitions.
    pub uniform_ratio: f64,
}

impl BitStats {
    /// Summarizes a grid; grids smaller than 3x3 yield all zeros.
    pub fn from_view(grid: GridView<'_>) -> Self {
        Self::from_codes(&lbp_codes(grid))
    }

    /// Summarizes precomputed LBP codes; an empty slice gives all zeros.
    pub fn from_codes(codes: &[u8]) -> Self {
        if codes.is_empty() {
            return Self::default();
        }
        let mut sum_code = 0u64;
        let mut sum_ones = 0u64;
        let mut uniform = 0u64;
        for &code in codes {
            sum_code += u64::from(code);
            sum_ones += u64::from(code.count_ones());
            if circular_transitions(code) <= 2 {
                uniform += 1;
            }
        }
        let n = codes.len() as f64;
        Self {
            mean_code: sum_code as f64 / (n * 255.0),
            mean_ones: sum_ones as f64 / (n * 8.0),
            uniform_ratio: uniform as f64 / n,
        }
    }

    /// Packs the statistics in feature order: mean_code, mean_ones, uniform_ratio.
    pub fn to_array(&self) -> [f64; BIT_LEN] {
        [self.mean_code, self.mean_ones, self.uniform_ratio]
    }
}

/// Bit-pattern feature vector for a grid.
pub fn bit_features(grid: GridView<'_>) -> [f64; BIT_LEN] {
    BitStats::from_view(grid).to_array()
}
