//! Grey-level co-occurrence texture statistics.
//!
//! Intensities are bucketed into [`GLCM_LEVELS`] uniform levels and pairs are
//! taken between each pixel and its right-hand neighbour. Both `(a, b)` and
//! `(b, a)` are counted, so the matrix is symmetric and holds
//! `2 * height * (width - 1)` observations.

use crate::image::GridView;
use crate::util::math::div_or_zero;

/// Number of quantized intensity levels.
pub const GLCM_LEVELS: usize = 8;

/// Length of the texture feature vector.
pub const TEXTURE_LEN: usize = 6;

/// Symmetric co-occurrence counts indexed `[level_a][level_b]`.
pub type CooccurrenceMatrix = [[u32; GLCM_LEVELS]; GLCM_LEVELS];

/// Maps an 8-bit intensity to its quantized level.
#[inline]
pub fn quantize(value: u8) -> usize {
    usize::from(value) * GLCM_LEVELS / 256
}

/// Counts horizontally adjacent level pairs at distance 1.
pub fn cooccurrence_matrix(grid: GridView<'_>) -> CooccurrenceMatrix {
    let mut counts = [[0u32; GLCM_LEVELS]; GLCM_LEVELS];
    for row in grid.rows() {
        for pair in row.windows(2) {
            let a = quantize(pair[0]);
            let b = quantize(pair[1]);
            counts[a][b] += 1;
            counts[b][a] += 1;
        }
    }
    counts
}

/// Scalar statistics of a normalized co-occurrence matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextureStats {
    /// Σ p(i,j) (i - j)²
    pub contrast: f64,
    /// Σ p(i,j) |i - j|
    pub dissimilarity: f64,
    /// Σ p(i,j) / (1 + (i - j)²)
    pub homogeneity: f64,
    /// Σ p(i,j)²
    pub energy: f64,
    /// Normalized covariance of the level pair.
    ///
    /// A grid of one quantized level has zero variance and reports `1.0`.
    pub correlation: f64,
    /// -Σ p(i,j) ln p(i,j)
    pub entropy: f64,
}

impl TextureStats {
    /// Computes the statistics for a grid.
    ///
    /// A grid narrower than two pixels has no pairs and yields all zeros.
    pub fn from_view(grid: GridView<'_>) -> Self {
        Self::from_counts(&cooccurrence_matrix(grid))
    }

    /// Computes the statistics from raw co-occurrence counts.
    pub fn from_counts(counts: &CooccurrenceMatrix) -> Self {
        let total: u64 = counts.iter().flatten().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return Self::default();
        }
        let total = total as f64;

        let mut stats = Self::default();
        let mut mean_i = 0.0;
        let mut mean_j = 0.0;
        for (i, row) in counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let p = f64::from(count) / total;
                let diff = i as f64 - j as f64;
                stats.contrast += p * diff * diff;
                stats.dissimilarity += p * diff.abs();
                stats.homogeneity += p / (1.0 + diff * diff);
                stats.energy += p * p;
                stats.entropy -= p * p.ln();
                mean_i += p * i as f64;
                mean_j += p * j as f64;
            }
        }

        let mut var_i = 0.0;
        let mut var_j = 0.0;
        let mut cov = 0.0;
        for (i, row) in counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                let p = f64::from(count) / total;
                let di = i as f64 - mean_i;
                let dj = j as f64 - mean_j;
                var_i += p * di * di;
                var_j += p * dj * dj;
                cov += p * di * dj;
            }
        }
        let denom = (var_i * var_j).sqrt();
        stats.correlation = if denom <= 1e-12 {
            1.0
        } else {
            div_or_zero(cov, denom)
        };
        stats
    }

    /// Packs the statistics in feature order:
    /// contrast, dissimilarity, homogeneity, energy, correlation, entropy.
    pub fn to_array(&self) -> [f64; TEXTURE_LEN] {
        [
            self.contrast,
            self.dissimilarity,
            self.homogeneity,
            self.energy,
            self.correlation,
            self.entropy,
        ]
    }
}

/// Texture feature vector for a grid.
pub fn texture_features(grid: GridView<'_>) -> [f64; TEXTURE_LEN] {
    TextureStats::from_view(grid).to_array()
}
