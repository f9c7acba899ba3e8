//! Descriptors mapping a grayscale grid to a fixed-length feature vector.
//!
//! | Descriptor | Length | Components |
//! |---|---|---|
//! | [`Descriptor::Texture`] | 6 | contrast, dissimilarity, homogeneity, energy, correlation, entropy |
//! | [`Descriptor::BitPattern`] | 3 | mean_code, mean_ones, uniform_ratio |
//!
//! Signatures must be extracted with the same descriptor as the query to be
//! comparable. Both descriptors are total: grids too small for their window
//! produce a zero vector of the usual length.

pub mod bit;
pub mod glcm;

use crate::image::GridView;
use crate::trace::trace_span;
use crate::util::SigMatchError;
use std::fmt;
use std::str::FromStr;

/// Ordered feature components produced by a descriptor.
pub type FeatureVector = Vec<f64>;

/// Selects the descriptor algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// Grey-level co-occurrence statistics.
    #[default]
    Texture,
    /// Local binary pattern summary.
    BitPattern,
}

impl Descriptor {
    /// All descriptors in selector order.
    pub const ALL: [Descriptor; 2] = [Descriptor::Texture, Descriptor::BitPattern];

    /// Number of components this descriptor emits.
    pub const fn feature_len(self) -> usize {
        match self {
            Descriptor::Texture => glcm::TEXTURE_LEN,
            Descriptor::BitPattern => bit::BIT_LEN,
        }
    }

    /// Canonical selector name.
    pub const fn name(self) -> &'static str {
        match self {
            Descriptor::Texture => "glcm",
            Descriptor::BitPattern => "bit",
        }
    }

    /// Extracts this descriptor's features from `grid`.
    pub fn extract(self, grid: GridView<'_>) -> FeatureVector {
        let _span = trace_span!(
            "extract_features",
            descriptor = self.name(),
            width = grid.width(),
            height = grid.height()
        )
        .entered();
        match self {
            Descriptor::Texture => glcm::texture_features(grid).to_vec(),
            Descriptor::BitPattern => bit::bit_features(grid).to_vec(),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Descriptor {
    type Err = SigMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glcm" | "texture" => Ok(Descriptor::Texture),
            "bit" | "bitpattern" | "bit_pattern" | "bit-pattern" | "lbp" => {
                Ok(Descriptor::BitPattern)
            }
            _ => Err(SigMatchError::UnknownDescriptor {
                name: s.to_string(),
            }),
        }
    }
}

/// Extracts a feature vector from `grid` with the selected descriptor.
///
/// The output length is [`Descriptor::feature_len`] for every input grid.
pub fn extract_features(grid: GridView<'_>, descriptor: Descriptor) -> FeatureVector {
    descriptor.extract(grid)
}
