//! sigmatch finds the stored images whose texture signatures are closest to a
//! query image.
//!
//! A grayscale [`PixelGrid`] is reduced to a short feature vector by one of
//! two descriptors (GLCM texture statistics or an LBP bit-pattern summary),
//! then compared against a [`SignatureDb`] snapshot with one of four
//! distance metrics. Ranking is an exhaustive scan with optional rayon
//! parallelism; records of the wrong length are reported, not fatal.
//!
//! ```
//! use sigmatch::{extract_features, rank, Descriptor, Metric, PixelGrid, SignatureRecord};
//!
//! let grid = PixelGrid::new((0u8..16).map(|v| v * 16).collect(), 4, 4).unwrap();
//! let query = extract_features(grid.view(), Descriptor::Texture);
//! let db = vec![SignatureRecord::new(query.clone(), "ramp", "ramp.png")];
//! let ranking = rank(&query, &db, Metric::Euclidean, 1).unwrap();
//! assert_eq!(ranking.matches[0].distance, 0.0);
//! ```

mod candidate;
pub mod descriptor;
pub mod distance;
pub mod image;
pub mod search;
pub mod store;
pub(crate) mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use descriptor::{extract_features, Descriptor, FeatureVector};
pub use distance::{distance, Metric};
pub use crate::image::{GridView, PixelGrid};
pub use search::{
    rank, rank_with_config, MatchConfig, MatchWarning, Matcher, RankedMatch, Ranking,
};
pub use store::{SignatureDb, SignatureRecord, SignatureStore};
pub use util::{SigMatchError, SigMatchResult};
