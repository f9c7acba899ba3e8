//! Dissimilarity between two feature vectors.
//!
//! | Metric | Formula |
//! |---|---|
//! | Manhattan | Σ \|aᵢ − bᵢ\| |
//! | Euclidean | sqrt(Σ (aᵢ − bᵢ)²) |
//! | Chebyshev | max \|aᵢ − bᵢ\| |
//! | Canberra | Σ \|aᵢ − bᵢ\| / (\|aᵢ\| + \|bᵢ\|), 0/0 terms skipped |
//!
//! Every metric is symmetric and non-negative and fails with
//! [`SigMatchError::DimensionMismatch`] when the lengths differ.

mod scalar;
#[cfg(feature = "simd")]
mod simd;

#[cfg(not(feature = "simd"))]
use self::scalar as active;
#[cfg(feature = "simd")]
use self::simd as active;

use crate::util::{SigMatchError, SigMatchResult};
use std::fmt;
use std::str::FromStr;

/// Distance metric selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of absolute differences (L1).
    #[default]
    Manhattan,
    /// Square root of the sum of squared differences (L2).
    Euclidean,
    /// Largest absolute difference (L∞).
    Chebyshev,
    /// Sum of per-component relative differences.
    Canberra,
}

impl Metric {
    /// All metrics in selector order.
    pub const ALL: [Metric; 4] = [
        Metric::Manhattan,
        Metric::Euclidean,
        Metric::Chebyshev,
        Metric::Canberra,
    ];

    /// Canonical selector name.
    pub const fn name(self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
            Metric::Chebyshev => "chebyshev",
            Metric::Canberra => "canberra",
        }
    }

    /// Computes the distance between `a` and `b` under this metric.
    pub fn distance(self, a: &[f64], b: &[f64]) -> SigMatchResult<f64> {
        check_dims(a, b)?;
        Ok(self.distance_unchecked(a, b))
    }

    /// Callers guarantee `a.len() == b.len()`.
    #[inline]
    pub(crate) fn distance_unchecked(self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Manhattan => active::manhattan(a, b),
            Metric::Euclidean => active::euclidean(a, b),
            Metric::Chebyshev => active::chebyshev(a, b),
            Metric::Canberra => active::canberra(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = SigMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" | "l1" | "cityblock" => Ok(Metric::Manhattan),
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "chebyshev" | "linf" => Ok(Metric::Chebyshev),
            "canberra" => Ok(Metric::Canberra),
            _ => Err(SigMatchError::UnknownMetric {
                name: s.to_string(),
            }),
        }
    }
}

fn check_dims(a: &[f64], b: &[f64]) -> SigMatchResult<()> {
    if a.len() != b.len() {
        return Err(SigMatchError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Computes the distance between `a` and `b` under `metric`.
pub fn distance(a: &[f64], b: &[f64], metric: Metric) -> SigMatchResult<f64> {
    metric.distance(a, b)
}

/// Sum of absolute differences.
pub fn manhattan(a: &[f64], b: &[f64]) -> SigMatchResult<f64> {
    Metric::Manhattan.distance(a, b)
}

/// Standard L2 distance.
pub fn euclidean(a: &[f64], b: &[f64]) -> SigMatchResult<f64> {
    Metric::Euclidean.distance(a, b)
}

/// Largest single-component absolute difference.
pub fn chebyshev(a: &[f64], b: &[f64]) -> SigMatchResult<f64> {
    Metric::Chebyshev.distance(a, b)
}

/// Canberra distance; components where both inputs are zero are skipped.
pub fn canberra(a: &[f64], b: &[f64]) -> SigMatchResult<f64> {
    Metric::Canberra.distance(a, b)
}
