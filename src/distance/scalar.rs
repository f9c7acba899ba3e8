//! Scalar reference kernels.
//!
//! Callers check lengths first; these zip and never index out of bounds.

#[inline]
pub(crate) fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

#[cfg_attr(feature = "simd", allow(dead_code))]
#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

#[inline]
pub(crate) fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Terms where both components are zero contribute nothing.
#[inline]
pub(crate) fn canberra(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let den = x.abs() + y.abs();
            if den == 0.0 {
                0.0
            } else {
                (x - y).abs() / den
            }
        })
        .sum()
}
