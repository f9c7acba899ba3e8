//! SIMD kernels using the `wide` crate.
//!
//! Four `f64` lanes per step with a scalar tail. Canberra stays on the
//! scalar path because of its per-term zero guard.

use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

#[inline]
fn hmax(v: f64x4) -> f64 {
    v.to_array().into_iter().fold(0.0, f64::max)
}

pub(crate) fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    let simd_end = a.len() / LANES * LANES;
    let mut acc = f64x4::ZERO;
    for (ca, cb) in a[..simd_end]
        .chunks_exact(LANES)
        .zip(b[..simd_end].chunks_exact(LANES))
    {
        acc += (load_f64x4(ca) - load_f64x4(cb)).abs();
    }
    hsum(acc) + super::scalar::manhattan(&a[simd_end..], &b[simd_end..])
}

pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let simd_end = a.len() / LANES * LANES;
    let mut acc = f64x4::ZERO;
    for (ca, cb) in a[..simd_end]
        .chunks_exact(LANES)
        .zip(b[..simd_end].chunks_exact(LANES))
    {
        let diff = load_f64x4(ca) - load_f64x4(cb);
        acc += diff * diff;
    }
    let tail: f64 = a[simd_end..]
        .iter()
        .zip(&b[simd_end..])
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    (hsum(acc) + tail).sqrt()
}

pub(crate) fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    let simd_end = a.len() / LANES * LANES;
    let mut acc = f64x4::ZERO;
    for (ca, cb) in a[..simd_end]
        .chunks_exact(LANES)
        .zip(b[..simd_end].chunks_exact(LANES))
    {
        acc = acc.max((load_f64x4(ca) - load_f64x4(cb)).abs());
    }
    hmax(acc).max(super::scalar::chebyshev(&a[simd_end..], &b[simd_end..]))
}

pub(crate) use super::scalar::canberra;
