//! Exhaustive distance scan over a signature snapshot.
//!
//! Each record is scored independently; records whose length differs from
//! the query are set aside instead of failing the scan.

use crate::candidate::topk::{Hit, TopK};
use crate::distance::Metric;
use crate::store::SignatureRecord;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Outcome of scoring a single record.
pub(crate) enum Scored {
    Hit(Hit),
    /// Index of a record whose feature length differs from the query.
    Mismatch(usize),
}

/// Closest hits plus the records that could not be compared.
pub(crate) struct ScanOutcome {
    pub hits: Vec<Hit>,
    pub mismatched: Vec<usize>,
    pub scanned: usize,
}

#[inline]
fn score(query: &[f64], index: usize, record: &SignatureRecord, metric: Metric) -> Scored {
    if record.features.len() != query.len() {
        return Scored::Mismatch(index);
    }
    Scored::Hit(Hit {
        index,
        distance: metric.distance_unchecked(query, &record.features),
    })
}

fn collect<I>(scored: I, k: usize, candidates: usize) -> ScanOutcome
where
    I: IntoIterator<Item = Scored>,
{
    let mut topk = TopK::new(k, candidates);
    let mut mismatched = Vec::new();
    let mut scanned = 0usize;
    for item in scored {
        scanned += 1;
        match item {
            Scored::Hit(hit) => topk.push(hit),
            Scored::Mismatch(index) => mismatched.push(index),
        }
    }
    ScanOutcome {
        hits: topk.into_sorted_asc(),
        mismatched,
        scanned,
    }
}

/// Scores records one after another.
pub(crate) fn scan_seq(
    query: &[f64],
    records: &[SignatureRecord],
    metric: Metric,
    k: usize,
) -> ScanOutcome {
    collect(
        records
            .iter()
            .enumerate()
            .map(|(index, record)| score(query, index, record, metric)),
        k,
        records.len(),
    )
}

/// Scores records on the rayon pool.
///
/// Per-record results are gathered in database order before selection, so
/// the output is identical to [`scan_seq`].
#[cfg(feature = "rayon")]
pub(crate) fn scan_par(
    query: &[f64],
    records: &[SignatureRecord],
    metric: Metric,
    k: usize,
) -> ScanOutcome {
    let scored: Vec<Scored> = records
        .par_iter()
        .enumerate()
        .map(|(index, record)| score(query, index, record, metric))
        .collect();
    collect(scored, k, records.len())
}
