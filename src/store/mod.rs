//! Signature records and the snapshot store queries rank against.
//!
//! A [`SignatureDb`] is built once and never mutated. [`SignatureStore`]
//! publishes the current snapshot behind an `ArcSwap`: readers take an
//! `Arc` and keep a consistent view for the whole query, while a reload
//! swaps in a new snapshot without blocking them.

use crate::descriptor::FeatureVector;
use crate::distance::Metric;
use crate::search::{rank, Ranking};
use crate::util::SigMatchResult;
use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One indexed image: its features, class label and source path.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureRecord {
    /// Descriptor output for the image.
    pub features: FeatureVector,
    /// Class the image was filed under.
    pub label: String,
    /// Where the image came from, usually a file path.
    pub source: String,
}

impl SignatureRecord {
    /// Builds a record from anything convertible to its parts.
    pub fn new(
        features: impl Into<FeatureVector>,
        label: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            features: features.into(),
            label: label.into(),
            source: source.into(),
        }
    }

    /// Number of feature components.
    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// Immutable, ordered collection of signature records.
///
/// Record order is preserved and used to break distance ties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignatureDb {
    records: Vec<SignatureRecord>,
}

impl SignatureDb {
    /// Wraps `records`, keeping their order.
    pub fn new(records: Vec<SignatureRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in database order.
    pub fn records(&self) -> &[SignatureRecord] {
        &self.records
    }

    /// Record at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&SignatureRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignatureRecord> {
        self.records.iter()
    }

    /// Counts records per feature length.
    ///
    /// A database indexed with several descriptors has more than one entry.
    pub fn dimensions(&self) -> BTreeMap<usize, usize> {
        let mut dims = BTreeMap::new();
        for record in &self.records {
            *dims.entry(record.dim()).or_insert(0) += 1;
        }
        dims
    }
}

impl FromIterator<SignatureRecord> for SignatureDb {
    fn from_iter<I: IntoIterator<Item = SignatureRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SignatureDb {
    type Item = &'a SignatureRecord;
    type IntoIter = std::slice::Iter<'a, SignatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Holder of the current database snapshot, replaceable at runtime.
pub struct SignatureStore {
    current: ArcSwap<SignatureDb>,
}

impl SignatureStore {
    pub fn new(db: SignatureDb) -> Self {
        Self {
            current: ArcSwap::from_pointee(db),
        }
    }

    /// Returns the snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<SignatureDb> {
        self.current.load_full()
    }

    /// Publishes a new snapshot and returns the one it replaced.
    ///
    /// Queries already holding the old snapshot finish against it.
    pub fn replace(&self, db: SignatureDb) -> Arc<SignatureDb> {
        self.current.swap(Arc::new(db))
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Ranks `query` against the current snapshot.
    pub fn rank(&self, query: &[f64], metric: Metric, k: usize) -> SigMatchResult<Ranking> {
        let snapshot = self.snapshot();
        rank(query, snapshot.records(), metric, k)
    }
}

impl Default for SignatureStore {
    fn default() -> Self {
        Self::new(SignatureDb::default())
    }
}
