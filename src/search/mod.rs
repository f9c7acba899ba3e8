//! Nearest-signature ranking.
//!
//! Ranking is an exhaustive scan: every record in the snapshot is compared
//! with the query under the selected metric, and the `k` closest are
//! returned in ascending distance. Equal distances keep database order.
//! Records with a different feature length are reported as
//! [`MatchWarning`]s and never abort the request.

pub(crate) mod scan;

use crate::distance::Metric;
use crate::store::{SignatureDb, SignatureRecord};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{SigMatchError, SigMatchResult};
use std::fmt;
use std::sync::Arc;

/// One ranked database record.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedMatch {
    /// Source identifier of the record (e.g. its image path).
    pub source: String,
    /// Distance to the query, never negative.
    pub distance: f64,
    /// Class label stored with the record.
    pub label: String,
    /// Position of the record in the database.
    pub index: usize,
}

/// Non-fatal condition noticed while ranking.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchWarning {
    /// The record's feature length differs from the query's; it was skipped.
    DimensionMismatch {
        index: usize,
        source: String,
        expected: usize,
        got: usize,
    },
    /// The database holds no records.
    EmptyDatabase,
}

impl fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchWarning::DimensionMismatch {
                index,
                source,
                expected,
                got,
            } => write!(
                f,
                "record {index} ({source}) skipped: expected {expected} features, got {got}"
            ),
            MatchWarning::EmptyDatabase => f.write_str("database is empty"),
        }
    }
}

/// Ranked matches together with the warnings collected on the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    /// Closest records, ascending by distance then database index.
    pub matches: Vec<RankedMatch>,
    /// Skipped records and other non-fatal conditions, in database order.
    pub warnings: Vec<MatchWarning>,
}

impl Ranking {
    /// Closest match, if any record was comparable.
    pub fn best(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }

    /// True when no record could be compared with the query.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of records skipped for a length mismatch.
    pub fn skipped(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, MatchWarning::DimensionMismatch { .. }))
            .count()
    }
}

/// Configuration for a ranking request.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub metric: Metric,
    /// Maximum number of matches to return.
    pub k: usize,
    /// Scan records on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Manhattan,
            k: 5,
            parallel: false,
        }
    }
}

impl MatchConfig {
    /// Checks that the configuration can serve a request.
    pub fn validate(&self) -> SigMatchResult<()> {
        if self.k == 0 {
            return Err(SigMatchError::InvalidTopK { k: self.k });
        }
        Ok(())
    }
}

/// Ranks queries against a fixed database snapshot.
#[derive(Clone, Debug)]
pub struct Matcher {
    db: Arc<SignatureDb>,
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher over `db` with the default configuration.
    pub fn new(db: Arc<SignatureDb>) -> Self {
        Self {
            db,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the configuration used by [`Matcher::rank`].
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Snapshot this matcher ranks against.
    pub fn database(&self) -> &SignatureDb {
        &self.db
    }

    /// Ranks `query` using the configured metric and `k`.
    pub fn rank(&self, query: &[f64]) -> SigMatchResult<Ranking> {
        rank_with_config(query, self.db.records(), &self.cfg)
    }

    /// Ranks `query`, overriding the configured `k`.
    pub fn rank_topk(&self, query: &[f64], k: usize) -> SigMatchResult<Ranking> {
        let cfg = MatchConfig {
            k,
            ..self.cfg.clone()
        };
        rank_with_config(query, self.db.records(), &cfg)
    }
}

/// Returns the `k` records closest to `query` under `metric`.
///
/// Fails with [`SigMatchError::EmptyFeatureVector`] for an empty query and
/// [`SigMatchError::InvalidTopK`] for `k == 0`. Everything else, including
/// an empty database, yields a [`Ranking`].
pub fn rank(
    query: &[f64],
    database: &[SignatureRecord],
    metric: Metric,
    k: usize,
) -> SigMatchResult<Ranking> {
    let cfg = MatchConfig {
        metric,
        k,
        parallel: false,
    };
    rank_with_config(query, database, &cfg)
}

/// Ranks `query` against `database` as described by `cfg`.
pub fn rank_with_config(
    query: &[f64],
    database: &[SignatureRecord],
    cfg: &MatchConfig,
) -> SigMatchResult<Ranking> {
    if query.is_empty() {
        return Err(SigMatchError::EmptyFeatureVector);
    }
    cfg.validate()?;

    let _span = trace_span!(
        "rank",
        metric = cfg.metric.name(),
        k = cfg.k,
        records = database.len()
    )
    .entered();

    if database.is_empty() {
        return Ok(Ranking {
            matches: Vec::new(),
            warnings: vec![MatchWarning::EmptyDatabase],
        });
    }

    let outcome = run_scan(query, database, cfg);

    let mut warnings = Vec::with_capacity(outcome.mismatched.len());
    for index in outcome.mismatched {
        let record = &database[index];
        trace_warn!(
            "record_skipped",
            index = index,
            expected = query.len(),
            got = record.dim()
        );
        warnings.push(MatchWarning::DimensionMismatch {
            index,
            source: record.source.clone(),
            expected: query.len(),
            got: record.dim(),
        });
    }

    let matches: Vec<RankedMatch> = outcome
        .hits
        .into_iter()
        .map(|hit| {
            let record = &database[hit.index];
            RankedMatch {
                source: record.source.clone(),
                distance: hit.distance,
                label: record.label.clone(),
                index: hit.index,
            }
        })
        .collect();

    trace_event!(
        "rank_done",
        scanned = outcome.scanned,
        skipped = warnings.len(),
        returned = matches.len()
    );

    Ok(Ranking { matches, warnings })
}

#[cfg(feature = "rayon")]
fn run_scan(query: &[f64], database: &[SignatureRecord], cfg: &MatchConfig) -> scan::ScanOutcome {
    if cfg.parallel {
        scan::scan_par(query, database, cfg.metric, cfg.k)
    } else {
        scan::scan_seq(query, database, cfg.metric, cfg.k)
    }
}

#[cfg(not(feature = "rayon"))]
fn run_scan(query: &[f64], database: &[SignatureRecord], cfg: &MatchConfig) -> scan::ScanOutcome {
    scan::scan_seq(query, database, cfg.metric, cfg.k)
}
