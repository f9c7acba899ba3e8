//! Python bindings for sigmatch.
//!
//! Exposes feature extraction, distances and ranking to Python via PyO3.
//! Signature records cross the boundary as `(features, label, path)` tuples.

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use sigmatch::{
    Descriptor, GridView, MatchConfig, Metric, RankedMatch as RustRankedMatch,
    Ranking as RustRanking, SigMatchError, SignatureDb, SignatureRecord,
    SignatureStore as RustSignatureStore,
};

type RecordTuple = (Vec<f64>, String, String);

/// Convert a SigMatchError to a Python exception.
fn to_py_err(err: SigMatchError) -> PyErr {
    match err {
        SigMatchError::ImageIo { .. } => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_metric(metric: &str) -> PyResult<Metric> {
    metric.parse().map_err(to_py_err)
}

fn parse_descriptor(descriptor: &str) -> PyResult<Descriptor> {
    descriptor.parse().map_err(to_py_err)
}

fn to_db(records: Vec<RecordTuple>) -> SignatureDb {
    records
        .into_iter()
        .map(|(features, label, path)| SignatureRecord::new(features, label, path))
        .collect()
}

/// One ranked signature: path, distance and label.
#[pyclass]
#[derive(Clone)]
pub struct RankedMatch {
    #[pyo3(get)]
    pub path: String,
    #[pyo3(get)]
    pub distance: f64,
    #[pyo3(get)]
    pub label: String,
    /// Position of the record in the database.
    #[pyo3(get)]
    pub index: usize,
}

#[pymethods]
impl RankedMatch {
    fn __repr__(&self) -> String {
        format!(
            "RankedMatch(path='{}', distance={:.6}, label='{}')",
            self.path, self.distance, self.label
        )
    }
}

impl From<RustRankedMatch> for RankedMatch {
    fn from(m: RustRankedMatch) -> Self {
        Self {
            path: m.source,
            distance: m.distance,
            label: m.label,
            index: m.index,
        }
    }
}

/// Ranked matches plus warnings for records that were skipped.
#[pyclass]
pub struct RankResult {
    #[pyo3(get)]
    pub matches: Vec<RankedMatch>,
    #[pyo3(get)]
    pub warnings: Vec<String>,
}

#[pymethods]
impl RankResult {
    fn __len__(&self) -> usize {
        self.matches.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "RankResult(matches={}, warnings={})",
            self.matches.len(),
            self.warnings.len()
        )
    }
}

impl From<RustRanking> for RankResult {
    fn from(r: RustRanking) -> Self {
        Self {
            warnings: r.warnings.iter().map(ToString::to_string).collect(),
            matches: r.matches.into_iter().map(RankedMatch::from).collect(),
        }
    }
}

/// Holds a signature database that can be replaced while queries run.
#[pyclass]
pub struct SignatureStore {
    inner: RustSignatureStore,
}

#[pymethods]
impl SignatureStore {
    #[new]
    #[pyo3(signature = (records = Vec::new()))]
    fn new(records: Vec<RecordTuple>) -> Self {
        Self {
            inner: RustSignatureStore::new(to_db(records)),
        }
    }

    /// Swap in a new set of records; returns the previous record count.
    fn replace(&self, records: Vec<RecordTuple>) -> usize {
        self.inner.replace(to_db(records)).len()
    }

    #[pyo3(signature = (query, metric = "manhattan", k = 5, parallel = false))]
    fn rank(
        &self,
        py: Python<'_>,
        query: Vec<f64>,
        metric: &str,
        k: usize,
        parallel: bool,
    ) -> PyResult<RankResult> {
        let cfg = MatchConfig {
            metric: parse_metric(metric)?,
            k,
            parallel,
        };
        let snapshot = self.inner.snapshot();
        let ranking = py
            .detach(|| sigmatch::rank_with_config(&query, snapshot.records(), &cfg))
            .map_err(to_py_err)?;
        Ok(ranking.into())
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("SignatureStore(records={})", self.inner.len())
    }
}

/// Extract a feature vector from a 2D uint8 grayscale array.
#[pyfunction]
#[pyo3(signature = (image, descriptor = "glcm"))]
fn extract_features(image: PyReadonlyArray2<'_, u8>, descriptor: &str) -> PyResult<Vec<f64>> {
    let descriptor = parse_descriptor(descriptor)?;
    let shape = image.shape();
    let height = shape[0];
    let width = shape[1];
    let data = image.as_slice()?;

    let view = GridView::from_slice(data, width, height).map_err(to_py_err)?;
    Ok(sigmatch::extract_features(view, descriptor))
}

/// Decode an image file to grayscale and extract its features.
#[pyfunction]
#[pyo3(signature = (path, descriptor = "glcm"))]
fn extract_features_from_file(path: &str, descriptor: &str) -> PyResult<Vec<f64>> {
    let descriptor = parse_descriptor(descriptor)?;
    let grid = sigmatch::io::load_gray_grid(path).map_err(to_py_err)?;
    Ok(sigmatch::extract_features(grid.view(), descriptor))
}

#[pyfunction]
#[pyo3(signature = (a, b, metric = "manhattan"))]
fn distance(a: Vec<f64>, b: Vec<f64>, metric: &str) -> PyResult<f64> {
    sigmatch::distance(&a, &b, parse_metric(metric)?).map_err(to_py_err)
}

/// Rank `(features, label, path)` records by distance to `query`.
#[pyfunction]
#[pyo3(signature = (query, records, metric = "manhattan", k = 5))]
fn rank(
    query: Vec<f64>,
    records: Vec<RecordTuple>,
    metric: &str,
    k: usize,
) -> PyResult<RankResult> {
    let metric = parse_metric(metric)?;
    let db = to_db(records);
    let ranking = sigmatch::rank(&query, db.records(), metric, k).map_err(to_py_err)?;
    Ok(ranking.into())
}

/// Python module for sigmatch image retrieval.
#[pymodule]
fn _sigmatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RankedMatch>()?;
    m.add_class::<RankResult>()?;
    m.add_class::<SignatureStore>()?;
    m.add_function(wrap_pyfunction!(extract_features, m)?)?;
    m.add_function(wrap_pyfunction!(extract_features_from_file, m)?)?;
    m.add_function(wrap_pyfunction!(distance, m)?)?;
    m.add_function(wrap_pyfunction!(rank, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
