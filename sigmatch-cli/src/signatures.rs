//! JSON signature database files and directory indexing.
//!
//! A database file is a JSON array of `{ "features", "label", "path" }`
//! objects, in the order they were indexed.

use serde::{Deserialize, Serialize};
use sigmatch::io::load_gray_grid;
use sigmatch::{extract_features, Descriptor, SignatureDb, SignatureRecord};
use std::error::Error;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Extensions picked up when indexing a directory.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Debug, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub features: Vec<f64>,
    pub label: String,
    pub path: String,
}

impl From<SignatureEntry> for SignatureRecord {
    fn from(value: SignatureEntry) -> Self {
        SignatureRecord::new(value.features, value.label, value.path)
    }
}

impl From<&SignatureRecord> for SignatureEntry {
    fn from(value: &SignatureRecord) -> Self {
        Self {
            features: value.features.clone(),
            label: value.label.clone(),
            path: value.source.clone(),
        }
    }
}

pub fn load_database(path: &Path) -> Result<SignatureDb, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("reading signatures from {}: {err}", path.display()))?;
    let entries: Vec<SignatureEntry> = serde_json::from_str(&text)?;
    Ok(entries.into_iter().map(SignatureRecord::from).collect())
}

pub fn save_database(path: &Path, db: &SignatureDb) -> Result<(), Box<dyn Error>> {
    let entries: Vec<SignatureEntry> = db.iter().map(SignatureEntry::from).collect();
    fs::write(path, serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Label of an image: the name of the directory it sits in.
fn label_for(path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unlabeled".to_string())
}

/// Extracts signatures for every image below `root`, sorted by path.
///
/// Files that fail to decode are logged and skipped.
pub fn index_directory(root: &Path, descriptor: Descriptor) -> Result<SignatureDb, Box<dyn Error>> {
    let mut records = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_image(path) {
            continue;
        }
        let grid = match load_gray_grid(path) {
            Ok(grid) => grid,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping image");
                continue;
            }
        };
        let features = extract_features(grid.view(), descriptor);
        records.push(SignatureRecord::new(
            features,
            label_for(path),
            path.display().to_string(),
        ));
    }
    tracing::info!(count = records.len(), root = %root.display(), "indexed signatures");
    Ok(SignatureDb::new(records))
}
