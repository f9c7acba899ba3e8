use clap::Parser;
use serde::{Deserialize, Serialize};
use sigmatch::io::load_gray_grid;
use sigmatch::{
    extract_features, Descriptor, MatchConfig, MatchWarning, Matcher, Metric, RankedMatch,
    SignatureDb,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod signatures;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

/// Largest number of matches the CLI will report.
const MAX_K: usize = 10;

#[derive(Parser, Debug)]
#[command(author, version, about = "sigmatch image retrieval CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Build the signature database from `index_dir` instead of querying.
    #[arg(long)]
    index: bool,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable info-level tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    Manhattan,
    Euclidean,
    Chebyshev,
    Canberra,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::Manhattan => Metric::Manhattan,
            MetricConfig::Euclidean => Metric::Euclidean,
            MetricConfig::Chebyshev => Metric::Chebyshev,
            MetricConfig::Canberra => Metric::Canberra,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum DescriptorConfig {
    #[serde(alias = "texture")]
    Glcm,
    #[serde(alias = "bitpattern")]
    Bit,
}

impl From<DescriptorConfig> for Descriptor {
    fn from(value: DescriptorConfig) -> Self {
        match value {
            DescriptorConfig::Glcm => Descriptor::Texture,
            DescriptorConfig::Bit => Descriptor::BitPattern,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    query_path: String,
    database_path: String,
    descriptor: DescriptorConfig,
    metric: MetricConfig,
    k: usize,
    parallel: bool,
    output_path: Option<String>,
    index_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            query_path: String::new(),
            database_path: String::new(),
            descriptor: DescriptorConfig::Glcm,
            metric: MetricConfig::Manhattan,
            k: cfg.k,
            parallel: cfg.parallel,
            output_path: None,
            index_dir: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    path: String,
    distance: f64,
    label: String,
}

impl From<RankedMatch> for MatchRecord {
    fn from(value: RankedMatch) -> Self {
        Self {
            path: value.source,
            distance: value.distance,
            label: value.label,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    descriptor: DescriptorConfig,
    metric: MetricConfig,
    features: Vec<f64>,
    matches: Vec<MatchRecord>,
    warnings: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.trace {
        EnvFilter::from_default_env()
            .add_directive("sigmatch=info".parse()?)
            .add_directive("sigmatch_cli=info".parse()?)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.database_path.is_empty() {
        return Err("database_path must be set in the config".into());
    }

    if cli.index {
        run_index(&config)
    } else {
        run_query(&config)
    }
}

fn run_index(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = config
        .index_dir
        .as_deref()
        .ok_or("index_dir must be set in the config for --index")?;
    let db = signatures::index_directory(Path::new(root), config.descriptor.into())?;
    signatures::save_database(Path::new(&config.database_path), &db)?;
    eprintln!(
        "Indexed {} images into {}",
        db.len(),
        config.database_path
    );
    Ok(())
}

fn run_query(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let output = query(config)?;
    let json = serde_json::to_string_pretty(&output)?;

    match &config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

fn loaded_summary(db: &SignatureDb, path: &str) -> String {
    format!("Loaded {} signatures from {path}", db.len())
}

/// Loads the database, describes the query image and ranks it.
fn query(config: &Config) -> Result<Output, Box<dyn std::error::Error>> {
    if config.query_path.is_empty() {
        return Err("query_path must be set in the config".into());
    }
    if !(1..=MAX_K).contains(&config.k) {
        return Err(format!("k must be between 1 and {MAX_K}").into());
    }

    let db = signatures::load_database(Path::new(&config.database_path))?;
    eprintln!("{}", loaded_summary(&db, &config.database_path));
    tracing::info!(count = db.len(), dimensions = ?db.dimensions(), "loaded signatures");

    let grid = load_gray_grid(&config.query_path)?;
    let features = extract_features(grid.view(), config.descriptor.into());

    let matcher = Matcher::new(Arc::new(db)).with_config(MatchConfig {
        metric: config.metric.into(),
        k: config.k,
        parallel: config.parallel,
    });
    let ranking = matcher.rank(&features)?;

    let warnings = ranking
        .warnings
        .iter()
        .map(MatchWarning::to_string)
        .collect();
    Ok(Output {
        descriptor: config.descriptor,
        metric: config.metric,
        features,
        matches: ranking.matches.into_iter().map(MatchRecord::from).collect(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch::SignatureRecord;

    fn write_gray_png(path: &Path, pixel: impl Fn(u32, u32) -> u8) {
        image::GrayImage::from_fn(16, 16, |x, y| image::Luma([pixel(x, y)]))
            .save(path)
            .unwrap();
    }

    /// Indexes `class_a/{ramp,checker}.png` and `class_b/bands.png` into a
    /// database file next to them.
    fn indexed_tree(dir: &Path) -> (PathBuf, PathBuf) {
        let class_a = dir.join("class_a");
        let class_b = dir.join("class_b");
        fs::create_dir(&class_a).unwrap();
        fs::create_dir(&class_b).unwrap();
        write_gray_png(&class_a.join("ramp.png"), |x, _| (x * 16) as u8);
        write_gray_png(&class_a.join("checker.png"), |x, y| {
            if (x + y) % 2 == 0 {
                0
            } else {
                255
            }
        });
        write_gray_png(&class_b.join("bands.png"), |_, y| if y % 4 < 2 { 40 } else { 200 });

        let db = signatures::index_directory(dir, Descriptor::Texture).unwrap();
        let db_path = dir.join("signatures.json");
        signatures::save_database(&db_path, &db).unwrap();
        (db_path, class_a.join("checker.png"))
    }

    fn query_config(query_path: &Path, database_path: &Path, k: usize) -> Config {
        Config {
            query_path: query_path.display().to_string(),
            database_path: database_path.display().to_string(),
            k,
            ..Config::default()
        }
    }

    #[test]
    fn indexed_image_finds_itself_first() {
        let dir = tempfile::tempdir().unwrap();
        let (db_path, checker) = indexed_tree(dir.path());

        let output = query(&query_config(&checker, &db_path, 2)).unwrap();

        assert_eq!(output.features.len(), Descriptor::Texture.feature_len());
        assert_eq!(output.matches.len(), 2);
        assert_eq!(output.matches[0].path, checker.display().to_string());
        assert_eq!(output.matches[0].distance, 0.0);
        assert_eq!(output.matches[0].label, "class_a");
        assert!(output.matches[1].distance > 0.0);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn output_json_has_selectors_features_and_matches() {
        let dir = tempfile::tempdir().unwrap();
        let (db_path, checker) = indexed_tree(dir.path());
        let mut config = query_config(&checker, &db_path, 3);
        config.metric = MetricConfig::Chebyshev;

        let json = serde_json::to_value(query(&config).unwrap()).unwrap();

        assert_eq!(json["descriptor"], "glcm");
        assert_eq!(json["metric"], "chebyshev");
        assert_eq!(json["features"].as_array().unwrap().len(), 6);
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 3);
        for entry in matches {
            assert!(entry["path"].is_string());
            assert!(entry["distance"].is_number());
            assert!(entry["label"].is_string());
        }
        assert_eq!(json["warnings"], serde_json::json!([]));
    }

    #[test]
    fn mismatched_records_become_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (db_path, checker) = indexed_tree(dir.path());
        let mut db = signatures::load_database(&db_path).unwrap().records().to_vec();
        db.push(SignatureRecord::new(vec![0.5, 0.5, 0.5], "class_c", "bit.png"));
        signatures::save_database(&db_path, &db.into_iter().collect()).unwrap();

        let output = query(&query_config(&checker, &db_path, 10)).unwrap();

        assert_eq!(output.matches.len(), 3);
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("bit.png"));
    }

    #[test]
    fn k_outside_cli_range_is_rejected_before_loading() {
        let missing = Path::new("does-not-exist.json");
        for k in [0, MAX_K + 1] {
            let err = query(&query_config(Path::new("q.png"), missing, k)).unwrap_err();
            assert_eq!(err.to_string(), "k must be between 1 and 10");
        }
    }

    #[test]
    fn query_path_is_required() {
        let config = Config {
            database_path: "signatures.json".to_string(),
            ..Config::default()
        };
        let err = query(&config).unwrap_err();
        assert!(err.to_string().contains("query_path"));
    }

    #[test]
    fn loaded_summary_reports_count_and_source() {
        let db = SignatureDb::new(vec![
            SignatureRecord::new(vec![1.0], "A", "p1"),
            SignatureRecord::new(vec![2.0], "B", "p2"),
        ]);
        assert_eq!(
            loaded_summary(&db, "db.json"),
            "Loaded 2 signatures from db.json"
        );
    }
}
