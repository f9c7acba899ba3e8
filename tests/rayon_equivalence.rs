#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sigmatch::{rank_with_config, MatchConfig, Metric, SignatureRecord};

#[test]
fn parallel_scan_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(77);
    let db: Vec<SignatureRecord> = (0..2_000)
        .map(|i| {
            let len = if i % 97 == 0 { 3 } else { 6 };
            // Coarse values force plenty of distance ties.
            let features: Vec<f64> = (0..len).map(|_| rng.random_range(0..5) as f64).collect();
            SignatureRecord::new(features, format!("c{}", i % 10), format!("img{i}.png"))
        })
        .collect();
    let query = vec![2.0, 2.0, 1.0, 0.0, 4.0, 3.0];

    for metric in Metric::ALL {
        let seq_cfg = MatchConfig {
            metric,
            k: 10,
            parallel: false,
        };
        let par_cfg = MatchConfig {
            parallel: true,
            ..seq_cfg.clone()
        };
        let seq = rank_with_config(&query, &db, &seq_cfg).unwrap();
        let par = rank_with_config(&query, &db, &par_cfg).unwrap();
        assert_eq!(seq, par, "{metric}");
        assert_eq!(seq.skipped(), 21);
    }
}
