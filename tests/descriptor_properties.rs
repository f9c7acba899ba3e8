use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sigmatch::descriptor::bit::{lbp_codes, BitStats, BIT_LEN};
use sigmatch::descriptor::glcm::{cooccurrence_matrix, quantize, TextureStats, TEXTURE_LEN};
use sigmatch::{extract_features, Descriptor, GridView, PixelGrid, SigMatchError};

fn random_grid(rng: &mut StdRng, width: usize, height: usize) -> PixelGrid {
    let data = (0..width * height).map(|_| rng.random_range(0..=255)).collect();
    PixelGrid::new(data, width, height).unwrap()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
    }
}

#[test]
fn quantize_uses_eight_uniform_levels() {
    assert_eq!(quantize(0), 0);
    assert_eq!(quantize(31), 0);
    assert_eq!(quantize(32), 1);
    assert_eq!(quantize(255), 7);
}

#[test]
fn texture_matches_hand_computed_statistics() {
    // Levels per row: 0 0 7 7 -> pairs (0,0) (0,7) (7,7), counted both ways.
    let grid = PixelGrid::from_rows(&[[0u8, 0, 255, 255], [0, 0, 255, 255]]).unwrap();
    let counts = cooccurrence_matrix(grid.view());
    assert_eq!(counts[0][0], 4);
    assert_eq!(counts[0][7], 2);
    assert_eq!(counts[7][0], 2);
    assert_eq!(counts[7][7], 4);

    let features = extract_features(grid.view(), Descriptor::Texture);
    let third = 1.0f64 / 3.0;
    let sixth = 1.0f64 / 6.0;
    let expected = [
        49.0 * third,
        7.0 * third,
        2.0 * third + third / 50.0,
        2.0 * third * third + 2.0 * sixth * sixth,
        third,
        -(2.0 * third * third.ln() + 2.0 * sixth * sixth.ln()),
    ];
    assert_close(&features, &expected);
}

#[test]
fn texture_of_uniform_grid_is_perfectly_homogeneous() {
    let grid = PixelGrid::new(vec![128u8; 25], 5, 5).unwrap();
    let stats = TextureStats::from_view(grid.view());
    assert_eq!(stats.contrast, 0.0);
    assert_eq!(stats.dissimilarity, 0.0);
    assert_eq!(stats.homogeneity, 1.0);
    assert_eq!(stats.energy, 1.0);
    assert_eq!(stats.correlation, 1.0);
    assert_eq!(stats.entropy, 0.0);
}

#[test]
fn texture_without_adjacent_pairs_is_all_zero() {
    let column = PixelGrid::new(vec![0u8, 100, 200, 255], 1, 4).unwrap();
    let features = extract_features(column.view(), Descriptor::Texture);
    assert_eq!(features, vec![0.0; TEXTURE_LEN]);
    assert!(features.iter().all(|v| v.is_finite()));
}

#[test]
fn bit_pattern_of_small_grids_is_zero_filled() {
    for (w, h) in [(1, 1), (2, 2), (2, 5), (5, 2)] {
        let grid = PixelGrid::new(vec![7u8; w * h], w, h).unwrap();
        assert!(lbp_codes(grid.view()).is_empty());
        assert_eq!(
            extract_features(grid.view(), Descriptor::BitPattern),
            vec![0.0; BIT_LEN]
        );
    }
}

#[test]
fn bit_pattern_codes_follow_clockwise_neighbour_order() {
    let grid =
        PixelGrid::from_rows(&[[200u8, 50, 200], [50, 100, 50], [200, 50, 200]]).unwrap();
    assert_eq!(lbp_codes(grid.view()), vec![0b1010_1010]);
    assert_close(
        &extract_features(grid.view(), Descriptor::BitPattern),
        &[170.0 / 255.0, 0.5, 0.0],
    );

    let flat = PixelGrid::new(vec![9u8; 9], 3, 3).unwrap();
    assert_eq!(lbp_codes(flat.view()), vec![0xFF]);
    assert_eq!(BitStats::from_view(flat.view()).to_array(), [1.0, 1.0, 1.0]);

    let peak = PixelGrid::from_rows(&[[0u8, 0, 0], [0, 255, 0], [0, 0, 0]]).unwrap();
    assert_eq!(lbp_codes(peak.view()), vec![0]);
    assert_eq!(BitStats::from_view(peak.view()).to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn feature_length_is_fixed_per_descriptor() {
    let mut rng = StdRng::seed_from_u64(5);
    for (w, h) in [(1, 1), (1, 7), (7, 1), (2, 2), (3, 3), (16, 9), (64, 48)] {
        let grid = random_grid(&mut rng, w, h);
        for descriptor in Descriptor::ALL {
            let features = extract_features(grid.view(), descriptor);
            assert_eq!(features.len(), descriptor.feature_len(), "{descriptor} {w}x{h}");
            assert!(features.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn extraction_is_deterministic_and_leaves_grid_untouched() {
    let mut rng = StdRng::seed_from_u64(17);
    let grid = random_grid(&mut rng, 32, 24);
    let before = grid.clone();
    for descriptor in Descriptor::ALL {
        let first = extract_features(grid.view(), descriptor);
        let second = extract_features(grid.view(), descriptor);
        assert_eq!(first, second);
    }
    assert_eq!(grid, before);
}

#[test]
fn bit_pattern_components_lie_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..10 {
        let grid = random_grid(&mut rng, 20, 20);
        let features = extract_features(grid.view(), Descriptor::BitPattern);
        assert!(features.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn strided_view_extracts_same_features_as_contiguous_copy() {
    let mut rng = StdRng::seed_from_u64(41);
    let (width, height, stride) = (10, 8, 13);
    let padded: Vec<u8> = (0..stride * height).map(|_| rng.random_range(0..=255)).collect();
    let view = GridView::new(&padded, width, height, stride).unwrap();
    let copy = PixelGrid::from_view(view).unwrap();
    for descriptor in Descriptor::ALL {
        assert_eq!(
            extract_features(view, descriptor),
            extract_features(copy.view(), descriptor)
        );
    }
}

#[test]
fn descriptor_selectors_parse() {
    assert_eq!("GLCM".parse::<Descriptor>().unwrap(), Descriptor::Texture);
    assert_eq!("BiT".parse::<Descriptor>().unwrap(), Descriptor::BitPattern);
    for descriptor in Descriptor::ALL {
        assert_eq!(descriptor.to_string().parse::<Descriptor>().unwrap(), descriptor);
    }
    let err = "sift".parse::<Descriptor>().err().unwrap();
    assert_eq!(
        err,
        SigMatchError::UnknownDescriptor {
            name: "sift".to_string(),
        }
    );
}
