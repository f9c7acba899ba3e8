use sigmatch::{GridView, PixelGrid, SigMatchError};

#[test]
fn pixel_grid_rejects_invalid_dimensions() {
    let err = PixelGrid::new(Vec::new(), 0, 1).err().unwrap();
    assert_eq!(
        err,
        SigMatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = PixelGrid::new(vec![0u8; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        SigMatchError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );
}

#[test]
fn pixel_grid_rejects_small_buffer() {
    let err = PixelGrid::new(vec![0u8; 3], 2, 2).err().unwrap();
    assert_eq!(err, SigMatchError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn pixel_grid_from_rows_requires_equal_rows() {
    let grid = PixelGrid::from_rows(&[[1u8, 2, 3], [4, 5, 6]]).unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 2));
    assert_eq!(grid.data(), &[1, 2, 3, 4, 5, 6]);

    let ragged: [&[u8]; 2] = [&[1, 2], &[3]];
    assert!(PixelGrid::from_rows(&ragged).is_err());
}

#[test]
fn grid_view_rejects_invalid_stride() {
    let data = [0u8; 8];
    let err = GridView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        SigMatchError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn grid_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = GridView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!((roi.width(), roi.height(), roi.stride()), (2, 2, 4));
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0), Some(5));
    assert!(roi.get(2, 0).is_none());

    let owned = PixelGrid::from_view(roi).unwrap();
    assert_eq!(owned.data(), &[5, 6, 9, 10]);

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        SigMatchError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            grid_width: 4,
            grid_height: 4,
        }
    );
}

#[test]
fn padded_rows_are_trimmed_to_width() {
    // Two rows of width 3 stored with stride 5; padding is 99.
    let data = [1u8, 2, 3, 99, 99, 4, 5, 6];
    let view = GridView::new(&data, 3, 2, 5).unwrap();
    let rows: Vec<&[u8]> = view.rows().collect();
    assert_eq!(rows, vec![&[1u8, 2, 3][..], &[4u8, 5, 6][..]]);
}
