//! Grayscale pixel grids consumed by the descriptors.
//!
//! `PixelGrid` owns a contiguous row-major `u8` buffer and is immutable once
//! built. `GridView` is a borrowed window into a buffer with an explicit
//! stride; stride counts elements between row starts, so `stride > width`
//! describes padded rows. ROI views share the backing slice and keep the
//! parent's stride.

use crate::util::{SigMatchError, SigMatchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Owned single-channel grid of 0-255 intensities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Wraps a contiguous row-major buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> SigMatchResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(SigMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SigMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a grid from rows of equal length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> SigMatchResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SigMatchError::InvalidDimensions {
                    width: row.len(),
                    height,
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Copies a (possibly strided) view into a contiguous grid.
    pub fn from_view(view: GridView<'_>) -> SigMatchResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(SigMatchError::BufferTooSmall {
                needed: y * view.stride() + view.width(),
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns the grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the whole grid.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Borrowed grayscale view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct GridView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> GridView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> SigMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> SigMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(SigMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx).copied()
    }

    /// Returns row `y` trimmed to `width` pixels.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Returns a zero-copy view of a sub-rectangle.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> SigMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SigMatchError::InvalidDimensions { width, height });
        }
        let out_of_bounds = SigMatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            grid_width: self.width,
            grid_height: self.height,
        };
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(end_x, end_y)| end_x <= self.width && end_y <= self.height);
        if !fits {
            return Err(out_of_bounds);
        }

        // `fits` bounds both offsets by the parent's extent.
        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or(SigMatchError::BufferTooSmall {
            needed: start + 1,
            got: self.data.len(),
        })?;
        GridView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> SigMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(SigMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(SigMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(SigMatchError::InvalidDimensions { width, height })
}
