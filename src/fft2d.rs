//! Two-dimensional FFT over dense row-major grids (row-column algorithm).
//!
//! A grid is `Vec<Vec<Complex<T>>>` with uniform row length: one color
//! channel of an image, spatial or frequency domain. Both directions apply
//! the 1D pass to every row and then to every column; forward and inverse
//! use the same row-then-column order, which is what makes
//! `ifft2d(fft2d(g)) == g` hold to rounding error.
//!
//! Each dimension must independently be a power of two (or 0/1); the 1D
//! transform enforces that. Ragged grids are rejected before any pass runs.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{FftError, FftImpl, ScalarFftImpl};
use crate::num::{Complex, Float};

/// Check that every row has the same length and return it.
pub(crate) fn uniform_cols<T: Float>(data: &[Vec<Complex<T>>]) -> Result<usize, FftError> {
    let cols = data.first().map_or(0, Vec::len);
    if data.iter().any(|row| row.len() != cols) {
        return Err(FftError::RaggedRows);
    }
    Ok(cols)
}

/// 2D FFT in-place: 1D forward transform on every row, then every column.
pub fn fft2d_inplace<T: Float>(
    data: &mut [Vec<Complex<T>>],
    fft: &ScalarFftImpl<T>,
) -> Result<(), FftError> {
    let rows = data.len();
    if rows == 0 {
        return Ok(());
    }
    let cols = uniform_cols(data)?;
    for row in data.iter_mut() {
        fft.fft(row)?;
    }
    let mut col = vec![Complex::<T>::zero(); rows];
    for c in 0..cols {
        for r in 0..rows {
            col[r] = data[r][c];
        }
        fft.fft(&mut col)?;
        for r in 0..rows {
            data[r][c] = col[r];
        }
    }
    Ok(())
}

/// 2D inverse FFT in-place, rows then columns as in the forward direction.
pub fn ifft2d_inplace<T: Float>(
    data: &mut [Vec<Complex<T>>],
    fft: &ScalarFftImpl<T>,
) -> Result<(), FftError> {
    let rows = data.len();
    if rows == 0 {
        return Ok(());
    }
    let cols = uniform_cols(data)?;
    for row in data.iter_mut() {
        fft.ifft(row)?;
    }
    let mut col = vec![Complex::<T>::zero(); rows];
    for c in 0..cols {
        for r in 0..rows {
            col[r] = data[r][c];
        }
        fft.ifft(&mut col)?;
        for r in 0..rows {
            data[r][c] = col[r];
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn transposed<T: Float>(data: &[Vec<Complex<T>>], cols: usize) -> Vec<Vec<Complex<T>>> {
    let rows = data.len();
    (0..cols)
        .map(|c| (0..rows).map(|r| data[r][c]).collect())
        .collect()
}

/// Parallel 2D FFT: rows in parallel, then columns via a transposed copy.
///
/// Worth it for large grids only; each rayon worker keeps its own planner.
#[cfg(feature = "parallel")]
pub fn fft2d_inplace_parallel<T: Float>(data: &mut [Vec<Complex<T>>]) -> Result<(), FftError> {
    use rayon::prelude::*;

    if data.is_empty() {
        return Ok(());
    }
    let cols = uniform_cols(data)?;
    data.par_iter_mut()
        .try_for_each_init(ScalarFftImpl::<T>::default, |fft, row| fft.fft(row))?;
    let mut columns = transposed(data, cols);
    columns
        .par_iter_mut()
        .try_for_each_init(ScalarFftImpl::<T>::default, |fft, col| fft.fft(col))?;
    for (c, col) in columns.iter().enumerate() {
        for (r, value) in col.iter().enumerate() {
            data[r][c] = *value;
        }
    }
    Ok(())
}

/// Parallel counterpart of [`ifft2d_inplace`].
#[cfg(feature = "parallel")]
pub fn ifft2d_inplace_parallel<T: Float>(data: &mut [Vec<Complex<T>>]) -> Result<(), FftError> {
    use rayon::prelude::*;

    if data.is_empty() {
        return Ok(());
    }
    let cols = uniform_cols(data)?;
    data.par_iter_mut()
        .try_for_each_init(ScalarFftImpl::<T>::default, |fft, row| fft.ifft(row))?;
    let mut columns = transposed(data, cols);
    columns
        .par_iter_mut()
        .try_for_each_init(ScalarFftImpl::<T>::default, |fft, col| fft.ifft(col))?;
    for (c, col) in columns.iter().enumerate() {
        for (r, value) in col.iter().enumerate() {
            data[r][c] = *value;
        }
    }
    Ok(())
}
