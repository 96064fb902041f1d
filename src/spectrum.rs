//! Spectrum magnitude data for host-side visualization.
//!
//! Returns log-compressed magnitudes plus the grid maximum; normalizing to a
//! display range is the renderer's job, per call, against its own maximum.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::FftError;
use crate::image::ChannelSet;
use crate::num::Float;

/// Per-cell `log(1 + mean channel magnitude)` over a frequency-domain
/// channel set, with the maximum cell value for normalization.
pub fn log_magnitudes<T: Float>(set: &ChannelSet<T>) -> Result<(Vec<Vec<T>>, T), FftError> {
    let rows = set.rows();
    let cols = set.cols();
    for channel in set.channels() {
        if channel.len() != rows || channel.iter().any(|row| row.len() != cols) {
            return Err(FftError::MismatchedDimensions);
        }
    }
    let three = T::one() + T::one() + T::one();
    let mut out = vec![vec![T::zero(); cols]; rows];
    let mut max = T::zero();
    for r in 0..rows {
        for c in 0..cols {
            let mean = (set.red[r][c].magnitude()
                + set.green[r][c].magnitude()
                + set.blue[r][c].magnitude())
                / three;
            let value = (T::one() + mean).ln();
            out[r][c] = value;
            if value > max {
                max = value;
            }
        }
    }
    Ok((out, max))
}
