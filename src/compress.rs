//! Magnitude-based soft-threshold compression of frequency grids.
//!
//! The threshold is a percentage of a fixed fraction of the channel's own
//! maximum coefficient magnitude. Coefficients at or below the cutoff are
//! zeroed; survivors shrink by the cutoff while keeping their phase (soft
//! shrinkage, as opposed to hard thresholding which leaves survivors
//! untouched). Channels are compressed independently, each against its own
//! maximum.
//!
//! Compression is a full recomputation per threshold value; callers keep the
//! uncompressed spectrum around and re-run this whenever the slider moves.

use alloc::vec::Vec;

use crate::image::ChannelSet;
use crate::num::{Complex, Float};

/// Divisor mapping the threshold percentage onto an absolute magnitude
/// cutoff: at 100% the cutoff is `max_magnitude / THRESHOLD_SCALE`. The
/// value is a fixed tuning constant, not user-configurable.
pub const THRESHOLD_SCALE: f32 = 1000.0;

/// Retention statistics for one compressed channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdReport {
    /// Coefficients with magnitude strictly above the cutoff.
    pub retained: usize,
    /// Total coefficient count of the grid.
    pub total: usize,
}

impl ThresholdReport {
    /// Share of coefficients zeroed, as a percentage.
    pub fn compression_percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total - self.retained) as f32 / self.total as f32 * 100.0
    }
}

/// Per-channel reports for one compression pass over an RGB set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelReports {
    pub red: ThresholdReport,
    pub green: ThresholdReport,
    pub blue: ThresholdReport,
}

impl ChannelReports {
    /// Retained count averaged over the three channels, rounded to nearest.
    pub fn mean_retained(&self) -> usize {
        let sum = self.red.retained + self.green.retained + self.blue.retained;
        <f64 as Float>::round(sum as f64 / 3.0) as usize
    }

    pub fn total(&self) -> usize {
        self.red.total
    }
}

/// Soft-threshold one frequency-domain grid in place.
///
/// `percent` is the threshold percentage in `[0, 100]`; values outside that
/// range are a caller contract violation and hosts must clamp first. A
/// percentage of 0, or a grid whose maximum magnitude is 0 (an all-black
/// channel), yields a cutoff of 0 and discards nothing.
pub fn soft_threshold_inplace<T: Float>(
    grid: &mut [Vec<Complex<T>>],
    percent: f32,
) -> ThresholdReport {
    let mut max_magnitude = T::zero();
    let mut total = 0usize;
    for row in grid.iter() {
        total += row.len();
        for coeff in row {
            let magnitude = coeff.magnitude();
            if magnitude > max_magnitude {
                max_magnitude = magnitude;
            }
        }
    }

    let cutoff = if percent == 0.0 {
        T::zero()
    } else {
        T::from_f32(percent / 100.0) * (max_magnitude / T::from_f32(THRESHOLD_SCALE))
    };

    #[cfg(feature = "verbose-logging")]
    log::debug!(
        "soft threshold {}%: max magnitude {:?}, cutoff {:?}",
        percent,
        max_magnitude,
        cutoff
    );

    let mut retained = 0usize;
    for row in grid.iter_mut() {
        for coeff in row.iter_mut() {
            let magnitude = coeff.magnitude();
            if magnitude <= cutoff {
                *coeff = Complex::zero();
            } else {
                // magnitude > cutoff >= 0, so the division is safe.
                let factor = (magnitude - cutoff) / magnitude;
                *coeff = coeff.scale(factor);
                retained += 1;
            }
        }
    }
    ThresholdReport { retained, total }
}

/// Soft-threshold all three channels, each against its own maximum.
pub fn soft_threshold_channels<T: Float>(
    set: &mut ChannelSet<T>,
    percent: f32,
) -> ChannelReports {
    ChannelReports {
        red: soft_threshold_inplace(&mut set.red, percent),
        green: soft_threshold_inplace(&mut set.green, percent),
        blue: soft_threshold_inplace(&mut set.blue, percent),
    }
}
