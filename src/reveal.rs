//! Staged partial reconstruction from a compressed spectrum.
//!
//! A reveal keeps only the first `floor(f * H * W)` coefficients in
//! row-major scan order and zeroes the rest, then inverse-transforms and
//! crops. Scan order, not magnitude order, defines "first": with the
//! unshifted coefficient layout the DC and low-frequency terms cluster near
//! scan index 0 (and near the end), which is what gives early stages their
//! coarse, low-frequency look.
//!
//! [`RevealStages`] walks a list of fractions and computes one frame per
//! request. Each frame is derived independently from the original compressed
//! channels, so the host decides pacing and abandons a sequence by simply
//! not asking for the next frame.

use alloc::vec::Vec;

use crate::fft::{FftError, ScalarFftImpl};
use crate::image::{crop_and_clamp, ChannelSet, RgbPixels, TransformSession};
use crate::num::{Complex, Float};

/// Reveal fractions of the classic four-stage animation.
pub const DEFAULT_STAGES: [f32; 4] = [0.05, 0.10, 0.20, 1.0];

/// Zero every coefficient whose row-major scan index is `>= floor(fraction *
/// total)`, keeping the first ones unchanged.
///
/// `fraction` is in `(0, 1]`; out-of-range values are a caller contract
/// violation and hosts must clamp first.
pub fn partial_reveal_inplace<T: Float>(grid: &mut [Vec<Complex<T>>], fraction: f32) {
    let total: usize = grid.iter().map(Vec::len).sum();
    let cutoff_index = (fraction as f64 * total as f64) as usize;

    #[cfg(feature = "verbose-logging")]
    log::debug!(
        "partial reveal: keeping {} of {} coefficients",
        cutoff_index.min(total),
        total
    );

    let mut index = 0usize;
    for row in grid.iter_mut() {
        for coeff in row.iter_mut() {
            if index >= cutoff_index {
                *coeff = Complex::zero();
            }
            index += 1;
        }
    }
}

/// Reconstruct displayable pixels from a frequency-domain channel set:
/// inverse 2D transform per channel, then crop to the session's true
/// dimensions and clamp to 8-bit samples.
pub fn reconstruct<T: Float>(
    channels: &ChannelSet<T>,
    session: &TransformSession,
    fft: &ScalarFftImpl<T>,
) -> Result<RgbPixels, FftError> {
    let mut spatial = channels.clone();
    spatial.inverse(fft)?;
    Ok(RgbPixels {
        red: crop_and_clamp(&spatial.red, session.width, session.height)?,
        green: crop_and_clamp(&spatial.green, session.width, session.height)?,
        blue: crop_and_clamp(&spatial.blue, session.width, session.height)?,
    })
}

/// Compute one reveal stage: mask every channel to the first
/// `floor(fraction * total)` coefficients, then reconstruct.
pub fn reveal_stage<T: Float>(
    channels: &ChannelSet<T>,
    session: &TransformSession,
    fraction: f32,
    fft: &ScalarFftImpl<T>,
) -> Result<RgbPixels, FftError> {
    let mut masked = channels.clone();
    for channel in masked.channels_mut() {
        partial_reveal_inplace(channel, fraction);
    }
    reconstruct(&masked, session, fft)
}

/// One frame of a staged reveal: the fraction it was computed at and the
/// reconstructed pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct StageFrame {
    pub fraction: f32,
    pub pixels: RgbPixels,
}

/// Generator over reveal stages.
///
/// Yields one [`StageFrame`] per stage fraction, computed on demand from the
/// borrowed compressed channels. Dropping the iterator mid-sequence is the
/// cancellation story; there is no other state to clean up.
pub struct RevealStages<'a, T: Float> {
    channels: &'a ChannelSet<T>,
    session: TransformSession,
    fft: &'a ScalarFftImpl<T>,
    stages: &'a [f32],
    next: usize,
}

impl<'a, T: Float> RevealStages<'a, T> {
    pub fn new(
        channels: &'a ChannelSet<T>,
        session: TransformSession,
        fft: &'a ScalarFftImpl<T>,
        stages: &'a [f32],
    ) -> Self {
        Self {
            channels,
            session,
            fft,
            stages,
            next: 0,
        }
    }

    /// The four-stage sequence of the original demo: 5%, 10%, 20%, 100%.
    pub fn default_stages(
        channels: &'a ChannelSet<T>,
        session: TransformSession,
        fft: &'a ScalarFftImpl<T>,
    ) -> Self {
        Self::new(channels, session, fft, &DEFAULT_STAGES)
    }
}

impl<'a, T: Float> Iterator for RevealStages<'a, T> {
    type Item = Result<StageFrame, FftError>;

    fn next(&mut self) -> Option<Self::Item> {
        let fraction = *self.stages.get(self.next)?;
        self.next += 1;
        Some(
            reveal_stage(self.channels, &self.session, fraction, self.fft)
                .map(|pixels| StageFrame { fraction, pixels }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft2d::fft2d_inplace;
    use crate::num::Complex64;
    use alloc::vec;

    #[test]
    fn test_mask_keeps_row_major_prefix() {
        let mut grid: Vec<Vec<Complex64>> = (0..4)
            .map(|r| (0..4).map(|c| Complex64::new((r * 4 + c + 1) as f64, 1.0)).collect())
            .collect();
        partial_reveal_inplace(&mut grid, 0.25);
        // floor(0.25 * 16) = 4: the whole first row survives, nothing else.
        for c in 0..4 {
            assert_eq!(grid[0][c], Complex64::new((c + 1) as f64, 1.0));
        }
        for r in 1..4 {
            for c in 0..4 {
                assert_eq!(grid[r][c], Complex64::zero());
            }
        }
    }

    #[test]
    fn test_full_fraction_keeps_everything() {
        let mut grid = vec![vec![Complex64::new(2.0, -3.0); 8]; 4];
        let orig = grid.clone();
        partial_reveal_inplace(&mut grid, 1.0);
        assert_eq!(grid, orig);
    }

    #[test]
    fn test_stage_iterator_walks_default_stages() {
        let session = TransformSession::new(4, 4);
        let fft = ScalarFftImpl::<f64>::default();
        let samples: Vec<u8> = (0..16).map(|i| (i * 13 % 251) as u8).collect();
        let mut set =
            ChannelSet::<f64>::from_rgb_samples(&samples, &samples, &samples, &session).unwrap();
        set.forward(&fft).unwrap();

        let frames: Result<Vec<StageFrame>, FftError> =
            RevealStages::default_stages(&set, session, &fft).collect();
        let frames = frames.unwrap();
        assert_eq!(frames.len(), 4);
        for (frame, expected) in frames.iter().zip(DEFAULT_STAGES) {
            assert_eq!(frame.fraction, expected);
            assert_eq!(frame.pixels.width(), 4);
            assert_eq!(frame.pixels.height(), 4);
        }
        // The final stage reveals every coefficient: exact reconstruction.
        let last = &frames[3].pixels;
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(last.red[r][c], samples[r * 4 + c]);
            }
        }
    }

    #[test]
    fn test_stage_error_non_increasing() {
        // Squared reconstruction error against the full inverse shrinks (or
        // holds) as the revealed prefix grows: the masked-out coefficient
        // sets are nested, so by Parseval the error energy can only drop.
        let session = TransformSession::new(8, 8);
        let fft = ScalarFftImpl::<f64>::default();
        let samples: Vec<u8> = (0..64).map(|i| (i * 37 % 256) as u8).collect();
        let mut set =
            ChannelSet::<f64>::from_rgb_samples(&samples, &samples, &samples, &session).unwrap();
        set.forward(&fft).unwrap();

        let mut full = set.clone();
        full.inverse(&fft).unwrap();
        let mut previous = f64::INFINITY;
        for fraction in DEFAULT_STAGES {
            let mut stage = set.clone();
            for channel in stage.channels_mut() {
                partial_reveal_inplace(channel, fraction);
            }
            stage.inverse(&fft).unwrap();
            let mut error = 0.0f64;
            for r in 0..8 {
                for c in 0..8 {
                    let d = stage.red[r][c].sub(full.red[r][c]);
                    error += d.re * d.re + d.im * d.im;
                }
            }
            assert!(
                error <= previous + 1e-9,
                "error {} rose at fraction {}",
                error,
                fraction
            );
            previous = error;
        }
    }

    #[test]
    fn test_reconstruct_crops_to_true_dimensions() {
        let session = TransformSession::new(6, 5);
        let fft = ScalarFftImpl::<f64>::default();
        let samples: Vec<u8> = (0..30).map(|i| (40 + i * 7) as u8).collect();
        let mut set =
            ChannelSet::<f64>::from_rgb_samples(&samples, &samples, &samples, &session).unwrap();
        assert_eq!(set.rows(), 8);
        assert_eq!(set.cols(), 8);
        let mut spectrum = set.clone();
        fft2d_inplace(&mut spectrum.red, &fft).unwrap();
        set.forward(&fft).unwrap();
        assert_eq!(set.red, spectrum.red);

        let pixels = reconstruct(&set, &session, &fft).unwrap();
        assert_eq!(pixels.height(), 5);
        assert_eq!(pixels.width(), 6);
        for r in 0..5 {
            for c in 0..6 {
                assert_eq!(pixels.green[r][c], samples[r * 6 + c]);
            }
        }
    }
}
