//! One-dimensional Fast Fourier Transform.
//!
//! Radix-2 Cooley–Tukey over power-of-two lengths, written as an in-place
//! bit-reversal butterfly rather than literal recursion. The inverse is the
//! conjugate trick: conjugate, forward transform, conjugate again and divide
//! by N. An [`FftPlanner`] caches twiddle-factor tables per transform size so
//! repeated row/column passes over the same grid reuse one table.
//!
//! Lengths 0 and 1 are identities. Any other non-power-of-two length is a
//! rejected operation: image grids are zero-padded up front (see
//! [`crate::image`]), so an odd length here is a caller bug, never something
//! to truncate around.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;

use crate::num::{Complex, Float};

/// Errors shared by the 1D and 2D transform entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Sequence length is neither 0, 1, nor a power of two.
    NonPowerOfTwo,
    /// Grid rows do not all have the same length.
    RaggedRows,
    /// Channel grids disagree in size, or a sample buffer does not match
    /// the dimensions it was declared with.
    MismatchedDimensions,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::NonPowerOfTwo => write!(f, "sequence length must be a power of two"),
            FftError::RaggedRows => write!(f, "grid rows must all have the same length"),
            FftError::MismatchedDimensions => write!(f, "dimensions do not match"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Caches twiddle-factor tables keyed by transform size.
///
/// `table[k] = e^(-2*pi*i*k/n)` for `k` in `0..n/2`; a table for size `n`
/// serves every butterfly pass of that transform.
pub struct FftPlanner<T: Float> {
    twiddles: HashMap<usize, Arc<[Complex<T>]>>,
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            twiddles: HashMap::new(),
        }
    }

    pub fn get_twiddles(&mut self, n: usize) -> Arc<[Complex<T>]> {
        self.twiddles
            .entry(n)
            .or_insert_with(|| twiddle_table(n))
            .clone()
    }
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn twiddle_table<T: Float>(n: usize) -> Arc<[Complex<T>]> {
    let two = T::one() + T::one();
    let n_t = T::from_usize(n).unwrap_or_else(|| T::from_f32(n as f32));
    let mut table = Vec::with_capacity(n / 2);
    for k in 0..n / 2 {
        let k_t = T::from_usize(k).unwrap_or_else(|| T::from_f32(k as f32));
        let theta = -(two * T::pi() * k_t) / n_t;
        table.push(Complex::expi(theta));
    }
    table.into()
}

/// Transform seam between the 2D routines and the 1D implementation.
pub trait FftImpl<T: Float> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;

    fn fft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedDimensions);
        }
        output.copy_from_slice(input);
        self.fft(output)
    }

    fn ifft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedDimensions);
        }
        output.copy_from_slice(input);
        self.ifft(output)
    }
}

/// Scalar in-place FFT with a planner-backed twiddle cache.
///
/// Each instance owns its cache behind a `RefCell`, so an instance is cheap
/// to create and callers that want cross-thread use simply give each thread
/// its own. The transforms themselves are pure functions of their input.
pub struct ScalarFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for ScalarFftImpl<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> ScalarFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }
}

impl<T: Float> FftImpl<T> for ScalarFftImpl<T> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n <= 1 {
            return Ok(());
        }
        if !n.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        let twiddles = self.planner.borrow_mut().get_twiddles(n);

        bit_reverse_permute(input);

        // Butterfly passes: len doubles each pass, twiddle stride halves.
        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            let mut base = 0;
            while base < n {
                for k in 0..half {
                    let w = twiddles[k * stride];
                    let u = input[base + k];
                    let v = input[base + k + half].mul(w);
                    input[base + k] = u.add(v);
                    input[base + k + half] = u.sub(v);
                }
                base += len;
            }
            len <<= 1;
        }
        Ok(())
    }

    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n <= 1 {
            return Ok(());
        }
        for c in input.iter_mut() {
            c.im = -c.im;
        }
        self.fft(input)?;
        let scale = T::one() / T::from_usize(n).unwrap_or_else(|| T::from_f32(n as f32));
        for c in input.iter_mut() {
            c.im = -c.im;
            c.re = c.re * scale;
            c.im = c.im * scale;
        }
        Ok(())
    }
}

fn bit_reverse_permute<T: Float>(input: &mut [Complex<T>]) {
    let n = input.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            input.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::{Complex32, Complex64};
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_impulse_spectrum_is_flat() {
        // FFT of [1, 0, 0, 0] is [1, 1, 1, 1].
        let mut data = [
            Complex32::new(1.0, 0.0),
            Complex32::new(0.0, 0.0),
            Complex32::new(0.0, 0.0),
            Complex32::new(0.0, 0.0),
        ];
        let fft = ScalarFftImpl::<f32>::default();
        fft.fft(&mut data).unwrap();
        for c in &data {
            assert!((c.re - 1.0).abs() < 1e-6, "re = {}", c.re);
            assert!(c.im.abs() < 1e-6, "im = {}", c.im);
        }
        fft.ifft(&mut data).unwrap();
        assert!((data[0].re - 1.0).abs() < 1e-6);
        for c in &data[1..] {
            assert!(c.re.abs() < 1e-6);
            assert!(c.im.abs() < 1e-6);
        }
    }

    #[test]
    fn test_all_ones_concentrates_in_dc() {
        let mut data = vec![Complex32::new(1.0, 0.0); 8];
        let fft = ScalarFftImpl::<f32>::default();
        fft.fft(&mut data).unwrap();
        assert!((data[0].re - 8.0).abs() < 1e-6);
        for c in &data[1..] {
            assert!(c.re.abs() < 1e-6);
            assert!(c.im.abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_random_f64() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut data: Vec<Complex64> = (0..64)
            .map(|_| Complex64::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect();
        let orig = data.clone();
        let fft = ScalarFftImpl::<f64>::default();
        fft.fft(&mut data).unwrap();
        fft.ifft(&mut data).unwrap();
        for (a, b) in data.iter().zip(orig.iter()) {
            assert!((a.re - b.re).abs() < 1e-10, "re: {} vs {}", a.re, b.re);
            assert!((a.im - b.im).abs() < 1e-10, "im: {} vs {}", a.im, b.im);
        }
    }

    #[test]
    fn test_non_power_of_two_rejected() {
        let mut data = vec![Complex32::new(1.0, 0.0); 3];
        let fft = ScalarFftImpl::<f32>::default();
        assert_eq!(fft.fft(&mut data), Err(FftError::NonPowerOfTwo));
        let mut data = vec![Complex32::new(1.0, 0.0); 6];
        assert_eq!(fft.fft(&mut data), Err(FftError::NonPowerOfTwo));
    }

    #[test]
    fn test_trivial_lengths_are_identity() {
        let fft = ScalarFftImpl::<f32>::default();
        let mut empty: [Complex32; 0] = [];
        fft.fft(&mut empty).unwrap();
        let mut single = [Complex32::new(3.5, -1.25)];
        fft.fft(&mut single).unwrap();
        assert_eq!(single[0], Complex32::new(3.5, -1.25));
        fft.ifft(&mut single).unwrap();
        assert_eq!(single[0], Complex32::new(3.5, -1.25));
    }

    #[test]
    fn test_out_of_place_leaves_input_untouched() {
        let input = vec![
            Complex32::new(1.0, 0.0),
            Complex32::new(2.0, 0.0),
            Complex32::new(3.0, 0.0),
            Complex32::new(4.0, 0.0),
        ];
        let mut output = vec![Complex32::zero(); 4];
        let fft = ScalarFftImpl::<f32>::default();
        fft.fft_out_of_place(&input, &mut output).unwrap();
        assert_eq!(input[0].re, 1.0);
        assert_eq!(input[3].re, 4.0);
        assert!((output[0].re - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_place_mismatched_lengths() {
        let input = vec![Complex32::new(1.0, 0.0); 2];
        let mut output = vec![Complex32::zero(); 3];
        let fft = ScalarFftImpl::<f32>::default();
        assert_eq!(
            fft.fft_out_of_place(&input, &mut output),
            Err(FftError::MismatchedDimensions)
        );
    }

    #[test]
    fn test_hermitian_symmetry_for_real_input() {
        let mut data = vec![
            Complex32::new(1.0, 0.0),
            Complex32::new(2.0, 0.0),
            Complex32::new(3.0, 0.0),
            Complex32::new(4.0, 0.0),
        ];
        let fft = ScalarFftImpl::<f32>::default();
        fft.fft(&mut data).unwrap();
        assert!((data[1].re - data[3].re).abs() < 1e-6);
        assert!((data[1].im + data[3].im).abs() < 1e-6);
    }

    #[test]
    fn test_planner_reuse_is_deterministic() {
        let fft = ScalarFftImpl::<f64>::default();
        let make = || {
            (0..16)
                .map(|i| Complex64::new(i as f64, 0.0))
                .collect::<Vec<_>>()
        };
        let mut a = make();
        let mut b = make();
        fft.fft(&mut a).unwrap();
        // Second run hits the cached twiddle table.
        fft.fft(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
