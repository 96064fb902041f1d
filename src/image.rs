//! Power-of-two padding, channel packing, and pixel recovery.
//!
//! The FFT needs power-of-two dimensions, so an image is packed into grids
//! padded up to the next power of two with zero cells; after the inverse
//! transform the padding is cropped away again. A [`TransformSession`]
//! carries both the true and the padded dimensions as one immutable value
//! threaded through every call, so no ambient state links the pack and crop
//! ends of the pipeline.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{FftError, ScalarFftImpl};
use crate::fft2d::{self, uniform_cols};
use crate::num::{Complex, Float};

/// Smallest power of two greater than or equal to `n`, for `n >= 1`.
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// True and padded dimensions of one image, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformSession {
    /// True image width in samples (columns).
    pub width: usize,
    /// True image height in samples (rows).
    pub height: usize,
    /// Smallest power of two `>= width`.
    pub padded_width: usize,
    /// Smallest power of two `>= height`.
    pub padded_height: usize,
}

impl TransformSession {
    /// Build a session for an image of `width` columns by `height` rows,
    /// both at least 1.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            padded_width: next_power_of_two(width),
            padded_height: next_power_of_two(height),
        }
    }

    /// Total coefficient count of one padded channel grid.
    pub fn total_coefficients(&self) -> usize {
        self.padded_width * self.padded_height
    }
}

/// Pack one channel's 8-bit samples into a zero-padded complex grid.
///
/// `samples` is row-major `width * height`; the result is
/// `padded_height` rows by `padded_width` columns with the sample value in
/// the real part, imaginary part zero, and every cell outside the true
/// bounds left at `(0, 0)`.
pub fn pack_channel<T: Float>(
    samples: &[u8],
    session: &TransformSession,
) -> Result<Vec<Vec<Complex<T>>>, FftError> {
    if samples.len() != session.width * session.height {
        return Err(FftError::MismatchedDimensions);
    }
    let mut grid = vec![vec![Complex::<T>::zero(); session.padded_width]; session.padded_height];
    for row in 0..session.height {
        for col in 0..session.width {
            let sample = samples[row * session.width + col];
            grid[row][col].re = T::from_f32(sample as f32);
        }
    }
    Ok(grid)
}

/// Crop a reconstructed grid to the true image region and recover 8-bit
/// samples: real part, rounded to nearest, clamped to `[0, 255]`.
///
/// The grid must be at least `height` rows by `width` columns.
pub fn crop_and_clamp<T: Float>(
    grid: &[Vec<Complex<T>>],
    width: usize,
    height: usize,
) -> Result<Vec<Vec<u8>>, FftError> {
    let cols = uniform_cols(grid)?;
    if grid.len() < height || cols < width {
        return Err(FftError::MismatchedDimensions);
    }
    let mut pixels = Vec::with_capacity(height);
    for row in grid.iter().take(height) {
        let mut out = Vec::with_capacity(width);
        for cell in row.iter().take(width) {
            out.push(cell.re.round().to_f32().clamp(0.0, 255.0) as u8);
        }
        pixels.push(out);
    }
    Ok(pixels)
}

/// The three color channels of one image, all with identical padded
/// dimensions. Every transform and compression step runs over all three so
/// the channels stay spatially aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSet<T: Float> {
    pub red: Vec<Vec<Complex<T>>>,
    pub green: Vec<Vec<Complex<T>>>,
    pub blue: Vec<Vec<Complex<T>>>,
}

impl<T: Float> ChannelSet<T> {
    /// Pack three channels of raw 8-bit samples into padded grids.
    pub fn from_rgb_samples(
        red: &[u8],
        green: &[u8],
        blue: &[u8],
        session: &TransformSession,
    ) -> Result<Self, FftError> {
        Ok(Self {
            red: pack_channel(red, session)?,
            green: pack_channel(green, session)?,
            blue: pack_channel(blue, session)?,
        })
    }

    /// Wrap three existing grids, rejecting ragged or mismatched shapes.
    pub fn from_grids(
        red: Vec<Vec<Complex<T>>>,
        green: Vec<Vec<Complex<T>>>,
        blue: Vec<Vec<Complex<T>>>,
    ) -> Result<Self, FftError> {
        let cols = uniform_cols(&red)?;
        if uniform_cols(&green)? != cols || uniform_cols(&blue)? != cols {
            return Err(FftError::MismatchedDimensions);
        }
        if green.len() != red.len() || blue.len() != red.len() {
            return Err(FftError::MismatchedDimensions);
        }
        Ok(Self { red, green, blue })
    }

    /// Grid height in rows.
    pub fn rows(&self) -> usize {
        self.red.len()
    }

    /// Grid width in columns.
    pub fn cols(&self) -> usize {
        self.red.first().map_or(0, Vec::len)
    }

    pub fn channels(&self) -> [&Vec<Vec<Complex<T>>>; 3] {
        [&self.red, &self.green, &self.blue]
    }

    pub fn channels_mut(&mut self) -> [&mut Vec<Vec<Complex<T>>>; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }

    /// Forward 2D transform applied identically to all three channels.
    pub fn forward(&mut self, fft: &ScalarFftImpl<T>) -> Result<(), FftError> {
        for channel in self.channels_mut() {
            fft2d::fft2d_inplace(channel, fft)?;
        }
        Ok(())
    }

    /// Inverse 2D transform applied identically to all three channels.
    pub fn inverse(&mut self, fft: &ScalarFftImpl<T>) -> Result<(), FftError> {
        for channel in self.channels_mut() {
            fft2d::ifft2d_inplace(channel, fft)?;
        }
        Ok(())
    }
}

/// Displayable per-channel pixel planes, cropped to true image dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbPixels {
    pub red: Vec<Vec<u8>>,
    pub green: Vec<Vec<u8>>,
    pub blue: Vec<Vec<u8>>,
}

impl RgbPixels {
    pub fn height(&self) -> usize {
        self.red.len()
    }

    pub fn width(&self) -> usize {
        self.red.first().map_or(0, Vec::len)
    }
}
