//! # fftpress - lossy image compression via the 2D FFT
//!
//! An engine that decomposes an image's color channels into frequency-domain
//! coefficients, discards low-magnitude coefficients by soft thresholding,
//! and reconstructs an approximation of the image, optionally as a staged
//! reveal over progressively larger coefficient prefixes.
//!
//! The pipeline runs one direction: raw pixels are packed into zero-padded
//! complex grids, forward-transformed, soft-thresholded, optionally masked
//! to a coefficient prefix, inverse-transformed, and cropped back to pixels.
//!
//! Everything is a pure function of its inputs: the engine keeps no state
//! between calls beyond per-instance twiddle caches, so it is safe to drive
//! the same data from multiple threads by giving each a transform instance.
//!
//! Decoding image files, rendering pixel buffers, UI wiring, and animation
//! pacing are host concerns; the engine computes frame data and nothing else.
//!
//! ## Cargo features
//!
//! - `std` (default): standard-library math and `std::error::Error` impls
//! - `parallel`: rayon-parallel 2D passes for large grids
//! - `verbose-logging`: debug records via the `log` crate
//!
//! ## Example
//!
//! ```
//! use fftpress::fft::ScalarFftImpl;
//! use fftpress::image::{ChannelSet, TransformSession};
//! use fftpress::compress::soft_threshold_channels;
//! use fftpress::reveal::reconstruct;
//!
//! let session = TransformSession::new(3, 2);
//! let channel = [10u8, 20, 30, 40, 50, 60];
//! let mut set =
//!     ChannelSet::<f64>::from_rgb_samples(&channel, &channel, &channel, &session).unwrap();
//! let fft = ScalarFftImpl::<f64>::default();
//!
//! set.forward(&fft).unwrap();
//! let reports = soft_threshold_channels(&mut set, 30.0);
//! assert_eq!(reports.total(), session.total_coefficients());
//!
//! let pixels = reconstruct(&set, &session, &fft).unwrap();
//! assert_eq!(pixels.height(), 2);
//! assert_eq!(pixels.width(), 3);
//! ```

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Complex values and the float seam shared by all transforms.
pub mod num;

/// One-dimensional power-of-two FFT with a planner-backed twiddle cache.
pub mod fft;

/// Two-dimensional FFT via the row-column algorithm.
pub mod fft2d;

/// Power-of-two padding, channel packing, and pixel recovery.
pub mod image;

/// Magnitude-based soft-threshold compression.
pub mod compress;

/// Staged partial reconstruction from compressed coefficients.
pub mod reveal;

/// Log-magnitude spectrum data for visualization hosts.
pub mod spectrum;

pub use fft::{FftError, FftImpl, FftPlanner, ScalarFftImpl};
pub use num::{Complex, Complex32, Complex64, Float};
