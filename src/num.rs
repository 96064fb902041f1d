//! Complex arithmetic and the float seam shared by every transform.
//!
//! The engine is generic over [`Float`] so the same code serves `f32`
//! (compact grids) and `f64` (tight reconstruction tolerances). Under
//! `no_std` the math routes through `libm`.

#[cfg(not(feature = "std"))]
use libm::{cos, cosf, log, logf, round, roundf, sin, sinf, sqrt, sqrtf};

/// Minimal float trait for the generic FFT and compression routines.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f32(x: f32) -> Self;
    /// Attempt to convert a `usize` into the floating-point type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn to_f32(self) -> f32;
    fn cos(self) -> Self;
    fn sin(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn sqrt(self) -> Self;
    fn ln(self) -> Self;
    fn round(self) -> Self;
    fn pi() -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x < MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn to_f32(self) -> f32 {
        self
    }
    fn cos(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::cos(self)
        }
        #[cfg(not(feature = "std"))]
        {
            cosf(self)
        }
    }
    fn sin(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::sin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            sinf(self)
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        (Float::sin(self), Float::cos(self))
    }
    fn sqrt(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::sqrt(self)
        }
        #[cfg(not(feature = "std"))]
        {
            sqrtf(self)
        }
    }
    fn ln(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::ln(self)
        }
        #[cfg(not(feature = "std"))]
        {
            logf(self)
        }
    }
    fn round(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::round(self)
        }
        #[cfg(not(feature = "std"))]
        {
            roundf(self)
        }
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 53;
        if x < MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn to_f32(self) -> f32 {
        self as f32
    }
    fn cos(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::cos(self)
        }
        #[cfg(not(feature = "std"))]
        {
            cos(self)
        }
    }
    fn sin(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::sin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            sin(self)
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        (Float::sin(self), Float::cos(self))
    }
    fn sqrt(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::sqrt(self)
        }
        #[cfg(not(feature = "std"))]
        {
            sqrt(self)
        }
    }
    fn ln(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::ln(self)
        }
        #[cfg(not(feature = "std"))]
        {
            log(self)
        }
    }
    fn round(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::round(self)
        }
        #[cfg(not(feature = "std"))]
        {
            round(self)
        }
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
}

/// One complex value: a frequency-domain coefficient or a spatial sample.
///
/// Arithmetic always returns a new value; nothing here mutates in place.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    #[inline(always)]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }

    /// `e^(i*theta)` as a unit complex value.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Scale both parts by a real factor. Preserves phase.
    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    /// `sqrt(re^2 + im^2)`.
    #[inline(always)]
    pub fn magnitude(self) -> T {
        (self.re * self.re + self.im * self.im).sqrt()
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let s = a.add(b);
        assert_eq!(s, Complex64::new(4.0, 2.0));
        let d = a.sub(b);
        assert_eq!(d, Complex64::new(-2.0, -6.0));
        let p = a.mul(b);
        assert!((p.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((p.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
    }

    #[test]
    fn test_conjugate_and_scale() {
        let c = Complex32::new(3.0, -4.0);
        assert_eq!(c.conj(), Complex32::new(3.0, 4.0));
        assert!((c.magnitude() - 5.0).abs() < 1e-6);
        let half = c.scale(0.5);
        assert_eq!(half, Complex32::new(1.5, -2.0));
    }

    #[test]
    fn test_expi_unit_circle() {
        let e = Complex64::expi(<f64 as Float>::pi());
        assert!((e.re + 1.0).abs() < 1e-12);
        assert!(e.im.abs() < 1e-12);
        assert!((e.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_usize_exactness_guard() {
        assert_eq!(<f32 as Float>::from_usize(1 << 20), Some(1048576.0));
        assert_eq!(<f32 as Float>::from_usize(1 << 24), None);
        assert!(<f64 as Float>::from_usize(1 << 40).is_some());
    }
}
