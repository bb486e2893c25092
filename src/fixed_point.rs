//! # 64.64 fixed-point scalar
//!
//! [`Fixed64x64`] stores a signed real number as a 128-bit integer scaled by 2⁶⁴: the upper
//! 64 bits hold the integer part, the lower 64 bits the fraction. In kilometers this gives a
//! range of ±9.2·10¹⁸ km (about a million light years) with a resolution of 5·10⁻¹⁷ m,
//! uniformly across the whole range, which is what positions at galactic scale need.
//!
//! Addition and subtraction are exact (wrapping on overflow, never panicking). Multiplication
//! is only defined by an `f64` factor; the integer part of the magnitude is split into two
//! 32-bit halves so that no partial product is rounded before the factor is applied.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 2⁶⁴ as a float: the scale between the raw integer and the represented value.
const ONE: f64 = 18_446_744_073_709_551_616.0;

/// 2³²
const HALF_WORD: f64 = 4_294_967_296.0;

/// Signed 64.64 fixed-point number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed64x64(i128);

impl Fixed64x64 {
    pub const ZERO: Fixed64x64 = Fixed64x64(0);

    /// Build a value from its raw 128-bit representation.
    pub const fn from_bits(bits: i128) -> Self {
        Fixed64x64(bits)
    }

    /// Raw 128-bit representation.
    pub const fn to_bits(self) -> i128 {
        self.0
    }

    /// Convert from a float, rounding to the nearest representable value.
    ///
    /// Values outside the representable range saturate; NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        Fixed64x64((value * ONE).round() as i128)
    }

    /// Nearest `f64` to this value.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE
    }

    /// Integer part, rounded towards negative infinity.
    pub fn integer_part(self) -> i64 {
        (self.0 >> 64) as i64
    }

    /// Fractional part as a 0.64 unsigned fixed-point number.
    pub fn fraction_part(self) -> u64 {
        self.0 as u64
    }

    /// Multiply by a floating-point factor.
    ///
    /// The magnitude is decomposed as `hi·2³² + lo + frac` where every term is exactly
    /// representable as an `f64`; each is scaled separately, the products are summed back in
    /// fixed point and the sign is applied last.
    pub fn mul_f64(self, factor: f64) -> Self {
        let magnitude = self.0.unsigned_abs();
        let int = (magnitude >> 64) as u64;
        let high = (int >> 32) as f64 * HALF_WORD;
        let low = (int & 0xFFFF_FFFF) as f64;
        let frac = magnitude as u64 as f64 / ONE;

        let product = Fixed64x64::from_f64(high * factor)
            + Fixed64x64::from_f64(low * factor)
            + Fixed64x64::from_f64(frac * factor);

        if self.0 < 0 {
            -product
        } else {
            product
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<f64> for Fixed64x64 {
    fn from(value: f64) -> Self {
        Fixed64x64::from_f64(value)
    }
}

impl From<Fixed64x64> for f64 {
    fn from(value: Fixed64x64) -> Self {
        value.to_f64()
    }
}

impl Add for Fixed64x64 {
    type Output = Fixed64x64;

    fn add(self, rhs: Self) -> Self::Output {
        Fixed64x64(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed64x64 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Fixed64x64 {
    type Output = Fixed64x64;

    fn sub(self, rhs: Self) -> Self::Output {
        Fixed64x64(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed64x64 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Fixed64x64 {
    type Output = Fixed64x64;

    fn neg(self) -> Self::Output {
        Fixed64x64(self.0.wrapping_neg())
    }
}

impl fmt::Display for Fixed64x64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

#[cfg(test)]
mod fixed_point_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_integer_and_fraction_parts() {
        let x = Fixed64x64::from_f64(2.5);
        assert_eq!(x.integer_part(), 2);
        assert_eq!(x.fraction_part(), 1u64 << 63);

        let y = Fixed64x64::from_f64(-2.5);
        assert_eq!(y.integer_part(), -3);
        assert_eq!(y.fraction_part(), 1u64 << 63);
        assert_eq!(y.to_f64(), -2.5);
    }

    #[test]
    fn test_small_offset_survives_large_magnitude() {
        // 1e15 km is far beyond the point where f64 keeps sub-meter precision
        let far = Fixed64x64::from_f64(1.0e15);
        let step = Fixed64x64::from_f64(1.0e-6);

        let moved = far + step;
        assert_ne!(moved, far);
        assert_relative_eq!((moved - far).to_f64(), 1.0e-6, max_relative = 1e-12);

        assert_eq!(1.0e15 + 1.0e-6, 1.0e15);
    }

    #[test]
    fn test_add_sub_are_exact() {
        let a = Fixed64x64::from_bits(0x1234_5678_9abc_def0_0fed_cba9_8765_4321);
        let b = Fixed64x64::from_bits(-0x0000_0001_0000_0000_ffff_ffff_ffff_ffff);
        assert_eq!((a + b) - b, a);
        assert_eq!(-(-a), a);
    }

    #[test]
    fn test_mul_f64() {
        let x = Fixed64x64::from_f64(3.0e12 + 0.25);
        let y = x.mul_f64(2.0);
        assert_eq!(y, Fixed64x64::from_f64(6.0e12 + 0.5));

        let z = Fixed64x64::from_f64(-7.5).mul_f64(-0.5);
        assert_eq!(z.to_f64(), 3.75);

        let w = Fixed64x64::from_f64(123_456.789).mul_f64(0.0);
        assert!(w.is_zero());
    }

    #[test]
    fn test_mul_f64_keeps_precision_of_negative_values() {
        let factor = std::f64::consts::FRAC_1_SQRT_2;
        for value in [-1.0e-5, -1.0, -0.3, -4_321.125, -7.0e11] {
            let negative = Fixed64x64::from_f64(value).mul_f64(factor);
            let positive = Fixed64x64::from_f64(-value).mul_f64(factor);

            assert_eq!(negative, -positive);
            assert_relative_eq!(negative.to_f64(), value * factor, max_relative = 1e-14);
        }
    }
}
