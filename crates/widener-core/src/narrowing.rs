//! Float to 16-bit sample conversion.
//!
//! The widener computes in `f32` and writes back to `i16`. How out-of-range
//! and fractional results are handled is a policy choice:
//!
//! | Policy | Fraction | Overflow |
//! |---|---|---|
//! | [`Narrowing::Truncate`] | toward zero | wraps (low 16 bits kept) |
//! | [`Narrowing::Saturate`] | toward zero | clamps to `i16` range |
//! | [`Narrowing::RoundSaturate`] | to nearest | clamps to `i16` range |
//!
//! `Truncate` is the default. It is the integer cast the effect has always
//! used, including the audible wrap when a sample overflows. With the corrective
//! width law the weights keep full-scale input inside the 16-bit range, so
//! the wrap is only reachable through [`WidthLaw::Classic`](crate::WidthLaw).

/// Conversion policy from processed `f32` samples to `i16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Narrowing {
    /// Truncate toward zero through a 32-bit integer and keep the low 16 bits.
    #[default]
    Truncate,
    /// Truncate toward zero and clamp to \[-32768, 32767\].
    Saturate,
    /// Round to nearest (ties away from zero) and clamp to \[-32768, 32767\].
    RoundSaturate,
}

impl Narrowing {
    /// Convert one processed sample.
    ///
    /// # Example
    ///
    /// ```rust
    /// use widener_core::Narrowing;
    ///
    /// assert_eq!(Narrowing::Truncate.narrow(-300.7), -300);
    /// assert_eq!(Narrowing::Truncate.narrow(40000.0), -25536);
    /// assert_eq!(Narrowing::Saturate.narrow(40000.0), i16::MAX);
    /// assert_eq!(Narrowing::RoundSaturate.narrow(399.6), 400);
    /// ```
    #[inline]
    pub fn narrow(self, sample: f32) -> i16 {
        match self {
            // `as i32` truncates toward zero; `as i16` then keeps the low bits.
            Narrowing::Truncate => sample as i32 as i16,
            // Float to int `as` casts saturate and map NaN to zero.
            Narrowing::Saturate => sample as i16,
            Narrowing::RoundSaturate => libm::roundf(sample) as i16,
        }
    }

    /// Short lowercase name, used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Narrowing::Truncate => "truncate",
            Narrowing::Saturate => "saturate",
            Narrowing::RoundSaturate => "round-saturate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_drops_fraction_toward_zero() {
        assert_eq!(Narrowing::Truncate.narrow(699.99), 699);
        assert_eq!(Narrowing::Truncate.narrow(-800.0002), -800);
        assert_eq!(Narrowing::Truncate.narrow(-0.5), 0);
    }

    #[test]
    fn truncate_wraps_on_overflow() {
        assert_eq!(Narrowing::Truncate.narrow(32768.0), i16::MIN);
        assert_eq!(Narrowing::Truncate.narrow(57723.4), (57723 - 65536) as i16);
        assert_eq!(Narrowing::Truncate.narrow(-32769.0), i16::MAX);
    }

    #[test]
    fn saturate_clamps() {
        assert_eq!(Narrowing::Saturate.narrow(32768.0), i16::MAX);
        assert_eq!(Narrowing::Saturate.narrow(-40000.0), i16::MIN);
        assert_eq!(Narrowing::Saturate.narrow(1234.9), 1234);
    }

    #[test]
    fn round_saturate_rounds_to_nearest() {
        assert_eq!(Narrowing::RoundSaturate.narrow(399.99997), 400);
        assert_eq!(Narrowing::RoundSaturate.narrow(-300.5), -301);
        assert_eq!(Narrowing::RoundSaturate.narrow(1e9), i16::MAX);
    }

    #[test]
    fn nan_becomes_silence() {
        assert_eq!(Narrowing::Truncate.narrow(f32::NAN), 0);
        assert_eq!(Narrowing::Saturate.narrow(f32::NAN), 0);
        assert_eq!(Narrowing::RoundSaturate.narrow(f32::NAN), 0);
    }

    #[test]
    fn default_is_reference_truncation() {
        assert_eq!(Narrowing::default(), Narrowing::Truncate);
        assert_eq!(Narrowing::default().name(), "truncate");
    }
}
