//! Channel-weight coefficients derived from the width intensity.
//!
//! The widener decomposes a stereo pair into mid (`L + R`) and side (`L - R`)
//! components and recombines them as:
//!
//! ```text
//! out_l = mid_amp * (L + R) + side_amp * (L - R)
//! out_r = mid_amp * (L + R) - side_amp * (L - R)
//! ```
//!
//! A [`Coefficients`] record carries `mid_amp` and `side_amp` already scaled by
//! the corrective gain, so the processor only multiplies and adds.
//!
//! ## Corrective law
//!
//! Given normalized width `w` in \[-1, 1\]:
//!
//! ```text
//! mid_raw  = 1 - ((w * MID_WEIGHT + 1) / 2)
//! side_raw = (w * SIDE_WEIGHT + 1) / 2
//! gain     = min(0.5 / max(|mid_raw|, |side_raw|), 1)
//! mid_amp  = gain * mid_raw
//! side_amp = gain * side_raw
//! ```
//!
//! At `w = 0` both weights are `0.5` and the gain is `1`, which reconstructs
//! the input exactly. Positive widths widen, negative widths narrow down to a
//! full mono collapse at `w = -1`. The `0.5 / max(..)` normalization defines
//! the characteristic sound of the effect and is kept as-is.

/// Weight applied to the width when deriving the mid coefficient.
pub const MID_WEIGHT: f32 = 0.2;

/// Weight applied to the width when deriving the side coefficient.
pub const SIDE_WEIGHT: f32 = 1.0;

/// Lowest accepted width percentage.
pub const WIDTH_PERCENT_MIN: f32 = -100.0;

/// Highest accepted width percentage.
pub const WIDTH_PERCENT_MAX: f32 = 100.0;

/// Width percentage used when nothing is persisted (bypass).
pub const DEFAULT_WIDTH_PERCENT: f32 = 0.0;

/// Mapping from normalized width to channel weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WidthLaw {
    /// Mid/side weighting normalized by a corrective gain (canonical).
    #[default]
    Corrective,
    /// First-revision curve: `wc = tanh(w) + 1`, `mid = 1 - wc/2`,
    /// `side = wc/2`, no gain correction.
    ///
    /// Strong widening can exceed the 16-bit range with this law.
    Classic,
}

impl WidthLaw {
    /// Short lowercase name, used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            WidthLaw::Corrective => "corrective",
            WidthLaw::Classic => "classic",
        }
    }
}

/// Immutable, gain-corrected coefficient record.
///
/// All fields are derived together from a single width value and are never
/// mutated independently. Updates build a new record.
///
/// # Example
///
/// ```rust
/// use widener_core::{Coefficients, WidthLaw};
///
/// let c = Coefficients::from_width(-1.0, WidthLaw::Corrective);
/// assert!((c.mid_amp - 0.5).abs() < 1e-6);
/// assert_eq!(c.side_amp, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Normalized width in \[-1, 1\]. `0.0` is the bypass value.
    pub width: f32,
    /// Gain-corrected weight for the mid (sum) component.
    pub mid_amp: f32,
    /// Gain-corrected weight for the side (difference) component.
    pub side_amp: f32,
    /// Corrective gain in (0, 1] already folded into both weights.
    pub gain: f32,
    /// Law the record was derived with.
    pub law: WidthLaw,
}

impl Coefficients {
    /// Identity record: width 0, both weights 0.5, unity gain.
    pub const fn bypass() -> Self {
        Self {
            width: 0.0,
            mid_amp: 0.5,
            side_amp: 0.5,
            gain: 1.0,
            law: WidthLaw::Corrective,
        }
    }

    /// Derive the coefficient record for a normalized width.
    ///
    /// `width` is clamped to \[-1, 1\]; NaN is treated as `0.0`.
    pub fn from_width(width: f32, law: WidthLaw) -> Self {
        let width = if width.is_nan() {
            0.0
        } else {
            width.clamp(-1.0, 1.0)
        };

        match law {
            WidthLaw::Corrective => {
                let mid_raw = 1.0 - ((width * MID_WEIGHT + 1.0) / 2.0);
                let side_raw = (width * SIDE_WEIGHT + 1.0) / 2.0;

                let peak = libm::fabsf(mid_raw).max(libm::fabsf(side_raw));
                let gain = (0.5 / peak).min(1.0);

                Self {
                    width,
                    mid_amp: gain * mid_raw,
                    side_amp: gain * side_raw,
                    gain,
                    law,
                }
            }
            WidthLaw::Classic => {
                let curve = libm::tanhf(width) + 1.0;
                Self {
                    width,
                    mid_amp: 1.0 - curve / 2.0,
                    side_amp: curve / 2.0,
                    gain: 1.0,
                    law,
                }
            }
        }
    }

    /// Derive the record for a width percentage (clamped to \[-100, 100\]).
    pub fn from_percent(percent: f32, law: WidthLaw) -> Self {
        Self::from_width(clamp_width_percent(percent).width, law)
    }

    /// Returns `true` when the record is the pass-through state.
    #[inline]
    pub fn is_bypass(&self) -> bool {
        self.width == 0.0
    }

    /// Width expressed as a percentage.
    pub fn width_percent(&self) -> f32 {
        self.width * 100.0
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::bypass()
    }
}

/// Result of clamping a user-facing width percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedPercent {
    /// Percentage inside \[-100, 100\].
    pub percent: f32,
    /// `percent / 100`.
    pub width: f32,
    /// `true` if the input had to be changed to become legal.
    ///
    /// Callers persisting the percentage should write `percent` back.
    pub corrected: bool,
}

/// Clamp a width percentage into \[-100, 100\] and normalize it.
///
/// NaN is replaced by [`DEFAULT_WIDTH_PERCENT`] and flagged as corrected.
///
/// # Example
///
/// ```rust
/// use widener_core::clamp_width_percent;
///
/// let c = clamp_width_percent(150.0);
/// assert_eq!(c.percent, 100.0);
/// assert_eq!(c.width, 1.0);
/// assert!(c.corrected);
/// ```
pub fn clamp_width_percent(percent: f32) -> ClampedPercent {
    let clamped = if percent.is_nan() {
        DEFAULT_WIDTH_PERCENT
    } else {
        percent.clamp(WIDTH_PERCENT_MIN, WIDTH_PERCENT_MAX)
    };

    ClampedPercent {
        percent: clamped,
        width: clamped / 100.0,
        corrected: percent.is_nan() || clamped != percent,
    }
}
