//! Parameter model: width percentage to cached coefficients.
//!
//! [`WidthModel`] owns the user-facing width percentage and the coefficient
//! record derived from it. Coefficients are recomputed only when the
//! normalized width actually changes, never per sample.
//!
//! The model itself is single-threaded. Hosts that process audio on another
//! thread publish [`WidthModel::coefficients`] through an atomic snapshot
//! after each update.

use crate::coefficients::{
    Coefficients, DEFAULT_WIDTH_PERCENT, WidthLaw, clamp_width_percent,
};

/// Outcome of [`WidthModel::set_width_percent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthUpdate {
    /// Percentage now stored, inside \[-100, 100\].
    pub percent: f32,
    /// The requested percentage was out of range (or NaN) and was clamped.
    ///
    /// The corrected `percent` should be written back to persisted
    /// configuration.
    pub corrected: bool,
    /// The normalized width differs from before and coefficients were rebuilt.
    pub changed: bool,
}

/// Owner of the current width and its derived coefficients.
///
/// # Example
///
/// ```rust
/// use widener_core::{WidthLaw, WidthModel};
///
/// let mut model = WidthModel::new(WidthLaw::Corrective);
/// let update = model.set_width_percent(150.0);
///
/// assert_eq!(update.percent, 100.0);
/// assert!(update.corrected);
/// assert!(update.changed);
/// assert_eq!(model.width(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WidthModel {
    percent: f32,
    coeffs: Coefficients,
    law: WidthLaw,
}

impl WidthModel {
    /// Create a model at the default (bypass) width.
    pub fn new(law: WidthLaw) -> Self {
        Self::with_percent(DEFAULT_WIDTH_PERCENT, law)
    }

    /// Create a model at the given width percentage (clamped).
    pub fn with_percent(percent: f32, law: WidthLaw) -> Self {
        let clamped = clamp_width_percent(percent);
        Self {
            percent: clamped.percent,
            coeffs: Coefficients::from_width(clamped.width, law),
            law,
        }
    }

    /// Set the width percentage.
    ///
    /// Clamps to \[-100, 100\]. If the resulting normalized width differs from
    /// the stored one, the coefficient record is rebuilt as a whole.
    pub fn set_width_percent(&mut self, percent: f32) -> WidthUpdate {
        let clamped = clamp_width_percent(percent);
        self.percent = clamped.percent;

        let changed = clamped.width != self.coeffs.width;
        if changed {
            self.coeffs = Coefficients::from_width(clamped.width, self.law);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                width = self.coeffs.width,
                mid_amp = self.coeffs.mid_amp,
                side_amp = self.coeffs.side_amp,
                gain = self.coeffs.gain,
                law = self.law.name(),
                "recalculated widener coefficients"
            );
        }

        WidthUpdate {
            percent: clamped.percent,
            corrected: clamped.corrected,
            changed,
        }
    }

    /// Current coefficient record.
    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Current width percentage.
    pub fn width_percent(&self) -> f32 {
        self.percent
    }

    /// Current normalized width.
    pub fn width(&self) -> f32 {
        self.coeffs.width
    }

    /// Width law used for coefficient derivation.
    pub fn law(&self) -> WidthLaw {
        self.law
    }
}

impl Default for WidthModel {
    fn default() -> Self {
        Self::new(WidthLaw::default())
    }
}
