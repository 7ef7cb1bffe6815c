//! Self-contained stereo widener effect.
//!
//! [`Widener`] bundles a [`WidthModel`] and a [`Narrowing`] policy behind the
//! [`Effect`] and [`ParameterInfo`] traits, for single-threaded hosts and
//! offline processing. Multi-threaded hosts publish the model's coefficients
//! through an atomic snapshot instead of sharing a `Widener`.

use crate::coefficients::{
    Coefficients, DEFAULT_WIDTH_PERCENT, WIDTH_PERCENT_MAX, WIDTH_PERCENT_MIN, WidthLaw,
};
use crate::effect::Effect;
use crate::model::{WidthModel, WidthUpdate};
use crate::narrowing::Narrowing;
use crate::param_info::{ParamDescriptor, ParamId, ParameterInfo};
use crate::processor::{process_f32, process_int16};

/// Stable ID of the width parameter.
pub const WIDTH_PARAM_ID: ParamId = ParamId(100);

/// Mid/side stereo widener.
///
/// # Example
///
/// ```rust
/// use widener_core::{Effect, Widener};
///
/// let mut widener = Widener::new();
/// widener.set_width_percent(100.0);
///
/// let mut frames = [1000i16, 0];
/// widener.process_int16(&mut frames, 1, 2);
/// assert_eq!(frames, [700, -300]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Widener {
    model: WidthModel,
    narrowing: Narrowing,
}

impl Widener {
    /// Create a widener in bypass with the corrective law and reference narrowing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widener with an explicit law and narrowing policy.
    pub fn with_options(law: WidthLaw, narrowing: Narrowing) -> Self {
        Self {
            model: WidthModel::new(law),
            narrowing,
        }
    }

    /// Set the width percentage (clamped to \[-100, 100\]).
    pub fn set_width_percent(&mut self, percent: f32) -> WidthUpdate {
        self.model.set_width_percent(percent)
    }

    /// Current width percentage.
    pub fn width_percent(&self) -> f32 {
        self.model.width_percent()
    }

    /// Current coefficient record.
    pub fn coefficients(&self) -> Coefficients {
        self.model.coefficients()
    }

    /// Narrowing policy used by the 16-bit path.
    pub fn narrowing(&self) -> Narrowing {
        self.narrowing
    }

    /// Change the narrowing policy.
    pub fn set_narrowing(&mut self, narrowing: Narrowing) {
        self.narrowing = narrowing;
    }

    /// Descriptor of the width parameter.
    pub fn width_descriptor() -> ParamDescriptor {
        ParamDescriptor::percent(
            "Width",
            "Width",
            WIDTH_PERCENT_MIN,
            WIDTH_PERCENT_MAX,
            DEFAULT_WIDTH_PERCENT,
        )
        .with_id(WIDTH_PARAM_ID, "width")
    }
}

impl Effect for Widener {
    #[inline]
    fn process_int16(
        &mut self,
        samples: &mut [i16],
        frame_count: usize,
        channel_count: usize,
    ) -> usize {
        let coeffs = self.model.coefficients();
        process_int16(&coeffs, samples, frame_count, channel_count, self.narrowing)
    }

    #[inline]
    fn process_f32(
        &mut self,
        samples: &mut [f32],
        frame_count: usize,
        channel_count: usize,
    ) -> usize {
        let coeffs = self.model.coefficients();
        process_f32(&coeffs, samples, frame_count, channel_count)
    }

    fn reset(&mut self) {
        // Stateless: coefficients are parameters, not state.
    }
}

impl ParameterInfo for Widener {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(Self::width_descriptor()),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.model.width_percent(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.model.set_width_percent(value);
        }
    }
}
