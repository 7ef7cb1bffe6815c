//! Audio-thread processor for the stereo widener.
//!
//! [`WidenerProcessor`] is the handle the host moves onto its real-time
//! thread. Each call loads the published coefficient record once and runs
//! the whole buffer with it. No locks, allocation or logging happen here.

use widener_core::{Effect, process_f32, process_int16};

use crate::shared::WidenerShared;

/// Real-time processing handle.
///
/// Cheap to clone. All clones observe the same published coefficients.
#[derive(Debug, Clone)]
pub struct WidenerProcessor {
    shared: WidenerShared,
}

impl WidenerProcessor {
    /// Create a processor reading from `shared`.
    pub fn new(shared: WidenerShared) -> Self {
        Self { shared }
    }

    /// Process interleaved signed 16-bit frames in place.
    ///
    /// Returns `frame_count`.
    pub fn process_int16(
        &self,
        samples: &mut [i16],
        frame_count: usize,
        channel_count: usize,
    ) -> usize {
        let coeffs = self.shared.coefficients();
        process_int16(
            &coeffs,
            samples,
            frame_count,
            channel_count,
            self.shared.narrowing(),
        )
    }

    /// Process interleaved `f32` frames in place.
    ///
    /// Returns `frame_count`.
    pub fn process_f32(&self, samples: &mut [f32], frame_count: usize, channel_count: usize) -> usize {
        let coeffs = self.shared.coefficients();
        process_f32(&coeffs, samples, frame_count, channel_count)
    }
}

impl Effect for WidenerProcessor {
    fn process_int16(
        &mut self,
        samples: &mut [i16],
        frame_count: usize,
        channel_count: usize,
    ) -> usize {
        WidenerProcessor::process_int16(self, samples, frame_count, channel_count)
    }

    fn process_f32(&mut self, samples: &mut [f32], frame_count: usize, channel_count: usize) -> usize {
        WidenerProcessor::process_f32(self, samples, frame_count, channel_count)
    }

    fn reset(&mut self) {}
}
