//! Core Effect trait for interleaved-buffer effects.
//!
//! Hosts hand effects a whole buffer of interleaved samples together with the
//! frame and channel counts, and expect it to be processed in place.
//!
//! ## Design Decisions
//!
//! - **Interleaved, in place**: Matches how audio player DSP chains deliver
//!   blocks; no separate output buffer is needed.
//!
//! - **Object-safe**: `dyn Effect` works for runtime effect chains.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for interleaved-buffer audio effects.
///
/// # Example
///
/// ```rust
/// use widener_core::Effect;
///
/// struct Invert;
///
/// impl Effect for Invert {
///     fn process_int16(&mut self, samples: &mut [i16], frames: usize, channels: usize) -> usize {
///         for s in samples.iter_mut().take(frames * channels) {
///             *s = s.saturating_neg();
///         }
///         frames
///     }
///
///     fn process_f32(&mut self, samples: &mut [f32], frames: usize, channels: usize) -> usize {
///         for s in samples.iter_mut().take(frames * channels) {
///             *s = -*s;
///         }
///         frames
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process interleaved signed 16-bit samples in place.
    ///
    /// # Arguments
    /// * `samples` - Interleaved sample buffer
    /// * `frame_count` - Number of frames (samples per channel) to process
    /// * `channel_count` - Number of interleaved channels
    ///
    /// # Returns
    /// Number of frames in the buffer after processing
    fn process_int16(&mut self, samples: &mut [i16], frame_count: usize, channel_count: usize)
    -> usize;

    /// Process interleaved `f32` samples in place.
    ///
    /// Same contract as [`process_int16`](Self::process_int16).
    fn process_f32(&mut self, samples: &mut [f32], frame_count: usize, channel_count: usize)
    -> usize;

    /// Reset internal state.
    ///
    /// Called when the effect is (re-)enabled. Stateless effects do nothing.
    fn reset(&mut self);

    /// Report processing latency in frames.
    ///
    /// Default returns 0 (no latency).
    fn latency_frames(&self) -> usize {
        0
    }
}
