//! In-place mid/side processing of interleaved stereo buffers.
//!
//! Both entry points take the frame and channel counts the host reports
//! alongside the buffer. Anything other than two channels, or a bypass
//! coefficient record, leaves the buffer untouched. Only complete stereo
//! pairs inside the slice are processed, so a frame count larger than the
//! buffer never reads out of bounds.
//!
//! The return value always mirrors `frame_count`: the transform never changes
//! the buffer length.

use crate::coefficients::Coefficients;
use crate::narrowing::Narrowing;

/// Number of interleaved channels the transform operates on.
pub const STEREO_CHANNELS: usize = 2;

/// Apply the widener to interleaved signed 16-bit stereo frames.
///
/// For each frame `(L, R)`:
///
/// ```text
/// mid  = mid_amp  * (L + R)
/// side = side_amp * (L - R)
/// L'   = narrow(mid + side)
/// R'   = narrow(mid - side)
/// ```
///
/// Returns `frame_count` unchanged. Performs no allocation.
///
/// # Example
///
/// ```rust
/// use widener_core::{Coefficients, Narrowing, WidthLaw, process_int16};
///
/// let narrow = Coefficients::from_width(-1.0, WidthLaw::Corrective);
/// let mut frames = [1000i16, 0];
/// assert_eq!(process_int16(&narrow, &mut frames, 1, 2, Narrowing::Truncate), 1);
/// assert_eq!(frames, [500, 500]);
/// ```
pub fn process_int16(
    coeffs: &Coefficients,
    samples: &mut [i16],
    frame_count: usize,
    channel_count: usize,
    narrowing: Narrowing,
) -> usize {
    if channel_count != STEREO_CHANNELS || coeffs.is_bypass() {
        return frame_count;
    }

    let mid_amp = coeffs.mid_amp;
    let side_amp = coeffs.side_amp;

    for frame in samples
        .chunks_exact_mut(STEREO_CHANNELS)
        .take(frame_count)
    {
        let left = f32::from(frame[0]);
        let right = f32::from(frame[1]);

        let mid = mid_amp * (left + right);
        let side = side_amp * (left - right);

        frame[0] = narrowing.narrow(mid + side);
        frame[1] = narrowing.narrow(mid - side);
    }

    frame_count
}

/// Apply the widener to interleaved `f32` stereo frames.
///
/// Same transform as [`process_int16`] without narrowing. No clamping is
/// applied; values keep whatever range the weights produce.
pub fn process_f32(
    coeffs: &Coefficients,
    samples: &mut [f32],
    frame_count: usize,
    channel_count: usize,
) -> usize {
    if channel_count != STEREO_CHANNELS || coeffs.is_bypass() {
        return frame_count;
    }

    let mid_amp = coeffs.mid_amp;
    let side_amp = coeffs.side_amp;

    for frame in samples
        .chunks_exact_mut(STEREO_CHANNELS)
        .take(frame_count)
    {
        let left = frame[0];
        let right = frame[1];

        let mid = mid_amp * (left + right);
        let side = side_amp * (left - right);

        frame[0] = mid + side;
        frame[1] = mid - side;
    }

    frame_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::WidthLaw;

    fn corrective(width: f32) -> Coefficients {
        Coefficients::from_width(width, WidthLaw::Corrective)
    }

    #[test]
    fn bypass_leaves_buffer_untouched() {
        let original = [1000i16, -2000, 32767, -32768, 5, 7];
        let mut buffer = original;
        let frames = process_int16(&corrective(0.0), &mut buffer, 3, 2, Narrowing::Truncate);
        assert_eq!(frames, 3);
        assert_eq!(buffer, original);
    }

    #[test]
    fn non_stereo_layouts_pass_through() {
        let original = [1000i16, 0, -400, 250, 12, -12, 9, 9];
        for channels in [0, 1, 3, 4, 6] {
            let mut buffer = original;
            let frames = process_int16(&corrective(1.0), &mut buffer, 2, channels, Narrowing::Truncate);
            assert_eq!(frames, 2);
            assert_eq!(buffer, original, "{channels} channels must bypass");
        }
    }

    #[test]
    fn full_widen_example() {
        let mut buffer = [1000i16, 0];
        process_int16(&corrective(1.0), &mut buffer, 1, 2, Narrowing::Truncate);
        assert_eq!(buffer, [700, -300]);
    }

    #[test]
    fn full_narrow_collapses_to_mono() {
        let mut buffer = [1000i16, 0, 3000, -2000, 12000, 4000];
        process_int16(&corrective(-1.0), &mut buffer, 3, 2, Narrowing::Truncate);
        assert_eq!(buffer, [500, 500, 500, 500, 8000, 8000]);
    }

    #[test]
    fn truncation_not_rounding() {
        // 0.2 * 2000 lands just below 400 in f32 arithmetic.
        let mut truncated = [1000i16, 1000];
        process_int16(&corrective(1.0), &mut truncated, 1, 2, Narrowing::Truncate);
        assert_eq!(truncated, [399, 399]);

        let mut rounded = [1000i16, 1000];
        process_int16(&corrective(1.0), &mut rounded, 1, 2, Narrowing::RoundSaturate);
        assert_eq!(rounded, [400, 400]);
    }

    #[test]
    fn processes_only_requested_frames() {
        let mut buffer = [1000i16, 0, 1000, 0];
        let frames = process_int16(&corrective(1.0), &mut buffer, 1, 2, Narrowing::Truncate);
        assert_eq!(frames, 1);
        assert_eq!(buffer, [700, -300, 1000, 0]);
    }

    #[test]
    fn frame_count_beyond_buffer_is_safe() {
        let mut buffer = [1000i16, 0, 77];
        let frames = process_int16(&corrective(1.0), &mut buffer, 10, 2, Narrowing::Truncate);
        assert_eq!(frames, 10);
        // Trailing half-frame is left alone.
        assert_eq!(buffer, [700, -300, 77]);
    }

    #[test]
    fn empty_buffer() {
        let mut buffer: [i16; 0] = [];
        assert_eq!(
            process_int16(&corrective(0.5), &mut buffer, 0, 2, Narrowing::Truncate),
            0
        );
    }

    #[test]
    fn classic_law_overflow_depends_on_policy() {
        let classic = Coefficients::from_width(1.0, WidthLaw::Classic);

        let mut saturated = [i16::MAX, i16::MIN];
        process_int16(&classic, &mut saturated, 1, 2, Narrowing::Saturate);
        assert_eq!(saturated, [i16::MAX, i16::MIN]);

        let mut wrapped = [i16::MAX, i16::MIN];
        process_int16(&classic, &mut wrapped, 1, 2, Narrowing::Truncate);
        assert!(wrapped[0] < 0, "reference cast wraps, got {}", wrapped[0]);
        assert!(wrapped[1] > 0, "reference cast wraps, got {}", wrapped[1]);
    }

    #[test]
    fn f32_full_widen_example() {
        let mut buffer = [0.5f32, 0.0, 0.0, 0.5];
        process_f32(&corrective(1.0), &mut buffer, 2, 2);
        let expected = [0.35, -0.15, -0.15, 0.35];
        for (got, want) in buffer.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "expected {want}, got {got}");
        }
    }

    #[test]
    fn f32_bypass_and_layout_gate() {
        let original = [0.25f32, -0.75, 0.1, 0.2];

        let mut bypassed = original;
        process_f32(&corrective(0.0), &mut bypassed, 2, 2);
        assert_eq!(bypassed, original);

        let mut mono = original;
        process_f32(&corrective(1.0), &mut mono, 4, 1);
        assert_eq!(mono, original);
    }
}
