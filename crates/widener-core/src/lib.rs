//! Widener Core - mid/side stereo widening for interleaved audio
//!
//! This crate holds the whole signal path of the stereo widener: a parameter
//! model that turns a signed intensity into gain-corrected channel weights,
//! and a sample processor that applies those weights to interleaved stereo
//! buffers in place.
//!
//! # Core Abstractions
//!
//! ## Parameter Model
//!
//! - [`Coefficients`] - Immutable record of width, mid/side weights and corrective gain
//! - [`WidthLaw`] - Mapping from intensity to weights (corrective or classic tanh curve)
//! - [`WidthModel`] - Owns the current percentage and recomputes coefficients on change
//! - [`clamp_width_percent`] - Clamps a user percentage into the legal range
//!
//! ## Sample Processor
//!
//! - [`process_int16`] - In-place transform of signed 16-bit frames
//! - [`process_f32`] - In-place transform of floating-point frames
//! - [`Narrowing`] - Float to `i16` conversion policy (reference truncation or saturation)
//!
//! ## Effect Surface
//!
//! - [`Effect`] - Object-safe trait for interleaved-buffer effects
//! - [`Widener`] - Self-contained widener implementing [`Effect`] and [`ParameterInfo`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! widener-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use widener_core::{Coefficients, Narrowing, WidthLaw, process_int16};
//!
//! let coeffs = Coefficients::from_width(1.0, WidthLaw::Corrective);
//! let mut frames = [1000i16, 0, 0, 1000];
//!
//! process_int16(&coeffs, &mut frames, 2, 2, Narrowing::Truncate);
//! assert_eq!(frames, [700, -300, -300, 700]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks or logging in the processing path
//! - **Immutable coefficients**: Parameter changes produce a new [`Coefficients`]
//!   record; readers never observe a half-updated set of weights
//! - **Bit compatible**: Default narrowing keeps the historical integer
//!   cast, including its wrap on overflow

#![cfg_attr(not(feature = "std"), no_std)]

pub mod coefficients;
pub mod effect;
pub mod model;
pub mod narrowing;
pub mod param_info;
pub mod processor;
pub mod widener;

// Re-export main types at crate root
pub use coefficients::{
    ClampedPercent, Coefficients, DEFAULT_WIDTH_PERCENT, MID_WEIGHT, SIDE_WEIGHT,
    WIDTH_PERCENT_MAX, WIDTH_PERCENT_MIN, WidthLaw, clamp_width_percent,
};
pub use effect::Effect;
pub use model::{WidthModel, WidthUpdate};
pub use narrowing::Narrowing;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use processor::{STEREO_CHANNELS, process_f32, process_int16};
pub use widener::{WIDTH_PARAM_ID, Widener};
