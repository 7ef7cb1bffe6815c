//! Parameter introspection for hosts and settings panels.
//!
//! The [`ParameterInfo`] trait exposes an effect's parameters by index, each
//! described by a [`ParamDescriptor`]. Hosts use it to build controls,
//! validate values and map automation onto stable [`ParamId`]s.
//!
//! # Example
//!
//! ```rust
//! use widener_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     percent: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::percent("Trim", "Trim", 0.0, 100.0, 100.0)
//!                 .with_id(ParamId(900), "trim")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.percent,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.percent = value.clamp(0.0, 100.0);
//!         }
//!     }
//! }
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// # Example
///
/// ```rust
/// use widener_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(!flags.contains(ParamFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps.
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter should be hidden from generic host UI.
    pub const HIDDEN: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Dimensionless value.
    #[default]
    None,
    /// Percentage (value shown as-is with a `%` suffix).
    Percent,
}

impl ParamUnit {
    /// Display suffix for the unit.
    pub fn suffix(self) -> &'static str {
        match self {
            ParamUnit::None => "",
            ParamUnit::Percent => "%",
        }
    }
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name, at most 8 characters, for compact displays.
    pub short_name: &'static str,
    /// Unit type for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value when nothing is persisted.
    pub default: f32,
    /// Recommended step increment.
    pub step: f32,
    /// Stable numeric ID. `ParamId(0)` means unassigned.
    pub id: ParamId,
    /// Human-readable stable ID for serialization.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Percentage parameter with a custom range.
    pub fn percent(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Assign the stable numeric and string IDs.
    pub fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Replace the capability flags.
    pub fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamp a value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Map a plain value into \[0, 1\].
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / span).clamp(0.0, 1.0)
    }

    /// Map a normalized \[0, 1\] value back to the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index that is stable for the
/// lifetime of the effect.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`. Out of range returns `0.0`.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamping to the descriptor range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Find a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
