//! Declarative settings panel.
//!
//! Hosts render the panel from one `property` line per setting:
//!
//! ```text
//! property "<label>" <kind> <key> <default>;
//! ```

use std::fmt::{self, Write as _};

use widener_config::{ENABLE_KEY, WIDTH_KEY};

/// Widget used for a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Boolean toggle.
    Checkbox,
    /// Free-form numeric entry.
    Entry,
}

impl PropertyKind {
    /// Keyword used in the panel description.
    pub fn keyword(self) -> &'static str {
        match self {
            PropertyKind::Checkbox => "checkbox",
            PropertyKind::Entry => "entry",
        }
    }
}

/// One row of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsProperty {
    /// Text shown next to the widget.
    pub label: &'static str,
    /// Widget kind.
    pub kind: PropertyKind,
    /// Configuration key the widget edits.
    pub key: &'static str,
    /// Default shown when the key is unset.
    pub default: &'static str,
}

impl fmt::Display for SettingsProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "property \"{}\" {} {} {};",
            self.label,
            self.kind.keyword(),
            self.key,
            self.default
        )
    }
}

/// Settings exposed by the widener, in display order.
pub const SETTINGS: &[SettingsProperty] = &[
    SettingsProperty {
        label: "Enable",
        kind: PropertyKind::Checkbox,
        key: ENABLE_KEY,
        default: "0",
    },
    SettingsProperty {
        label: "Effect strength (negative values permitted, sensible range [-100, 100])",
        kind: PropertyKind::Entry,
        key: WIDTH_KEY,
        default: "0",
    },
];

/// Render properties as a settings panel description.
pub fn render_settings(properties: &[SettingsProperty]) -> String {
    let mut out = String::new();
    for property in properties {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{property}");
    }
    out
}
