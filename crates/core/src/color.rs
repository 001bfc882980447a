//! Theme palettes and color resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten named slots of a theme color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeSlot {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
}

impl SchemeSlot {
    /// All slots in scheme order.
    pub const ALL: [SchemeSlot; 10] = [
        SchemeSlot::Dark1,
        SchemeSlot::Light1,
        SchemeSlot::Dark2,
        SchemeSlot::Light2,
        SchemeSlot::Accent1,
        SchemeSlot::Accent2,
        SchemeSlot::Accent3,
        SchemeSlot::Accent4,
        SchemeSlot::Accent5,
        SchemeSlot::Accent6,
    ];

    /// The scheme name used in markup (`dk1`, `accent3`, ...).
    pub fn name(self) -> &'static str {
        match self {
            SchemeSlot::Dark1 => "dk1",
            SchemeSlot::Light1 => "lt1",
            SchemeSlot::Dark2 => "dk2",
            SchemeSlot::Light2 => "lt2",
            SchemeSlot::Accent1 => "accent1",
            SchemeSlot::Accent2 => "accent2",
            SchemeSlot::Accent3 => "accent3",
            SchemeSlot::Accent4 => "accent4",
            SchemeSlot::Accent5 => "accent5",
            SchemeSlot::Accent6 => "accent6",
        }
    }

    /// Look up a slot by its scheme name.
    ///
    /// Only the ten palette names are recognised; aliases such as `tx1` or
    /// `bg1` are not slots of the palette.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for SchemeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named colors of a presentation theme, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub dk1: String,
    pub lt1: String,
    pub dk2: String,
    pub lt2: String,
    pub accent1: String,
    pub accent2: String,
    pub accent3: String,
    pub accent4: String,
    pub accent5: String,
    pub accent6: String,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            dk1: "#000000".to_string(),
            lt1: "#FFFFFF".to_string(),
            dk2: "#1F4E78".to_string(),
            lt2: "#EEECE1".to_string(),
            accent1: "#4472C4".to_string(),
            accent2: "#ED7D31".to_string(),
            accent3: "#A5A5A5".to_string(),
            accent4: "#FFC000".to_string(),
            accent5: "#5B9BD5".to_string(),
            accent6: "#70AD47".to_string(),
        }
    }
}

impl ThemePalette {
    /// The color held by a slot.
    pub fn slot(&self, slot: SchemeSlot) -> &str {
        match slot {
            SchemeSlot::Dark1 => &self.dk1,
            SchemeSlot::Light1 => &self.lt1,
            SchemeSlot::Dark2 => &self.dk2,
            SchemeSlot::Light2 => &self.lt2,
            SchemeSlot::Accent1 => &self.accent1,
            SchemeSlot::Accent2 => &self.accent2,
            SchemeSlot::Accent3 => &self.accent3,
            SchemeSlot::Accent4 => &self.accent4,
            SchemeSlot::Accent5 => &self.accent5,
            SchemeSlot::Accent6 => &self.accent6,
        }
    }

    /// Overwrite the color of a slot.
    pub fn set(&mut self, slot: SchemeSlot, color: impl Into<String>) {
        let target = match slot {
            SchemeSlot::Dark1 => &mut self.dk1,
            SchemeSlot::Light1 => &mut self.lt1,
            SchemeSlot::Dark2 => &mut self.dk2,
            SchemeSlot::Light2 => &mut self.lt2,
            SchemeSlot::Accent1 => &mut self.accent1,
            SchemeSlot::Accent2 => &mut self.accent2,
            SchemeSlot::Accent3 => &mut self.accent3,
            SchemeSlot::Accent4 => &mut self.accent4,
            SchemeSlot::Accent5 => &mut self.accent5,
            SchemeSlot::Accent6 => &mut self.accent6,
        };
        *target = color.into();
    }

    /// Look up a color by scheme name, `None` if the name is not a slot.
    pub fn get(&self, name: &str) -> Option<&str> {
        SchemeSlot::from_name(name).map(|slot| self.slot(slot))
    }
}

/// A color specification as found in markup.
///
/// Markup normally carries only one of these, but when several are present
/// the resolution order of [`ColorSpec::resolve`] applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSpec {
    /// Direct RGB value (`srgbClr`).
    pub rgb: Option<String>,
    /// Scheme reference (`schemeClr`), resolved through the palette.
    pub scheme: Option<String>,
    /// Last known value of a system color (`sysClr lastClr`).
    pub system_last: Option<String>,
}

impl ColorSpec {
    pub fn rgb(value: impl Into<String>) -> Self {
        Self {
            rgb: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn scheme(name: impl Into<String>) -> Self {
        Self {
            scheme: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn system(last: impl Into<String>) -> Self {
        Self {
            system_last: Some(last.into()),
            ..Self::default()
        }
    }

    /// Whether no sub-specification is present.
    pub fn is_empty(&self) -> bool {
        self.rgb.is_none() && self.scheme.is_none() && self.system_last.is_none()
    }

    /// Resolve to a concrete `#RRGGBB` color.
    ///
    /// Precedence is direct value, then scheme reference, then system color.
    /// A scheme reference the palette does not know resolves to `None`
    /// without consulting the system color.
    pub fn resolve(&self, palette: &ThemePalette) -> Option<String> {
        if let Some(rgb) = self.rgb.as_deref().and_then(normalize_hex) {
            return Some(rgb);
        }

        if let Some(name) = &self.scheme {
            let resolved = palette.get(name).map(str::to_string);
            if resolved.is_none() {
                log::debug!("Unresolved scheme color reference '{}'", name);
            }
            return resolved;
        }

        self.system_last.as_deref().and_then(normalize_hex)
    }
}

/// Resolve an optional color specification; an absent node resolves to `None`.
pub fn resolve_color(spec: Option<&ColorSpec>, palette: &ThemePalette) -> Option<String> {
    spec.and_then(|spec| spec.resolve(palette))
}

/// Normalize a six digit hex value to `#RRGGBB`, `None` if it is not one.
pub fn normalize_hex(value: &str) -> Option<String> {
    if value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", value.to_ascii_uppercase()))
    } else {
        None
    }
}
