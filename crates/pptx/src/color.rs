//! Reading color specifications from DrawingML markup.

use crate::xml::XmlElement;
use deck_core::{resolve_color, ColorSpec, ThemePalette};

/// Build a [`ColorSpec`] from a color container such as `a:solidFill`.
pub fn color_spec(fill: &XmlElement) -> ColorSpec {
    ColorSpec {
        rgb: fill
            .child("srgbClr")
            .and_then(|e| e.attr("val"))
            .map(str::to_string),
        scheme: fill
            .child("schemeClr")
            .and_then(|e| e.attr("val"))
            .map(str::to_string),
        system_last: fill
            .child("sysClr")
            .and_then(|e| e.attr("lastClr"))
            .map(str::to_string),
    }
}

/// Resolve the `a:solidFill` child of `parent`, if any.
pub fn solid_fill_color(parent: &XmlElement, palette: &ThemePalette) -> Option<String> {
    let spec = parent.child("solidFill").map(color_spec);
    resolve_color(spec.as_ref(), palette)
}
