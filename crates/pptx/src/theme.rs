//! Theme color palette extraction from `ppt/theme/theme1.xml`.

use crate::xml::XmlElement;
use deck_core::color::normalize_hex;
use deck_core::{SchemeSlot, ThemePalette};

/// Slots read from the theme's color scheme. The second dark and light
/// colors keep their defaults.
const THEME_SLOTS: [SchemeSlot; 8] = [
    SchemeSlot::Dark1,
    SchemeSlot::Light1,
    SchemeSlot::Accent1,
    SchemeSlot::Accent2,
    SchemeSlot::Accent3,
    SchemeSlot::Accent4,
    SchemeSlot::Accent5,
    SchemeSlot::Accent6,
];

/// Build a palette from a parsed theme document.
///
/// Each slot starts at its default and is overwritten by the slot's direct
/// `srgbClr` value when the theme declares one.
pub fn build_palette(theme: Option<&XmlElement>) -> ThemePalette {
    let mut palette = ThemePalette::default();

    let Some(theme) = theme else {
        log::debug!("No theme document, using default palette");
        return palette;
    };

    let Some(scheme) = theme.find_descendant("clrScheme") else {
        log::debug!("Theme has no color scheme, using default palette");
        return palette;
    };

    for slot in THEME_SLOTS {
        let color = scheme
            .child(slot.name())
            .and_then(|e| e.child("srgbClr"))
            .and_then(|e| e.attr("val"))
            .and_then(normalize_hex);

        if let Some(color) = color {
            palette.set(slot, color);
        }
    }

    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Custom">
      <a:dk1><a:sysClr val="windowText" lastClr="111111"/></a:dk1>
      <a:lt1><a:srgbClr val="fefefe"/></a:lt1>
      <a:dk2><a:srgbClr val="222222"/></a:dk2>
      <a:lt2><a:srgbClr val="DDDDDD"/></a:lt2>
      <a:accent1><a:srgbClr val="AA0000"/></a:accent1>
      <a:accent2><a:srgbClr val="00AA00"/></a:accent2>
      <a:accent3><a:srgbClr val="0000AA"/></a:accent3>
      <a:accent5><a:srgbClr val="not-hex"/></a:accent5>
      <a:accent6><a:srgbClr val="ABCDEF"/></a:accent6>
    </a:clrScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_build_palette_overrides_found_slots() {
        let theme = XmlElement::parse(THEME).unwrap();
        let palette = build_palette(Some(&theme));
        let defaults = ThemePalette::default();

        // dk1 has no direct value, so it keeps its default.
        assert_eq!(palette.dk1, defaults.dk1);
        assert_eq!(palette.lt1, "#FEFEFE");
        assert_eq!(palette.accent1, "#AA0000");
        assert_eq!(palette.accent2, "#00AA00");
        assert_eq!(palette.accent3, "#0000AA");
        assert_eq!(palette.accent4, defaults.accent4);
        assert_eq!(palette.accent5, defaults.accent5);
        assert_eq!(palette.accent6, "#ABCDEF");

        // Second dark/light colors are not read from the theme.
        assert_eq!(palette.dk2, defaults.dk2);
        assert_eq!(palette.lt2, defaults.lt2);
    }

    #[test]
    fn test_missing_theme_uses_defaults() {
        assert_eq!(build_palette(None), ThemePalette::default());

        let empty = XmlElement::parse("<a:theme/>").unwrap();
        assert_eq!(build_palette(Some(&empty)), ThemePalette::default());
    }
}
