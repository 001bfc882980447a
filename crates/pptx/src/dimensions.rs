//! Slide size from `ppt/presentation.xml`.

use crate::xml::XmlElement;
use deck_core::units::parse_emu;
use deck_core::{Dimensions, Result};

/// Read the slide size declared by `p:sldSz`.
///
/// A manifest without a complete size declaration yields the default size.
pub fn read_dimensions(manifest: &XmlElement) -> Result<Dimensions> {
    let size = manifest
        .find_descendant("sldSz")
        .and_then(|e| Some((e.attr("cx")?, e.attr("cy")?)));

    match size {
        Some((cx, cy)) => Ok(Dimensions::from_units(
            parse_emu("cx", cx)?,
            parse_emu("cy", cy)?,
        )),
        None => {
            log::debug!("Manifest declares no slide size, using default");
            Ok(Dimensions::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Error;

    #[test]
    fn test_read_dimensions() {
        let manifest = XmlElement::parse(
            r#"<p:presentation xmlns:p="urn:p"><p:sldIdLst/><p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        )
        .unwrap();
        let dims = read_dimensions(&manifest).unwrap();
        assert_eq!(dims.width_units, 12_192_000);
        assert_eq!(dims.height_units, 6_858_000);
        assert_eq!(dims.width_px, 1280);
        assert_eq!(dims.height_px, 720);
    }

    #[test]
    fn test_missing_size_uses_default() {
        let manifest = XmlElement::parse("<p:presentation/>").unwrap();
        assert_eq!(read_dimensions(&manifest).unwrap(), Dimensions::default());

        let partial = XmlElement::parse(r#"<p:presentation><p:sldSz cx="100"/></p:presentation>"#).unwrap();
        assert_eq!(read_dimensions(&partial).unwrap(), Dimensions::default());
    }

    #[test]
    fn test_non_numeric_size_is_an_error() {
        let manifest =
            XmlElement::parse(r#"<p:presentation><p:sldSz cx="wide" cy="10"/></p:presentation>"#).unwrap();
        assert!(matches!(
            read_dimensions(&manifest),
            Err(Error::InvalidNumber { .. })
        ));
    }
}
