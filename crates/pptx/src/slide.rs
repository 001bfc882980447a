//! Per-slide extraction.

use crate::images::{extract_images, referenced_media};
use crate::media::MediaLookup;
use crate::shapes::extract_shapes;
use crate::text::extract_text_runs;
use crate::xml::XmlElement;
use deck_core::{Result, Slide, ThemePalette};

/// A parsed slide document and its optional relationship document.
#[derive(Debug, Clone)]
pub struct SlideDocuments {
    pub slide: XmlElement,
    pub relationships: Option<XmlElement>,
}

impl SlideDocuments {
    pub fn parse(slide_xml: &str, relationships_xml: Option<&str>) -> Result<Self> {
        Ok(Self {
            slide: XmlElement::parse(slide_xml)?,
            relationships: relationships_xml.map(XmlElement::parse).transpose()?,
        })
    }

    /// File names of the media whose bytes the slide's images need.
    pub fn referenced_media(&self) -> Vec<String> {
        referenced_media(&self.slide, self.relationships.as_ref())
    }
}

/// Extract a [`Slide`] from its parsed documents.
pub fn process_slide(
    documents: &SlideDocuments,
    number: u32,
    palette: &ThemePalette,
    media: &dyn MediaLookup,
) -> Result<Slide> {
    let slide = &documents.slide;

    Ok(Slide {
        number,
        text_runs: extract_text_runs(slide, palette)?,
        shapes: extract_shapes(slide, palette)?,
        images: extract_images(slide, documents.relationships.as_ref(), media),
        error: None,
    })
}
