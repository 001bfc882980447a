//! Embedded image extraction.
//!
//! Pictures are referenced from slide markup by relationship id
//! (`<a:blip r:embed="rId2"/>`); the slide's relationship document maps the
//! id to a media entry such as `../media/image1.png`.

use crate::media::MediaLookup;
use crate::xml::XmlElement;
use deck_core::Image;
use std::collections::HashMap;

/// Formats renderers cannot display; these get a placeholder instead of data.
pub const UNSUPPORTED_EXTENSIONS: [&str; 2] = ["emf", "wmf"];

/// Grey 200x200 SVG reading "EMF/WMF not supported".
pub const UNSUPPORTED_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgZmlsbD0iI2YwZjBmMCIvPjx0ZXh0IHg9IjEwMCIgeT0iMTAwIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTQiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGZpbGw9IiM2NjYiPkVNRi9XTUYgbm90IHN1cHBvcnRlZDwvdGV4dD48L3N2Zz4=";

/// Extract the images referenced by a slide, in document order.
///
/// Without a relationship document no image can be resolved and the result
/// is empty. References missing from the relationships are dropped.
pub fn extract_images(
    slide: &XmlElement,
    relationships: Option<&XmlElement>,
    media: &dyn MediaLookup,
) -> Vec<Image> {
    let Some(relationships) = relationships else {
        return Vec::new();
    };

    let targets = relationship_targets(relationships);

    slide
        .descendants_named("blip")
        .filter_map(|blip| blip.attr("embed"))
        .filter_map(|embed_id| match targets.get(embed_id) {
            Some(target) => Some(build_image(embed_id, target, media)),
            None => {
                log::debug!("Image reference '{}' has no relationship", embed_id);
                None
            }
        })
        .collect()
}

/// File names of the supported media a slide references, without repeats.
///
/// These are the only media entries [`extract_images`] attaches data for.
pub fn referenced_media(slide: &XmlElement, relationships: Option<&XmlElement>) -> Vec<String> {
    let Some(relationships) = relationships else {
        return Vec::new();
    };

    let targets = relationship_targets(relationships);

    let mut filenames: Vec<String> = slide
        .descendants_named("blip")
        .filter_map(|blip| blip.attr("embed"))
        .filter_map(|embed_id| targets.get(embed_id))
        .map(|target| file_name(&media_path(target)).to_string())
        .filter(|filename| is_supported(filename))
        .collect();
    filenames.sort();
    filenames.dedup();
    filenames
}

/// Map relationship ids to targets; the first declaration of an id wins.
fn relationship_targets(relationships: &XmlElement) -> HashMap<&str, &str> {
    let mut targets = HashMap::new();
    for rel in relationships.children("Relationship") {
        if let (Some(id), Some(target)) = (rel.attr("Id"), rel.attr("Target")) {
            targets.entry(id).or_insert(target);
        }
    }
    targets
}

fn build_image(embed_id: &str, target: &str, media: &dyn MediaLookup) -> Image {
    let path = media_path(target);
    let filename = file_name(&path).to_string();
    let extension = file_extension(&filename);

    let mut image = Image {
        embed_id: embed_id.to_string(),
        path,
        filename,
        extension,
        supported: true,
        data: None,
        placeholder_data_uri: None,
    };

    if !is_supported(&image.filename) {
        image.supported = false;
        image.placeholder_data_uri = Some(UNSUPPORTED_PLACEHOLDER.to_string());
    } else {
        image.data = media.find(&image.filename);
        if image.data.is_none() {
            log::debug!("Media entry '{}' not found", image.filename);
        }
    }

    image
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

fn file_extension(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or_default().to_lowercase()
}

fn is_supported(filename: &str) -> bool {
    !UNSUPPORTED_EXTENSIONS.contains(&file_extension(filename).as_str())
}

/// Rewrite a slide-relative target (`../media/x.png`) to a package path.
fn media_path(target: &str) -> String {
    match target.strip_prefix("../") {
        Some(rest) => format!("ppt/{}", rest),
        None => target.to_string(),
    }
}
