//! PPTX document assembly.
//!
//! The manifest and theme are read first and the media folder is indexed;
//! slides are then fetched and extracted concurrently, each reading only the
//! media it references, and collected in slide number order.

use crate::dimensions::read_dimensions;
use crate::media::MediaIndex;
use crate::package::Package;
use crate::slide::{process_slide, SlideDocuments};
use crate::theme::build_palette;
use crate::xml::XmlElement;
use deck_core::{Document, Error, Result, Slide, ThemePalette};
use futures::future::{join_all, try_join_all};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Presentation manifest; a package without it is not a presentation.
pub const MANIFEST_PATH: &str = "ppt/presentation.xml";

/// Theme providing the color palette.
pub const THEME_PATH: &str = "ppt/theme/theme1.xml";

/// Folder holding the slide documents.
pub const SLIDES_DIR: &str = "ppt/slides";

/// Slide document names relative to [`SLIDES_DIR`], e.g. `slide12.xml`.
static SLIDE_ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^slide(\d+)\.xml$").unwrap());

/// What to do when a single slide cannot be fetched or extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideFailurePolicy {
    /// Fail the whole parse.
    #[default]
    Abort,
    /// Keep the slide in place with empty content and an error message.
    Isolate,
}

/// A slide document found in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEntry {
    pub number: u32,
    pub path: String,
    pub relationships_path: String,
}

/// Parser for PPTX (Office Open XML) packages.
#[derive(Debug, Clone, Default)]
pub struct PptxParser {
    failure_policy: SlideFailurePolicy,
}

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how per-slide failures are handled.
    pub fn with_failure_policy(mut self, policy: SlideFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn failure_policy(&self) -> SlideFailurePolicy {
        self.failure_policy
    }

    /// Extract the document model from a package.
    pub async fn parse<P: Package + ?Sized>(&self, package: &P) -> Result<Document> {
        if !package.contains(MANIFEST_PATH) {
            return Err(Error::MissingManifest {
                path: MANIFEST_PATH.to_string(),
            });
        }

        let manifest = XmlElement::parse(&package.read_text(MANIFEST_PATH).await?)?;
        let dimensions = read_dimensions(&manifest)?;
        log::debug!(
            "Slide size {}x{} px",
            dimensions.width_px,
            dimensions.height_px
        );

        let palette = self.read_palette(package).await?;

        let entries = discover_slides(package);
        log::debug!("Discovered {} slides", entries.len());

        let media = MediaIndex::from_package(package);
        log::debug!("Indexed {} media entries", media.len());

        let loads = entries
            .iter()
            .map(|entry| load_slide(package, entry, &palette, &media));

        let slides = match self.failure_policy {
            SlideFailurePolicy::Abort => try_join_all(loads).await?,
            SlideFailurePolicy::Isolate => join_all(loads)
                .await
                .into_iter()
                .zip(&entries)
                .map(|(result, entry)| {
                    result.unwrap_or_else(|e| {
                        log::warn!("Skipping content of slide {}: {}", entry.number, e);
                        Slide::failed(entry.number, e.to_string())
                    })
                })
                .collect(),
        };

        let mut document = Document::new(dimensions, palette);
        document.slides = slides;
        Ok(document)
    }

    /// Build the palette from the theme, falling back to defaults when the
    /// theme is absent or unreadable.
    async fn read_palette<P: Package + ?Sized>(&self, package: &P) -> Result<ThemePalette> {
        let Some(theme_xml) = package.read_text_opt(THEME_PATH).await? else {
            log::debug!("No theme entry at {}", THEME_PATH);
            return Ok(build_palette(None));
        };

        match XmlElement::parse(&theme_xml) {
            Ok(theme) => Ok(build_palette(Some(&theme))),
            Err(e) => {
                log::warn!("Ignoring malformed theme: {}", e);
                Ok(build_palette(None))
            }
        }
    }
}

/// Find the slide documents of a package, ordered by slide number.
///
/// Names that differ only in zero padding (`slide1.xml`, `slide01.xml`)
/// share a number; the shortest name is kept and the others are skipped.
pub fn discover_slides<P: Package + ?Sized>(package: &P) -> Vec<SlideEntry> {
    let names = package.list_folder(SLIDES_DIR).unwrap_or_default();
    let mut entries: Vec<SlideEntry> = names.iter().filter_map(|name| slide_entry(name)).collect();
    entries.sort_by(|a, b| {
        a.number
            .cmp(&b.number)
            .then(a.path.len().cmp(&b.path.len()))
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut unique: Vec<SlideEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match unique.last() {
            Some(kept) if kept.number == entry.number => {
                log::warn!(
                    "Skipping {}: slide {} is already {}",
                    entry.path,
                    entry.number,
                    kept.path
                );
            }
            _ => unique.push(entry),
        }
    }
    unique
}

/// Build the entry for a slide file name such as `slide3.xml`.
fn slide_entry(name: &str) -> Option<SlideEntry> {
    let number = SLIDE_ENTRY_REGEX.captures(name)?.get(1)?.as_str();
    let Ok(number) = number.parse::<u32>() else {
        log::debug!("Ignoring slide entry with out of range number: {}", name);
        return None;
    };

    Some(SlideEntry {
        number,
        path: format!("{}/{}", SLIDES_DIR, name),
        relationships_path: format!("{}/_rels/{}.rels", SLIDES_DIR, name),
    })
}

/// Fetch a slide, its relationships and the media it references, and
/// extract it.
async fn load_slide<P: Package + ?Sized>(
    package: &P,
    entry: &SlideEntry,
    palette: &ThemePalette,
    media: &MediaIndex,
) -> Result<Slide> {
    let result = async {
        let (slide_xml, relationships_xml) = futures::try_join!(
            package.read_text(&entry.path),
            package.read_text_opt(&entry.relationships_path)
        )?;
        if relationships_xml.is_none() {
            log::debug!("Slide {} has no relationships", entry.number);
        }

        let documents = SlideDocuments::parse(&slide_xml, relationships_xml.as_deref())?;
        let library = media.load(package, documents.referenced_media()).await?;
        process_slide(&documents, entry.number, palette, &library)
    }
    .await;

    result.map_err(|e| e.in_slide(entry.number))
}
