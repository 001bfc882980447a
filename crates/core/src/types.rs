//! Domain types for representing an extracted presentation.
//!
//! Field names serialize in camelCase; the JSON form of [`Document`] is the
//! contract consumed by downstream renderers.

use crate::color::ThemePalette;
use crate::units::emu_to_px;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A whole presentation: canvas size, theme colors, and slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Canvas size shared by all slides.
    pub dimensions: Dimensions,

    /// Colors referenced by scheme name from slide markup.
    pub theme_palette: ThemePalette,

    /// Slides in ascending slide number order.
    pub slides: Vec<Slide>,
}

impl Document {
    /// Create a document with no slides.
    pub fn new(dimensions: Dimensions, theme_palette: ThemePalette) -> Self {
        Self {
            dimensions,
            theme_palette,
            slides: Vec::new(),
        }
    }

    /// Find a slide by its number.
    pub fn slide(&self, number: u32) -> Option<&Slide> {
        self.slides.iter().find(|s| s.number == number)
    }

    /// Get the text of every run of every slide, flattened.
    pub fn all_text(&self) -> Vec<&str> {
        self.slides
            .iter()
            .flat_map(|s| s.text_runs.iter().map(|r| r.text.as_str()))
            .collect()
    }

    /// Slides that failed and were kept in place instead of aborting the parse.
    pub fn failed_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter().filter(|s| s.error.is_some())
    }
}

/// Canvas size in EMU and in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width_units: i64,
    pub height_units: i64,
    pub width_px: i64,
    pub height_px: i64,
}

impl Dimensions {
    /// 10 x 7.5 inches, the 4:3 default.
    pub const DEFAULT_WIDTH_UNITS: i64 = 9_144_000;
    pub const DEFAULT_HEIGHT_UNITS: i64 = 6_858_000;

    /// Build dimensions from EMU, deriving the pixel size.
    pub fn from_units(width_units: i64, height_units: i64) -> Self {
        Self {
            width_units,
            height_units,
            width_px: emu_to_px(width_units),
            height_px: emu_to_px(height_units),
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::from_units(Self::DEFAULT_WIDTH_UNITS, Self::DEFAULT_HEIGHT_UNITS)
    }
}

/// A single extracted slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide number taken from the entry name (`slide3.xml` is 3).
    pub number: u32,

    /// Text runs in document order.
    pub text_runs: Vec<TextRun>,

    /// Shapes in document order.
    pub shapes: Vec<Shape>,

    /// Images in document order.
    pub images: Vec<Image>,

    /// Failure message when the slide could not be extracted and failures
    /// are isolated rather than fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Slide {
    /// Create an empty slide with the given number.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            text_runs: Vec::new(),
            shapes: Vec::new(),
            images: Vec::new(),
            error: None,
        }
    }

    /// Create an empty slide flagged with a failure.
    pub fn failed(number: u32, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(number)
        }
    }
}

/// A run of text sharing one set of character properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size_pt: Option<f64>,
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
}

impl TextRun {
    /// Create a run with no formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Position and size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// A vector shape with its styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub bounding_box: BoundingBox,
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width_px: Option<i64>,
    pub corner_radius_px: Option<i64>,
}

/// An embedded picture referenced from a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Relationship id used by the slide (`rId2`).
    pub embed_id: String,
    /// Package path of the media entry (`ppt/media/image1.png`).
    pub path: String,
    pub filename: String,
    /// Lowercased extension without the dot.
    pub extension: String,
    /// Whether downstream renderers can display the format.
    pub supported: bool,
    /// Media content, when the entry exists and the format is supported.
    pub data: Option<MediaData>,
    /// Substitute image for unsupported formats.
    pub placeholder_data_uri: Option<String>,
}

/// The bytes of a media entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaData {
    pub path: String,
    pub content_type: String,
    /// Serialized as standard base64.
    #[serde(with = "base64_bytes")]
    pub bytes: Arc<[u8]>,
}

impl MediaData {
    /// Create media data, deriving the content type from the path.
    pub fn new(path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let path = path.into();
        let content_type = content_type_for(&path).to_string();
        Self {
            path,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Encode the bytes as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Guess a MIME type from a file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    pub fn serialize<S: Serializer>(bytes: &Arc<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Arc<[u8]>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Arc::from)
            .map_err(serde::de::Error::custom)
    }
}
