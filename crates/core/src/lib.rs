//! Core document model, unit conversion, and color resolution for
//! presentation extraction.

pub mod color;
pub mod error;
pub mod types;
pub mod units;

pub use color::{resolve_color, ColorSpec, SchemeSlot, ThemePalette};
pub use error::{Error, Result};
pub use types::{BoundingBox, Dimensions, Document, Image, MediaData, Shape, Slide, TextRun};
pub use units::emu_to_px;
