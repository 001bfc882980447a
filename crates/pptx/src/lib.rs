//! PPTX (Office Open XML) extraction of a semantic document model.
//!
//! Reads slide size, theme colors, and per-slide text runs, shapes, and
//! images from a package exposed through [`Package`].

pub mod color;
pub mod dimensions;
pub mod images;
pub mod media;
pub mod package;
pub mod parser;
pub mod shapes;
pub mod slide;
pub mod text;
pub mod theme;
pub mod xml;

pub use media::{MediaIndex, MediaLibrary, MediaLookup};
pub use package::{MemoryPackage, Package, ZipPackage};
pub use parser::{PptxParser, SlideFailurePolicy};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
