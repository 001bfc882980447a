//! Error types for presentation extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting a document model.
///
/// Only a missing manifest and a failed slide abort a parse. Everything else
/// the extractor tolerates (absent theme, absent relationships, unresolvable
/// colors, unsupported image formats) degrades into a default value instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read from the underlying source.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The package has no presentation manifest.
    #[error("Presentation manifest not found: {path}")]
    MissingManifest { path: String },

    /// An entry that was discovered could not be retrieved.
    #[error("Entry not found in package: {path}")]
    MissingEntry { path: String },

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Malformed XML markup.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A numeric attribute that does not hold an integer.
    #[error("Invalid numeric value for '{attribute}': {value:?}")]
    InvalidNumber { attribute: String, value: String },

    /// Retrieving or extracting a single slide failed.
    #[error("Slide {number} failed: {source}")]
    SlideFailed {
        number: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error as the failure of the given slide.
    pub fn in_slide(self, number: u32) -> Self {
        match self {
            Error::SlideFailed { .. } => self,
            other => Error::SlideFailed {
                number,
                source: Box::new(other),
            },
        }
    }
}
