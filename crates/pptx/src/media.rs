//! Media entries of a package.
//!
//! The media folder is indexed once per parse; bytes are read per slide,
//! only for the files that slide references.

use crate::package::Package;
use deck_core::{MediaData, Result};
use futures::future::try_join_all;
use std::collections::{BTreeSet, HashMap};

/// Media folder of a presentation package.
pub const MEDIA_DIR: &str = "ppt/media";

/// Find media by file name.
pub trait MediaLookup: Sync {
    fn find(&self, filename: &str) -> Option<MediaData>;
}

/// Package paths of the entries directly inside the media folder, keyed by
/// file name.
#[derive(Debug, Clone, Default)]
pub struct MediaIndex {
    paths: HashMap<String, String>,
}

impl MediaIndex {
    /// List the media folder of a package without reading any entry.
    pub fn from_package<P: Package + ?Sized>(package: &P) -> Self {
        let Some(names) = package.list_folder(MEDIA_DIR) else {
            log::debug!("Package has no media folder");
            return Self::default();
        };

        let paths = names
            .into_iter()
            .filter(|name| !name.contains('/'))
            .map(|name| {
                let path = format!("{}/{}", MEDIA_DIR, name);
                (name, path)
            })
            .collect();
        Self { paths }
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.paths.contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read the named media entries concurrently.
    ///
    /// Names that are not in the index are left out of the library. A failed
    /// read fails the whole load.
    pub async fn load<P, I, S>(&self, package: &P, filenames: I) -> Result<MediaLibrary>
    where
        P: Package + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<&str> = filenames
            .into_iter()
            .filter_map(|name| self.paths.get_key_value(name.as_ref()))
            .map(|(name, _)| name.as_str())
            .collect();

        let loads = wanted.into_iter().map(|name| async move {
            let path = &self.paths[name];
            let bytes = package.read_bytes(path).await?;
            Ok::<_, deck_core::Error>(MediaData::new(path.clone(), bytes))
        });

        let library = MediaLibrary::from_entries(try_join_all(loads).await?);
        log::trace!("Loaded {} media entries", library.len());
        Ok(library)
    }
}

/// Media entries loaded from a package, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    entries: HashMap<String, MediaData>,
}

impl MediaLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from loaded media, keyed by the last path segment.
    pub fn from_entries(entries: impl IntoIterator<Item = MediaData>) -> Self {
        let entries = entries
            .into_iter()
            .map(|media| {
                let filename = media.path.rsplit('/').next().unwrap_or_default().to_string();
                (filename, media)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MediaLookup for MediaLibrary {
    fn find(&self, filename: &str) -> Option<MediaData> {
        self.entries.get(filename).cloned()
    }
}
