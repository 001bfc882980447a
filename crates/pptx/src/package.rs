//! Access to the entries of a presentation package.
//!
//! The parser never opens the container itself; it reads named entries
//! through [`Package`]. [`ZipPackage`] adapts a `.pptx` ZIP archive and
//! [`MemoryPackage`] serves entries already held in memory.

use async_trait::async_trait;
use deck_core::{Error, Result};
use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::sync::Mutex;
use zip::ZipArchive;

/// Read-only access to package entries by path.
#[async_trait]
pub trait Package: Send + Sync {
    /// Whether an entry exists at the given path.
    fn contains(&self, path: &str) -> bool;

    /// Paths of all entries below `dir`, relative to it, in package order.
    ///
    /// Returns `None` when no entry lives under `dir`.
    fn list_folder(&self, dir: &str) -> Option<Vec<String>>;

    /// Retrieve an entry as UTF-8 text.
    async fn read_text(&self, path: &str) -> Result<String>;

    /// Retrieve an entry as raw bytes.
    async fn read_bytes(&self, path: &str) -> Result<Vec<u8>>;

    /// Retrieve an entry as text, or `None` if it does not exist.
    async fn read_text_opt(&self, path: &str) -> Result<Option<String>> {
        if self.contains(path) {
            self.read_text(path).await.map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Select the entries below `dir` from a list of entry names.
fn folder_entries<'a>(names: impl Iterator<Item = &'a str>, dir: &str) -> Option<Vec<String>> {
    let prefix = format!("{}/", dir.trim_end_matches('/'));
    let entries: Vec<String> = names
        .filter_map(|name| name.strip_prefix(prefix.as_str()))
        .filter(|relative| !relative.is_empty() && !relative.ends_with('/'))
        .map(str::to_string)
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// A package held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPackage {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with_entry(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Add a text entry.
    pub fn with_text_entry(self, path: impl Into<String>, text: &str) -> Self {
        self.with_entry(path, text.as_bytes())
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    fn entry(&self, path: &str) -> Result<&[u8]> {
        self.entries
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingEntry {
                path: path.to_string(),
            })
    }
}

#[async_trait]
impl Package for MemoryPackage {
    fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    fn list_folder(&self, dir: &str) -> Option<Vec<String>> {
        folder_entries(self.entries.keys().map(String::as_str), dir)
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.entry(path)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::XmlError(format!("Entry '{}' is not UTF-8: {}", path, e)))
    }

    async fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.entry(path).map(<[u8]>::to_vec)
    }
}

/// A package backed by a ZIP archive.
///
/// The archive needs exclusive access to its reader, so entry reads are
/// serialized behind a mutex.
pub struct ZipPackage<R> {
    archive: Mutex<ZipArchive<R>>,
    names: Vec<String>,
}

impl<R: Read + Seek + Send> ZipPackage<R> {
    /// Open a ZIP archive from a reader.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        let names = archive.file_names().map(str::to_string).collect();

        Ok(Self {
            archive: Mutex::new(archive),
            names,
        })
    }

    /// Read a file from the ZIP archive.
    fn read_entry(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| Error::ZipError("ZIP archive lock poisoned".to_string()))?;

        let mut file = archive.by_name(path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingEntry {
                path: path.to_string(),
            },
            other => Error::ZipError(format!("Failed to open '{}': {}", path, other)),
        })?;

        let mut content = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

/// Largest buffer reserved up front from an entry's declared size; archive
/// headers are not trusted beyond this and the buffer grows as bytes arrive.
const MAX_CAPACITY_HINT: u64 = 1 << 20;

fn capacity_hint(declared_size: u64) -> usize {
    declared_size.min(MAX_CAPACITY_HINT) as usize
}

#[async_trait]
impl<R: Read + Seek + Send> Package for ZipPackage<R> {
    fn contains(&self, path: &str) -> bool {
        self.names.iter().any(|name| name == path)
    }

    fn list_folder(&self, dir: &str) -> Option<Vec<String>> {
        folder_entries(self.names.iter().map(String::as_str), dir)
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.read_entry(path)?;
        String::from_utf8(bytes)
            .map_err(|e| Error::ZipError(format!("Entry '{}' is not UTF-8: {}", path, e)))
    }

    async fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.read_entry(path)
    }
}
