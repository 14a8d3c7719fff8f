//! In-process cache of the parsed document
//!
//! Entries are keyed by the file's modification time and length, so a write
//! from another store instance (or an editor) invalidates the cache the next
//! time anyone reads.

use std::fs::Metadata;
use std::time::SystemTime;
use crate::storage::Document;

/// Identity of the file contents a cached document was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl FileStamp {
    /// Build a stamp from file metadata, if the platform reports mtimes
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        metadata.modified().ok().map(|modified| Self {
            modified,
            len: metadata.len(),
        })
    }
}

#[derive(Debug, Default)]
pub struct DocumentCache {
    entry: Option<(FileStamp, Document)>,
}

impl DocumentCache {
    /// The cached document, if it was parsed from a file with this stamp
    pub fn get(&self, stamp: FileStamp) -> Option<&Document> {
        match &self.entry {
            Some((cached, document)) if *cached == stamp => Some(document),
            _ => None,
        }
    }

    pub fn put(&mut self, stamp: FileStamp, document: Document) {
        self.entry = Some((stamp, document));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
