//! Common types shared by the index and the handles.

use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::path;

/// Stat view of a single file or directory in the filesystem.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    /// Absolute normalized path, the key the record is stored under.
    pub path: String,
    pub size: u64,
    pub permissions: u32,
    pub modified_time: u64, // Unix timestamp
    pub is_dir: bool,
}

impl Metadata {
    pub fn new(
        path: String,
        size: u64,
        permissions: u32,
        modified_time: u64,
        is_dir: bool,
    ) -> Self {
        Self {
            name: path::base_name(&path).to_string(),
            path,
            size,
            permissions,
            modified_time,
            is_dir,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Permission bits from the archive header.
    pub fn mode(&self) -> u32 {
        self.permissions
    }

    pub fn modified(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.modified_time)
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

/// One kept archive entry. Owned by the index and never mutated once built.
#[derive(Debug)]
pub struct FileRecord {
    metadata: Metadata,
    data: Box<[u8]>,
}

impl FileRecord {
    pub fn file(metadata: Metadata, data: Vec<u8>) -> Self {
        Self { metadata, data: data.into_boxed_slice() }
    }

    pub fn directory(metadata: Metadata) -> Self {
        Self { metadata, data: Box::default() }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Payload bytes; always empty for directories.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir
    }
}
