//! # Read-Only Archive Filesystem
//!
//! [`TarFs`] owns the index built from one archive and serves `open` and
//! `exists` from it. Construction reads the whole archive up front; after that
//! nothing is mutated, so a `TarFs` can be shared between threads by reference
//! and every call gets its own handle state.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::common::Metadata;
use crate::compress::{self, Compression};
use crate::error::{Result, TarFsError};
use crate::handle::{DirHandle, FileHandle, FsHandle, Handle};
use crate::index::FileSystemIndex;
use crate::path;

/// Capability contract for a read-only filesystem serving layers can depend on.
pub trait FileSystem {
    type Handle<'a>: FsHandle
    where
        Self: 'a;

    /// Opens `path`, failing with [`TarFsError::InvalidPath`] or [`TarFsError::NotFound`].
    fn open(&self, path: &str) -> Result<Self::Handle<'_>>;

    /// Never fails; invalid paths simply do not exist.
    fn exists(&self, path: &str) -> bool;
}

/// An in-memory filesystem holding every file and directory of a tar archive.
#[derive(Debug, Default)]
pub struct TarFs {
    index: FileSystemIndex,
}

impl TarFs {
    /// Builds the filesystem from a stream that is already in tar format.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let index = FileSystemIndex::build(reader)?;
        Ok(Self::from_index(index))
    }

    /// Builds the filesystem from an uncompressed tar file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_archive(path, Compression::None)
    }

    /// Builds the filesystem from a gzip-compressed tar file.
    pub fn from_gzip_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_archive(path, Compression::Gzip)
    }

    /// Builds the filesystem from a bzip2-compressed tar file.
    pub fn from_bzip2_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_archive(path, Compression::Bzip2)
    }

    /// Builds the filesystem from a tar file with the given compression.
    ///
    /// With [`Compression::Auto`] the decoder is chosen from the file name, or
    /// from the file's magic bytes when the name is not conclusive.
    pub fn open_archive(path: impl AsRef<Path>, compression: Compression) -> Result<Self> {
        let path = path.as_ref();
        let reader = compress::open_decoded(path, compression)?;
        let fs = Self::from_reader(reader)?;
        info!(archive = %path.display(), entries = fs.len(), "archive loaded");
        Ok(fs)
    }

    /// Wraps an index that was built elsewhere.
    pub fn from_index(index: FileSystemIndex) -> Self {
        Self { index }
    }

    /// Opens `name` and returns a fresh handle.
    ///
    /// Directories get a listing of all their descendants taken at this
    /// moment; files get a cursor positioned at the start of the payload.
    pub fn open(&self, name: &str) -> Result<Handle<'_>> {
        let key = path::resolve(name)?;
        let record = self.index.get(&key).ok_or(TarFsError::NotFound)?;

        if record.is_dir() {
            let snapshot = self.index.descendants(&key);
            Ok(Handle::Dir(DirHandle::new(record.metadata(), snapshot)))
        } else {
            Ok(Handle::File(FileHandle::new(record.metadata(), record.data())))
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        match path::resolve(name) {
            Ok(key) => self.index.contains(&key),
            Err(_) => false,
        }
    }

    /// Metadata for `name` without opening a handle.
    pub fn stat(&self, name: &str) -> Result<&Metadata> {
        let key = path::resolve(name)?;
        self.index.get(&key).map(|record| record.metadata()).ok_or(TarFsError::NotFound)
    }

    /// Number of files and directories held.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every stored path, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys()
    }
}

impl FileSystem for TarFs {
    type Handle<'a> = Handle<'a>;

    fn open(&self, path: &str) -> Result<Handle<'_>> {
        TarFs::open(self, path)
    }

    fn exists(&self, path: &str) -> bool {
        TarFs::exists(self, path)
    }
}
