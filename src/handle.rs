//! Per-open handles.
//!
//! A handle borrows the record it was opened from and owns only its cursor,
//! plus the listing snapshot for directories. Dropping or closing it never
//! touches the index.

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};

use crate::common::Metadata;
use crate::error::{Result, TarFsError};

/// What a serving layer can do with any open path.
///
/// Reads and seeks go through `Read` and `Seek`; directories list their
/// entries through [`FsHandle::read_dir`].
pub trait FsHandle: Read + Seek {
    fn stat(&self) -> &Metadata;

    /// Next directory entries, at most `limit` of them when given.
    fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<Metadata>>;

    /// Releases the handle.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// An open path: either a file cursor or a directory cursor.
#[derive(Debug)]
pub enum Handle<'a> {
    File(FileHandle<'a>),
    Dir(DirHandle<'a>),
}

impl<'a> Handle<'a> {
    pub fn stat(&self) -> &'a Metadata {
        match self {
            Handle::File(file) => file.stat(),
            Handle::Dir(dir) => dir.stat(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    /// Lists directory entries; see [`DirHandle::read_dir`].
    ///
    /// A file handle has nothing to list and fails with [`TarFsError::NotFound`].
    pub fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<Metadata>> {
        match self {
            Handle::File(_) => Err(TarFsError::NotFound),
            Handle::Dir(dir) => Ok(dir.read_dir(limit)),
        }
    }

    pub fn close(self) {}
}

impl Read for Handle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Handle::File(file) => file.read(buf),
            Handle::Dir(_) => Err(TarFsError::IsDirectory.into()),
        }
    }
}

impl Seek for Handle<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Handle::File(file) => file.seek(pos),
            Handle::Dir(_) => Err(TarFsError::IsDirectory.into()),
        }
    }
}

impl FsHandle for Handle<'_> {
    fn stat(&self) -> &Metadata {
        Handle::stat(self)
    }

    fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<Metadata>> {
        Handle::read_dir(self, limit)
    }

    fn close(self) {
        Handle::close(self)
    }
}

/// Read cursor over one file's payload. Each open gets its own position.
#[derive(Debug)]
pub struct FileHandle<'a> {
    metadata: &'a Metadata,
    cursor: Cursor<&'a [u8]>,
}

impl<'a> FileHandle<'a> {
    pub(crate) fn new(metadata: &'a Metadata, data: &'a [u8]) -> Self {
        Self { metadata, cursor: Cursor::new(data) }
    }

    pub fn stat(&self) -> &'a Metadata {
        self.metadata
    }

    /// The whole payload, independent of the cursor.
    pub fn contents(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }
}

impl Read for FileHandle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for FileHandle<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for FileHandle<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

/// Directory cursor over a listing taken when the directory was opened.
#[derive(Debug)]
pub struct DirHandle<'a> {
    metadata: &'a Metadata,
    entries: std::vec::IntoIter<Metadata>,
}

impl<'a> DirHandle<'a> {
    pub(crate) fn new(metadata: &'a Metadata, snapshot: Vec<Metadata>) -> Self {
        Self { metadata, entries: snapshot.into_iter() }
    }

    pub fn stat(&self) -> &'a Metadata {
        self.metadata
    }

    /// Returns the next entries of the listing and advances the cursor.
    ///
    /// `None` takes everything that is left, `Some(n)` at most `n` entries.
    /// Once the listing is exhausted every call returns an empty vector.
    pub fn read_dir(&mut self, limit: Option<usize>) -> Vec<Metadata> {
        match limit {
            Some(n) => self.entries.by_ref().take(n).collect(),
            None => self.entries.by_ref().collect(),
        }
    }

    /// Number of entries not yet returned.
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl Iterator for DirHandle<'_> {
    type Item = Metadata;

    fn next(&mut self) -> Option<Metadata> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for DirHandle<'_> {}
