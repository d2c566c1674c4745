//! # Archive Index
//!
//! Builds the immutable path → record map from a tar stream and answers the
//! lookups the filesystem needs: a single key, or every descendant of a
//! directory key.
//!
//! Only regular files and directories are kept. Symlinks, hard links, device
//! nodes and fifos are dropped, so a link in the archive is simply absent from
//! the filesystem.

use std::collections::BTreeMap;
use std::io::Read;
use std::ops::Bound;

use tar::{Archive, EntryType};
use tracing::{debug, trace, warn};

use crate::common::{FileRecord, Metadata};
use crate::error::{Result, TarFsError};
use crate::path::{self, ROOT};

/// Immutable mapping from normalized path to [`FileRecord`].
///
/// Keys are kept ordered so that a directory's descendants form one
/// contiguous range.
#[derive(Debug, Default)]
pub struct FileSystemIndex {
    records: BTreeMap<String, FileRecord>,
}

impl FileSystemIndex {
    /// Reads the whole tar stream and indexes every regular file and directory.
    ///
    /// The stream is consumed to its end. Any decode or read error aborts the
    /// build and nothing of the partial index survives.
    pub fn build<R: Read>(reader: R) -> Result<Self> {
        let mut archive = Archive::new(reader);
        let entries = archive.entries().map_err(archive_error)?;

        let mut records = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(archive_error)?;
            if let Some(record) = read_record(entry)? {
                let key = record.metadata().path.clone();
                if let Some(previous) = records.insert(key, record) {
                    let path = &previous.metadata().path;
                    if path.contains(char::REPLACEMENT_CHARACTER) {
                        warn!(%path, "non-UTF-8 entry names collide, keeping the later one");
                    } else {
                        debug!(%path, "duplicate archive entry, keeping the later one");
                    }
                }
            }
        }

        Ok(Self { records })
    }

    pub fn get(&self, key: &str) -> Option<&FileRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Metadata of every record below `dir`, at any depth, in path order.
    ///
    /// The scan starts at `dir + "/"`, so siblings sharing a name prefix
    /// (`/foobar` next to `/foo`) are never part of the result. An existing
    /// directory without children yields an empty vector.
    pub fn descendants(&self, dir: &str) -> Vec<Metadata> {
        if dir == ROOT {
            return self.records.values().map(|r| r.metadata().clone()).collect();
        }

        let start = format!("{dir}/");
        self.records
            .range::<str, _>((Bound::Included(start.as_str()), Bound::Unbounded))
            .take_while(|(key, _)| path::is_descendant(dir, key))
            .map(|(_, record)| record.metadata().clone())
            .collect()
    }
}

fn archive_error(source: std::io::Error) -> TarFsError {
    TarFsError::Archive { source }
}

/// Converts one tar entry into a record, or `None` when the entry is skipped.
///
/// Names that are not valid UTF-8 are decoded lossily, so two distinct raw
/// names can end up under the same key.
fn read_record<R: Read>(mut entry: tar::Entry<'_, R>) -> Result<Option<FileRecord>> {
    let raw_name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let key = path::join_root(&raw_name);
    if key == ROOT {
        trace!(name = %raw_name, "skipping root entry");
        return Ok(None);
    }

    let header = entry.header();
    let is_dir = match header.entry_type() {
        EntryType::Directory => true,
        // Pre-POSIX archives mark directories with a NUL type flag and a trailing slash.
        EntryType::Regular => header.as_old().linkflag[0] == 0 && raw_name.ends_with('/'),
        other => {
            trace!(name = %raw_name, kind = ?other, "skipping unsupported entry type");
            return Ok(None);
        }
    };
    let permissions = header.mode().map_err(archive_error)? & 0o7777;
    let modified_time = header.mtime().map_err(archive_error)?;

    if is_dir {
        let size = entry.size();
        debug!(path = %key, "indexed directory");
        let metadata = Metadata::new(key, size, permissions, modified_time, true);
        return Ok(Some(FileRecord::directory(metadata)));
    }

    // The header size is untrusted; let the buffer grow with what is actually read.
    let expected = entry.size();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).map_err(archive_error)?;
    if data.len() as u64 != expected {
        return Err(archive_error(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!(
                "entry '{raw_name}' is truncated: expected {expected} bytes, got {}",
                data.len()
            ),
        )));
    }
    debug!(path = %key, size = data.len(), "indexed file");
    let metadata = Metadata::new(key, data.len() as u64, permissions, modified_time, false);
    Ok(Some(FileRecord::file(metadata, data)))
}
