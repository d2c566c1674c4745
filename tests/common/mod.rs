//! Fixture helpers shared by the integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use tar::{Builder, EntryType, Header};

/// One archive entry as the test wants it on disk.
pub struct Fixture<'a> {
    pub name: &'a str,
    pub kind: EntryType,
    pub body: &'a [u8],
}

pub fn file<'a>(name: &'a str, body: &'a [u8]) -> Fixture<'a> {
    Fixture { name, kind: EntryType::Regular, body }
}

pub fn dir(name: &str) -> Fixture<'_> {
    Fixture { name, kind: EntryType::Directory, body: b"" }
}

pub fn symlink(name: &str) -> Fixture<'_> {
    Fixture { name, kind: EntryType::Symlink, body: b"" }
}

/// Builds a tar stream, writing each name verbatim into the header.
///
/// `tar::Builder::append_data` refuses absolute and `..` names, but real
/// archives contain them, so the name field is filled by hand.
pub fn tar_bytes(entries: &[Fixture<'_>]) -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());
    for entry in entries {
        let mut header = Header::new_gnu();
        header.as_old_mut().name[..entry.name.len()].copy_from_slice(entry.name.as_bytes());
        header.set_size(entry.body.len() as u64);
        header.set_mode(if entry.kind == EntryType::Directory { 0o755 } else { 0o644 });
        header.set_mtime(1_700_000_000);
        header.set_entry_type(entry.kind);
        if entry.kind == EntryType::Symlink {
            header.set_link_name("target").unwrap();
        }
        header.set_cksum();
        builder.append(&header, entry.body).unwrap();
    }
    builder.into_inner().unwrap()
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn bzip2(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write_archive(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
