//! # Decompression Front-End
//!
//! Picks the decoder for an archive file on disk and hands the indexer a plain
//! tar byte stream. The codecs themselves come from `flate2` and `bzip2`.
//!
//! Detection prefers the file name suffix (no I/O) and falls back to sniffing
//! the first bytes of the file. Anything unrecognised is read as a plain tar.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use clap::ValueEnum;
use flate2::bufread::MultiGzDecoder;

use crate::error::{Result, TarFsError};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Compression wrapped around the tar stream.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Decide from the file name, then from the magic bytes.
    #[default]
    Auto,
    /// A plain, uncompressed tar.
    None,
    /// gzip, including multi-member streams.
    Gzip,
    /// bzip2, including concatenated streams.
    Bzip2,
}

impl Compression {
    /// Detect by file name suffix, case-insensitively.
    ///
    /// Returns `None` if no recognised suffix matches.
    pub fn from_path(path: &Path) -> Option<Compression> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Compression::Gzip)
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") || name.ends_with(".tbz") {
            Some(Compression::Bzip2)
        } else if name.ends_with(".tar") {
            Some(Compression::None)
        } else {
            None
        }
    }

    /// Detect by the leading bytes of a stream.
    pub fn from_magic(head: &[u8]) -> Compression {
        if head.starts_with(GZIP_MAGIC) {
            Compression::Gzip
        } else if head.starts_with(BZIP2_MAGIC) {
            Compression::Bzip2
        } else {
            Compression::None
        }
    }
}

/// Opens `path` and returns a reader yielding the decompressed tar stream.
pub fn open_decoded(path: &Path, compression: Compression) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(TarFsError::io(path))?;
    let mut reader = BufReader::new(file);

    let compression = match compression {
        Compression::Auto => match Compression::from_path(path) {
            Some(detected) => detected,
            None => Compression::from_magic(reader.fill_buf().map_err(TarFsError::io(path))?),
        },
        explicit => explicit,
    };
    tracing::debug!(path = %path.display(), ?compression, "opening archive");

    Ok(decoder(reader, compression))
}

/// Wraps an already-open buffered stream in the decoder for `compression`.
///
/// `Auto` sniffs the buffered head of the stream.
pub fn decoder<R: BufRead + 'static>(mut reader: R, compression: Compression) -> Box<dyn Read> {
    let compression = match compression {
        Compression::Auto => match reader.fill_buf() {
            Ok(head) => Compression::from_magic(head),
            // Let the tar reader surface the error.
            Err(_) => Compression::None,
        },
        explicit => explicit,
    };
    match compression {
        Compression::Gzip => Box::new(MultiGzDecoder::new(reader)),
        Compression::Bzip2 => Box::new(MultiBzDecoder::new(reader)),
        Compression::None | Compression::Auto => Box::new(reader),
    }
}
