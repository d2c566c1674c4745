//! # tarfs
//!
//! Turns a tar archive (plain, gzip or bzip2) into a read-only filesystem held
//! entirely in memory, so its contents can be served without touching disk at
//! request time.
//!
//! ## Key Modules
//!
//! - [`index`]: Reads the archive once and builds the immutable path index.
//! - [`path`]: Validates and normalizes caller paths.
//! - [`handle`]: File and directory handles returned by `open`.
//! - [`filesystem`]: The [`TarFs`] facade and the [`FileSystem`] trait.
//! - [`compress`]: Chooses the decoder for an archive on disk.
//!
//! ## Examples
//!
//! ```no_run
//! use std::io::Read;
//! use tarfs::TarFs;
//!
//! let fs = TarFs::from_bzip2_file("web.tbz2")?;
//! let mut page = String::new();
//! fs.open("/index.html")?.read_to_string(&mut page)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod cli_runner;
pub mod common;
pub mod compress;
pub mod error;
pub mod filesystem;
pub mod handle;
pub mod index;
pub mod path;

pub use common::Metadata;
pub use compress::Compression;
pub use error::{Result, TarFsError};
pub use filesystem::{FileSystem, TarFs};
pub use handle::{DirHandle, FileHandle, FsHandle, Handle};
