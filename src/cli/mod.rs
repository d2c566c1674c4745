use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::compress::Compression;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Compression of the archive. `auto` looks at the file name, then at the magic bytes.
    #[arg(short, long, value_enum, default_value_t = Compression::Auto, global = true)]
    pub compression: Compression,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List everything below a directory of the archive.
    #[command(alias = "ls")]
    List {
        /// The archive file to load.
        #[arg(required = true)]
        archive: PathBuf,

        /// Directory inside the archive. Defaults to the whole archive.
        #[arg(default_value = "/")]
        dir: String,

        /// Print at most this many entries.
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the contents of a file inside the archive to stdout.
    Cat {
        /// The archive file to load.
        #[arg(required = true)]
        archive: PathBuf,

        /// Path of the file inside the archive.
        #[arg(required = true)]
        path: String,
    },

    /// Show the metadata of a file or directory inside the archive.
    Stat {
        /// The archive file to load.
        #[arg(required = true)]
        archive: PathBuf,

        /// Path inside the archive.
        #[arg(required = true)]
        path: String,

        /// Print the metadata as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn archive(&self) -> &PathBuf {
        match self {
            Commands::List { archive, .. }
            | Commands::Cat { archive, .. }
            | Commands::Stat { archive, .. } => archive,
        }
    }
}

/// Parses command-line arguments using `clap`.
pub fn run() -> Result<Args, Box<dyn std::error::Error>> {
    Ok(Args::parse())
}
