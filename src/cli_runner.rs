//! CLI runner shared by the `tarfs` binary.
//!
//! Loads the archive named on the command line into a [`TarFs`] and answers
//! one `list`, `cat` or `stat` request from it.

use std::error::Error;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

use crate::cli::{self, Commands};
use crate::common::Metadata;
use crate::filesystem::TarFs;

/// Environment variable holding the log filter, e.g. `TARFS_LOG=debug`.
pub const LOG_ENV: &str = "TARFS_LOG";

/// Public entry for running the CLI.
pub fn run_cli_app() -> Result<(), Box<dyn Error>> {
    let args = cli::run()?;
    init_logging();

    let fs = TarFs::open_archive(args.command.archive(), args.compression)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Commands::List { dir, limit, json, .. } => {
            let entries = fs.open(dir)?.read_dir(*limit)?;
            if *json {
                serde_json::to_writer_pretty(&mut out, &entries)?;
                writeln!(out)?;
            } else {
                for entry in &entries {
                    writeln!(out, "{}", format_line(entry))?;
                }
            }
        }
        Commands::Cat { path, .. } => {
            let mut handle = fs.open(path)?;
            io::copy(&mut handle, &mut out)?;
        }
        Commands::Stat { path, json, .. } => {
            let meta = fs.stat(path)?;
            if *json {
                serde_json::to_writer_pretty(&mut out, meta)?;
                writeln!(out)?;
            } else {
                writeln!(out, "path: {}", meta.path())?;
                writeln!(out, "type: {}", if meta.is_dir() { "directory" } else { "file" })?;
                writeln!(out, "size: {}", meta.size())?;
                writeln!(out, "mode: {} ({:04o})", mode_string(meta), meta.mode())?;
                writeln!(out, "modified: {}", format_time(meta.modified_time))?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

// --- formatting helpers ------------------------------------------------------

fn format_line(meta: &Metadata) -> String {
    format!(
        "{} {:>10} {} {}",
        mode_string(meta),
        meta.size(),
        format_time(meta.modified_time),
        meta.path()
    )
}

/// `ls -l` style permission string, e.g. `drwxr-xr-x`.
fn mode_string(meta: &Metadata) -> String {
    let mut s = String::with_capacity(10);
    s.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (meta.mode() >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

fn format_time(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
