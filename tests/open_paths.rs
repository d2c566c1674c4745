//! Opening files through every spelling of their path.

mod common;

use std::io::{Read, Seek, SeekFrom, Write};

use rand::{thread_rng, RngCore};
use tarfs::{TarFs, TarFsError};
use tempfile::NamedTempFile;

use common::{dir, file, tar_bytes};

const README: &str = "This archive contains some text files.";
const GOPHER: &str = "Gopher names:\nGeorge\nGeoffrey\nGonzo";
const TODO: &str = "Get animal handling licence.";

fn text_archive() -> Vec<u8> {
    tar_bytes(&[
        file("readme.txt", README.as_bytes()),
        file("/gopher.txt", GOPHER.as_bytes()),
        file("./todo.txt", TODO.as_bytes()),
    ])
}

#[test]
fn test_open_text_files_from_tar_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut archive = NamedTempFile::new()?;
    archive.write_all(&text_archive())?;
    archive.flush()?;

    let fs = TarFs::from_file(archive.path())?;

    for (name, body) in [("readme.txt", README), ("gopher.txt", GOPHER), ("todo.txt", TODO)] {
        let variants = [
            name.to_string(),
            format!("/{name}"),
            format!("./{name}"),
            format!("././{name}"),
            format!("../{name}"),
        ];
        for path in &variants {
            let mut handle = fs.open(path)?;
            let mut content = String::new();
            handle.read_to_string(&mut content)?;
            assert_eq!(content, body, "content of {path:?}");
            assert_eq!(handle.stat().size(), body.len() as u64, "size of {path:?}");
        }
    }

    assert_eq!(fs.open("readme.txt")?.stat().size(), 39);
    Ok(())
}

#[test]
fn test_bytes_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = thread_rng();
    let mut payload = vec![0u8; 64 * 1024 + 17];
    rng.fill_bytes(&mut payload);

    let fs = TarFs::from_reader(tar_bytes(&[file("blob.bin", &payload)]).as_slice())?;
    let mut handle = fs.open("/blob.bin")?;
    let mut read_back = Vec::new();
    handle.read_to_end(&mut read_back)?;

    assert_eq!(read_back, payload);
    assert_eq!(handle.stat().size(), payload.len() as u64);
    Ok(())
}

#[test]
fn test_random_access_reads() -> Result<(), Box<dyn std::error::Error>> {
    let fs = TarFs::from_reader(text_archive().as_slice())?;
    let mut handle = fs.open("gopher.txt")?;

    handle.seek(SeekFrom::Start(14))?;
    let mut name = [0u8; 6];
    handle.read_exact(&mut name)?;
    assert_eq!(&name, b"George");

    handle.seek(SeekFrom::End(-5))?;
    let mut last = String::new();
    handle.read_to_string(&mut last)?;
    assert_eq!(last, "Gonzo");

    // Reading past the end is not an error, just nothing.
    let mut buf = [0u8; 8];
    assert_eq!(handle.read(&mut buf)?, 0);
    Ok(())
}

#[test]
fn test_handles_on_same_file_are_independent() -> Result<(), Box<dyn std::error::Error>> {
    let fs = TarFs::from_reader(text_archive().as_slice())?;
    let mut first = fs.open("todo.txt")?;
    let mut second = fs.open("/todo.txt")?;

    let mut buf = [0u8; 4];
    first.read_exact(&mut buf)?;
    assert_eq!(&buf, b"Get ");

    let mut whole = String::new();
    second.read_to_string(&mut whole)?;
    assert_eq!(whole, TODO);

    let mut rest = String::new();
    first.read_to_string(&mut rest)?;
    assert_eq!(rest, "animal handling licence.");
    Ok(())
}

#[test]
fn test_invalid_paths_are_not_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let fs = TarFs::from_reader(text_archive().as_slice())?;

    assert!(matches!(fs.open("readme.txt\0"), Err(TarFsError::InvalidPath)));
    assert!(matches!(fs.open("\0missing"), Err(TarFsError::InvalidPath)));
    #[cfg(windows)]
    assert!(matches!(fs.open("docs\\readme.txt"), Err(TarFsError::InvalidPath)));

    assert!(!fs.exists("readme.txt\0"));
    assert!(fs.exists("../../readme.txt"));
    Ok(())
}

#[test]
fn test_missing_paths_are_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let fs = TarFs::from_reader(tar_bytes(&[dir("docs/"), file("docs/a.txt", b"a")]).as_slice())?;

    assert!(matches!(fs.open("docs/b.txt"), Err(TarFsError::NotFound)));
    assert!(matches!(fs.open("a.txt"), Err(TarFsError::NotFound)));
    // The root itself is never stored.
    assert!(matches!(fs.open("/"), Err(TarFsError::NotFound)));
    assert!(!fs.exists("docs/b.txt"));

    let err = std::io::Error::from(fs.open("nope").unwrap_err());
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    Ok(())
}
