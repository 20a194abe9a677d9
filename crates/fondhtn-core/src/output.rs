//! Domain JSON files
//!
//! Output files are created, never replaced: an existing path is reported
//! as [`Error::DuplicateOutput`].

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::Path;

use tracing::info;

use crate::domain::Domain;
use crate::error::{Error, Result};

/// Serialize a domain into any writer
pub fn to_writer<W: Write>(writer: W, domain: &Domain, pretty: bool) -> Result<()> {
    let mut writer = writer;
    if pretty {
        serde_json::to_writer_pretty(&mut writer, domain)?;
    } else {
        serde_json::to_writer(&mut writer, domain)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a domain to a new file
pub fn write_domain(path: &Path, domain: &Domain, pretty: bool) -> Result<()> {
    // No file is created unless serialization succeeds
    let mut buffer = Vec::new();
    to_writer(&mut buffer, domain, pretty)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::DuplicateOutput(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

    file.write_all(&buffer)?;
    info!(path = %path.display(), "Wrote domain");
    Ok(())
}

/// Read a domain previously written with [`write_domain`]
pub fn read_domain(path: &Path) -> Result<Domain> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
