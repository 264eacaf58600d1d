//! File and stream I/O for the converter binary.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use ddl2dbml_common::{DdlError, DdlResult};

/// Reads a UTF-8 SQL file.
pub fn read_file(path: &Path) -> DdlResult<String> {
    fs::read_to_string(path)
        .map_err(|err| DdlError::IO(format!("reading {}: {err}", path.display())))
}

/// Reads all of stdin.
pub fn read_stdin() -> DdlResult<String> {
    let mut sql = String::new();
    std::io::stdin().read_to_string(&mut sql)?;
    Ok(sql)
}

/// Writes the output file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> DdlResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| DdlError::IO(format!("creating {}: {err}", parent.display())))?;
        }
    }
    fs::write(path, content)
        .map_err(|err| DdlError::IO(format!("writing {}: {err}", path.display())))
}

/// Writes to stdout.
pub fn write_stdout(content: &str) -> DdlResult<()> {
    std::io::stdout().write_all(content.as_bytes())?;
    Ok(())
}
