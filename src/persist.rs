//! Disk I/O helpers: load from file and atomic write.
//!
//! The rename-over approach is close to atomic on most platforms. On NTFS
//! (Windows) it's reliable; on FAT32 or network shares there are no hard
//! guarantees.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::serializer::Serializer;
use std::path::Path;

/// Reads and decodes the file at `path`. Returns `None` if the file is missing
/// or empty; the caller decides how to initialize it.
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Option<Document>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serializer.deserialize(&bytes).map(Some)
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`, creating the
/// parent directory if needed. A crash mid-write leaves the old file intact.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| Error::Write(e.to_string()))?;
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Write(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        Error::Write(e.to_string())
    })?;
    Ok(())
}
