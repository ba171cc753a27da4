//! # repometer-content
//!
//! **Tier 2 (Utilities)**
//!
//! Plain-text analysis shared by every language: reading a file with the
//! size limit applied, counting lines, comments and blanks, and the keyword
//! pseudo-complexity estimate.
//!
//! ## What belongs here
//! * Byte reading with lossy UTF-8 decoding
//! * Line classification per comment syntax
//! * Keyword and comprehension counting
//!
//! ## What does NOT belong here
//! * Parsing (use repometer-python)
//! * Filesystem traversal (use repometer-walk)

pub mod lines;
pub mod pseudo;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use repometer_types::DegradeReason;
use tracing::debug;

pub use lines::line_stats;
pub use pseudo::pseudo_complexity;

/// Default upper bound on the size of an analyzed file (8 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 8 * 1024 * 1024;

/// Read up to `max_bytes + 1` bytes so an oversized file is detectable
/// without loading all of it.
pub fn read_capped(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut buf = Vec::new();
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(buf)
}

/// Read a source file as text, replacing invalid UTF-8.
///
/// Open or read failures map to [`DegradeReason::Unreadable`]; files over
/// `max_bytes` map to [`DegradeReason::TooLarge`].
pub fn read_source(path: &Path, max_bytes: u64) -> std::result::Result<String, DegradeReason> {
    let bytes = match read_capped(path, max_bytes) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %format!("{err:#}"), "unreadable file");
            return Err(DegradeReason::Unreadable);
        }
    };
    if bytes.len() as u64 > max_bytes {
        debug!(path = %path.display(), max_bytes, "file over size limit");
        return Err(DegradeReason::TooLarge);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_source_decodes_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.py");
        fs::write(&path, b"x = '\xe9'\n").unwrap();
        let text = read_source(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert!(text.starts_with("x = '"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&dir.path().join("gone.py"), DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert_eq!(err, DegradeReason::Unreadable);
    }

    #[test]
    fn size_limit_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "abcd").unwrap();
        assert_eq!(read_source(&path, 4).unwrap(), "abcd");
        assert_eq!(read_source(&path, 3).unwrap_err(), DegradeReason::TooLarge);
    }

    #[test]
    fn read_capped_stops_after_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, vec![b'a'; 100]).unwrap();
        assert_eq!(read_capped(&path, 10).unwrap().len(), 11);
    }
}
