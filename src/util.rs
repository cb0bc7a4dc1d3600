use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Generate a fresh record ID.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Calendar-date key used by the pillar completion map.
///
/// Example: 2024-01-23T18:04:00Z → "2024-01-23"
pub fn date_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Write a file atomically: temp file in the same directory, then rename.
///
/// The profile blob is rewritten on every mutation, so a crash mid-write must
/// never leave a half-serialized blob behind.
pub fn atomic_write_str(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_key_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 23, 18, 4, 0).unwrap();
        assert_eq!(date_key(ts), "2024-01-23");
    }

    #[test]
    fn test_date_key_zero_pads() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(date_key(ts), "2024-03-05");
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.json");
        atomic_write_str(&path, "first").unwrap();
        atomic_write_str(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }
}
