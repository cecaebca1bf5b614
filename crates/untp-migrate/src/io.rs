//! Whole-document I/O
//!
//! Output is serialised in full before anything touches the filesystem, then
//! written to a temporary file beside the destination and renamed over it.
//! A failure at any step leaves the destination as it was. A replaced file
//! keeps its permissions; a new one is created world-readable (`0644` on Unix).

use crate::error::MigrationError;
use serde::Serialize;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use untp_credential::ConfigDocument;

/// Read and parse a configuration document
///
/// # Errors
/// Unreadable file, invalid JSON, or a root that is not an object.
pub fn load_document(path: &Path) -> Result<ConfigDocument, MigrationError> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| MigrationError::Read {
        path: origin.clone(),
        source,
    })?;
    let value = serde_json::from_str(&text).map_err(|source| MigrationError::Parse {
        path: origin.clone(),
        source,
    })?;
    let document = ConfigDocument::from_value(value)?;
    tracing::debug!(path = %origin, apps = document.app_count(), "Loaded document");
    Ok(document)
}

/// Pretty JSON with 2-space indentation and no trailing newline
///
/// # Errors
/// Serialisation failure.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, MigrationError> {
    serde_json::to_string_pretty(value).map_err(MigrationError::Serialize)
}

/// Atomically write `value` as pretty JSON to `path`
///
/// # Errors
/// Serialisation failure or any filesystem error; `path` is then untouched.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), MigrationError> {
    let text = to_pretty_json(value)?;
    let origin = path.display().to_string();
    let write_fault = |source| MigrationError::Write {
        path: origin.clone(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_fault)?;
    if let Some(permissions) = output_permissions(path) {
        staged.as_file().set_permissions(permissions).map_err(write_fault)?;
    }
    staged.write_all(text.as_bytes()).map_err(write_fault)?;
    staged.as_file().sync_all().map_err(write_fault)?;
    staged
        .persist(path)
        .map_err(|err| write_fault(err.error))?;

    tracing::debug!(path = %origin, bytes = text.len(), "Wrote output");
    Ok(())
}

/// Permissions for the file landing at `path`
fn output_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Atomically write a migrated document
///
/// # Errors
/// As [`write_json_atomic`].
pub fn write_document(path: &Path, document: &ConfigDocument) -> Result<(), MigrationError> {
    write_json_atomic(path, document.as_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip_keeps_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"zeta": 1, "apps": [], "alpha": {"b": 2, "a": 1}}"#).unwrap();

        let document = load_document(&path).unwrap();
        let out = dir.path().join("out.json");
        write_document(&out, &document).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            "{\n  \"zeta\": 1,\n  \"apps\": [],\n  \"alpha\": {\n    \"b\": 2,\n    \"a\": 1\n  }\n}"
        );
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"apps\": [").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, MigrationError::Parse { .. }));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(load_document(&path).unwrap_err(), MigrationError::Document(_)));
    }

    #[test]
    fn missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MigrationError::Read { .. }));
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("out.json");
        let err = write_json_atomic(&out, &json!({"apps": []})).unwrap_err();
        assert!(matches!(err, MigrationError::Write { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn overwrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        std::fs::write(&out, "stale").unwrap();
        write_json_atomic(&out, &json!([1])).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "[\n  1\n]");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn output_permissions_match_plain_writes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("fresh.json");
        write_json_atomic(&fresh, &json!({})).unwrap();
        let mode = std::fs::metadata(&fresh).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);

        let existing = dir.path().join("existing.json");
        std::fs::write(&existing, "{}").unwrap();
        std::fs::set_permissions(&existing, Permissions::from_mode(0o640)).unwrap();
        write_json_atomic(&existing, &json!([])).unwrap();
        let mode = std::fs::metadata(&existing).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
