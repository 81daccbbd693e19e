//! Output path collision policy
//!
//! An existing target is never overwritten silently and never an error by
//! itself: the build writes to a timestamp-suffixed sibling instead.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::debug;

use crate::error::{BuildError, BuildResult};

/// Resolve the path a build should actually write to.
///
/// Returns `path` unchanged when nothing exists there; otherwise returns
/// the same name with `_YYYYMMDDHHMMSS` inserted before the extension.
pub fn unique_path(path: &Path) -> BuildResult<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| BuildError::PathFormat(path.to_path_buf()))?;
    let timestamp = Local::now().format("%Y%m%d%H%M%S");

    let file_name = match path.extension().and_then(OsStr::to_str) {
        Some(ext) => format!("{stem}_{timestamp}.{ext}"),
        None => format!("{stem}_{timestamp}"),
    };

    let substitute = path.with_file_name(file_name);
    debug!(
        "'{}' exists; writing to '{}' instead",
        path.display(),
        substitute.display()
    );
    Ok(substitute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        assert_eq!(unique_path(&path).unwrap(), path);
    }

    #[test]
    fn existing_target_gets_timestamp_before_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        std::fs::write(&path, b"x").unwrap();

        let substitute = unique_path(&path).unwrap();
        assert_ne!(substitute, path);

        let name = substitute.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".xlsx"));
        // report_ + 14 timestamp digits + .xlsx
        assert_eq!(name.len(), "report_".len() + 14 + ".xlsx".len());
    }

    #[test]
    fn extensionless_target_is_suffixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report");
        std::fs::write(&path, b"x").unwrap();

        let substitute = unique_path(&path).unwrap();
        let name = substitute.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_"));
        assert!(!name.contains('.'));
    }
}
