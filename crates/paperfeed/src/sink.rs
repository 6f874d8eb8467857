//! Persisting the envelope as JSON.
//!
//! The envelope is serialized completely before the filesystem is touched, then
//! written to a temporary file next to the destination and renamed over it. A
//! failed write therefore leaves the previous output, or no output, in place.

use std::{fs::Permissions, io::Write};

use tempfile::NamedTempFile;

use super::*;

/// Writes `envelope` to `path` as pretty-printed JSON, replacing any existing file.
///
/// Missing parent directories are created first.
///
/// # Errors
///
/// Returns [`FeedError::WriteFailed`] if a directory or the file cannot be
/// written, and [`FeedError::Serialization`] if encoding fails.
pub fn write_envelope(envelope: &ResultEnvelope, path: &Path) -> Result<(), FeedError> {
  let json = serde_json::to_string_pretty(envelope)?;

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  trace!("Creating parent directories: {}", dir.display());
  std::fs::create_dir_all(dir)?;

  let permissions = output_permissions(path)?;

  let mut file = NamedTempFile::new_in(dir)?;
  file.write_all(json.as_bytes())?;
  file.flush()?;
  if let Some(permissions) = permissions {
    file.as_file().set_permissions(permissions)?;
  }
  file.persist(path).map_err(|e| e.error)?;

  debug!("Wrote {} bytes to {}", json.len(), path.display());
  Ok(())
}

/// Permissions the written file should end up with.
///
/// An existing output keeps its mode. A new one is readable by everyone, as a
/// plain file write would leave it; temporary files start owner-only.
fn output_permissions(path: &Path) -> Result<Option<Permissions>, FeedError> {
  match std::fs::metadata(path) {
    Ok(metadata) => Ok(Some(metadata.permissions())),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default_permissions()),
    Err(e) => Err(e.into()),
  }
}

/// Mode of a newly created output file.
#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
  use std::os::unix::fs::PermissionsExt;
  Some(Permissions::from_mode(0o644))
}

/// Newly created output files keep the platform default.
#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> { None }

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_creates_missing_directories() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("assets").join("nested").join("arxiv.json");

    let envelope = ResultEnvelope::new("q", vec![Paper::default()]);
    write_envelope(&envelope, &path)?;

    let written: ResultEnvelope = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written, envelope);
    Ok(())
  }

  #[test]
  fn test_overwrites_previous_output() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("arxiv.json");
    std::fs::write(&path, "previous run with much longer content than the next one")?;

    write_envelope(&ResultEnvelope::new("q", Vec::new()), &path)?;

    let written: ResultEnvelope = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written.count, 0);
    assert!(written.papers.is_empty());
    // Only the destination remains, no temporary files.
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
  }

  #[test]
  fn test_pretty_printed() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("arxiv.json");
    write_envelope(&ResultEnvelope::new("q", Vec::new()), &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("{\n  \"generated_at_utc\": "));
    Ok(())
  }

  #[cfg(unix)]
  #[test]
  fn test_file_mode_is_kept_or_world_readable() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let mode = |path: &Path| -> anyhow::Result<u32> {
      Ok(std::fs::metadata(path)?.permissions().mode() & 0o777)
    };

    let fresh = dir.path().join("fresh.json");
    write_envelope(&ResultEnvelope::new("q", Vec::new()), &fresh)?;
    assert_eq!(mode(&fresh)?, 0o644);

    let existing = dir.path().join("existing.json");
    std::fs::write(&existing, "{}")?;
    std::fs::set_permissions(&existing, Permissions::from_mode(0o640))?;
    write_envelope(&ResultEnvelope::new("q", Vec::new()), &existing)?;
    assert_eq!(mode(&existing)?, 0o640);
    Ok(())
  }

  #[test]
  fn test_unwritable_destination() -> anyhow::Result<()> {
    let dir = tempdir()?;
    // A regular file where a directory is needed.
    let blocker = dir.path().join("assets");
    std::fs::write(&blocker, "")?;

    let result = write_envelope(&ResultEnvelope::new("q", Vec::new()), &blocker.join("arxiv.json"));
    assert!(matches!(result, Err(FeedError::WriteFailed(_))));
    Ok(())
  }
}
