//! Crash-safe file replacement.
//!
//! Bytes go to a temp file in the destination directory, which is then renamed
//! over the target. Where rename-over-existing fails (Windows), the old file is
//! moved aside to `<name>.bak` first and restored if the second rename fails.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Restore `<path>.bak` left behind by a write interrupted between its two renames.
///
/// Does nothing when `path` exists or there is no backup.
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if path.exists() || !backup.exists() {
        return;
    }
    match fs::rename(&backup, path) {
        Ok(()) => tracing::warn!(
            path = %path.display(),
            "Recovered .bak file from interrupted atomic write"
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            "Failed to recover .bak file: {e}"
        ),
    }
}

/// Replace `path` with `bytes`, readable and writable by the owner only on Unix.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    restrict_to_owner(tmp.path())?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    let Err(err) = tmp.persist(path) else {
        return Ok(());
    };
    if !path.exists() {
        return Err(err.error);
    }

    let backup = path.with_extension("bak");
    let _ = fs::remove_file(&backup);
    fs::rename(path, &backup)?;
    if let Err(retry) = err.file.persist(path) {
        let _ = fs::rename(&backup, path);
        return Err(retry.error);
    }
    if let Err(e) = fs::remove_file(&backup) {
        tracing::warn!(
            path = %backup.display(),
            "Failed to remove .bak after atomic write: {e}"
        );
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}
