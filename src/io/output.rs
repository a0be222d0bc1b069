use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// `-` stands for stdout.
pub fn is_stdout(path: &Path) -> bool {
    path == Path::new("-")
}

/// Write-then-rename wrapper: the target only appears once `finalize` succeeds.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

/// Fail if `target` exists and `force` is off. Touches nothing on disk.
pub fn check_overwrite(target: &Path, force: bool) -> Result<()> {
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    Ok(())
}

/// Open a temporary file next to `target`, creating its directory.
/// Refuses to clobber an existing file unless `force`.
pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    check_overwrite(target, force)?;

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("[io::output] Failed to create directory {}", parent.display()))?;

    let tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("[io::output] Failed to create temp file in {}", parent.display()))?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

impl PendingWrite {
    /// Sync and move the temp file onto the target path.
    pub fn finalize(mut self) -> Result<()> {
        self.tmp.flush()
            .with_context(|| format!("[io::output] Failed to flush {}", self.target.display()))?;
        self.tmp.as_file().sync_all().ok(); // best-effort fsync

        let target = self.target;
        self.tmp.persist(&target)
            .with_context(|| format!("[io::output] Failed to rename into {}", target.display()))?;

        if let Some(dir) = target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}
