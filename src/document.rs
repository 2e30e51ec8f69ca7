use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A document held fully in memory as an ordered sequence of lines.
///
/// Lines keep their terminators so that rejoining them reproduces the
/// original bytes exactly. Owned exclusively by one pipeline run.
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;

        let lines = content.split_inclusive('\n').map(String::from).collect();
        Ok(Self { path, lines })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the document on disk with `lines`, preserving the previous
    /// content under a sibling backup name first. Returns the backup path.
    pub fn persist(&self, lines: &[String], backup_suffix: &str) -> Result<PathBuf> {
        let lease = WriteLease::acquire(&self.path, backup_suffix)?;
        let backup = lease.backup_path().to_path_buf();
        lease.commit(&lines.concat())?;
        Ok(backup)
    }
}

/// Scoped right to overwrite a document path.
///
/// Acquiring the lease moves the original aside as the backup, so the
/// backup is guaranteed to exist before any destructive write. If the
/// lease is dropped without committing, the original content still lives
/// at the backup path.
pub struct WriteLease {
    original: PathBuf,
    backup: PathBuf,
}

impl WriteLease {
    pub fn acquire(path: &Path, backup_suffix: &str) -> Result<Self> {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(backup_suffix);
        let backup = PathBuf::from(backup);

        fs::rename(path, &backup).with_context(|| {
            format!(
                "Failed to back up '{}' to '{}'",
                path.display(),
                backup.display()
            )
        })?;

        Ok(Self {
            original: path.to_path_buf(),
            backup,
        })
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    pub fn commit(self, content: &str) -> Result<()> {
        fs::write(&self.original, content)
            .with_context(|| format!("Failed to write '{}'", self.original.display()))
    }
}
