//! On-disk image storage with compensating actions.
//!
//! Handlers never write image files directly. They go through
//! [`ImageStore`], which hands back a guard for every mutation:
//!
//! - [`ImageStore::put`] returns a [`PendingImage`]. Call
//!   [`PendingImage::keep`] once the row referencing the file has committed,
//!   or [`PendingImage::discard`] if it did not.
//! - [`ImageStore::replace`] moves the current file aside to a backup and
//!   writes the new one, returning an [`ImageReplacement`]. Call
//!   [`ImageReplacement::commit`] after the row update succeeds (drops the
//!   backup) or [`ImageReplacement::rollback`] if it failed (restores it).
//!
//! A guard dropped without being settled undoes its own change
//! synchronously, so an early `?` return in a handler cannot leave an
//! orphaned file behind.

use std::io;
use std::path::{Path, PathBuf};

use crate::images::{backup_filename, ImageKind};

/// Root of the image directory tree, one subdirectory per [`ImageKind`].
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `filename` for the given kind.
    ///
    /// Only bare filenames are accepted. Anything containing a path
    /// separator or `..` is rejected with `InvalidInput`.
    pub fn path_for(&self, kind: ImageKind, filename: &str) -> io::Result<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid image filename '{filename}'"),
            ));
        }
        Ok(self.root.join(kind.dir_name()).join(filename))
    }

    /// Create the root and every kind subdirectory if missing.
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        for kind in ImageKind::ALL {
            tokio::fs::create_dir_all(self.root.join(kind.dir_name())).await?;
        }
        Ok(())
    }

    /// Write a brand new image file.
    ///
    /// On a failed write the partial file is removed before the error is
    /// returned.
    pub async fn put(&self, kind: ImageKind, filename: &str, bytes: &[u8]) -> io::Result<PendingImage> {
        let path = self.path_for(kind, filename)?;
        write_or_clean(&path, bytes).await?;
        Ok(PendingImage {
            path,
            filename: filename.to_string(),
            settled: false,
        })
    }

    /// Swap the image of an existing row.
    ///
    /// `old` is the row's current image link, if any. An old file that is
    /// already missing on disk is treated as "no backup needed".
    pub async fn replace(
        &self,
        kind: ImageKind,
        old: Option<&str>,
        new_filename: &str,
        bytes: &[u8],
    ) -> io::Result<ImageReplacement> {
        let new_path = self.path_for(kind, new_filename)?;

        let backup = match old {
            Some(old_name) => {
                let original = self.path_for(kind, old_name)?;
                let backup_path = self.path_for(kind, &backup_filename(old_name))?;
                match tokio::fs::rename(&original, &backup_path).await {
                    Ok(()) => Some(Backup {
                        original,
                        backup: backup_path,
                    }),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                    Err(e) => return Err(e),
                }
            }
            None => None,
        };

        if let Err(e) = write_or_clean(&new_path, bytes).await {
            if let Some(b) = &backup {
                if let Err(restore) = tokio::fs::rename(&b.backup, &b.original).await {
                    log_failed_restore(b, &restore);
                }
            }
            return Err(e);
        }

        Ok(ImageReplacement {
            new_path,
            filename: new_filename.to_string(),
            backup,
            settled: false,
        })
    }

    /// Delete an image file. A file that is already gone counts as success.
    pub async fn remove(&self, kind: ImageKind, filename: &str) -> io::Result<()> {
        let path = self.path_for(kind, filename)?;
        remove_if_exists(&path).await
    }
}

/// A freshly written file not yet referenced by a committed row.
#[derive(Debug)]
#[must_use = "call keep() or discard() once the owning row has settled"]
pub struct PendingImage {
    path: PathBuf,
    filename: String,
    settled: bool,
}

impl PendingImage {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The owning row committed; the file stays.
    pub fn keep(mut self) -> String {
        self.settled = true;
        std::mem::take(&mut self.filename)
    }

    /// The owning row was rolled back; delete the file.
    pub async fn discard(mut self) -> io::Result<()> {
        self.settled = true;
        remove_if_exists(&self.path).await
    }
}

impl Drop for PendingImage {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Err(e) = remove_file_sync(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove unreferenced image");
        }
    }
}

#[derive(Debug)]
struct Backup {
    original: PathBuf,
    backup: PathBuf,
}

/// A new file written in place of an old one, with the old one parked
/// under its backup name until the row update settles.
#[derive(Debug)]
#[must_use = "call commit() or rollback() once the row update has settled"]
pub struct ImageReplacement {
    new_path: PathBuf,
    filename: String,
    backup: Option<Backup>,
    settled: bool,
}

impl ImageReplacement {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether an old file was moved aside.
    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }

    /// The row now points at the new file; drop the backup.
    pub async fn commit(mut self) -> io::Result<()> {
        self.settled = true;
        match self.backup.take() {
            Some(b) => remove_if_exists(&b.backup).await,
            None => Ok(()),
        }
    }

    /// The row update failed; delete the new file and put the old one back.
    pub async fn rollback(mut self) -> io::Result<()> {
        self.settled = true;
        remove_if_exists(&self.new_path).await?;
        if let Some(b) = self.backup.take() {
            tokio::fs::rename(&b.backup, &b.original).await?;
        }
        Ok(())
    }
}

impl Drop for ImageReplacement {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Err(e) = remove_file_sync(&self.new_path) {
            tracing::warn!(path = %self.new_path.display(), error = %e, "Failed to remove replacement image");
        }
        if let Some(b) = self.backup.take() {
            if let Err(e) = std::fs::rename(&b.backup, &b.original) {
                log_failed_restore(&b, &e);
            }
        }
    }
}

fn log_failed_restore(backup: &Backup, error: &io::Error) {
    tracing::error!(
        backup = %backup.backup.display(),
        original = %backup.original.display(),
        error = %error,
        "Failed to restore image backup"
    );
}

fn remove_file_sync(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

async fn write_or_clean(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        if let Err(cleanup) = remove_if_exists(path).await {
            tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial image");
        }
        return Err(e);
    }
    Ok(())
}

async fn remove_if_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
