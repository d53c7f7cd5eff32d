//! Filesystem operations behind the HTTP routes.
//!
//! Blocking work runs on the blocking thread pool; every mutating operation
//! creates the destination's parent directory first.

use crate::error::fs_ops::FsOpError;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::task::spawn_blocking;

/// Whether `path` exists and is a regular file (symlinks are followed).
pub async fn is_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.is_file(),
        Err(_) => false,
    }
}

/// Create the parent directory of `path` (recursively) if it is missing.
pub async fn ensure_parent_dir(path: &Path) -> Result<(), FsOpError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| FsOpError::io("create directory", parent, e))
}

/// Write `contents` to `path`, replacing an existing file.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<(), FsOpError> {
    if path.as_os_str().is_empty() {
        return Err(FsOpError::invalid(path, "no destination file name given"));
    }

    ensure_parent_dir(path).await?;
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| FsOpError::io("write", path, e))
}

/// Recursively remove `path` if it is a directory.
///
/// # Returns
///
/// `true` if a directory was removed, `false` if `path` is missing or not a
/// directory.
pub async fn remove_dir(path: &Path) -> Result<bool, FsOpError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => {
            tokio::fs::remove_dir_all(path)
                .await
                .map_err(|e| FsOpError::io("remove directory", path, e))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Remove a file, or a directory with everything under it.
pub async fn remove_node(path: &Path) -> Result<(), FsOpError> {
    let path = path.to_path_buf();
    spawn_blocking(move || remove_node_blocking(&path)).await?
}

/// Copy a file or directory tree from `src` to `dest` with replace semantics.
///
/// `src` is checked before anything is touched, so a missing source leaves
/// `dest` as it was. An existing `dest` is removed first; no content from it
/// survives the copy. Links inside a copied directory are copied as links.
///
/// # Errors
///
/// - [`FsOpError::NotFound`] if `src` does not exist
/// - [`FsOpError::InvalidPath`] if `dest` is `src` or lies inside it
/// - [`FsOpError::Io`] for any failure while copying an entry
pub async fn copy_node(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let (src, dest) = (src.to_path_buf(), dest.to_path_buf());
    spawn_blocking(move || copy_node_blocking(&src, &dest)).await?
}

/// Copy `src` to `dest`, then remove `src`.
///
/// If removing `src` fails, the error is returned and the copy at `dest` is
/// kept.
pub async fn move_node(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let (src, dest) = (src.to_path_buf(), dest.to_path_buf());
    spawn_blocking(move || {
        copy_node_blocking(&src, &dest)?;
        remove_node_blocking(&src)
    })
    .await?
}

fn remove_node_blocking(path: &Path) -> Result<(), FsOpError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FsOpError::io("inspect", path, e))?;

    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| FsOpError::io("remove directory", path, e))
    } else {
        fs::remove_file(path).map_err(|e| FsOpError::io("remove file", path, e))
    }
}

fn copy_node_blocking(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let metadata = fs::metadata(src).map_err(|e| FsOpError::io("inspect", src, e))?;

    if dest.as_os_str().is_empty() {
        return Err(FsOpError::invalid(dest, "no destination given"));
    }

    let (src_resolved, dest_resolved) = (comparable(src), comparable(dest));
    if src_resolved == dest_resolved {
        return Err(FsOpError::invalid(dest, "source and destination are the same"));
    }
    if metadata.is_dir() && dest_resolved.starts_with(&src_resolved) {
        return Err(FsOpError::invalid(dest, "destination lies inside the source directory"));
    }

    if fs::symlink_metadata(dest).is_ok() {
        debug!("Replacing existing {}", dest.display());
        remove_node_blocking(dest)?;
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FsOpError::io("create directory", parent, e))?;
    }

    if metadata.is_dir() {
        copy_dir_blocking(src, dest)
    } else {
        copy_file_blocking(src, dest)
    }
}

fn copy_dir_blocking(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let metadata = fs::metadata(src).map_err(|e| FsOpError::io("inspect", src, e))?;
    fs::create_dir_all(dest).map_err(|e| FsOpError::io("create directory", dest, e))?;
    fs::set_permissions(dest, metadata.permissions())
        .map_err(|e| FsOpError::io("set permissions", dest, e))?;

    let entries = fs::read_dir(src).map_err(|e| FsOpError::io("read directory", src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsOpError::io("read directory", src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        // The entry's own type: links are never followed into directories.
        let file_type = entry
            .file_type()
            .map_err(|e| FsOpError::io("inspect", &from, e))?;

        if file_type.is_symlink() {
            copy_link_blocking(&from, &to)?;
        } else if file_type.is_dir() {
            copy_dir_blocking(&from, &to)?;
        } else {
            copy_file_blocking(&from, &to)?;
        }
    }

    Ok(())
}

/// Recreate the link at `dest`, pointing at the same target.
#[cfg(unix)]
fn copy_link_blocking(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let target = fs::read_link(src).map_err(|e| FsOpError::io("read link", src, e))?;
    std::os::unix::fs::symlink(&target, dest).map_err(|e| FsOpError::io("create link", dest, e))
}

/// Links need extra privileges here: a link to a file is copied as that
/// file, a link to a directory is skipped.
#[cfg(not(unix))]
fn copy_link_blocking(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    match fs::metadata(src) {
        Ok(metadata) if metadata.is_file() => copy_file_blocking(src, dest),
        _ => {
            log::warn!("Skipping link {} during copy", src.display());
            Ok(())
        }
    }
}

fn copy_file_blocking(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    // fs::copy carries the permission bits over.
    fs::copy(src, dest).map_err(|e| FsOpError::io("copy", src, e))?;
    Ok(())
}

/// Best-effort absolute form of `path` for overlap checks, also for paths
/// that do not exist yet.
fn comparable(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            comparable(parent).join(name)
        }
        _ => std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}
