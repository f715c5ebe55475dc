use crate::models::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;
use walkdir::WalkDir;

/// Recursively copies a directory tree from `src` to `dst`.
/// Creates all necessary directories and overwrites existing files.
pub fn copy_recursive(src: &Utf8Path, dst: &Utf8Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io_from_walkdir)?;
        let src_path = Utf8Path::from_path(entry.path())
            .ok_or_else(|| Error::NonUtf8Path(entry.path().display().to_string()))?;

        let rel_path = src_path
            .strip_prefix(src)
            .map_err(|_| Error::Io(std::io::Error::other(format!("'{src_path}' escaped walk root"))))?;
        let dst_path = dst.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else {
            if let Some(parent) = dst_path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::copy(src_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Replaces the directory at `dst` with a copy of `src`.
///
/// The previous `dst` tree is moved aside first and put back if the copy
/// fails partway, so a failed replacement never costs the caller the
/// copy they already had.
pub fn replace_dir(src: &Utf8Path, dst: &Utf8Path) -> Result<()> {
    let name = dst
        .file_name()
        .ok_or_else(|| Error::Io(std::io::Error::other(format!("'{dst}' has no name"))))?;
    let parked = dst.with_file_name(format!(".{name}.replacing"));
    if parked.exists() {
        fs::remove_dir_all(&parked)?;
    }

    fs::rename(dst, &parked)?;
    match copy_recursive(src, dst) {
        Ok(()) => {
            fs::remove_dir_all(&parked)?;
            Ok(())
        }
        Err(e) => {
            if dst.exists() {
                fs::remove_dir_all(dst).map_err(|_| Error::PartialWriteCleanup(dst.to_owned()))?;
            }
            fs::rename(&parked, dst)?;
            Err(e)
        }
    }
}

/// Deletes a directory tree, keeping going past paths that refuse to go
/// away (files held open by the game, permission problems).
///
/// Returns the paths that survived, deepest entries first. Directories
/// that stay only because a child stayed are implied by the listed
/// leaves rather than listed themselves. An empty list means the tree is
/// gone. Already-missing paths count as removed, so retrying after a
/// partial run is a no-op for what the first run managed to delete.
pub fn remove_tree_collecting(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut survivors = Vec::new();

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if let Some(path) = e.path().and_then(Utf8Path::from_path) {
                    survivors.push(path.to_owned());
                }
                continue;
            }
        };

        let path = Utf8Path::from_path(entry.path())
            .ok_or_else(|| Error::NonUtf8Path(entry.path().display().to_string()))?;

        let removal = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };

        match removal {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(_) => {
                // A directory that still has entries failed because of its
                // children, which are already on the list.
                if entry.file_type().is_dir() && dir_has_entries(path) {
                    continue;
                }
                survivors.push(path.to_owned());
            }
        }
    }

    Ok(survivors)
}

/// Names of the immediate subdirectories of `dir`, sorted.
pub fn dir_names(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn dir_has_entries(path: &Utf8Path) -> bool {
    fs::read_dir(path)
        .map(|mut i| i.next().is_some())
        .unwrap_or(false)
}

fn io_from_walkdir(e: walkdir::Error) -> Error {
    match e.into_io_error() {
        Some(io) => Error::Io(io),
        None => Error::Io(std::io::Error::other("walkdir loop detected")),
    }
}
