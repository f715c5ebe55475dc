use crate::core::{decompression, mod_fs};
use crate::models::error::{Error, Result};
use crate::models::manifest::{ModManifest, MANIFEST_FILE};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::{info, warn};

/// Owns the mod lifecycle: archive ingestion into the local library and
/// the enable/disable/delete transitions against the game's Mods
/// directory.
///
/// The local library is the source of truth; an active entry is a
/// disposable copy of it. At most one active copy may exist per mod name.
/// Identity is the on-disk folder name, not the `Name` a manifest
/// declares; the declared name is informational only and shows up in
/// [`ModStatus::display_name`].
///
/// Every operation observes live filesystem state, nothing is cached
/// between calls. The manager has no concurrent-caller contract: callers
/// that invoke it from more than one thread must serialize.
pub struct ModManager {
    local_dir: Utf8PathBuf,
    active_dir: Utf8PathBuf,
}

/// One row of the caller-facing mod list.
#[derive(Debug, Clone)]
pub struct ModStatus {
    pub name: String,
    pub enabled: bool,
    /// The `Name` declared by the entry's manifest, when it parses.
    pub display_name: Option<String>,
}

/// Outcome of adopting pre-existing mods from the game directory.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<(String, String)>,
}

impl ModManager {
    /// `local_dir` is created lazily on first ingest; `active_dir` is the
    /// game's Mods directory and is never created by the manager.
    pub fn new(local_dir: Utf8PathBuf, active_dir: Utf8PathBuf) -> Self {
        Self {
            local_dir,
            active_dir,
        }
    }

    /// Extracts a `.zip` archive and copies its mod folder into the local
    /// library. Returns the governing folder name.
    ///
    /// The manifest must sit at the archive root or exactly one folder
    /// below it (the common case of an archive wrapping a single folder).
    /// A root-level manifest means the archive itself is the mod, so the
    /// entry is named after the archive file stem.
    pub fn ingest(&self, archive: &Utf8Path, overwrite: bool) -> Result<String> {
        let is_zip = archive
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);
        if !is_zip {
            return Err(Error::UnsupportedFormat);
        }

        let staging = tempfile::tempdir()?;
        let staging_root = Utf8Path::from_path(staging.path())
            .ok_or_else(|| Error::NonUtf8Path(staging.path().display().to_string()))?;

        decompression::extract(archive, staging_root)?;

        let mod_root = locate_mod_root(staging_root)?;
        let name = if mod_root.as_path() == staging_root {
            archive
                .file_stem()
                .ok_or(Error::InvalidModStructure)?
                .to_string()
        } else {
            mod_root
                .file_name()
                .ok_or(Error::InvalidModStructure)?
                .to_string()
        };

        fs::create_dir_all(&self.local_dir)?;
        let dest = self.local_dir.join(&name);
        if dest.exists() {
            if !overwrite {
                return Err(Error::DuplicateMod(name));
            }
            // The old entry may be the only copy the user has; it is
            // only discarded once the replacement has fully landed.
            mod_fs::replace_dir(&mod_root, &dest)?;
        } else if let Err(e) = mod_fs::copy_recursive(&mod_root, &dest) {
            discard_partial(&dest)?;
            return Err(e);
        }

        info!(mod_name = %name, "ingested into local library");
        Ok(name)
    }

    /// Sorted folder names in the local library. A missing library
    /// directory just means no mods yet.
    pub fn list_local(&self) -> Result<Vec<String>> {
        if !self.local_dir.is_dir() {
            return Ok(Vec::new());
        }
        mod_fs::dir_names(&self.local_dir)
    }

    /// Sorted folder names in the game's Mods directory. Unlike the local
    /// side, a missing directory is an error: it means the game runtime
    /// isn't configured, which is distinct from "no mods yet".
    pub fn list_active(&self) -> Result<Vec<String>> {
        if !self.active_dir.is_dir() {
            return Err(Error::ActiveDirectoryUnavailable(self.active_dir.clone()));
        }
        mod_fs::dir_names(&self.active_dir)
    }

    /// Copies a local entry into the game's Mods directory.
    ///
    /// Fails with [`Error::AlreadyActive`] rather than silently replacing
    /// or merging; callers that want idempotence check `list_active`
    /// first. A copy that fails partway is removed before the error is
    /// returned, so a half-copied mod never stays active.
    pub fn enable(&self, name: &str) -> Result<()> {
        let src = self.local_dir.join(name);
        if !src.is_dir() {
            return Err(Error::ModNotFound(name.to_string()));
        }
        if !self.active_dir.is_dir() {
            return Err(Error::ActiveDirectoryUnavailable(self.active_dir.clone()));
        }

        let dst = self.active_dir.join(name);
        if dst.exists() {
            return Err(Error::AlreadyActive(name.to_string()));
        }

        if let Err(e) = mod_fs::copy_recursive(&src, &dst) {
            discard_partial(&dst)?;
            return Err(e);
        }

        info!(mod_name = %name, "enabled");
        Ok(())
    }

    /// Deletes a mod's active copy. The local entry is untouched.
    ///
    /// Files the game still holds open survive the pass and come back as
    /// [`Error::DisableIncomplete`]; calling again once the game is
    /// closed removes the remainder.
    pub fn disable(&self, name: &str) -> Result<()> {
        let target = self.active_dir.join(name);
        if !target.is_dir() {
            return Err(Error::NotActive(name.to_string()));
        }

        let survivors = mod_fs::remove_tree_collecting(&target)?;
        if !survivors.is_empty() {
            warn!(mod_name = %name, count = survivors.len(), "disable left paths behind");
            return Err(Error::DisableIncomplete(survivors));
        }

        info!(mod_name = %name, "disabled");
        Ok(())
    }

    /// Removes a mod from the local library, disabling it first if an
    /// active copy exists. If that cascade fails the local entry is left
    /// alone: the library copy is never deleted while the active side
    /// could not be cleaned up, it may be the only copy left.
    pub fn delete(&self, name: &str) -> Result<()> {
        let src = self.local_dir.join(name);
        if !src.is_dir() {
            return Err(Error::ModNotFound(name.to_string()));
        }

        if self.active_dir.join(name).is_dir() {
            self.disable(name)?;
        }

        fs::remove_dir_all(&src)?;
        info!(mod_name = %name, "deleted from local library");
        Ok(())
    }

    /// The caller-facing listing: every local entry with its active state
    /// and, when its manifest parses, the declared display name. A broken
    /// manifest downgrades to `None` rather than failing the listing.
    pub fn status(&self) -> Result<Vec<ModStatus>> {
        let active = self.list_active()?;
        let statuses = self
            .list_local()?
            .into_iter()
            .map(|name| {
                let display_name = ModManifest::load(&self.local_dir.join(&name).join(MANIFEST_FILE))
                    .ok()
                    .map(|m| m.name);
                ModStatus {
                    enabled: active.binary_search(&name).is_ok(),
                    name,
                    display_name,
                }
            })
            .collect();
        Ok(statuses)
    }

    /// First-run adoption of mods the user already has in the game
    /// directory: every folder carrying a manifest is copied into the
    /// local library. Folders starting with `.` or `_` (disabled-by-
    /// convention or tooling folders) and folders already in the library
    /// are skipped. Individual failures are recorded and do not abort the
    /// run.
    pub fn import_existing(&self) -> Result<ImportReport> {
        if !self.active_dir.is_dir() {
            return Err(Error::ActiveDirectoryUnavailable(self.active_dir.clone()));
        }
        fs::create_dir_all(&self.local_dir)?;

        let mut report = ImportReport::default();
        for name in mod_fs::dir_names(&self.active_dir)? {
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let src = self.active_dir.join(&name);
            if !src.join(MANIFEST_FILE).is_file() {
                continue;
            }

            let dest = self.local_dir.join(&name);
            if dest.exists() {
                report.skipped.push(name);
                continue;
            }

            match mod_fs::copy_recursive(&src, &dest) {
                Ok(()) => {
                    info!(mod_name = %name, "imported existing mod");
                    report.imported.push(name);
                }
                Err(e) => {
                    warn!(mod_name = %name, error = %e, "import failed");
                    discard_partial(&dest)?;
                    report.errors.push((name, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    pub fn local_dir(&self) -> &Utf8Path {
        &self.local_dir
    }

    pub fn active_dir(&self) -> &Utf8Path {
        &self.active_dir
    }
}

/// Finds the folder that governs the mod's identity inside an extracted
/// archive: the staging root itself when the manifest sits there, or the
/// single level-one folder that carries one. Zero candidates, a deeper
/// manifest, or several sibling candidates all mean the archive isn't a
/// recognizable single mod.
fn locate_mod_root(staging: &Utf8Path) -> Result<Utf8PathBuf> {
    if staging.join(MANIFEST_FILE).is_file() {
        return Ok(staging.to_owned());
    }

    let mut candidates = Vec::new();
    for entry in staging.read_dir_utf8()? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join(MANIFEST_FILE).is_file() {
            candidates.push(path.to_owned());
        }
    }
    candidates.sort();

    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        _ => Err(Error::InvalidModStructure),
    }
}

/// Rolls back a partially written destination folder. Failing to roll
/// back is its own error, the caller must know the tree is dirty.
fn discard_partial(dest: &Utf8Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|_| Error::PartialWriteCleanup(dest.to_owned()))?;
    }
    Ok(())
}
