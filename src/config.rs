use crate::models::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SETTINGS_FILE: &str = "settings.json";

/// The three paths the application runs on, persisted as a small JSON
/// file. Owned by the caller and handed to [`crate::ModManager`] at
/// construction; the core never reads it ambiently, which keeps tests
/// free to point it at throwaway directories.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    /// Location of StardewModdingAPI, if known.
    pub smapi_path: Option<Utf8PathBuf>,
    /// The game's Mods directory, if known.
    pub game_mods_path: Option<Utf8PathBuf>,
    /// Where ingested mods are stored.
    pub local_mods_path: Utf8PathBuf,
    /// First-run adoption of pre-existing mods already happened.
    pub existing_mods_imported: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let base_dir = ProjectDirs::from("io", "modcellar", "modcellar")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        Self {
            smapi_path: None,
            game_mods_path: None,
            local_mods_path: base_dir.join("mods"),
            existing_mods_imported: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file yields defaults; a
    /// corrupt one is logged and also yields defaults rather than
    /// blocking startup.
    pub fn load(path: &Utf8Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(%path, error = %e, "settings file is corrupt, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Records the runtime location and derives storage from it, resolving
    /// both to absolute paths so the settings survive a working-directory
    /// change.
    pub fn set_paths(&mut self, smapi: &Utf8Path, game_mods: &Utf8Path) -> Result<()> {
        self.smapi_path = Some(canonical(smapi)?);
        self.game_mods_path = Some(canonical(game_mods)?);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.smapi_path.is_some() && self.game_mods_path.is_some()
    }
}

fn canonical(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let resolved = dunce::canonicalize(path)?;
    Utf8PathBuf::from_path_buf(resolved)
        .map_err(|p| crate::Error::NonUtf8Path(p.display().to_string()))
}
