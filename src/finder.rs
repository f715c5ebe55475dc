//! Locates the SMAPI executable in the usual Steam install spots. Used
//! only to seed initial configuration; the lifecycle manager itself never
//! touches these paths.

use camino::{Utf8Path, Utf8PathBuf};
#[cfg(not(windows))]
use directories::BaseDirs;
use tracing::{debug, warn};

#[cfg(windows)]
pub const RUNTIME_EXE: &str = "StardewModdingAPI.exe";
#[cfg(not(windows))]
pub const RUNTIME_EXE: &str = "StardewModdingAPI";

const GAME_DIR: &str = "Stardew Valley";

/// Probes well-known Steam library locations for the SMAPI executable.
pub fn find_smapi() -> Option<Utf8PathBuf> {
    for dir in candidate_dirs() {
        let exe = dir.join(RUNTIME_EXE);
        if exe.is_file() {
            debug!(%exe, "found SMAPI");
            return dunce::canonicalize(&exe)
                .ok()
                .and_then(|p| Utf8PathBuf::from_path_buf(p).ok());
        }
    }
    None
}

/// Paths whose running processes mean the game is open: SMAPI itself
/// plus the game binaries it spawns next to it (SMAPI execs the game,
/// so checking the loader alone can miss a running session).
pub fn runtime_process_candidates(smapi_path: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut candidates = vec![smapi_path.to_owned()];
    if let Some(dir) = smapi_path.parent() {
        for name in ["Stardew Valley.exe", "Stardew Valley", "StardewValley"] {
            candidates.push(dir.join(name));
        }
    }
    candidates
}

/// The `Mods` directory Steam's SMAPI install keeps next to the
/// executable. Created if missing, since a fresh SMAPI install may not
/// have one yet.
pub fn mods_dir_for(smapi_path: &Utf8Path) -> Option<Utf8PathBuf> {
    let mods_dir = smapi_path.parent()?.join("Mods");
    if mods_dir.is_dir() {
        return Some(mods_dir);
    }
    match std::fs::create_dir_all(&mods_dir) {
        Ok(()) => Some(mods_dir),
        Err(e) => {
            warn!(%mods_dir, error = %e, "could not create Mods directory");
            None
        }
    }
}

#[cfg(windows)]
fn candidate_dirs() -> Vec<Utf8PathBuf> {
    let mut dirs = Vec::new();
    for letter in 'A'..='Z' {
        if !std::path::Path::new(&format!("{letter}:\\")).exists() {
            continue;
        }
        for library in [
            "Steam\\steamapps\\common",
            "SteamLibrary\\steamapps\\common",
            "Program Files (x86)\\Steam\\steamapps\\common",
            "Program Files\\Steam\\steamapps\\common",
        ] {
            dirs.push(Utf8PathBuf::from(format!("{letter}:\\{library}\\{GAME_DIR}")));
        }
    }
    dirs
}

#[cfg(not(windows))]
fn candidate_dirs() -> Vec<Utf8PathBuf> {
    let Some(base) = BaseDirs::new() else {
        return Vec::new();
    };
    let Ok(home) = Utf8PathBuf::from_path_buf(base.home_dir().to_path_buf()) else {
        return Vec::new();
    };

    [
        ".steam/steam/steamapps/common",
        ".local/share/Steam/steamapps/common",
        ".var/app/com.valvesoftware.Steam/.local/share/Steam/steamapps/common",
    ]
    .iter()
    .map(|library| home.join(library).join(GAME_DIR))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    #[test]
    fn mods_dir_is_created_next_to_the_executable() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let exe = root.join(RUNTIME_EXE);
        std::fs::write(&exe, "dummy").unwrap();

        let mods = mods_dir_for(&exe).expect("should create Mods");
        assert_eq!(mods, root.join("Mods"));
        assert!(mods.is_dir());

        // Second call finds the existing directory
        assert_eq!(mods_dir_for(&exe), Some(mods));
    }

    #[test]
    fn process_candidates_cover_loader_and_game_binaries() {
        let smapi = Utf8Path::new("/games/stardew").join(RUNTIME_EXE);
        let candidates = runtime_process_candidates(&smapi);

        assert_eq!(candidates[0], smapi);
        assert!(candidates.iter().any(|c| c.ends_with("Stardew Valley.exe")));
        assert!(candidates.iter().any(|c| c.ends_with("StardewValley")));
        assert!(candidates.iter().all(|c| c.parent() == smapi.parent()));
    }
}
