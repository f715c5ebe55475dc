use camino::Utf8PathBuf;
use mod_cellar::config::Settings;
use std::fs;

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let settings = Settings::load(&root.join("settings.json"));

    assert!(settings.smapi_path.is_none());
    assert!(settings.game_mods_path.is_none());
    assert!(!settings.existing_mods_imported);
    assert!(!settings.is_configured());
}

#[test]
fn corrupt_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let path = root.join("settings.json");
    fs::write(&path, "{this is not json").unwrap();

    let settings = Settings::load(&path);
    assert!(!settings.is_configured());
}

#[test]
fn set_paths_resolves_and_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    // set_paths canonicalizes, so the targets have to exist
    let smapi = root.join("StardewModdingAPI");
    fs::write(&smapi, "dummy").unwrap();
    let mods = root.join("Mods");
    fs::create_dir_all(&mods).unwrap();

    let path = root.join("conf/settings.json");
    let mut settings = Settings::load(&path);
    settings.set_paths(&smapi, &mods).unwrap();
    settings.existing_mods_imported = true;
    settings.save(&path).unwrap();

    let reloaded = Settings::load(&path);
    assert!(reloaded.is_configured());
    assert!(reloaded.existing_mods_imported);
    assert!(reloaded.smapi_path.unwrap().is_absolute());
    assert!(reloaded.game_mods_path.unwrap().ends_with("Mods"));
    assert_eq!(reloaded.local_mods_path, settings.local_mods_path);
}

#[test]
fn save_creates_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let path = root.join("deep/nested/settings.json");

    Settings::default().save(&path).unwrap();
    assert!(path.is_file());
}
