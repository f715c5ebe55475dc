use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Sets up a local library and a game Mods directory inside one tempdir.
pub fn setup_dirs() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let local = root.join("library");
    let game_mods = root.join("Mods");
    fs::create_dir_all(&local).unwrap();
    fs::create_dir_all(&game_mods).unwrap();

    (tmp, local, game_mods)
}

/// Writes a zip archive with the given (entry name, contents) pairs.
pub fn write_zip(path: &Utf8Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// A standard single-mod archive: `folder/manifest.json` plus one asset.
pub fn write_mod_zip(dir: &Utf8Path, archive: &str, folder: &str, declared: &str) -> Utf8PathBuf {
    let path = dir.join(archive);
    let manifest = format!(r#"{{"Name": "{declared}"}}"#);
    let manifest_entry = format!("{folder}/manifest.json");
    let asset_entry = format!("{folder}/content.xnb");
    write_zip(
        &path,
        &[(manifest_entry.as_str(), manifest.as_str()), (asset_entry.as_str(), "xnb")],
    );
    path
}

/// A mod folder placed directly on disk.
pub fn create_mod_dir(parent: &Utf8Path, name: &str, declared: &str) {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("manifest.json"),
        format!(r#"{{"Name": "{declared}"}}"#),
    )
    .unwrap();
    fs::write(dir.join("content.xnb"), "xnb").unwrap();
}
