use crate::models::error::Result;
use camino::Utf8Path;
use std::fs::{self, File};
use std::io;
use tracing::debug;

/// Extracts a zip archive into `destination`, preserving relative paths.
///
/// Entries whose names would escape the destination (absolute paths or
/// `..` traversal) are skipped: `enclosed_name()` only yields paths that
/// stay inside the target directory.
pub fn extract(archive_path: &Utf8Path, destination: &Utf8Path) -> Result<()> {
    debug!(%archive_path, %destination, "extracting archive");

    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let safe_path = match entry.enclosed_name() {
            Some(path) => path.to_owned(),
            None => continue,
        };

        let output_path = destination.as_std_path().join(&safe_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }

            let mut outfile = File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
        }

        // Keep executable bits on unix, some mods ship helper tools
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let _ = fs::set_permissions(&output_path, fs::Permissions::from_mode(mode));
            }
        }
    }

    Ok(())
}
