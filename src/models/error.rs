use camino::Utf8PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while managing the mod library.
///
/// Filesystem, archive and parse failures are converted into one of these
/// variants at the operation boundary; callers never see a raw low-level
/// error without a category.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported archive format, only .zip is accepted")]
    UnsupportedFormat,

    #[error("no manifest.json at the archive root or one folder below it")]
    InvalidModStructure,

    #[error("mod '{0}' already exists in the local library")]
    DuplicateMod(String),

    #[error("mod '{0}' is not in the local library")]
    ModNotFound(String),

    #[error("game Mods directory unavailable: {0}")]
    ActiveDirectoryUnavailable(Utf8PathBuf),

    #[error("mod '{0}' is already active")]
    AlreadyActive(String),

    #[error("mod '{0}' is not active")]
    NotActive(String),

    #[error("failed to remove partially written folder '{0}'")]
    PartialWriteCleanup(Utf8PathBuf),

    /// Raised when some files of an active mod could not be deleted,
    /// typically because the game still holds them open. Carries the
    /// surviving paths so the caller can prompt a retry.
    #[error("could not remove {} path(s), close the game and retry", .0.len())]
    DisableIncomplete(Vec<Utf8PathBuf>),

    #[error("invalid manifest.json: {0}")]
    BadManifest(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("non-UTF-8 path: {0}")]
    NonUtf8Path(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
