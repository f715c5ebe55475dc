use crate::models::error::{Error, Result};
use camino::Utf8Path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File that marks a folder as a mod. Its location governs mod identity.
pub const MANIFEST_FILE: &str = "manifest.json";

/// A mod's descriptor.
///
/// Only `Name` is interpreted, and even that is informational: the folder
/// name stays the operative identity (see [`crate::ModManager`]). All other
/// fields are carried opaquely so a round-trip doesn't lose data the loader
/// understands but we don't.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ModManifest {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ModManifest {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&strip_relaxed_json(&raw)).map_err(|e| Error::BadManifest(e.to_string()))
    }
}

/// SMAPI accepts manifests with `//` and `/* */` comments and trailing
/// commas. serde_json does not, so those are stripped before parsing.
fn strip_relaxed_json(raw: &str) -> String {
    let line_comments = Regex::new(r"(?m)//.*$").expect("valid regex");
    let block_comments = Regex::new(r"(?s)/\*.*?\*/").expect("valid regex");
    let trailing_commas = Regex::new(r",(\s*[}\]])").expect("valid regex");

    let cleaned = line_comments.replace_all(raw, "");
    let cleaned = block_comments.replace_all(&cleaned, "");
    trailing_commas.replace_all(&cleaned, "$1").into_owned()
}
