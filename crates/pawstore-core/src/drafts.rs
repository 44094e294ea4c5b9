//! Reading and writing [`ProductDraft`] files.
//!
//! `.json` files go through `serde_json`; every other extension is treated
//! as YAML.

use std::path::Path;

use crate::error::DraftFileError;
use crate::products::ProductDraft;

/// Load a product draft from a YAML or JSON file.
///
/// # Errors
///
/// Returns `DraftFileError` if the file cannot be read or parsed.
pub fn load_draft(path: &Path) -> Result<ProductDraft, DraftFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| DraftFileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    if is_json(path) {
        serde_json::from_str(&content).map_err(|e| DraftFileError::Json {
            path: path.display().to_string(),
            source: e,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|e| DraftFileError::Yaml {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Write a product draft, choosing the format from the file extension.
///
/// # Errors
///
/// Returns `DraftFileError` if serialization or the write fails.
pub fn save_draft(path: &Path, draft: &ProductDraft) -> Result<(), DraftFileError> {
    let content = if is_json(path) {
        let mut json = serde_json::to_string_pretty(draft).map_err(|e| DraftFileError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
        json.push('\n');
        json
    } else {
        serde_yaml::to_string(draft).map_err(|e| DraftFileError::Yaml {
            path: path.display().to_string(),
            source: e,
        })?
    };

    std::fs::write(path, content).map_err(|e| DraftFileError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
