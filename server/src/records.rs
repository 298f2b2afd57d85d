//! Startup inspection of the labels document.
//!
//! The client owns the user-facing load error, so problems found here
//! are only logged; serving proceeds regardless.

use std::path::Path;

use common::RecordSession;

/// Fixed name of the labels document within the data directory
pub const LABELS_FILE: &str = "labels.json";

/// Parse the labels document and return its record count
pub fn inspect_labels_file(path: &Path) -> Result<usize, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let session = RecordSession::from_json_str(&text).map_err(|e| e.to_string())?;
    Ok(session.len())
}

pub fn report_labels_file(data_dir: &str) {
    let path = Path::new(data_dir).join(LABELS_FILE);
    match inspect_labels_file(&path) {
        Ok(count) => tracing::info!("Labels document {} holds {} records", path.display(), count),
        Err(e) => tracing::warn!(
            "Labels document {} is not servable as a record array: {}",
            path.display(),
            e
        ),
    }
}
