//! On-disk layout of a document's history sidecar.
//!
//! ```text
//! <root>/<filename>.history/<filename>.json     live change log
//! <root>/<filename>.history/<N>/changes.json    change log of version N
//! <root>/<filename>.history/<N>/key.txt         content-encryption key
//! <root>/<filename>.history/<N>/prev.<ext>      content before the edit
//! <root>/<filename>.history/<N>/diff.zip        diff against version N-1
//! ```

use std::path::{Path, PathBuf};

use dochub_core::types::file_ext;

/// Suffix of the sidecar directory holding a document's history.
pub const HISTORY_POSTFIX: &str = ".history";
/// Change log of a committed version.
pub const CHANGES_FILE: &str = "changes.json";
/// Content-encryption key of a committed version.
pub const KEY_FILE: &str = "key.txt";
/// Diff archive of a committed version.
pub const DIFF_FILE: &str = "diff.zip";

/// Sidecar directory for `filename`.
pub fn history_dir(root: &Path, filename: &str) -> PathBuf {
    root.join(format!("{filename}{HISTORY_POSTFIX}"))
}

/// Directory of version slot `version`.
pub fn slot_dir(root: &Path, filename: &str, version: u32) -> PathBuf {
    history_dir(root, filename).join(version.to_string())
}

/// Live (uncommitted) change log.
pub fn live_meta_path(root: &Path, filename: &str) -> PathBuf {
    history_dir(root, filename).join(format!("{filename}.json"))
}

/// Name of the pre-edit content snapshot inside a slot, e.g. `prev.docx`.
pub fn prev_file_name(filename: &str) -> String {
    format!("prev{}", file_ext(filename))
}

/// Whether `file` names an artifact a slot of `filename` can hold.
pub fn is_slot_artifact(filename: &str, file: &str) -> bool {
    file == CHANGES_FILE || file == KEY_FILE || file == DIFF_FILE || file == prev_file_name(filename)
}
