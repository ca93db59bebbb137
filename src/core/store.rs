//! Store handle for the meal catalog workspace.

use std::path::{Path, PathBuf};

/// Handle to a catalog workspace.
///
/// A Store is a logical container for the catalog database. All model
/// functions take a `&Store` and open their own short-lived connection, so
/// the handle itself is cheap to clone and carries no open resources.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the workspace root directory
    pub root: PathBuf,
}

impl Store {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}
