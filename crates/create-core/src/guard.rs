//! Refuse to scaffold inside an existing project

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use std::path::{Path, PathBuf};

/// Fail if `cwd` or any of its ancestors contains a project marker
pub fn ensure_outside_project<C: ProductConfig>(config: &C, cwd: &Path) -> Result<(), ScaffoldError> {
    match find_project_root(cwd, config.project_markers()) {
        Some(root) => Err(ScaffoldError::InsideProject { root }),
        None => Ok(()),
    }
}

/// Nearest directory from `start` upwards that holds one of `markers`
pub fn find_project_root(start: &Path, markers: &[&str]) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).is_file()))
        .map(Path::to_path_buf)
}
