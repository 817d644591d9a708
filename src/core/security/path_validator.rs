use std::io;
use std::path::{Component, Path, PathBuf};

use crate::core::config::SecurityConfig;

/// Errors that can occur during output path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Path '{path}' contains a parent directory component")]
    ParentTraversal { path: PathBuf },

    #[error("Symlinks are not allowed as output files: '{path}'")]
    SymlinkNotAllowed { path: PathBuf },

    #[error("Path has no existing ancestor: '{path}'")]
    NoExistingAncestor { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Validates that a page may be written to `input_path`.
///
/// Unlike read-side validation, the target (and any number of its parent
/// directories) may not exist yet. With a configured root, the deepest
/// existing ancestor is canonicalized, the missing tail is re-appended, and
/// the result must stay under the canonical root.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path to write to (unchanged when no root is set)
/// * `Err(PathSecurityError)` - If validation fails
///
/// # Examples
///
/// ```rust,ignore
/// let security = SecurityConfig { root_path: Some("/srv/pages".into()), allow_symlinks: true };
/// let target = validate_output_path("/srv/pages/new/index.html", &security)?;
/// ```
pub fn validate_output_path(
    input_path: &str,
    security: &SecurityConfig,
) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    let Some(ref root) = security.root_path else {
        return Ok(path.to_path_buf());
    };

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(PathSecurityError::ParentTraversal {
            path: path.to_path_buf(),
        });
    }

    let canonical_root = root.canonicalize().map_err(|e| PathSecurityError::IoError {
        path: root.clone(),
        error: e,
    })?;

    // Relative paths are interpreted against the root.
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    if absolute.is_symlink() && !security.allow_symlinks {
        return Err(PathSecurityError::SymlinkNotAllowed { path: absolute });
    }

    let resolved = resolve_with_missing_tail(&absolute)?;

    if !is_within_root(&resolved, &canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: resolved,
            root: canonical_root,
        });
    }

    Ok(resolved)
}

/// Canonicalizes the deepest existing ancestor of `path` and appends the
/// components that do not exist yet.
fn resolve_with_missing_tail(path: &Path) -> Result<PathBuf, PathSecurityError> {
    let mut existing = path;
    let mut tail = Vec::new();

    while !existing.exists() {
        let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
            return Err(PathSecurityError::NoExistingAncestor {
                path: path.to_path_buf(),
            });
        };
        tail.push(name.to_os_string());
        existing = parent;
    }

    let mut resolved = existing
        .canonicalize()
        .map_err(|e| PathSecurityError::IoError {
            path: existing.to_path_buf(),
            error: e,
        })?;

    for name in tail.into_iter().rev() {
        resolved.push(name);
    }

    Ok(resolved)
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
