//! Writing generated pages to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use thiserror::Error;
use tracing::debug;

/// Errors raised while persisting a page.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `contents` as the complete contents of `path`.
///
/// Missing parent directories are created first. The text is staged in a
/// temporary file next to the destination and renamed over it, so readers
/// see either the previous file or the complete new one. Directories created
/// before a failure are left in place.
///
/// An existing symlink at `path` is written through, not replaced. An
/// overwritten file keeps its permissions; a new file gets `0o666` minus the
/// process umask.
pub fn write_page(path: &Path, contents: &str) -> Result<(), PersistError> {
    let write_err = |source: io::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_symlink(path).map_err(write_err)?;

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let existing_permissions = fs::metadata(&target)
        .ok()
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.permissions());

    let mut builder = Builder::new();
    // Mode is passed to open(2), so the umask applies.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut staged = builder.tempfile_in(dir).map_err(write_err)?;
    staged.write_all(contents.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;

    if let Some(permissions) = existing_permissions {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }

    staged.persist(&target).map_err(|e| write_err(e.error))?;
    debug!("Wrote {} bytes to {}", contents.len(), target.display());

    Ok(())
}

/// Follow a symlink at `path` to the file it names, even if that file does
/// not exist yet. Any other path is returned unchanged.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    if !path.is_symlink() {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let link = fs::read_link(path)?;
            Ok(match path.parent() {
                Some(parent) => parent.join(link),
                None => link,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("newdir/sub/page.html");

        write_page(&target, "<html></html>").unwrap();

        assert!(temp_dir.path().join("newdir/sub").is_dir());
        assert_eq!(fs::read_to_string(&target).unwrap(), "<html></html>");
    }

    #[test]
    fn test_overwrites_instead_of_appending() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("page.html");

        write_page(&target, "first version").unwrap();
        write_page(&target, "second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_round_trip_preserves_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("unicode.html");
        let contents = "<p>naïve café — 日本語 🚀</p>\r\n\ttrailing  ";

        write_page(&target, contents).unwrap();

        assert_eq!(fs::read(&target).unwrap(), contents.as_bytes());
    }

    #[test]
    fn test_empty_text_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("empty.html");

        write_page(&target, "").unwrap();

        assert!(target.is_file());
        assert_eq!(fs::metadata(&target).unwrap().len(), 0);
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("page.html");

        write_page(&target, "content").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_in_place_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_page(&blocker.join("sub/page.html"), "content");

        let err = result.unwrap_err();
        assert!(matches!(err, PersistError::CreateDir { .. }));
        assert!(err.to_string().starts_with("Failed to create directory"));
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();

        let result = write_page(&target, "content");

        assert!(matches!(result, Err(PersistError::Write { .. })));
        assert!(target.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_page_mode_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("page.html");
        // File::create opens with 0o666 and the process umask, like a plain write.
        let reference = temp_dir.path().join("reference.txt");
        fs::File::create(&reference).unwrap();

        write_page(&target, "content").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        let expected = fs::metadata(&reference).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, expected & 0o777);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("private.html");
        fs::write(&target, "old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o600)).unwrap();

        write_page(&target, "new").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_written_through() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.html");
        let link = temp_dir.path().join("link.html");
        fs::write(&real, "old").unwrap();
        symlink(&real, &link).unwrap();

        write_page(&link, "new").unwrap();

        assert!(link.is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new");
        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_creates_its_target() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("link.html");
        symlink("pages/real.html", &link).unwrap();

        write_page(&link, "fresh").unwrap();

        assert!(link.is_symlink());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("pages/real.html")).unwrap(),
            "fresh"
        );
    }
}
