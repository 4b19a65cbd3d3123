//! Recursive copy of the build output.

use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// Counts from a completed copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// How a copy destination relates to the build output on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Both name the same directory
    Same,
    /// One directory contains the other
    Overlapping,
    /// Unrelated directories
    Separate,
}

/// Errors that can occur while copying.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error(
        "Destination {} is the build output {}",
        .destination.display(),
        .source_dir.display()
    )]
    SameDirectory {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    #[error(
        "Destination {} overlaps the build output {}",
        .destination.display(),
        .source_dir.display()
    )]
    Overlapping {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

/// Compare `source` and `destination` after resolving symlinks and `..`.
///
/// The destination may not exist yet; its missing tail is kept as written.
pub fn placement(source: &Path, destination: &Path) -> Result<Placement, CopyError> {
    let source = resolve(source)?;
    let destination = resolve(destination)?;

    if source == destination {
        Ok(Placement::Same)
    } else if destination.starts_with(&source) || source.starts_with(&destination) {
        Ok(Placement::Overlapping)
    } else {
        Ok(Placement::Separate)
    }
}

/// Canonicalize every existing prefix of `path`, component by component.
fn resolve(path: &Path) -> Result<PathBuf, CopyError> {
    let read_error = |e: std::io::Error| CopyError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut resolved = PathBuf::new();
    for component in std::path::absolute(path).map_err(read_error)?.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if resolved.symlink_metadata().is_ok() {
                    resolved = fs::canonicalize(&resolved).map_err(read_error)?;
                }
            }
        }
    }
    Ok(resolved)
}

/// Copy everything under `source` into `destination`.
///
/// The destination is created if missing. Existing files are overwritten;
/// files already in the destination that the source lacks are left alone.
/// Hidden files are copied like any other. Copying a directory onto itself
/// or into its own subtree (or ancestor) is refused before anything is
/// written.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopyStats, CopyError> {
    match placement(source, destination)? {
        Placement::Separate => {}
        Placement::Same => {
            return Err(CopyError::SameDirectory {
                source_dir: source.to_path_buf(),
                destination: destination.to_path_buf(),
            })
        }
        Placement::Overlapping => {
            return Err(CopyError::Overlapping {
                source_dir: source.to_path_buf(),
                destination: destination.to_path_buf(),
            })
        }
    }

    fs::create_dir_all(destination).map_err(|e| CopyError::Write {
        path: destination.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut stats = CopyStats::default();

    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| CopyError::Read {
            path: e.path().unwrap_or(source).to_path_buf(),
            message: e.to_string(),
        })?;

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| CopyError::Write {
                path: target.clone(),
                message: e.to_string(),
            })?;
            stats.directories += 1;
        } else {
            let bytes = fs::copy(entry.path(), &target).map_err(|e| CopyError::Write {
                path: target.clone(),
                message: e.to_string(),
            })?;
            tracing::debug!("Copied {}", relative.display());
            stats.files += 1;
            stats.bytes += bytes;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Relative path -> contents for every file under `root`.
    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
                (relative, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    fn sample_site(root: &Path) {
        write(&root.join("index.html"), "<h1>Pears</h1>");
        write(&root.join("guide/installation.html"), "<p>install</p>");
        write(&root.join("assets/app.4f2a.js"), "console.log(1)");
        write(&root.join(".nojekyll"), "");
    }

    #[test]
    fn copies_full_tree() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        let out = temp.path().join("out");
        sample_site(&dist);

        let stats = copy_tree(&dist, &out).unwrap();

        assert_eq!(snapshot(&out), snapshot(&dist));
        assert_eq!(stats.files, 4);
        assert_eq!(stats.directories, 2);
        assert_eq!(stats.bytes, 42);
    }

    #[test]
    fn repeated_copies_converge() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        let out = temp.path().join("out");
        sample_site(&dist);

        copy_tree(&dist, &out).unwrap();
        let first = snapshot(&out);
        copy_tree(&dist, &out).unwrap();

        assert_eq!(snapshot(&out), first);
    }

    #[test]
    fn overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        let out = temp.path().join("out");
        sample_site(&dist);
        write(&out.join("index.html"), "stale");
        write(&out.join("CNAME"), "docs.pears.dev");

        copy_tree(&dist, &out).unwrap();

        assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "<h1>Pears</h1>");
        assert_eq!(fs::read_to_string(out.join("CNAME")).unwrap(), "docs.pears.dev");
    }

    #[test]
    fn rejects_destination_inside_source() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);

        let err = copy_tree(&dist, &dist.join("nested")).unwrap_err();

        assert!(matches!(err, CopyError::Overlapping { .. }));
        assert!(!dist.join("nested").exists());
    }

    #[test]
    fn rejects_nested_destination_spelled_with_parent_dirs() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);
        let destination = dist.join("guide/../nested");

        let err = copy_tree(&dist, &destination).unwrap_err();

        assert!(matches!(err, CopyError::Overlapping { .. }));
        assert!(!dist.join("nested").exists());
    }

    #[test]
    fn rejects_destination_containing_source() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);

        let err = copy_tree(&dist, temp.path()).unwrap_err();

        assert!(matches!(err, CopyError::Overlapping { .. }));
    }

    #[test]
    fn parent_dir_alias_is_the_same_directory() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);
        let alias = temp.path().join("other/../dist");

        assert_eq!(placement(&dist, &alias).unwrap(), Placement::Same);

        let err = copy_tree(&dist, &alias).unwrap_err();

        assert!(matches!(err, CopyError::SameDirectory { .. }));
        assert_eq!(fs::read_to_string(dist.join("index.html")).unwrap(), "<h1>Pears</h1>");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_alias_is_the_same_directory() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);
        let link = temp.path().join("published");
        std::os::unix::fs::symlink(&dist, &link).unwrap();

        assert_eq!(placement(&dist, &link).unwrap(), Placement::Same);

        let err = copy_tree(&dist, &link).unwrap_err();

        assert!(matches!(err, CopyError::SameDirectory { .. }));
        assert_eq!(fs::read_to_string(dist.join("index.html")).unwrap(), "<h1>Pears</h1>");
    }

    #[test]
    fn missing_destination_is_separate() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        sample_site(&dist);

        assert_eq!(
            placement(&dist, &temp.path().join("out/site")).unwrap(),
            Placement::Separate
        );
    }

    #[test]
    fn fails_when_destination_is_a_file() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("dist");
        let out = temp.path().join("out");
        sample_site(&dist);
        write(&out, "not a directory");

        let err = copy_tree(&dist, &out).unwrap_err();

        assert!(matches!(err, CopyError::Write { .. }));
    }
}
