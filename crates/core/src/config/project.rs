//! Project root and working directory discovery

use std::path::{Path, PathBuf};

use super::CONFIG_FILE_NAME;

/// Entries whose presence marks a directory as a project root
pub const PROJECT_MARKERS: [&str; 3] = [".vscode", ".git", CONFIG_FILE_NAME];

/// Environment variable pinning the project root
pub const PROJECT_ROOT_ENV: &str = "MAHKRAB_PROJECT_ROOT";

/// Nearest ancestor of `from` holding a project marker
///
/// The walk stops below `$HOME` so a home-level `.vscode` is never taken for a
/// project. `MAHKRAB_PROJECT_ROOT` wins when `from` lies inside it.
pub fn find_project_root(from: &Path) -> Option<PathBuf> {
    if let Some(root) = std::env::var_os(PROJECT_ROOT_ENV).map(PathBuf::from) {
        if from.starts_with(&root) {
            return Some(root);
        }
    }

    let home = std::env::var_os("HOME").map(PathBuf::from);
    find_project_root_below(from, home.as_deref())
}

/// Marker search that never returns `boundary` or anything above it
pub fn find_project_root_below(from: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let mut current = if from.is_dir() {
        from.to_path_buf()
    } else {
        from.parent()?.to_path_buf()
    };

    loop {
        if boundary == Some(current.as_path()) {
            return None;
        }

        if PROJECT_MARKERS
            .iter()
            .any(|marker| current.join(marker).exists())
        {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Working directory for a resolution: the project root when known,
/// otherwise the file's own directory
pub fn working_directory(file: &Path, project_root: Option<&Path>) -> PathBuf {
    match project_root {
        Some(root) => root.to_path_buf(),
        None => file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_git_marker_found_from_nested_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("proj");
        let src = root.join("src").join("deep");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        let file = src.join("main.c");
        fs::write(&file, "").unwrap();

        assert_eq!(find_project_root_below(&file, None), Some(root));
    }

    #[test]
    fn test_config_file_marks_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let file = temp_dir.path().join("a.c");
        fs::write(&file, "").unwrap();

        assert_eq!(
            find_project_root_below(&file, None),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_boundary_is_never_a_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".vscode")).unwrap();
        let loose = temp_dir.path().join("scratch");
        fs::create_dir(&loose).unwrap();
        let file = loose.join("a.c");
        fs::write(&file, "").unwrap();

        assert_eq!(find_project_root_below(&file, Some(temp_dir.path())), None);
    }

    #[test]
    fn test_working_directory_falls_back_to_parent() {
        let file = Path::new("/tmp/scratch/a.c");
        assert_eq!(working_directory(file, None), PathBuf::from("/tmp/scratch"));
        assert_eq!(
            working_directory(file, Some(Path::new("/tmp"))),
            PathBuf::from("/tmp")
        );
    }
}
