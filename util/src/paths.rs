use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Absolute form of a configured root directory.
/// If relative, resolve against current_dir().
pub fn resolve_root(root: &str) -> PathBuf {
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A static sub-tree under the web root: {WEB_ROOT}/{name}
pub fn web_subdir(web_root: &Path, name: &str) -> PathBuf {
    web_root.join(name)
}

/// The SPA entry document: {WEB_ROOT}/index.html
pub fn spa_shell(web_root: &Path) -> PathBuf {
    web_root.join("index.html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn root_resolves_relative_against_cwd() {
        let expected = std::env::current_dir().unwrap().join("web_rel");
        assert_eq!(resolve_root("web_rel"), expected);
    }

    #[test]
    fn root_uses_absolute_as_is() {
        let td = TempDir::new().unwrap();
        let abs = td.path().to_path_buf();

        assert_eq!(resolve_root(abs.to_str().unwrap()), abs);
    }

    #[test]
    fn helpers_construct_expected_paths() {
        let root = PathBuf::from("/srv/panel");

        assert_eq!(web_subdir(&root, "css"), root.join("css"));
        assert_eq!(spa_shell(&root), root.join("index.html"));
    }

    #[test]
    fn parent_dir_is_created() {
        let td = TempDir::new().unwrap();
        let file = td.path().join("data").join("nested").join("panel.db");

        ensure_parent_dir(&file).unwrap();
        assert!(td.path().join("data").join("nested").is_dir());
    }
}
