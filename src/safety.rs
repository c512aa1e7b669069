use std::path::{Component, Path, PathBuf};

/// Re-roots `target` under `root`, rejecting paths that climb out of it.
///
/// Absolute targets such as `/etc/mysql/conf.d/x.cnf` land at
/// `<root>/etc/mysql/conf.d/x.cnf`.
pub fn rooted_path(root: &str, target: &str) -> Result<PathBuf, String> {
    if root.is_empty() {
        return Err("config root must not be empty".into());
    }
    let relative = target.trim_start_matches('/');
    if relative.is_empty() {
        return Err(format!("target path {:?} has no file component", target));
    }
    let abs_root = std::env::current_dir()
        .map_err(|e| format!("getting cwd: {}", e))?
        .join(root);
    let abs_root = normalize_path(&abs_root);
    let cleaned = normalize_path(&abs_root.join(relative));
    if cleaned == abs_root || !cleaned.starts_with(&abs_root) {
        return Err(format!(
            "path traversal detected: {:?} escapes config root {:?}",
            target, abs_root
        ));
    }
    Ok(cleaned)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !components.is_empty() {
                    components.pop();
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }
    let mut result = PathBuf::new();
    for c in components {
        result.push(c.as_os_str());
    }
    result
}
