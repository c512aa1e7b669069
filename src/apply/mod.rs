pub mod db;
pub mod executor;
pub mod sql;

use crate::logging::Logger;
use crate::provision::platform::ConfigFile;
use crate::safety;
use std::fs;

/// Writes rendered server config files beneath `root`.
pub fn write_config_files(log: &Logger, files: &[ConfigFile], root: &str) -> Result<(), String> {
    for file in files {
        let out_path = safety::rooted_path(root, &file.path)?;
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("creating directory {:?}: {}", parent, e))?;
        }
        fs::write(&out_path, &file.content)
            .map_err(|e| format!("writing {:?}: {}", out_path, e))?;
        set_mode(&out_path, file.mode)?;
        log.info(
            "wrote config file",
            &[
                ("path", out_path.to_str().unwrap_or("")),
                ("mode", &format!("{:o}", file.mode)),
            ],
        );
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &std::path::Path, mode: u32) -> Result<(), String> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| format!("setting mode on {:?}: {}", path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &std::path::Path, _mode: u32) -> Result<(), String> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use tempfile::TempDir;

    fn test_logger() -> Logger {
        Logger::new(Box::new(std::io::sink()), false, Level::Info)
    }

    #[test]
    fn test_write_config_files() {
        let dir = TempDir::new().unwrap();
        let files = vec![ConfigFile {
            path: "/etc/mysql/conf.d/bind-address.cnf".into(),
            content: "[mysqld]\nbind-address = 0.0.0.0\n".into(),
            mode: 0o644,
        }];
        write_config_files(&test_logger(), &files, dir.path().to_str().unwrap()).unwrap();
        let written =
            fs::read_to_string(dir.path().join("etc/mysql/conf.d/bind-address.cnf")).unwrap();
        assert!(written.contains("bind-address = 0.0.0.0"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_config_files_sets_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let files = vec![ConfigFile {
            path: "/root/.my.cnf".into(),
            content: "[client]\n".into(),
            mode: 0o600,
        }];
        write_config_files(&test_logger(), &files, dir.path().to_str().unwrap()).unwrap();
        let meta = fs::metadata(dir.path().join("root/.my.cnf")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_write_config_files_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let files = vec![ConfigFile {
            path: "/../outside.cnf".into(),
            content: String::new(),
            mode: 0o644,
        }];
        assert!(write_config_files(&test_logger(), &files, dir.path().to_str().unwrap()).is_err());
    }
}
