//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from the optional `config.toml`
///
/// Every field is optional; anything absent falls through to the next
/// resolution tier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub data_folder: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub log_file: Option<String>,
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(folder) = load_file_config().ok().flatten().and_then(|c| c.data_folder) {
        return PathBuf::from(folder);
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// Load `config.toml` if one exists at the platform config location.
///
/// Returns Ok(None) when no config file is present; malformed TOML is an
/// error rather than a silent fallback.
pub fn load_file_config() -> Result<Option<FileConfig>> {
    let path = match config_file_path() {
        Some(p) if p.exists() => p,
        _ => return Ok(None),
    };

    let content = std::fs::read_to_string(&path)?;
    let config: FileConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Platform config file path: `<config dir>/stagebook/config.toml`,
/// with `/etc/stagebook/config.toml` as a system-wide fallback on Linux.
fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("stagebook").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/stagebook/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default data folder (holds the database file)
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("stagebook"))
        .unwrap_or_else(|| PathBuf::from("./stagebook_data"))
}

/// Ensure the data folder exists and return the database path inside it
pub fn database_path(data_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_folder)?;
    Ok(data_folder.join("stagebook.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let folder = resolve_data_folder(Some("/tmp/stagebook-test"), "STAGEBOOK_TEST_UNSET");
        assert_eq!(folder, PathBuf::from("/tmp/stagebook-test"));
    }

    #[test]
    fn env_var_beats_default() {
        std::env::set_var("STAGEBOOK_TEST_DATA", "/tmp/from-env");
        let folder = resolve_data_folder(None, "STAGEBOOK_TEST_DATA");
        std::env::remove_var("STAGEBOOK_TEST_DATA");
        assert_eq!(folder, PathBuf::from("/tmp/from-env"));
    }

    #[test]
    fn default_is_nonempty() {
        let folder = default_data_folder();
        assert!(folder.as_os_str().len() > 0);
    }

    #[test]
    fn file_config_parses_partial_tables() {
        let config: FileConfig = toml::from_str("port = 5000\n").unwrap();
        assert_eq!(config.port, Some(5000));
        assert!(config.data_folder.is_none());
        assert!(config.log_file.is_none());
    }
}
