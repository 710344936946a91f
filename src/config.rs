use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use filtertable_filter::{DEFAULT_CONFIG, FilterConfig};
use log::{debug, info};

/// Returns the path to the config file
pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|p| p.join("filtertable").join("config.txt"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir().map(|p| p.join(".config").join("filtertable").join("config.txt"))
    }
}

/// Resolves which config file to use: an explicit path wins, then the default location.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(config_path)
}

/// Loads the config, falling back to defaults when no file exists.
///
/// A file that exists but does not parse is an error, so setup mistakes
/// surface before any filtering happens.
pub fn load(explicit: Option<&Path>) -> Result<FilterConfig> {
    let Some(path) = resolve_path(explicit) else {
        debug!("no config directory, using defaults");
        return Ok(FilterConfig::default());
    };

    if explicit.is_none() && !path.exists() {
        debug!("{} does not exist, using defaults", path.display());
        return Ok(FilterConfig::default());
    }

    let config = FilterConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Writes the commented default config if no file exists yet.
pub fn ensure_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "filtertable-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = scratch_dir("missing").join("config.txt");
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_ensure_config_file_writes_defaults_once() {
        let dir = scratch_dir("ensure");
        let path = dir.join("nested").join("config.txt");

        assert!(ensure_config_file(&path).unwrap());
        assert!(!ensure_config_file(&path).unwrap());
        assert_eq!(load(Some(&path)).unwrap(), FilterConfig::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_fails_with_context() {
        let dir = scratch_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.txt");
        fs::write(&path, "match_mode = sometimes\n").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));

        let _ = fs::remove_dir_all(&dir);
    }
}
