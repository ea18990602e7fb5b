//! Profile directory lookup.

use super::ConfigError;
use std::path::{Path, PathBuf};

/// General settings file inside a profile directory.
pub const CONFIG_FILE: &str = "config.toml";
/// Account credentials file inside a profile directory.
pub const LOGIN_FILE: &str = "login.toml";

/// Find the directory for `profile`.
///
/// An existing directory path is used as is. Anything else is treated as a
/// profile name under `<user config dir>/kaulmate/`, which is created if
/// missing so that first-time users have a place to put their profiles.
pub fn resolve_profile(profile: &str) -> Result<PathBuf, ConfigError> {
    let direct = Path::new(profile);
    if direct.is_dir() {
        return Ok(direct.to_path_buf());
    }

    let base = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(crate::NAME);
    std::fs::create_dir_all(&base).map_err(|source| ConfigError::Io {
        path: base.clone(),
        source,
    })?;

    let dir = base.join(profile);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ConfigError::ProfileNotFound(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_directory_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();
        assert_eq!(resolve_profile(path).unwrap(), dir.path());
    }
}
