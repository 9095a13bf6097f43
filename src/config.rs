//! Configuration loading and data directory resolution.
//!
//! Handles parsing of the optional `config.toml` that sits next to the
//! mission file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Upper bound on the particle count accepted from config.
pub const MAX_PARTICLES: usize = 200;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Play sound cues (terminal bell) on errors and deletions
    #[serde(default = "default_true")]
    pub sound: bool,

    /// Number of background particles drawn behind the board
    #[serde(default = "default_particles")]
    pub particles: usize,

    /// Show the HUD clock in the header
    #[serde(default = "default_true")]
    pub show_clock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: default_true(),
            particles: default_particles(),
            show_clock: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_particles() -> usize {
    30
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing file is an `InvalidConfig` error, not an I/O failure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::InvalidConfig(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or return defaults when it is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring config: {e}");
                Self::default()
            }
        }
    }

    /// Load `config.toml` from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        Self::load_or_default(&data_dir.join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.particles > MAX_PARTICLES {
            return Err(Error::InvalidConfig(format!(
                "particles: {} exceeds the maximum of {MAX_PARTICLES}",
                self.particles
            )));
        }
        Ok(())
    }
}

/// Resolve where missions, config and logs live.
///
/// An explicit directory wins, then the platform data directory, then
/// `./.mission-board`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    ProjectDirs::from("", "", "mission-board")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".mission-board"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path());
        assert_eq!(config, Config::default());
        assert!(config.sound);
        assert_eq!(config.particles, 30);
        assert!(config.show_clock);
    }

    #[test]
    fn load_reports_missing_file_as_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(err.exit_code(), crate::error::exit_codes::USER_ERROR);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "sound = false\nparticles = 12\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path());
        assert!(!config.sound);
        assert_eq!(config.particles, 12);
        assert!(config.show_clock);
    }

    #[test]
    fn load_rejects_too_many_particles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "particles = 5000\n").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "sound = = nope").unwrap();
        assert_eq!(Config::load_from_dir(dir.path()), Config::default());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/missions")));
        assert_eq!(dir, PathBuf::from("/tmp/missions"));
    }
}
