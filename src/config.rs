//! Configuration loading for moltmsg.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_SKILL_PATH: &str = "~/.openclaw/workspace/moltbook-skill";
const DEFAULT_REGISTRY_PATH: &str = "~/.openclaw/workspace/moltbook-agent-registry/agents.json";
const DEFAULT_SCRIPT: &str = "scripts/moltbook_api.sh";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Get the moltmsg home directory (~/.moltmsg).
pub fn get_home_dir() -> Result<PathBuf> {
    let home = directories::UserDirs::new()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

    Ok(home.home_dir().join(".moltmsg"))
}

/// Get the settings file path.
pub fn get_settings_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join("settings.json"))
}

/// Load settings from ~/.moltmsg/settings.json, falling back to defaults
/// when the file does not exist.
pub fn load_settings() -> Result<Settings> {
    let path = get_settings_path()?;
    load_settings_from(&path)
}

/// Load settings from an explicit path.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Invalid settings file {}: {}", path.display(), e))
    })?;

    validate_settings(&settings)?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.timeout_secs == 0 {
        return Err(Error::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }
    if settings.script.trim().is_empty() {
        return Err(Error::Config("script must not be empty".to_string()));
    }
    Ok(())
}

/// Expand a leading `~` against the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match directories::UserDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Messenger settings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    /// Directory of the Moltbook skill; platform commands run from here.
    #[serde(default = "default_skill_path")]
    pub skill_path: PathBuf,

    /// Agent registry JSON file.
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,

    /// Platform script, relative to `skill_path`.
    #[serde(default = "default_script")]
    pub script: String,

    /// Upper bound for a single platform invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_skill_path() -> PathBuf {
    PathBuf::from(DEFAULT_SKILL_PATH)
}

fn default_registry_path() -> PathBuf {
    PathBuf::from(DEFAULT_REGISTRY_PATH)
}

fn default_script() -> String {
    DEFAULT_SCRIPT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skill_path: default_skill_path(),
            registry_path: default_registry_path(),
            script: default_script(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Apply command-line overrides on top of the loaded file.
    pub fn with_overrides(
        mut self,
        skill_path: Option<PathBuf>,
        registry_path: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        if let Some(path) = skill_path {
            self.skill_path = path;
        }
        if let Some(path) = registry_path {
            self.registry_path = path;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        validate_settings(&self)?;
        Ok(self)
    }

    pub fn skill_dir(&self) -> PathBuf {
        expand_home(&self.skill_path)
    }

    pub fn registry_file(&self) -> PathBuf {
        expand_home(&self.registry_path)
    }

    pub fn script_path(&self) -> PathBuf {
        self.skill_dir().join(&self.script)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
