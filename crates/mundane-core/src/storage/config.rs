//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Prep and work durations
//! - Speech output settings
//! - An optional workout document replacing the built-in week
//!
//! Configuration is stored at `~/.config/mundane/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::catalog::WorkoutData;
use crate::error::{ConfigError, TimerError};
use crate::session::{SessionTiming, DEFAULT_PREP_SECS, DEFAULT_WORK_SECS};

/// Session timing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_prep_secs")]
    pub prep_secs: u32,
    #[serde(default = "default_work_secs")]
    pub work_secs: u32,
}

/// Speech configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// External text-to-speech program (e.g. `espeak`, `say`).
    /// The announcement text is passed as its only argument.
    #[serde(default)]
    pub command: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mundane/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workout document to use instead of the built-in one.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_prep_secs() -> u32 {
    DEFAULT_PREP_SECS
}
fn default_work_secs() -> u32 {
    DEFAULT_WORK_SECS
}
fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prep_secs: default_prep_secs(),
            work_secs: default_work_secs(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    // Optional strings/paths: "none" clears them.
                    serde_json::Value::Null | serde_json::Value::String(_)
                        if value.eq_ignore_ascii_case("none") =>
                    {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `config.toml` inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            // An unreadable file is left untouched.
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.timing().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Prep/work durations as session timing.
    pub fn timing(&self) -> Result<SessionTiming, TimerError> {
        SessionTiming::new(self.session.prep_secs, self.session.work_secs)
    }

    /// The configured workout document, or the built-in one.
    pub fn workout_data(&self) -> Result<WorkoutData, ConfigError> {
        match &self.data_path {
            Some(path) => WorkoutData::from_path(path),
            None => WorkoutData::builtin(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.session.prep_secs, 5);
        assert_eq!(parsed.session.work_secs, 45);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[session]\nwork_secs = 30\n").unwrap();
        assert_eq!(parsed.session.work_secs, 30);
        assert_eq!(parsed.session.prep_secs, 5);
        assert!(parsed.speech.enabled);
        assert_eq!(parsed.data_path, None);
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.work_secs").as_deref(), Some("45"));
        assert_eq!(cfg.get("speech.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("session.nope"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn apply_parses_by_existing_type() {
        let mut cfg = Config::default();
        cfg.apply("session.prep_secs", "10").unwrap();
        cfg.apply("speech.enabled", "false").unwrap();
        cfg.apply("speech.command", "espeak").unwrap();
        cfg.apply("data_path", "/tmp/week.json").unwrap();
        assert_eq!(cfg.session.prep_secs, 10);
        assert!(!cfg.speech.enabled);
        assert_eq!(cfg.speech.command.as_deref(), Some("espeak"));
        assert_eq!(cfg.data_path, Some(PathBuf::from("/tmp/week.json")));

        cfg.apply("speech.command", "none").unwrap();
        assert_eq!(cfg.speech.command, None);
    }

    #[test]
    fn apply_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert_eq!(
            cfg.apply("session.rest_secs", "15"),
            Err(ConfigError::UnknownKey("session.rest_secs".into()))
        );
        assert!(matches!(
            cfg.apply("session.work_secs", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.apply("session.work_secs", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.session.work_secs = 60;
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().session.work_secs, 60);
    }

    #[test]
    fn load_from_unreadable_file_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut content = b"[session]\nwork_secs = 30\n# ".to_vec();
        content.push(0xff);
        content.push(b'\n');
        std::fs::write(&path, &content).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), content);
    }

    #[test]
    fn builtin_data_when_no_path() {
        let cfg = Config::default();
        assert!(cfg.workout_data().is_ok());
        assert_eq!(cfg.timing().unwrap().work().get(), 45);
    }
}
