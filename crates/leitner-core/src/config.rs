//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LeitnerError;
use crate::model::{default_boxes, BoxConfig};

/// Top-level leitner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeitnerConfig {
    /// Ordered box layout; index is the box level.
    #[serde(default = "default_boxes")]
    pub boxes: Vec<BoxConfig>,
    /// Where session state is persisted.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Fixed shuffle seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("leitner-state.json")
}

impl Default for LeitnerConfig {
    fn default() -> Self {
        Self {
            boxes: default_boxes(),
            state_path: default_state_path(),
            seed: None,
        }
    }
}

impl LeitnerConfig {
    /// Reject layouts the scheduler cannot run.
    pub fn validate(&self) -> Result<(), LeitnerError> {
        if self.boxes.is_empty() {
            return Err(LeitnerError::Configuration(
                "at least one box must be configured".into(),
            ));
        }
        if let Some((level, b)) = self.boxes.iter().enumerate().find(|(_, b)| b.interval == 0) {
            return Err(LeitnerError::Configuration(format!(
                "box '{}' (level {level}) has interval 0; intervals must be at least 1",
                b.name
            )));
        }
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        from = start + value.len();
    }
    result
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LeitnerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("leitner.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LeitnerConfig::default(),
    };

    if let Ok(state) = std::env::var("LEITNER_STATE") {
        config.state_path = PathBuf::from(state);
    }
    config.state_path = PathBuf::from(resolve_env_vars(&config.state_path.to_string_lossy()));

    Ok(config)
}

/// Parse and validate a TOML configuration string.
pub fn parse_config_str(content: &str) -> Result<LeitnerConfig> {
    let config: LeitnerConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("leitner"))
}
