//! Configuration management

pub mod phases;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::phases::ScalingPhase;
use crate::utils::error::{EngineError, Result};

/// Environment variable that overrides the configured scaling phase
pub const PHASE_ENV_VAR: &str = "SCALING_PHASE";

/// Top-level engine settings.
///
/// Loaded from a YAML file when present, with the scaling phase overridable
/// through `SCALING_PHASE`. All fields have sensible defaults so the engine
/// works without any configuration file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Operating scale assumed when a request does not specify one
    pub scaling_phase: ScalingPhase,
    /// Region used by convenience entry points that omit a region
    pub default_region: String,
    /// Provider that wins selection unconditionally when set
    pub preferred_provider: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            scaling_phase: ScalingPhase::Launch,
            default_region: "us-east-1".to_string(),
            preferred_provider: None,
        }
    }
}

impl EngineSettings {
    /// Load settings from a YAML file, then apply environment overrides.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let mut settings: EngineSettings = serde_yaml::from_str(&content)?;
        settings.apply_env_overrides()?;
        info!(path = %path.display(), phase = %settings.scaling_phase, "Loaded engine settings");
        Ok(settings)
    }

    /// Build settings from defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut settings = EngineSettings::default();
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(PHASE_ENV_VAR) {
            self.scaling_phase = raw.parse()?;
            debug!(phase = %self.scaling_phase, "Scaling phase overridden from environment");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.scaling_phase, ScalingPhase::Launch);
        assert_eq!(settings.default_region, "us-east-1");
        assert!(settings.preferred_provider.is_none());
    }

    #[test]
    fn test_settings_parse_from_yaml() {
        let yaml = r#"
scalingPhase: growth
defaultRegion: eu-west-1
preferredProvider: linode
"#;
        let settings: EngineSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.scaling_phase, ScalingPhase::Growth);
        assert_eq!(settings.default_region, "eu-west-1");
        assert_eq!(settings.preferred_provider.as_deref(), Some("linode"));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let settings: EngineSettings = serde_yaml::from_str("scalingPhase: scale").unwrap();
        assert_eq!(settings.scaling_phase, ScalingPhase::Scale);
        assert_eq!(settings.default_region, "us-east-1");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = EngineSettings::from_yaml_file("/nonexistent/engine.yaml").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
