use anyhow::{Context, Result};
use dwsd_legistar::AgencyProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "DWSD_EVENTS_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (--config flag)
/// 2. DWSD_EVENTS_CONFIG environment variable
/// 3. <user config dir>/dwsd-events/config.toml
/// 4. ./dwsd-events.toml (systems without a config dir)
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(env_path);
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("dwsd-events").join("config.toml"),
        None => PathBuf::from("dwsd-events.toml"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agency: AgencyProfile,
}

impl Config {
    /// Load from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config
            .agency
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwsd_legistar::KnownVenue;
    use dwsd_types::Classification;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[agency]
slug = "det_board_of_water"
classification = "Commission"

[[agency.venues]]
match_text = "cayman"
name = "Cayman Building"
address = "1 Cayman Way Detroit, MI 48201"
"#,
        )?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.agency.slug, "det_board_of_water");
        assert_eq!(config.agency.classification, Classification::Commission);
        assert_eq!(config.agency.timezone, "America/Detroit");
        assert_eq!(config.agency.venues.len(), 1);
        assert_ne!(config.agency.venues[0], KnownVenue::water_board());
        Ok(())
    }

    #[test]
    fn test_bad_timezone_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[agency]\ntimezone = \"Detroit\"\n")?;

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown timezone"));
        Ok(())
    }

    #[test]
    fn test_toml_round_trip() -> Result<()> {
        let text = Config::default().to_toml()?;
        assert!(text.contains("[agency]"));
        assert!(text.contains("[[agency.venues]]"));
        let back: Config = toml::from_str(&text)?;
        assert_eq!(back, Config::default());
        Ok(())
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("/tmp/custom.toml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
