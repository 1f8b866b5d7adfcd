//! tiltfx configuration file handling
//!
//! `tiltfx.toml` tunes the tilt simulation and the variant registry:
//!
//! ```toml
//! [tilt]
//! stiffness = 300.0
//! damping = 30.0
//!
//! [[variants]]
//! key = "spotlight"
//! base = "premium"
//! layers = ["gradient", "glow", "border"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tiltfx_cards::{
    CardVariantRegistry, RegistryConfig, ThemePalette, TiltConfig, TiltSettings, VariantOverride,
};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tiltfx.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiltfxConfig {
    #[serde(default)]
    pub tilt: TiltSettings,
    #[serde(default)]
    pub variants: Vec<VariantOverride>,
}

impl TiltfxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the explicit config, or `tiltfx.toml` when present, or defaults
    ///
    /// An explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            let config = Self::load(&default_path)?;
            return Ok((config, Some(default_path)));
        }

        Ok((Self::default(), None))
    }

    /// Card tilt preset with the `[tilt]` overrides applied
    pub fn tilt_config(&self) -> Result<TiltConfig> {
        self.tilt
            .apply(TiltConfig::card())
            .context("Invalid [tilt] section")
    }

    /// Built-in variants with the `[[variants]]` overrides applied
    pub fn registry(&self) -> Result<CardVariantRegistry> {
        let overrides = RegistryConfig {
            variants: self.variants.clone(),
        };
        CardVariantRegistry::from_config(&ThemePalette::dark(), &overrides)
            .context("Invalid [[variants]] section")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TiltfxConfig::parse("").unwrap();
        assert_eq!(config.tilt_config().unwrap(), TiltConfig::card());
        assert_eq!(config.registry().unwrap().len(), 6);
    }

    #[test]
    fn test_full_config() {
        let config = TiltfxConfig::parse(
            r#"
            [tilt]
            stiffness = 300.0
            damping = 30.0

            [[variants]]
            key = "spotlight"
            base = "premium"
            layers = ["glow", "border"]
            "#,
        )
        .unwrap();
        assert_eq!(config.tilt_config().unwrap(), TiltConfig::testimonial());
        let registry = config.registry().unwrap();
        assert!(registry.contains("spotlight"));
    }

    #[test]
    fn test_invalid_sections_reported() {
        assert!(TiltfxConfig::parse("[render]\nfps = 60").is_err());

        let config = TiltfxConfig::parse("[tilt]\nmax_degrees = 120.0").unwrap();
        let err = config.tilt_config().unwrap_err();
        assert!(format!("{err:#}").contains("max_degrees"));
    }

    #[test]
    fn test_missing_explicit_path() {
        let missing = Path::new("definitely/not/here/tiltfx.toml");
        assert!(TiltfxConfig::discover(Some(missing)).is_err());
    }
}
