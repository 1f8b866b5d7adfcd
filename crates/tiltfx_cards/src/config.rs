//! TOML configuration
//!
//! ```toml
//! [tilt]
//! stiffness = 300.0
//! damping = 30.0
//! max_degrees = 12.0
//!
//! [[variants]]
//! key = "neon"
//! glow_intensity = 1.5
//!
//! [[variants]]
//! key = "spotlight"
//! base = "premium"
//! size = "lg"
//! layers = ["gradient", "glow", "border"]
//! ```

use crate::pipeline::TiltConfig;
use crate::variant::{CardSize, HoloIntensity, LayerKind};
use serde::Deserialize;
use tiltfx_animation::SpringConfig;
use tiltfx_core::{Result, TiltError};

/// Overrides for the tilt simulation; unset fields keep the base value
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiltSettings {
    pub stiffness: Option<f32>,
    pub damping: Option<f32>,
    pub mass: Option<f32>,
    pub max_degrees: Option<f32>,
    pub input_range: Option<f32>,
    pub perspective: Option<f32>,
}

impl TiltSettings {
    /// Apply on top of `base` and validate the result
    pub fn apply(&self, base: TiltConfig) -> Result<TiltConfig> {
        let spring = SpringConfig::new(
            self.stiffness.unwrap_or(base.spring.stiffness),
            self.damping.unwrap_or(base.spring.damping),
            self.mass.unwrap_or(base.spring.mass),
        );
        let config = TiltConfig {
            spring,
            max_degrees: self.max_degrees.unwrap_or(base.max_degrees),
            input_range: self.input_range.unwrap_or(base.input_range),
            perspective: self.perspective.unwrap_or(base.perspective),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Adjust a built-in variant or derive a new one
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantOverride {
    pub key: String,
    /// Variant to start from; defaults to `key` when that is built in, else `default`
    pub base: Option<String>,
    pub size: Option<CardSize>,
    /// Multiplier on glow ring alpha
    pub glow_intensity: Option<f32>,
    /// Holographic overlay strength (only meaningful for holographic bases)
    pub intensity: Option<HoloIntensity>,
    /// Full replacement of the layer list, in declaration order
    pub layers: Option<Vec<LayerKind>>,
}

impl VariantOverride {
    pub(crate) fn validate(&self) -> Result<()> {
        let key = self.key.trim();
        if key.is_empty() {
            return Err(self.invalid("variant key must not be empty"));
        }
        if key != self.key || key.chars().any(char::is_whitespace) {
            return Err(self.invalid("variant key must not contain whitespace"));
        }
        if let Some(factor) = self.glow_intensity {
            if !factor.is_finite() || factor < 0.0 {
                return Err(self.invalid(format!(
                    "glow_intensity must be a non-negative number, got {factor}"
                )));
            }
        }
        if let Some(layers) = &self.layers {
            for (i, kind) in layers.iter().enumerate() {
                if layers[..i].contains(kind) {
                    return Err(self.invalid(format!("layer '{kind}' listed twice")));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> TiltError {
        TiltError::InvalidVariant {
            key: self.key.clone(),
            reason: reason.into(),
        }
    }
}

/// Registry section of a configuration file
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub variants: Vec<VariantOverride>,
}

impl RegistryConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TiltError::Toml(e.to_string()))
    }
}
