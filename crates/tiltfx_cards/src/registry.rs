//! Card variant registry
//!
//! Maps variant keys to recipes. Lookups never fail: an unknown key resolves to
//! the `default` variant. The registry is read-only once built; the
//! process-wide instance from [`CardVariantRegistry::global`] is built on first
//! use.

use crate::config::{RegistryConfig, VariantOverride};
use crate::palette::ThemePalette;
use crate::variant::{CardVariant, HoloIntensity};
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};
use tiltfx_core::Result;

/// Key every registry must contain
pub const DEFAULT_VARIANT: &str = "default";

/// Built-in variant keys, in display order
pub const BUILTIN_VARIANTS: &[&str] = &[
    "default",
    "premium",
    "glass",
    "neon",
    "gradient",
    "holographic",
];

static GLOBAL_REGISTRY: OnceLock<CardVariantRegistry> = OnceLock::new();

/// Read-only table of card variants
#[derive(Clone, Debug)]
pub struct CardVariantRegistry {
    variants: FxHashMap<String, Arc<CardVariant>>,
    default: Arc<CardVariant>,
}

impl CardVariantRegistry {
    /// Built-in variants on the dark palette
    pub fn builtin() -> Self {
        Self::with_palette(&ThemePalette::dark())
    }

    /// Built-in variants on a custom palette
    pub fn with_palette(palette: &ThemePalette) -> Self {
        let default = Arc::new(CardVariant::default_variant(palette));
        let mut variants = FxHashMap::default();
        for variant in [
            CardVariant::premium(palette),
            CardVariant::glass(palette),
            CardVariant::neon(palette),
            CardVariant::gradient(palette),
            CardVariant::holographic(palette, HoloIntensity::Medium),
        ] {
            variants.insert(variant.key.clone(), Arc::new(variant));
        }
        variants.insert(DEFAULT_VARIANT.to_string(), Arc::clone(&default));
        Self { variants, default }
    }

    /// Built-in variants adjusted by configuration
    ///
    /// Overrides are applied in file order, so a later entry may derive from an
    /// earlier one.
    pub fn from_config(palette: &ThemePalette, config: &RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_palette(palette);
        for entry in &config.variants {
            registry.apply_override(palette, entry)?;
        }
        Ok(registry)
    }

    fn apply_override(&mut self, palette: &ThemePalette, entry: &VariantOverride) -> Result<()> {
        entry.validate()?;

        let base_key = match &entry.base {
            Some(base) => base.as_str(),
            None if self.variants.contains_key(&entry.key) => entry.key.as_str(),
            None => DEFAULT_VARIANT,
        };
        let base = self
            .variants
            .get(base_key)
            .ok_or_else(|| entry.invalid(format!("unknown base variant '{base_key}'")))?;

        let mut variant = match entry.intensity {
            Some(intensity) if base.key == "holographic" => {
                CardVariant::holographic(palette, intensity)
            }
            Some(_) => {
                return Err(entry.invalid("intensity only applies to holographic variants"));
            }
            None => CardVariant::clone(base),
        };
        variant.key = entry.key.clone();
        if let Some(size) = entry.size {
            variant.size = size;
        }
        if let Some(factor) = entry.glow_intensity {
            variant.glow = variant.glow.intensified(factor);
        }
        if let Some(layers) = &entry.layers {
            variant = variant.with_layers(layers);
        }

        tracing::debug!(
            key = %entry.key,
            base = base_key,
            layers = variant.layers.len(),
            "registered card variant"
        );

        let variant = Arc::new(variant);
        if entry.key == DEFAULT_VARIANT {
            self.default = Arc::clone(&variant);
        }
        self.variants.insert(entry.key.clone(), variant);
        Ok(())
    }

    /// The process-wide built-in registry
    pub fn global() -> &'static CardVariantRegistry {
        GLOBAL_REGISTRY.get_or_init(Self::builtin)
    }

    /// Variant for `key`, or the default variant when unknown
    pub fn lookup(&self, key: &str) -> &CardVariant {
        self.lookup_shared_ref(key)
    }

    /// Shared handle to the variant for `key` (same fallback as [`lookup`](Self::lookup))
    pub fn lookup_shared(&self, key: &str) -> Arc<CardVariant> {
        Arc::clone(self.lookup_shared_ref(key))
    }

    fn lookup_shared_ref(&self, key: &str) -> &Arc<CardVariant> {
        match self.variants.get(key) {
            Some(variant) => variant,
            None => {
                tracing::debug!(key, "unknown card variant, using default");
                &self.default
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variants.contains_key(key)
    }

    /// All keys: built-ins in display order, then configured ones sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut extra: Vec<&str> = self
            .variants
            .keys()
            .map(String::as_str)
            .filter(|k| !BUILTIN_VARIANTS.contains(k))
            .collect();
        extra.sort_unstable();
        BUILTIN_VARIANTS
            .iter()
            .copied()
            .filter(|k| self.variants.contains_key(*k))
            .chain(extra)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for CardVariantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
