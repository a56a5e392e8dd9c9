//! Game settings and preferences
//!
//! Presentation options and key bindings. Read once at startup from the host
//! page; nothing here is ever written back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::Control;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Whether to draw the soft radial glows behind ship, bullets and rocks
    pub fn glow_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => false,
            QualityPreset::High => true,
        }
    }

    /// Whether to draw the background grid
    pub fn grid_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Mapping from `KeyboardEvent.code` to game control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<String, Control>);

impl Default for KeyBindings {
    fn default() -> Self {
        let pairs = [
            ("ArrowLeft", Control::RotateLeft),
            ("ArrowRight", Control::RotateRight),
            ("ArrowUp", Control::Thrust),
            ("Space", Control::Fire),
            ("KeyR", Control::Restart),
        ];
        Self(
            pairs
                .into_iter()
                .map(|(code, control)| (code.to_string(), control))
                .collect(),
        )
    }
}

impl KeyBindings {
    /// Control bound to a key code, if any
    pub fn control_for(&self, code: &str) -> Option<Control> {
        self.0.get(code).copied()
    }

    /// Display name of a key bound to `control` ("KeyR" → "R")
    pub fn key_label(&self, control: Control) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, bound)| **bound == control)
            .map(|(code, _)| {
                code.strip_prefix("Key")
                    .or_else(|| code.strip_prefix("Digit"))
                    .unwrap_or(code)
            })
    }

    /// Every control must be reachable from at least one key
    fn validate(&self) -> Result<(), ConfigError> {
        for control in Control::ALL {
            if !self.0.values().any(|bound| *bound == control) {
                return Err(ConfigError::Invalid {
                    field: "bindings",
                    reason: "every control needs at least one key",
                });
            }
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Draw score and lives on the canvas
    pub show_hud: bool,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Keyboard layout
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            show_hud: true,
            seed: None,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Parse settings overrides; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.bindings.validate()?;
        Ok(settings)
    }

    /// Settings from optional JSON, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings (quality: {})", settings.quality.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }
}
