//! Gameplay settings and difficulty presets
//!
//! The four knobs are read live by the simulation every frame. They are not
//! persisted; only the best score survives a reload.

use serde::{Deserialize, Serialize};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Gravity pulled off the vertical velocity each frame
    pub fn gravity(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.0014,
            Difficulty::Normal => 0.0018,
            Difficulty::Hard => 0.0024,
        }
    }

    /// Upward velocity set by a jump
    pub fn jump_force(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.045,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.055,
        }
    }

    /// World units scrolled per frame
    pub fn speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.04,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.07,
        }
    }

    /// Vertical clearance between barriers
    pub fn gap_size(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.5,
            Difficulty::Normal => 2.0,
            Difficulty::Hard => 1.6,
        }
    }
}

/// Live-tunable gameplay knobs
///
/// No validation happens here; the sliders bound the values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub gravity: f32,
    pub jump_force: f32,
    pub speed: f32,
    pub gap_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: Difficulty) -> Self {
        Self {
            gravity: preset.gravity(),
            jump_force: preset.jump_force(),
            speed: preset.speed(),
            gap_size: preset.gap_size(),
        }
    }

    /// Overwrite all four knobs at once
    pub fn apply_preset(&mut self, preset: Difficulty) {
        *self = Self::from_preset(preset);
    }

    /// Set a single knob by its slider name. Returns false for unknown names.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        match name {
            "gravity" => self.gravity = value,
            "jumpForce" | "jump_force" => self.jump_force = value,
            "speed" => self.speed = value,
            "gapSize" | "gap_size" => self.gap_size = value,
            _ => return false,
        }
        true
    }

    /// Slider display text, formatted to each knob's precision
    pub fn display_value(&self, name: &str) -> Option<String> {
        match name {
            "gravity" => Some(format!("{:.4}", self.gravity)),
            "jumpForce" | "jump_force" => Some(format!("{:.2}", self.jump_force)),
            "speed" => Some(format!("{:.2}", self.speed)),
            "gapSize" | "gap_size" => Some(format!("{:.1}", self.gap_size)),
            _ => None,
        }
    }
}
