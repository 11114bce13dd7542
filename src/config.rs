//! Level generation parameters
//!
//! One generator serves every viewport; the differences between a roomy
//! desktop level and a cramped phone level are just numbers in here.

use serde::{Deserialize, Serialize};

use crate::sim::GenerateError;

/// Inclusive count range drawn from during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn to_range(self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }

    pub fn is_valid(self) -> bool {
        self.min <= self.max
    }
}

/// Level size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelPreset {
    #[default]
    Standard,
    /// Fewer platforms and people for small screens
    Compact,
}

impl LevelPreset {
    /// Viewports narrower or shorter than this get the compact preset
    pub const COMPACT_BELOW: f32 = 600.0;

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelPreset::Standard => "Standard",
            LevelPreset::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(LevelPreset::Standard),
            "compact" | "small" => Some(LevelPreset::Compact),
            _ => None,
        }
    }

    /// Pick a preset from the viewport size
    pub fn for_viewport(width: f32, height: f32) -> Self {
        if width < Self::COMPACT_BELOW || height < Self::COMPACT_BELOW {
            LevelPreset::Compact
        } else {
            LevelPreset::Standard
        }
    }

    pub fn config(&self) -> LevelConfig {
        match self {
            LevelPreset::Standard => LevelConfig::default(),
            LevelPreset::Compact => LevelConfig {
                platforms: CountRange::new(4, 6),
                people: CountRange::new(2, 4),
                elephants: CountRange::new(1, 1),
                ..LevelConfig::default()
            },
        }
    }
}

/// Parameters for `sim::generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Floating platforms (the ground is extra)
    pub platforms: CountRange,
    /// Upper bound on people; fewer spawn if platforms run out
    pub people: CountRange,
    pub elephants: CountRange,
    pub elephants_enabled: bool,
    pub power_ups_enabled: bool,
    /// Independent probability of each power-up kind appearing
    pub power_up_chance: f32,
    /// People allowed on the ground; 0 keeps every person on its own platform
    pub max_ground_people: u32,
    /// Chance a person is put on the ground while there is room
    pub ground_person_chance: f32,
    /// Random placement attempts per platform before the deterministic sweep
    pub max_placement_attempts: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            platforms: CountRange::new(6, 10),
            people: CountRange::new(3, 5),
            elephants: CountRange::new(1, 2),
            elephants_enabled: true,
            power_ups_enabled: true,
            power_up_chance: 0.5,
            max_ground_people: 0,
            ground_person_chance: 0.5,
            max_placement_attempts: 64,
        }
    }
}

impl LevelConfig {
    /// Reject configurations the generator cannot honor
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !self.platforms.is_valid() {
            return Err(GenerateError::InvalidConfig("platform range is inverted"));
        }
        if !self.people.is_valid() {
            return Err(GenerateError::InvalidConfig("people range is inverted"));
        }
        if !self.elephants.is_valid() {
            return Err(GenerateError::InvalidConfig("elephant range is inverted"));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(GenerateError::InvalidConfig(
                "power_up_chance must be between 0.0 and 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.ground_person_chance) {
            return Err(GenerateError::InvalidConfig(
                "ground_person_chance must be between 0.0 and 1.0",
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(GenerateError::InvalidConfig(
                "max_placement_attempts must be non-zero",
            ));
        }
        Ok(())
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
