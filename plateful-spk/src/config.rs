//! Configuration for narration playback

use serde::{Deserialize, Serialize};

/// Narration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Maximum chunk length in characters (engines truncate or fail on
    /// long utterances, so text is split before playback)
    pub max_chunk_chars: usize,

    /// Delay between consecutive chunks in milliseconds (engines race
    /// when fed back-to-back utterances)
    pub inter_chunk_delay_ms: u64,

    /// Voice settings
    pub voice: VoiceConfig,

    /// Speech rate (words per minute, 0-500)
    pub rate: u32,

    /// Volume (0.0-1.0)
    pub volume: f32,

    /// Pitch adjustment (-1.0 to 1.0)
    pub pitch: f32,
}

/// Voice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Voice name/identifier
    pub name: Option<String>,

    /// Language code (e.g., "en-US", "es-ES")
    pub language: String,

    /// Gender preference
    pub gender: Option<VoiceGender>,
}

/// Voice gender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VoiceGender {
    Male,
    Female,
    Neutral,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 150,
            inter_chunk_delay_ms: 150,
            voice: VoiceConfig::default(),
            rate: 175,
            volume: 1.0,
            pitch: 0.0,
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            name: None,
            language: "en-US".to_string(),
            gender: Some(VoiceGender::Female),
        }
    }
}

impl NarrationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_chars == 0 {
            return Err("Max chunk length must be greater than 0".to_string());
        }

        if self.max_chunk_chars > 10_000 {
            return Err("Max chunk length too large (max 10000 chars)".to_string());
        }

        if self.inter_chunk_delay_ms > 10_000 {
            return Err("Inter-chunk delay too large (max 10000 ms)".to_string());
        }

        if self.rate > 500 {
            return Err("Speech rate must be between 0 and 500 WPM".to_string());
        }

        if !(0.0..=1.0).contains(&self.volume) {
            return Err("Volume must be between 0.0 and 1.0".to_string());
        }

        if !(-1.0..=1.0).contains(&self.pitch) {
            return Err("Pitch must be between -1.0 and 1.0".to_string());
        }

        self.voice.validate()?;

        Ok(())
    }
}

impl VoiceConfig {
    /// Validate voice configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.language.is_empty() {
            return Err("Language code cannot be empty".to_string());
        }

        if self.language.len() > 32 {
            return Err("Language code too long (max 32 chars)".to_string());
        }

        // Basic format check: should be like "en-US" or "en"
        if !self
            .language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(
                "Language code contains invalid characters (only alphanumeric and '-' allowed)"
                    .to_string(),
            );
        }

        if let Some(ref name) = self.name {
            if name.is_empty() {
                return Err("Voice name cannot be empty if provided".to_string());
            }

            if name.len() > 256 {
                return Err("Voice name too long (max 256 chars)".to_string());
            }

            if name.chars().any(|c| c == '\0' || c.is_control()) {
                return Err("Voice name contains invalid characters".to_string());
            }
        }

        Ok(())
    }
}
