//! plateful-spk: Read-aloud narration for recipes
//!
//! Provides text-to-speech playback with:
//! - Sentence-boundary chunking of long text
//! - Sequential chunk playback with play/pause/stop/status controls
//! - Native TTS engines (platform-specific)
//! - Graceful no-op when no speech engine is available

pub mod chunk;
pub mod config;
pub mod engines;
pub mod error;
pub mod narrator;

pub use chunk::chunk_text;
pub use config::{NarrationConfig, VoiceConfig, VoiceGender};
pub use engines::SpeechEngine;
pub use error::SpeechError;
pub use narrator::{NarrationController, PlaybackState};
