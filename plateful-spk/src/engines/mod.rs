//! Speech engine implementations

pub mod native;

use crate::config::{NarrationConfig, VoiceConfig};
use crate::error::SpeechError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Trait for speech engines
///
/// `speak` plays a single utterance and resolves when playback
/// completes (or the utterance is cancelled). `cancel` interrupts the
/// active utterance; `pause`/`resume` return false when the engine
/// cannot suspend playback.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Play one utterance to completion
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> Result<(), SpeechError>;

    /// Cancel the active utterance, if any
    fn cancel(&self);

    /// Suspend the active utterance; false if unsupported
    fn pause(&self) -> bool;

    /// Resume a suspended utterance; false if unsupported
    fn resume(&self) -> bool;

    /// Get available voices (may be empty while the engine populates)
    async fn list_voices(&self) -> Result<Vec<String>, SpeechError>;

    /// Check if engine is available
    fn is_available(&self) -> bool;

    /// Get engine name
    fn name(&self) -> &str;
}

/// Detect a usable speech engine for this host.
///
/// Returns `None` when the host has no speech capability; callers cache
/// the result once at construction instead of re-probing per call.
pub fn detect(config: &NarrationConfig) -> Option<Arc<dyn SpeechEngine>> {
    match native::NativeEngine::new_with_config(config.rate, config.volume, config.pitch) {
        Ok(engine) if engine.is_available() => Some(Arc::new(engine)),
        Ok(_) => {
            warn!("Native speech engine not available on this platform");
            None
        }
        Err(e) => {
            warn!("Failed to initialize native speech engine: {}", e);
            None
        }
    }
}
