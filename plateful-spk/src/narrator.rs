//! Narration controller: sequential chunk playback
//!
//! Owns the process-wide narration state. One controller instance is
//! constructed at application start and handed to consumers; consumers
//! observe playback through `is_speaking`/`is_paused` and never touch
//! the engine directly.

use crate::chunk;
use crate::config::NarrationConfig;
use crate::engines::{self, SpeechEngine};
use crate::error::SpeechError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Playback state, owned exclusively by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Speaking,
    Paused,
}

struct Shared {
    state: Mutex<PlaybackState>,
    queue: Mutex<VecDeque<String>>,
    // Bumped by every speak/stop; playback tasks carry the value they
    // were spawned with and go inert once it moves on. A watch channel
    // so an in-flight engine call can be raced against supersession.
    generation: watch::Sender<u64>,
}

/// Text-to-speech playback controller
///
/// `speak` replaces any in-progress narration (cancel-then-rebuild);
/// chunks from two overlapping calls never interleave. All operations
/// are no-ops when the host has no speech capability.
pub struct NarrationController {
    config: Arc<NarrationConfig>,
    engine: Option<Arc<dyn SpeechEngine>>,
    shared: Arc<Shared>,
}

impl NarrationController {
    /// Create a controller, probing the host for a speech engine once.
    pub fn new(config: NarrationConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;
        let engine = engines::detect(&config);
        if engine.is_none() {
            warn!("No speech engine available; narration will be disabled");
        }
        Ok(Self::build(config, engine))
    }

    /// Create a controller with an explicit engine (injection seam)
    pub fn with_engine(
        config: NarrationConfig,
        engine: Arc<dyn SpeechEngine>,
    ) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;
        Ok(Self::build(config, Some(engine)))
    }

    /// Create a controller with no engine; every operation degrades to
    /// a logged no-op. For hosts that want narration wiring regardless
    /// of capability.
    pub fn disabled(config: NarrationConfig) -> Self {
        Self::build(config, None)
    }

    fn build(config: NarrationConfig, engine: Option<Arc<dyn SpeechEngine>>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            shared: Arc::new(Shared {
                state: Mutex::new(PlaybackState::Idle),
                queue: Mutex::new(VecDeque::new()),
                generation: watch::channel(0).0,
            }),
        }
    }

    /// Start narrating `text`, cancelling any narration in progress.
    ///
    /// Returns immediately; playback runs on a spawned task. Must be
    /// called within a tokio runtime.
    pub fn speak(&self, text: &str) {
        let Some(engine) = self.engine.as_ref() else {
            warn!("Speech capability missing; ignoring narration request");
            return;
        };

        if text.trim().is_empty() {
            warn!("Empty narration text; nothing to speak");
            return;
        }

        let chunks = chunk::chunk_text(text, self.config.max_chunk_chars);
        if chunks.is_empty() {
            warn!("Narration text produced no speakable chunks");
            return;
        }

        // The new call is authoritative: retire older tasks, cancel the
        // active utterance, then install the new queue.
        let mut token = 0;
        self.shared.generation.send_modify(|g| {
            *g += 1;
            token = *g;
        });
        engine.cancel();

        {
            let mut queue = self.shared.queue.lock();
            queue.clear();
            queue.extend(chunks);
            debug!(chunks = queue.len(), "Starting narration");
        }
        *self.shared.state.lock() = PlaybackState::Speaking;

        let shared = Arc::clone(&self.shared);
        let engine = Arc::clone(engine);
        let config = Arc::clone(&self.config);
        tokio::spawn(async move {
            playback_loop(shared, engine, config, token).await;
        });
    }

    /// Cancel narration and discard the queue. Idempotent; safe to call
    /// from any state.
    pub fn stop(&self) {
        self.shared.generation.send_modify(|g| *g += 1);
        if let Some(engine) = self.engine.as_ref() {
            engine.cancel();
        }
        self.shared.queue.lock().clear();
        let mut state = self.shared.state.lock();
        if *state != PlaybackState::Idle {
            debug!("Narration stopped");
        }
        *state = PlaybackState::Idle;
    }

    /// Suspend playback. Best effort: a no-op when idle or when the
    /// engine cannot pause.
    pub fn pause(&self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let mut state = self.shared.state.lock();
        if *state == PlaybackState::Speaking && engine.pause() {
            *state = PlaybackState::Paused;
        }
    }

    /// Resume suspended playback. No-op unless paused.
    pub fn resume(&self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let mut state = self.shared.state.lock();
        if *state == PlaybackState::Paused && engine.resume() {
            *state = PlaybackState::Speaking;
        }
    }

    /// True from the first chunk's start to the last chunk's completion,
    /// including inter-chunk delays and paused stretches.
    pub fn is_speaking(&self) -> bool {
        let state = *self.shared.state.lock();
        matches!(state, PlaybackState::Speaking | PlaybackState::Paused)
            || !self.shared.queue.lock().is_empty()
    }

    /// True while playback is suspended
    pub fn is_paused(&self) -> bool {
        *self.shared.state.lock() == PlaybackState::Paused
    }

    /// Voices offered by the engine; empty when no engine is available
    /// or the engine has not populated its voice list yet.
    pub async fn voices(&self) -> Vec<String> {
        match self.engine.as_ref() {
            Some(engine) => engine.list_voices().await.unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Whether the host has a speech capability at all
    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }
}

async fn playback_loop(
    shared: Arc<Shared>,
    engine: Arc<dyn SpeechEngine>,
    config: Arc<NarrationConfig>,
    token: u64,
) {
    let mut superseded = shared.generation.subscribe();
    loop {
        // Dequeue under the lock so a retired task can never pop from a
        // queue that a newer speak() installed.
        let next = {
            let mut queue = shared.queue.lock();
            if *shared.generation.borrow() != token {
                return;
            }
            queue.pop_front()
        };

        let Some(text) = next else {
            // Natural completion; only the live task may go idle
            let mut state = shared.state.lock();
            if *shared.generation.borrow() == token {
                *state = PlaybackState::Idle;
                debug!("Narration complete");
            }
            return;
        };

        // Race the utterance against supersession: a speak/stop landing
        // after the pop must still kill this chunk, even on an engine
        // whose cancel cannot reach an utterance it has not seen yet.
        tokio::select! {
            result = engine.speak(&text, &config.voice) => {
                if let Err(e) = result {
                    // Do not retry the failed chunk; advance after a short
                    // breather so a struggling engine is not hammered
                    warn!("Chunk playback failed, advancing to next: {}", e);
                }
            }
            _ = superseded.wait_for(|g| *g != token) => {
                engine.cancel();
                return;
            }
        }

        if *shared.generation.borrow() != token {
            return;
        }

        if !shared.queue.lock().is_empty() {
            tokio::time::sleep(Duration::from_millis(config.inter_chunk_delay_ms)).await;
        }
    }
}
