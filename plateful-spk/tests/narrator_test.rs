//! Tests for the narration controller state machine
//!
//! Uses a scripted in-memory engine so playback timing, cancellation,
//! and per-chunk failures are fully controllable.

use async_trait::async_trait;
use parking_lot::Mutex;
use plateful_spk::config::{NarrationConfig, VoiceConfig};
use plateful_spk::engines::SpeechEngine;
use plateful_spk::error::SpeechError;
use plateful_spk::narrator::NarrationController;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Engine that records utterances and plays them on a virtual clock
struct ScriptedEngine {
    spoken: Mutex<Vec<String>>,
    fail_on: HashSet<usize>,
    utterance_ms: u64,
    attempts: AtomicUsize,
    paused: AtomicBool,
    cancel_epoch: watch::Sender<u64>,
}

impl ScriptedEngine {
    fn new(utterance_ms: u64) -> Arc<Self> {
        Self::with_failures(utterance_ms, HashSet::new())
    }

    fn with_failures(utterance_ms: u64, fail_on: HashSet<usize>) -> Arc<Self> {
        let (cancel_epoch, _) = watch::channel(0u64);
        Arc::new(Self {
            spoken: Mutex::new(Vec::new()),
            fail_on,
            utterance_ms,
            attempts: AtomicUsize::new(0),
            paused: AtomicBool::new(false),
            cancel_epoch,
        })
    }

    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl SpeechEngine for ScriptedEngine {
    async fn speak(&self, text: &str, _voice: &VoiceConfig) -> Result<(), SpeechError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&attempt) {
            return Err(SpeechError::Engine("scripted failure".to_string()));
        }

        self.spoken.lock().push(text.to_string());

        let mut rx = self.cancel_epoch.subscribe();
        let epoch = *rx.borrow_and_update();

        let playback = async {
            let mut remaining = self.utterance_ms;
            while remaining > 0 {
                tokio::time::sleep(Duration::from_millis(1)).await;
                if !self.paused.load(Ordering::SeqCst) {
                    remaining -= 1;
                }
            }
        };

        tokio::select! {
            _ = playback => Ok(()),
            _ = rx.wait_for(|e| *e != epoch) => Ok(()),
        }
    }

    fn cancel(&self) {
        self.cancel_epoch.send_modify(|e| *e += 1);
    }

    fn pause(&self) -> bool {
        self.paused.store(true, Ordering::SeqCst);
        true
    }

    fn resume(&self) -> bool {
        self.paused.store(false, Ordering::SeqCst);
        true
    }

    async fn list_voices(&self) -> Result<Vec<String>, SpeechError> {
        Ok(vec!["scripted".to_string()])
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Engine whose cancel cannot reach an utterance already in flight:
/// `speak` runs to completion unless its future is dropped.
struct StubbornEngine {
    spoken: Mutex<Vec<String>>,
    completed: AtomicUsize,
}

impl StubbornEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            spoken: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        })
    }

    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl SpeechEngine for StubbornEngine {
    async fn speak(&self, text: &str, _voice: &VoiceConfig) -> Result<(), SpeechError> {
        self.spoken.lock().push(text.to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn cancel(&self) {}

    fn pause(&self) -> bool {
        false
    }

    fn resume(&self) -> bool {
        false
    }

    async fn list_voices(&self) -> Result<Vec<String>, SpeechError> {
        Ok(vec![])
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "stubborn"
    }
}

fn test_config() -> NarrationConfig {
    NarrationConfig {
        max_chunk_chars: 20,
        inter_chunk_delay_ms: 5,
        ..NarrationConfig::default()
    }
}

fn controller(engine: Arc<ScriptedEngine>) -> NarrationController {
    NarrationController::with_engine(test_config(), engine).unwrap()
}

async fn wait_until_idle(narrator: &NarrationController) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while narrator.is_speaking() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "narration did not finish in time"
        );
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[tokio::test]
async fn test_chunks_play_in_order() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine.clone());

    narrator.speak("Step 1: Boil water. Step 2: Add pasta. Step 3: Drain and serve.");
    assert!(narrator.is_speaking());

    wait_until_idle(&narrator).await;

    assert_eq!(
        engine.spoken(),
        vec![
            "Step 1: Boil water.",
            "Step 2: Add pasta.",
            "Step 3: Drain and serve.",
        ]
    );
    assert!(!narrator.is_speaking());
    assert!(!narrator.is_paused());
}

#[tokio::test]
async fn test_is_speaking_has_no_gap_between_chunks() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine.clone());

    narrator.speak("First sentence here. Second sentence here. Third sentence here.");

    // Poll every millisecond: the moment is_speaking goes false, all
    // three chunks must already have played. A flicker during the
    // inter-chunk delay would exit this loop early.
    wait_until_idle(&narrator).await;
    assert_eq!(engine.spoken().len(), 3);
}

#[tokio::test]
async fn test_second_speak_supersedes_first() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine.clone());

    narrator.speak("Old text one. Old text two. Old text three.");
    narrator.speak("New text one. New text two.");

    wait_until_idle(&narrator).await;

    // Only the second call's chunks ever reach the engine
    assert_eq!(engine.spoken(), vec!["New text one.", "New text two."]);
}

#[tokio::test]
async fn test_speak_mid_playback_cancels_and_rebuilds() {
    let engine = ScriptedEngine::new(20);
    let narrator = controller(engine.clone());

    narrator.speak("Old text one. Old text two. Old text three.");
    // Let the first chunk start
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(engine.spoken().len(), 1);

    narrator.speak("New text one. New text two.");
    wait_until_idle(&narrator).await;

    let spoken = engine.spoken();
    // The old first chunk may have started, but nothing of the old
    // queue plays after the second call
    assert_eq!(
        &spoken[spoken.len() - 2..],
        &["New text one.", "New text two."]
    );
    assert!(!spoken.contains(&"Old text two.".to_string()));
    assert!(!spoken.contains(&"Old text three.".to_string()));
}

#[tokio::test]
async fn test_supersede_interrupts_in_flight_utterance() {
    let engine = StubbornEngine::new();
    let narrator =
        NarrationController::with_engine(test_config(), engine.clone()).unwrap();

    narrator.speak("Old text one. Old text two.");
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(engine.spoken().len(), 1);

    // The engine ignores cancel, so the controller itself must kill
    // the in-flight old utterance when a new speak takes over
    narrator.speak("New text one.");
    wait_until_idle(&narrator).await;

    assert_eq!(engine.spoken(), vec!["Old text one.", "New text one."]);
    assert_eq!(engine.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stop_interrupts_in_flight_utterance() {
    let engine = StubbornEngine::new();
    let narrator =
        NarrationController::with_engine(test_config(), engine.clone()).unwrap();

    narrator.speak("Old text one. Old text two.");
    tokio::time::sleep(Duration::from_millis(5)).await;

    narrator.stop();
    assert!(!narrator.is_speaking());

    // The interrupted utterance never runs to completion and the old
    // queue never advances
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(engine.spoken(), vec!["Old text one."]);
    assert_eq!(engine.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stop_is_immediate_and_idempotent() {
    let engine = ScriptedEngine::new(50);
    let narrator = controller(engine.clone());

    narrator.speak("Long chunk number one. Long chunk number two.");
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert!(narrator.is_speaking());

    narrator.stop();
    assert!(!narrator.is_speaking());
    assert!(!narrator.is_paused());

    // Stopping again is a no-op
    narrator.stop();
    assert!(!narrator.is_speaking());

    // Nothing else plays afterwards
    let count = engine.spoken().len();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(engine.spoken().len(), count);
}

#[tokio::test]
async fn test_engine_error_advances_to_next_chunk() {
    let engine = ScriptedEngine::with_failures(3, HashSet::from([1]));
    let narrator = controller(engine.clone());

    narrator.speak("Chunk number one works. Chunk number two fails. Chunk number three works.");
    wait_until_idle(&narrator).await;

    // Chunk 2's failure is swallowed; chunk 3 still plays
    assert_eq!(
        engine.spoken(),
        vec!["Chunk number one works.", "Chunk number three works."]
    );
    assert!(!narrator.is_speaking());
}

#[tokio::test]
async fn test_pause_and_resume() {
    let engine = ScriptedEngine::new(40);
    let narrator = controller(engine.clone());

    narrator.speak("A fairly long first chunk here.");
    tokio::time::sleep(Duration::from_millis(5)).await;

    narrator.pause();
    assert!(narrator.is_paused());
    assert!(narrator.is_speaking());

    // Paused playback makes no progress
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(narrator.is_speaking());

    narrator.resume();
    assert!(!narrator.is_paused());
    wait_until_idle(&narrator).await;
    assert_eq!(engine.spoken().len(), 1);
}

#[tokio::test]
async fn test_pause_resume_are_noops_when_idle() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine.clone());

    narrator.pause();
    assert!(!narrator.is_paused());
    assert!(!narrator.is_speaking());

    narrator.resume();
    assert!(!narrator.is_paused());
    assert!(!narrator.is_speaking());
}

#[tokio::test]
async fn test_empty_text_is_ignored() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine.clone());

    narrator.speak("");
    narrator.speak("   \n\t  ");

    assert!(!narrator.is_speaking());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(engine.spoken().is_empty());
}

#[tokio::test]
async fn test_missing_capability_degrades_to_noop() {
    let narrator = NarrationController::disabled(test_config());

    assert!(!narrator.is_available());
    narrator.speak("This should go nowhere.");
    assert!(!narrator.is_speaking());

    narrator.stop();
    narrator.pause();
    narrator.resume();
    assert!(!narrator.is_speaking());
    assert!(!narrator.is_paused());
    assert!(narrator.voices().await.is_empty());
}

#[tokio::test]
async fn test_voices_passthrough() {
    let engine = ScriptedEngine::new(3);
    let narrator = controller(engine);
    assert_eq!(narrator.voices().await, vec!["scripted".to_string()]);
}
