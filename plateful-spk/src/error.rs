//! Error types for plateful-spk

use plateful_core::Error as CoreError;
use thiserror::Error;

/// Speech playback errors
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Narration error: {0}")]
    Narration(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SpeechError> for CoreError {
    fn from(err: SpeechError) -> Self {
        CoreError::Speech(err.to_string())
    }
}
