//! Native platform speech engine
//!
//! Speaks through the host's command-line synthesizer: espeak-ng on
//! Linux, `say` on macOS, PowerShell SAPI on Windows. Cancellation
//! kills the child process; pause/resume are unsupported and reported
//! as such.

use crate::config::{VoiceConfig, VoiceGender};
use crate::engines::SpeechEngine;
use crate::error::SpeechError;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};

const MAX_TEXT_LENGTH: usize = 100_000;

/// Native speech engine (platform-specific)
pub struct NativeEngine {
    available: bool,
    rate: u32,
    volume: f32,
    pitch: f32,
    // Bumped on cancel; in-flight utterances watch for the change
    cancel_epoch: watch::Sender<u64>,
}

impl NativeEngine {
    pub fn new() -> Result<Self, SpeechError> {
        Self::new_with_config(175, 1.0, 0.0)
    }

    pub fn new_with_config(rate: u32, volume: f32, pitch: f32) -> Result<Self, SpeechError> {
        let available = platform::probe();
        if available {
            info!("Native {} speech engine initialized", platform::NAME);
        } else {
            warn!("Native {} speech engine not found", platform::NAME);
        }

        let (cancel_epoch, _) = watch::channel(0u64);

        Ok(Self {
            available,
            rate,
            volume,
            pitch,
            cancel_epoch,
        })
    }

    fn sanitize(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\r')
            .take(MAX_TEXT_LENGTH)
            .collect()
    }
}

#[async_trait]
impl SpeechEngine for NativeEngine {
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::Engine(format!(
                "{} speech engine not available",
                platform::NAME
            )));
        }

        if text.trim().is_empty() {
            return Err(SpeechError::Narration("Text cannot be empty".to_string()));
        }

        let sanitized = Self::sanitize(text);

        let mut rx = self.cancel_epoch.subscribe();
        let epoch = *rx.borrow_and_update();

        let mut cmd = platform::speak_command(&sanitized, voice, self.rate, self.volume, self.pitch);
        let mut child = cmd
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Engine(format!("Failed to start speech process: {}", e)))?;

        tokio::select! {
            status = child.wait() => {
                match status {
                    Ok(status) if status.success() => Ok(()),
                    Ok(status) => Err(SpeechError::Engine(format!(
                        "Speech process exited with {}", status
                    ))),
                    Err(e) => Err(SpeechError::Engine(format!(
                        "Failed to wait for speech process: {}", e
                    ))),
                }
            }
            _ = async { let _ = rx.wait_for(|e| *e != epoch).await; } => {
                // Cancelled: kill the utterance, reap it, report success
                let _ = child.start_kill();
                let _ = child.wait().await;
                Ok(())
            }
        }
    }

    fn cancel(&self) {
        self.cancel_epoch.send_modify(|e| *e += 1);
    }

    fn pause(&self) -> bool {
        // Command-line synthesizers cannot suspend mid-utterance
        false
    }

    fn resume(&self) -> bool {
        false
    }

    async fn list_voices(&self) -> Result<Vec<String>, SpeechError> {
        if !self.available {
            return Ok(vec![]);
        }
        platform::list_voices().await
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        platform::NAME
    }
}

#[cfg(target_os = "linux")]
mod platform {
    use super::*;
    use tokio::process::Command;

    pub const NAME: &str = "espeak-ng";

    pub fn probe() -> bool {
        std::process::Command::new("espeak-ng")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn speak_command(
        text: &str,
        voice: &VoiceConfig,
        rate: u32,
        volume: f32,
        pitch: f32,
    ) -> Command {
        let mut cmd = Command::new("espeak-ng");

        // Speed in WPM
        cmd.arg("-s").arg(rate.clamp(80, 500).to_string());

        // Amplitude 0-200, 100 is normal
        let amplitude = ((volume * 200.0).round() as u32).min(200);
        cmd.arg("-a").arg(amplitude.to_string());

        // Pitch 0-99, 50 is normal
        let espeak_pitch = ((50.0 + pitch * 49.0).round() as i32).clamp(0, 99);
        cmd.arg("-p").arg(espeak_pitch.to_string());

        cmd.arg("-v").arg(voice_identifier(voice));

        // Text is passed as a single argv entry, never through a shell
        cmd.arg(text);
        cmd.stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());
        cmd
    }

    fn voice_identifier(voice: &VoiceConfig) -> String {
        let base = match voice.name {
            Some(ref name) => name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '+' || *c == '_')
                .take(64)
                .collect(),
            None => voice.language.to_lowercase(),
        };

        // espeak-ng voice variants select gender
        match voice.gender {
            Some(VoiceGender::Female) if !base.contains('+') => format!("{}+f3", base),
            Some(VoiceGender::Male) if !base.contains('+') => format!("{}+m3", base),
            _ => base,
        }
    }

    pub async fn list_voices() -> Result<Vec<String>, SpeechError> {
        let output = Command::new("espeak-ng")
            .arg("--voices")
            .output()
            .await
            .map_err(|e| SpeechError::Engine(format!("Failed to list voices: {}", e)))?;

        if !output.status.success() {
            return Ok(vec![]);
        }

        let voices: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .skip(1) // Skip header
            .filter_map(|line| line.split_whitespace().nth(1).map(|s| s.to_string()))
            .filter(|v| v.len() <= 256 && !v.chars().any(|c| c.is_control()))
            .take(1000)
            .collect();

        Ok(voices)
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use super::*;
    use tokio::process::Command;

    pub const NAME: &str = "say";

    pub fn probe() -> bool {
        std::process::Command::new("say")
            .arg("-v")
            .arg("?")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn speak_command(
        text: &str,
        voice: &VoiceConfig,
        rate: u32,
        _volume: f32,
        _pitch: f32,
    ) -> Command {
        let mut cmd = Command::new("say");

        cmd.arg("-r").arg(rate.min(500).to_string());

        if let Some(ref name) = voice.name {
            let sanitized: String = name
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
                .take(256)
                .collect();
            if !sanitized.is_empty() {
                cmd.arg("-v").arg(sanitized);
            }
        }

        cmd.arg(text);
        cmd.stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());
        cmd
    }

    pub async fn list_voices() -> Result<Vec<String>, SpeechError> {
        let output = Command::new("say")
            .arg("-v")
            .arg("?")
            .output()
            .await
            .map_err(|e| SpeechError::Engine(format!("Failed to list voices: {}", e)))?;

        if !output.status.success() {
            return Ok(vec![]);
        }

        let voices: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.split_whitespace().next().map(|s| s.to_string()))
            .take(1000)
            .collect();

        Ok(voices)
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use super::*;
    use tokio::process::Command;

    pub const NAME: &str = "sapi";

    pub fn probe() -> bool {
        std::process::Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", "exit 0"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn speak_command(
        text: &str,
        voice: &VoiceConfig,
        rate: u32,
        volume: f32,
        _pitch: f32,
    ) -> Command {
        // Escape PowerShell single-quoted string content
        let escaped_text = text.replace('\'', "''");

        let voice_select = match voice.name {
            Some(ref name) => format!("$synth.SelectVoice('{}'); ", name.replace('\'', "''")),
            None => String::new(),
        };

        // SpeechSynthesizer rate is -10..10; map from WPM with 250 as the midpoint
        let synth_rate = (((rate as i32 - 250) * 10) / 250).clamp(-10, 10);
        let synth_volume = ((volume * 100.0).round() as u32).min(100);

        let script = format!(
            "Add-Type -AssemblyName System.Speech; \
             $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
             {}$synth.Rate = {}; $synth.Volume = {}; \
             $synth.Speak('{}'); $synth.Dispose()",
            voice_select, synth_rate, synth_volume, escaped_text
        );

        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
        cmd.stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());
        cmd
    }

    pub async fn list_voices() -> Result<Vec<String>, SpeechError> {
        let script = "Add-Type -AssemblyName System.Speech; \
                      (New-Object System.Speech.Synthesis.SpeechSynthesizer).GetInstalledVoices() \
                      | ForEach-Object { $_.VoiceInfo.Name }";

        let output = Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .output()
            .await
            .map_err(|e| SpeechError::Engine(format!("Failed to list voices: {}", e)))?;

        if !output.status.success() {
            return Ok(vec![]);
        }

        let voices: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .take(1000)
            .collect();

        Ok(voices)
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod platform {
    use super::*;
    use tokio::process::Command;

    pub const NAME: &str = "native";

    pub fn probe() -> bool {
        false
    }

    pub fn speak_command(
        _text: &str,
        _voice: &VoiceConfig,
        _rate: u32,
        _volume: f32,
        _pitch: f32,
    ) -> Command {
        Command::new("false")
    }

    pub async fn list_voices() -> Result<Vec<String>, SpeechError> {
        Ok(vec![])
    }
}
