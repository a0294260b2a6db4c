//! Sound effects behind a persisted mute flag.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use storage::SoundPreference;
use tracing::{debug, warn};

use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Start,
    Click,
    Transition,
    Success,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Start,
        SoundEffect::Click,
        SoundEffect::Transition,
        SoundEffect::Success,
    ];

    /// Fixed playback gain for the effect.
    #[must_use]
    pub fn volume(self) -> f32 {
        match self {
            SoundEffect::Start => 0.35,
            SoundEffect::Click => 0.3,
            SoundEffect::Transition => 0.25,
            SoundEffect::Success => 0.4,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SoundEffect::Start => "start",
            SoundEffect::Click => "click",
            SoundEffect::Transition => "transition",
            SoundEffect::Success => "success",
        }
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Host audio backend.
pub trait AudioOutput: Send + Sync {
    /// Whether the effect's buffer is ready to play.
    fn is_loaded(&self, effect: SoundEffect) -> bool;

    /// # Errors
    ///
    /// Returns `AudioError` when the backend cannot play the effect.
    fn play(&self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend for hosts without audio; nothing is ever loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn is_loaded(&self, _effect: SoundEffect) -> bool {
        false
    }

    fn play(&self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

pub struct SoundBoard {
    output: Arc<dyn AudioOutput>,
    preference: SoundPreference,
    muted: AtomicBool,
}

impl SoundBoard {
    /// Read the persisted mute flag once and wrap `output`.
    ///
    /// A store failure is logged and treated as unmuted.
    pub async fn load(output: Arc<dyn AudioOutput>, preference: SoundPreference) -> Self {
        let muted = match preference.is_muted().await {
            Ok(muted) => muted,
            Err(err) => {
                warn!(error = %err, "failed to read sound preference; defaulting to unmuted");
                false
            }
        };
        let missing: Vec<SoundEffect> = SoundEffect::ALL
            .into_iter()
            .filter(|effect| !output.is_loaded(*effect))
            .collect();
        if !missing.is_empty() {
            debug!(?missing, "sound effects not loaded; they will be skipped");
        }
        Self {
            output,
            preference,
            muted: AtomicBool::new(muted),
        }
    }

    /// Effects the backend has ready, in [`SoundEffect::ALL`] order.
    #[must_use]
    pub fn loaded_effects(&self) -> Vec<SoundEffect> {
        SoundEffect::ALL
            .into_iter()
            .filter(|effect| self.output.is_loaded(*effect))
            .collect()
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Play `effect` unless muted or not loaded. Returns whether it played.
    pub fn play(&self, effect: SoundEffect) -> bool {
        if self.is_muted() {
            return false;
        }
        if !self.output.is_loaded(effect) {
            debug!(%effect, "sound effect not loaded");
            return false;
        }
        match self.output.play(effect, effect.volume()) {
            Ok(()) => true,
            Err(err) => {
                debug!(%effect, error = %err, "sound playback failed");
                false
            }
        }
    }

    /// Click, flip the flag and persist it. Returns the new muted state.
    ///
    /// A failed write is logged; the in-memory flag still flips.
    pub async fn toggle_mute(&self) -> bool {
        self.play(SoundEffect::Click);
        let muted = !self.muted.fetch_xor(true, Ordering::Relaxed);
        if let Err(err) = self.preference.set_muted(muted).await {
            warn!(error = %err, muted, "failed to persist sound preference");
        }
        muted
    }
}

impl fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundBoard")
            .field("muted", &self.is_muted())
            .finish_non_exhaustive()
    }
}
