//! Buffered one-shot sound cues awaiting playback.

use bevy::prelude::*;
use log::debug;

/// Sounds gameplay can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The player was hurt.
    Damage,
}

/// One-shot cues requested since the last flush, oldest first.
#[derive(Resource, Default, Debug)]
pub struct AudioQueue {
    cues: Vec<SoundCue>,
}

impl AudioQueue {
    /// Queues `cue` to play once.
    pub fn play_one_shot(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Removes and yields every queued cue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SoundCue> {
        self.cues.drain(..)
    }

    /// Returns `true` when no cue is waiting.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Number of cues waiting.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cues.len()
    }
}

/// Hands queued cues to the audio backend.
///
/// The headless build has no mixer, so cues are only logged and discarded.
pub fn flush_audio_queue_system(mut queue: ResMut<AudioQueue>) {
    for cue in queue.drain() {
        debug!("one-shot sound {cue:?}");
    }
}
