// Melody player - advances the active melody one note at a time
// Purely clock-comparison driven; never sleeps or blocks

use crate::game::melody::Melody;
use crate::hal::{elapsed, AudioOutput, Millis};

/// Active playback state (which melody, where in it, when the note started)
#[derive(Debug, Clone, Copy)]
struct Playback {
    melody: &'static Melody,
    index: usize,
    note_started: Millis,
}

/// Non-blocking melody player over a single tone output.
///
/// Exactly one melody is active at a time; starting a new one discards the
/// remainder of the old one (no queueing). The clock value is read once per
/// tick by the caller and passed in.
pub struct MelodyPlayer {
    audio: Box<dyn AudioOutput>,
    current: Option<Playback>,
}

impl MelodyPlayer {
    pub fn new(audio: Box<dyn AudioOutput>) -> Self {
        Self {
            audio,
            current: None,
        }
    }

    /// Begin playback, immediately sounding the melody's first note.
    ///
    /// Any melody already playing is dropped mid-note.
    pub fn start_melody(&mut self, melody: &'static Melody, now: Millis) {
        self.current = Some(Playback {
            melody,
            index: 0,
            note_started: now,
        });
        self.emit(melody.note(0), melody.duration(0));
    }

    /// Advance playback against the clock.
    ///
    /// Call exactly once per tick. On note expiry the next note is sounded;
    /// past the last note the output is silenced and the player goes idle.
    pub fn update(&mut self, now: Millis) {
        let Some(playback) = self.current.as_mut() else {
            return;
        };

        if elapsed(now, playback.note_started) < playback.melody.duration(playback.index) {
            return;
        }

        playback.index += 1;
        if playback.index < playback.melody.len() {
            playback.note_started = now;
            let note = playback.melody.note(playback.index);
            let duration = playback.melody.duration(playback.index);
            self.emit(note, duration);
        } else {
            log::debug!("melody finished");
            self.current = None;
            self.audio.silence();
        }
    }

    /// Whether a melody is active
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Single-shot tone pass-through, independent of melody state.
    ///
    /// Does not touch the active melody; calling this mid-playback overlaps
    /// audibly at the caller's risk.
    pub fn play_tone(&mut self, note: u16, duration: Millis) {
        self.emit(note, duration);
    }

    /// Silence the output and go idle regardless of position
    pub fn stop_melody(&mut self) {
        self.current = None;
        self.audio.silence();
    }

    fn emit(&mut self, note: u16, duration: Millis) {
        if note > 0 {
            self.audio.sound(note, duration);
        } else {
            self.audio.silence();
        }
    }
}
