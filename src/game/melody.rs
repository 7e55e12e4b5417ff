// Melody data - immutable (pitch, duration) tables
// The catalog is static: melodies are shared by reference for the whole
// process lifetime and never copied or mutated

use crate::hal::Millis;

// Equal-tempered pitches used by the catalog, in Hz
pub const NOTE_C4: u16 = 262;
pub const NOTE_D4: u16 = 294;
pub const NOTE_E4: u16 = 330;
pub const NOTE_F4: u16 = 349;
pub const NOTE_G4: u16 = 392;
pub const NOTE_A4: u16 = 440;
pub const NOTE_B4: u16 = 494;
pub const NOTE_C5: u16 = 523;
pub const NOTE_D5: u16 = 587;
pub const NOTE_E5: u16 = 659;
pub const NOTE_G5: u16 = 784;

/// A rest: silences the output for the note's duration
pub const REST: u16 = 0;

/// An immutable melody: parallel pitch and duration tables.
///
/// Pitch 0 is a rest. Durations are in milliseconds and always positive.
#[derive(Debug)]
pub struct Melody {
    notes: &'static [u16],
    durations: &'static [Millis],
}

impl Melody {
    /// Build a melody, checking the shape invariants at compile time when
    /// used in a `static`.
    pub const fn new(notes: &'static [u16], durations: &'static [Millis]) -> Self {
        assert!(!notes.is_empty(), "melody must have at least one note");
        assert!(
            notes.len() == durations.len(),
            "notes and durations must have equal length"
        );

        let mut i = 0;
        while i < durations.len() {
            assert!(durations[i] > 0, "note durations must be > 0");
            i += 1;
        }

        Self { notes, durations }
    }

    pub fn note(&self, index: usize) -> u16 {
        self.notes[index]
    }

    pub fn duration(&self, index: usize) -> Millis {
        self.durations[index]
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total playback time in milliseconds
    pub fn total_duration(&self) -> Millis {
        self.durations.iter().sum()
    }
}

/// One short melody per slot, indexed by slot id.
/// Each is pitched differently so slots are distinguishable by ear alone.
pub static SLOT_MELODIES: [Melody; 4] = [
    Melody::new(&[NOTE_C4, NOTE_E4, NOTE_G4], &[120, 120, 160]),
    Melody::new(&[NOTE_D4, NOTE_F4, NOTE_A4], &[120, 120, 160]),
    Melody::new(&[NOTE_E4, NOTE_G4, NOTE_B4], &[120, 120, 160]),
    Melody::new(&[NOTE_F4, NOTE_A4, NOTE_C5], &[120, 120, 160]),
];

/// Ascending jingle played on level completion
pub static LEVEL_UP_JINGLE: Melody = Melody::new(
    &[NOTE_C5, NOTE_E5, NOTE_G5, REST, NOTE_G5],
    &[100, 100, 150, 50, 200],
);

/// Descending jingle played on game over
pub static GAME_OVER_JINGLE: Melody = Melody::new(
    &[NOTE_B4, NOTE_G4, NOTE_E4, NOTE_C4],
    &[150, 150, 150, 400],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melody_accessors() {
        let melody = Melody::new(&[NOTE_A4, REST, NOTE_C5], &[100, 50, 200]);

        assert_eq!(melody.len(), 3);
        assert!(!melody.is_empty());
        assert_eq!(melody.note(0), NOTE_A4);
        assert_eq!(melody.note(1), REST);
        assert_eq!(melody.duration(2), 200);
        assert_eq!(melody.total_duration(), 350);
    }

    #[test]
    fn test_catalog_shape() {
        for melody in &SLOT_MELODIES {
            assert!(melody.len() >= 1);
            assert!(melody.total_duration() > 0);
        }
        assert!(LEVEL_UP_JINGLE.len() >= 1);
        assert!(GAME_OVER_JINGLE.len() >= 1);
    }

    #[test]
    fn test_slot_melodies_are_distinct() {
        // Each slot must be identifiable by its first pitch
        let firsts: Vec<u16> = SLOT_MELODIES.iter().map(|m| m.note(0)).collect();
        for i in 0..firsts.len() {
            for j in (i + 1)..firsts.len() {
                assert_ne!(firsts[i], firsts[j]);
            }
        }
    }
}
