//! Judging played notes against target chords and scales.
//!
//! All matching is chroma-based: octave and enharmonic spelling never affect
//! correctness. A wrong answer is a plain `false`, never an error.

use std::collections::BTreeSet;

use crate::chord::ChordSpec;
use crate::note::Note;
use crate::scale::Scale;

// -------------------------------------------------------------------------------------------------

fn chroma_set(notes: &[Note]) -> BTreeSet<u8> {
    notes.iter().map(|n| n.chroma()).collect()
}

fn lowest_chroma(notes: &[Note]) -> Option<u8> {
    notes.iter().min_by_key(|n| n.midi()).map(|n| n.chroma())
}

/// True iff the pitch-class sets of played and target notes are equal: every
/// target class present, no extra classes. Octave duplicates of a target
/// class are fine; an empty input never passes.
pub fn validate_set(played: &[Note], target: &[Note]) -> bool {
    if played.is_empty() {
        return false;
    }
    chroma_set(played) == chroma_set(target)
}

/// True iff the lowest played note has the same pitch class as the lowest
/// target note. This is what enforces inversions: right chord content with
/// the wrong bass fails here.
pub fn validate_bass(played: &[Note], target: &[Note]) -> bool {
    match (lowest_chroma(played), lowest_chroma(target)) {
        (Some(played), Some(target)) => played == target,
        _ => false,
    }
}

/// Combined check for progression questions: chord content and bass must
/// both agree. Generic chord construction exercises use [`validate_set`]
/// alone and accept any inversion.
pub fn validate_progression(played: &[Note], target: &[Note]) -> bool {
    validate_set(played, target) && validate_bass(played, target)
}

/// Judge played notes against a named chord, any inversion accepted.
pub fn validate_chord(played: &[Note], chord: &ChordSpec) -> bool {
    validate_set(played, &chord.notes(4))
}

/// Judge played notes against a scale: all 7 degrees, nothing else.
pub fn validate_scale(played: &[Note], scale: &Scale) -> bool {
    validate_set(played, &scale.notes())
}

/// Re-spell played notes for feedback display: a note whose pitch class
/// occurs in the target takes over the target's letter and accidental
/// (keeping the played octave); anything else falls back to its simplest
/// spelling. Purely cosmetic, correctness is decided before this.
pub fn spell_for_display(played: &[Note], target: &[Note]) -> Vec<Note> {
    played
        .iter()
        .map(|note| {
            match target.iter().find(|t| t.chroma() == note.chroma()) {
                Some(t) => Note::new(t.letter(), t.accidental(), note.octave()),
                None => note.normalized(),
            }
        })
        .collect()
}

// --------------------------------------------------------------------------------------------------
