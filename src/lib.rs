//! Music theory engine for interactive harmony and ear-training lessons.
//!
//! The crate computes, it does not render: collaborators hand in note name
//! arrays in scientific pitch notation (`"C#4"`, `"Bb3"`) and get back
//! resolved voicings, validation verdicts and multiple-choice option lists.
//! Staff drawing, MIDI capture and audio stay outside.
//!
//! ### Example
//!
//! ```rust
//! use solfege::{progression, validate};
//!
//! let questions = progression::expand(&progression::SEQUENCE_A)?;
//! let target = &questions[0].chord; // T53 in C: [C3, E3, G3]
//!
//! let played = solfege::note::parse_notes(&["C3", "G3", "E4"])?;
//! assert!(validate::validate_set(&played, target));
//! assert!(validate::validate_bass(&played, target));
//! # Ok::<(), solfege::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod note;
pub use note::{Accidental, Letter, Note};

pub mod interval;
pub use interval::{Interval, Quality};

pub mod scale;
pub use scale::{Scale, ScaleType};

pub mod chord;
pub use chord::{ChordQuality, ChordSpec};

pub mod harmony;
pub use harmony::{FunctionalLabel, FunctionalStep, Inversion};

pub mod progression;
pub use progression::{ProgressionQuestion, SequenceDef, KEYS, STANDARD_SEQUENCES};

pub mod validate;

pub mod exercise;
pub use exercise::{ExerciseKind, ExerciseQuestion, Shuffler};

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use crate::{exercise, note::parse_notes, progression, validate};

    // end-to-end: expand a lesson, answer a question, get feedback spelling
    #[test]
    fn lesson_round_trip() -> crate::Result<()> {
        let questions = progression::expand(&progression::SEQUENCE_D)?;
        assert_eq!(questions.len(), 12 * 6);

        // jump to Eb major, step 3 is VII7 (harm)
        let start = progression::start_index_for_key(&questions, "Eb").unwrap();
        let question = &questions[start + 3];
        assert_eq!(question.label, "VII7 (harm)");

        // VII7 (harm) in Eb is D-F-Ab-Cb; play it with enharmonic spellings
        // and an octave duplicate
        let played = parse_notes(&["D4", "F4", "G#4", "B4", "D5"])?;
        assert!(validate::validate_set(&played, &question.chord));
        assert!(validate::validate_bass(&played, &question.chord));

        // feedback respells G# as the target's Ab
        let spelled = validate::spell_for_display(&played, &question.chord);
        assert!(spelled.iter().any(|n| n.to_string() == "Ab4"));
        Ok(())
    }

    #[test]
    fn seeded_exercises_are_deterministic() {
        let mut a = exercise::Shuffler::new(Some(99));
        let mut b = exercise::Shuffler::new(Some(99));
        assert_eq!(
            exercise::degree_identification(&mut a),
            exercise::degree_identification(&mut b)
        );
    }
}
