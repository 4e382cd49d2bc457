//! Harmonic progression sequences expanded into per-key questions.

use crate::error::Result;
use crate::harmony::{self, FunctionalLabel, FunctionalStep, Inversion};
use crate::note::Note;

// -------------------------------------------------------------------------------------------------

/// Fixed key order for progression lessons: circle-of-fifths-ish by practical
/// difficulty, covering sharps and flats without enharmonic duplicates.
pub const KEYS: [&str; 12] = [
    "C", "G", "F", "D", "Bb", "A", "Eb", "E", "Ab", "B", "Db", "F#",
];

/// Chords are voiced around this octave so they sit comfortably on a staff.
const ANCHOR_OCTAVE: i32 = 3;

// -------------------------------------------------------------------------------------------------

/// A declarative progression: ordered functional steps under a stable id.
#[derive(Debug, Copy, Clone)]
pub struct SequenceDef {
    pub id: &'static str,
    pub name: &'static str,
    pub steps: &'static [FunctionalStep],
}

const fn step(label: FunctionalLabel, inversion: Inversion, harmonic: bool) -> FunctionalStep {
    FunctionalStep::new(label, inversion, harmonic)
}

pub const SEQUENCE_A: SequenceDef = SequenceDef {
    id: "seq-a",
    name: "T53-S64-II2-D65-T53",
    steps: &[
        step(FunctionalLabel::T, Inversion::Root53, false),
        step(FunctionalLabel::S, Inversion::SixFour, false),
        step(FunctionalLabel::II, Inversion::Two, true),
        step(FunctionalLabel::D, Inversion::SixFive, false),
        step(FunctionalLabel::T, Inversion::Root53, false),
    ],
};

pub const SEQUENCE_B: SequenceDef = SequenceDef {
    id: "seq-b",
    name: "T6-S53-II65-D2-T6",
    steps: &[
        step(FunctionalLabel::T, Inversion::Six, false),
        step(FunctionalLabel::S, Inversion::Root53, false),
        step(FunctionalLabel::II, Inversion::SixFive, true),
        step(FunctionalLabel::D, Inversion::Two, false),
        step(FunctionalLabel::T, Inversion::Six, false),
    ],
};

pub const SEQUENCE_C: SequenceDef = SequenceDef {
    id: "seq-c",
    name: "T64-S6-II43-D7-T3",
    steps: &[
        step(FunctionalLabel::T, Inversion::SixFour, false),
        step(FunctionalLabel::S, Inversion::Six, false),
        step(FunctionalLabel::II, Inversion::FourThree, true),
        step(FunctionalLabel::D, Inversion::Seven, false),
        step(FunctionalLabel::T, Inversion::Three, false),
    ],
};

pub const SEQUENCE_D: SequenceDef = SequenceDef {
    id: "seq-d",
    name: "T53-S64-II2-VII7-D65-T53",
    steps: &[
        step(FunctionalLabel::T, Inversion::Root53, false),
        step(FunctionalLabel::S, Inversion::SixFour, false),
        step(FunctionalLabel::II, Inversion::Two, true),
        step(FunctionalLabel::VII, Inversion::Seven, true),
        step(FunctionalLabel::D, Inversion::SixFive, false),
        step(FunctionalLabel::T, Inversion::Root53, false),
    ],
};

pub const SEQUENCE_E: SequenceDef = SequenceDef {
    id: "seq-e",
    name: "T6-S53-II65-VII43-D2-T6",
    steps: &[
        step(FunctionalLabel::T, Inversion::Six, false),
        step(FunctionalLabel::S, Inversion::Root53, false),
        step(FunctionalLabel::II, Inversion::SixFive, true),
        step(FunctionalLabel::VII, Inversion::FourThree, true),
        step(FunctionalLabel::D, Inversion::Two, false),
        step(FunctionalLabel::T, Inversion::Six, false),
    ],
};

pub const SEQUENCE_F: SequenceDef = SequenceDef {
    id: "seq-f",
    name: "T64-S6-II43-VII2-D7-T3",
    steps: &[
        step(FunctionalLabel::T, Inversion::SixFour, false),
        step(FunctionalLabel::S, Inversion::Six, false),
        step(FunctionalLabel::II, Inversion::FourThree, true),
        step(FunctionalLabel::VII, Inversion::Two, true),
        step(FunctionalLabel::D, Inversion::Seven, false),
        step(FunctionalLabel::T, Inversion::Three, false),
    ],
};

pub const STANDARD_SEQUENCES: [SequenceDef; 6] = [
    SEQUENCE_A, SEQUENCE_B, SEQUENCE_C, SEQUENCE_D, SEQUENCE_E, SEQUENCE_F,
];

// -------------------------------------------------------------------------------------------------

/// One progression step in one key, with its resolved voicing. Immutable
/// once built; the answer state lives with the calling UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionQuestion {
    /// Major key name, e.g. "Bb".
    pub key: String,
    /// Step position within the sequence.
    pub step_index: usize,
    /// Total step count of the sequence.
    pub total: usize,
    /// Step label for display, e.g. "II2 (harm)".
    pub label: String,
    /// Labels of the whole sequence, for progress display.
    pub sequence_labels: Vec<String>,
    /// Target voicing; the first note is the intended bass.
    pub chord: Vec<Note>,
}

/// Expand a sequence over the standard 12 keys.
pub fn expand(sequence: &SequenceDef) -> Result<Vec<ProgressionQuestion>> {
    expand_for_keys(sequence, &KEYS)
}

/// Expand a sequence into one question per (key, step) pair.
///
/// Iteration is key-major, step-minor and fully deterministic, so question
/// indices are stable across runs and "jump to key" navigation can rely on
/// linear order.
pub fn expand_for_keys(sequence: &SequenceDef, keys: &[&str]) -> Result<Vec<ProgressionQuestion>> {
    let labels: Vec<String> = sequence.steps.iter().map(|s| s.to_string()).collect();
    let mut questions = Vec::with_capacity(keys.len() * sequence.steps.len());
    for key in keys {
        let parsed = Note::try_from(*key)?;
        let anchor = Note::new(parsed.letter(), parsed.accidental(), ANCHOR_OCTAVE);
        for (step_index, step) in sequence.steps.iter().enumerate() {
            let chord = harmony::resolve_in_key(anchor, step)?;
            questions.push(ProgressionQuestion {
                key: (*key).to_string(),
                step_index,
                total: sequence.steps.len(),
                label: labels[step_index].clone(),
                sequence_labels: labels.clone(),
                chord,
            });
        }
    }
    log::debug!(
        "expanded sequence '{}' into {} questions",
        sequence.id,
        questions.len()
    );
    Ok(questions)
}

/// Index of the first question of the given key, by linear scan.
pub fn start_index_for_key(questions: &[ProgressionQuestion], key: &str) -> Option<usize> {
    questions.iter().position(|q| q.key == key)
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validate;

    fn names(notes: &[Note]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn expansion_count_and_order() -> Result<()> {
        for sequence in &STANDARD_SEQUENCES {
            let questions = expand(sequence)?;
            assert_eq!(questions.len(), 12 * sequence.steps.len());
            for (i, question) in questions.iter().enumerate() {
                assert_eq!(question.key, KEYS[i / sequence.steps.len()]);
                assert_eq!(question.step_index, i % sequence.steps.len());
                assert_eq!(question.total, sequence.steps.len());
            }
        }
        Ok(())
    }

    #[test]
    fn expansion_is_deterministic() -> Result<()> {
        assert_eq!(expand(&SEQUENCE_A)?, expand(&SEQUENCE_A)?);
        Ok(())
    }

    #[test]
    fn sequence_a_in_c() -> Result<()> {
        let questions = expand(&SEQUENCE_A)?;
        assert_eq!(names(&questions[0].chord), vec!["C3", "E3", "G3"]);
        assert_eq!(names(&questions[1].chord), vec!["C4", "F4", "A4"]);
        // II2 (harm): lowered submediant Ab, seventh C in the bass
        assert_eq!(names(&questions[2].chord), vec!["C4", "D4", "F4", "Ab4"]);
        assert_eq!(names(&questions[3].chord), vec!["B3", "D4", "F4", "G4"]);
        assert_eq!(names(&questions[4].chord), vec!["C3", "E3", "G3"]);
        Ok(())
    }

    #[test]
    fn harmonic_alteration_does_not_leak() -> Result<()> {
        // S64 right before the harmonic II2 still uses the plain A
        let questions = expand(&SEQUENCE_A)?;
        let s64 = &questions[1];
        assert!(s64.chord.iter().any(|n| n.to_string() == "A4"));
        // and D65 right after is back on the plain scale as well
        let d65 = &questions[3];
        assert!(d65.chord.iter().all(|n| n.to_string() != "Ab4"));
        Ok(())
    }

    #[test]
    fn bass_is_lowest_note() -> Result<()> {
        for sequence in &STANDARD_SEQUENCES {
            for question in expand(sequence)? {
                let lowest = question
                    .chord
                    .iter()
                    .min_by_key(|n| n.midi())
                    .expect("chord is never empty");
                assert_eq!(lowest, &question.chord[0], "{} {}", question.key, question.label);
            }
        }
        Ok(())
    }

    #[test]
    fn rotation_preserves_content_for_all_steps() -> Result<()> {
        use crate::harmony::resolve;
        use crate::scale::Scale;
        for sequence in &STANDARD_SEQUENCES {
            for key in KEYS {
                let parsed = Note::try_from(key)?;
                let anchor = Note::new(parsed.letter(), parsed.accidental(), 3);
                for s in sequence.steps {
                    let scale = Scale::new(anchor, s.scale_type());
                    let rotated = resolve(&scale, s)?;
                    let unrotated: Vec<Note> = s
                        .structure()
                        .iter()
                        .map(|offset| scale.note_at_degree(s.label.root_degree() + offset))
                        .collect();
                    assert!(
                        validate::validate_set(&rotated, &unrotated),
                        "{} {}",
                        key,
                        s
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn key_navigation() -> Result<()> {
        let questions = expand(&SEQUENCE_B)?;
        assert_eq!(start_index_for_key(&questions, "C"), Some(0));
        assert_eq!(
            start_index_for_key(&questions, "Eb"),
            Some(6 * SEQUENCE_B.steps.len())
        );
        assert_eq!(start_index_for_key(&questions, "C#"), None);
        Ok(())
    }
}
