//! Musical scales with spelled degrees, derived from a root note and type.

use std::fmt::Display;

use crate::error::{Error, Result};
use crate::note::{Accidental, Note};

// -------------------------------------------------------------------------------------------------

/// Supported 7-note scale types.
///
/// Harmonic major is a major scale with the submediant lowered by one
/// semitone, used for the pre-dominant chords (II, VII) of the classical
/// progressions.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, derive_more::Display)]
pub enum ScaleType {
    #[display("major")]
    Major,
    #[display("natural minor")]
    NaturalMinor,
    #[display("harmonic major")]
    HarmonicMajor,
}

impl ScaleType {
    /// Semitone offsets of the 7 degrees from the root.
    pub fn offsets(self) -> [i32; 7] {
        match self {
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMajor => [0, 2, 4, 5, 7, 8, 11],
        }
    }

    fn resolve_synonyms(name: &str) -> String {
        name.split(' ')
            .filter(|v| !v.is_empty())
            .map(|v| {
                let v = v.to_ascii_lowercase();
                match v.as_str() {
                    "maj" => "major".to_string(),
                    "min" => "minor".to_string(),
                    "nat" => "natural".to_string(),
                    "harm" => "harmonic".to_string(),
                    _ => v,
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<&str> for ScaleType {
    type Error = Error;

    /// Try converting the given string to a known scale type.
    fn try_from(name: &str) -> Result<Self> {
        match Self::resolve_synonyms(name).as_str() {
            "major" => Ok(ScaleType::Major),
            "minor" | "natural minor" => Ok(ScaleType::NaturalMinor),
            "harmonic major" => Ok(ScaleType::HarmonicMajor),
            _ => Err(Error::UnsupportedScaleType(name.to_string())),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A 7-note scale anchored at a spelled root note.
///
/// Stateless and regenerable from (root, type); never mutated. Degrees are
/// spelled by letter sequence, so the 6th degree of C harmonic major comes
/// out as Ab, not G#.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Scale {
    root: Note,
    kind: ScaleType,
}

impl Scale {
    pub fn new(root: Note, kind: ScaleType) -> Self {
        Self { root, kind }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn kind(&self) -> ScaleType {
        self.kind
    }

    /// Note at the given 0-based degree. Degrees beyond 6 wrap modulo 7 with
    /// an octave shift of 12 semitones per wrap.
    pub fn note_at_degree(&self, degree: usize) -> Note {
        let wrap = (degree / 7) as i32;
        let index = degree % 7;
        let letter = self.root.letter().step(index);
        let octave =
            self.root.octave() + ((self.root.letter().index() + index) / 7) as i32 + wrap;
        let target = self.root.midi() + self.kind.offsets()[index] + wrap * 12;
        let natural = Note::new(letter, Accidental::Natural, octave);
        match Accidental::from_alter(target - natural.midi()) {
            Some(accidental) => Note::new(letter, accidental, octave),
            // triple accidental roots are not used by any lesson data
            None => Note::from_midi_simple(
                target,
                matches!(
                    self.root.accidental(),
                    Accidental::Flat | Accidental::DoubleFlat
                ),
            ),
        }
    }

    /// The 7 degrees in the root's octave register, ascending.
    pub fn notes(&self) -> Vec<Note> {
        (0..7).map(|degree| self.note_at_degree(degree)).collect()
    }

    /// Whether the given pitch class is diatonic to this scale.
    pub fn contains(&self, chroma: u8) -> bool {
        let root = self.root.chroma() as i32;
        self.kind
            .offsets()
            .iter()
            .any(|offset| (root + offset).rem_euclid(12) as u8 == chroma)
    }
}

impl Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.root.pitch_class_name(), self.kind)
    }
}

// --------------------------------------------------------------------------------------------------
