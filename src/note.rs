//! Spelled notes and pitch-class arithmetic.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::interval::Interval;

// -------------------------------------------------------------------------------------------------

/// Letter name of a note, without accidental or octave.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Chroma of the natural note: C = 0, D = 2 ... B = 11.
    pub fn natural_chroma(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the letter cycle: C = 0 ... B = 6.
    pub fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Letter `steps` positions up the cycle, wrapping from B back to C.
    #[must_use]
    pub fn step(self, steps: usize) -> Letter {
        Self::ALL[(self.index() + steps) % 7]
    }

    fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

// -------------------------------------------------------------------------------------------------

/// Accidental applied to a letter name.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone alteration: flat = -1, sharp = +1 and so on.
    pub fn alter(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// Accidental for the given alteration, `None` outside [-2, 2].
    pub fn from_alter(alter: i32) -> Option<Accidental> {
        match alter {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }
}

impl Display for Accidental {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        };
        write!(f, "{}", s)
    }
}

// -------------------------------------------------------------------------------------------------

/// A spelled note: letter, accidental and octave. Immutable value type.
///
/// Enharmonic spellings (A#4 and Bb4) are distinct values but share the same
/// `chroma` and `midi` pitch. Matching always goes through `chroma`; the
/// spelling only matters for display.
///
/// For `TryFrom<&str>` conversions scientific pitch notation is expected:
/// `C4` (plain), `F#3` (sharps), `Bb2` (flats), `G##5` / `Gx5` and `Abb1`
/// (double accidentals). A missing octave defaults to 4.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Note {
    letter: Letter,
    accidental: Accidental,
    octave: i32,
}

impl Note {
    pub const fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Pitch class of the note as number: 0 = C, 1 = C# ... 11 = B.
    pub fn chroma(&self) -> u8 {
        (self.letter.natural_chroma() as i32 + self.accidental.alter()).rem_euclid(12) as u8
    }

    /// Absolute pitch as MIDI-style number, C4 = 60. Monotonic in real pitch,
    /// so it doubles as the sort key for "lowest note" comparisons. No range
    /// is enforced; rejecting out-of-range notes is the caller's business.
    pub fn midi(&self) -> i32 {
        (self.octave + 1) * 12 + self.letter.natural_chroma() as i32 + self.accidental.alter()
    }

    /// Order two notes by absolute pitch. Enharmonic spellings of the same
    /// pitch compare equal here even though they are distinct values.
    pub fn pitch_cmp(&self, other: &Note) -> Ordering {
        self.midi().cmp(&other.midi())
    }

    /// Note name without the octave, e.g. "C#".
    pub fn pitch_class_name(&self) -> String {
        format!("{}{}", self.letter, self.accidental)
    }

    /// Return a new note transposed up by the given interval.
    ///
    /// Spelling follows letter arithmetic: the new letter is `number - 1`
    /// letters up and the accidental makes the semitone count exact, so
    /// `D4 + m3 = F4` and `B3 + M3 = D#4`. Falls back to the simplest
    /// enharmonic spelling if the exact spelling would need a triple
    /// accidental.
    #[must_use]
    pub fn transposed(&self, interval: Interval) -> Note {
        let steps = interval.letter_steps();
        let letter = self.letter.step(steps);
        let octave = self.octave + ((self.letter.index() + steps) / 7) as i32;
        let target = self.midi() + interval.semitones();
        let natural = Note::new(letter, Accidental::Natural, octave);
        match Accidental::from_alter(target - natural.midi()) {
            Some(accidental) => Note::new(letter, accidental, octave),
            None => Note::from_midi_simple(target, self.prefers_flat()),
        }
    }

    /// Collapse a redundant spelling to the simplest one: E#4 becomes F4,
    /// Fbb4 becomes Eb4, plain notes stay as they are. Used for display
    /// fallback only, never for matching.
    #[must_use]
    pub fn normalized(&self) -> Note {
        Note::from_midi_simple(self.midi(), self.prefers_flat())
    }

    /// Simplest spelling for an absolute pitch: naturals where possible,
    /// otherwise a single sharp or flat depending on `prefer_flat`.
    pub(crate) fn from_midi_simple(midi: i32, prefer_flat: bool) -> Note {
        const SHARP_SPELLINGS: [(Letter, Accidental); 12] = [
            (Letter::C, Accidental::Natural),
            (Letter::C, Accidental::Sharp),
            (Letter::D, Accidental::Natural),
            (Letter::D, Accidental::Sharp),
            (Letter::E, Accidental::Natural),
            (Letter::F, Accidental::Natural),
            (Letter::F, Accidental::Sharp),
            (Letter::G, Accidental::Natural),
            (Letter::G, Accidental::Sharp),
            (Letter::A, Accidental::Natural),
            (Letter::A, Accidental::Sharp),
            (Letter::B, Accidental::Natural),
        ];
        const FLAT_SPELLINGS: [(Letter, Accidental); 12] = [
            (Letter::C, Accidental::Natural),
            (Letter::D, Accidental::Flat),
            (Letter::D, Accidental::Natural),
            (Letter::E, Accidental::Flat),
            (Letter::E, Accidental::Natural),
            (Letter::F, Accidental::Natural),
            (Letter::G, Accidental::Flat),
            (Letter::G, Accidental::Natural),
            (Letter::A, Accidental::Flat),
            (Letter::A, Accidental::Natural),
            (Letter::B, Accidental::Flat),
            (Letter::B, Accidental::Natural),
        ];
        let chroma = midi.rem_euclid(12) as usize;
        let octave = midi.div_euclid(12) - 1;
        let (letter, accidental) = if prefer_flat {
            FLAT_SPELLINGS[chroma]
        } else {
            SHARP_SPELLINGS[chroma]
        };
        Note::new(letter, accidental, octave)
    }

    fn prefers_flat(&self) -> bool {
        matches!(self.accidental, Accidental::Flat | Accidental::DoubleFlat)
    }
}

impl TryFrom<&str> for Note {
    type Error = Error;

    /// Try converting the given string to a Note value.
    fn try_from(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidNote(s.to_string());
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;
        let rest = chars.as_str();
        let (accidental, rest) = if let Some(r) = rest.strip_prefix("##") {
            (Accidental::DoubleSharp, r)
        } else if let Some(r) = rest.strip_prefix('x') {
            (Accidental::DoubleSharp, r)
        } else if let Some(r) = rest.strip_prefix("bb") {
            (Accidental::DoubleFlat, r)
        } else if let Some(r) = rest.strip_prefix('#').or_else(|| rest.strip_prefix('♯')) {
            (Accidental::Sharp, r)
        } else if let Some(r) = rest.strip_prefix('b').or_else(|| rest.strip_prefix('♭')) {
            (Accidental::Flat, r)
        } else {
            (Accidental::Natural, rest)
        };
        let octave = if rest.is_empty() {
            4
        } else if rest.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            rest.parse::<i32>().map_err(|_| invalid())?
        } else {
            // i32 parsing would accept a leading '+'
            return Err(invalid());
        };
        Ok(Note::new(letter, accidental, octave))
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.letter, self.accidental, self.octave)
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse a batch of note name strings, as delivered by MIDI decoding or
/// on-screen keyboard collaborators.
pub fn parse_notes(names: &[&str]) -> Result<Vec<Note>> {
    names.iter().map(|name| Note::try_from(*name)).collect()
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interval::Interval;

    #[test]
    fn note_deserialization() -> Result<()> {
        assert!(Note::try_from("x4").is_err());
        assert!(Note::try_from("c.2").is_err());
        assert!(Note::try_from("C+4").is_err());
        assert!(Note::try_from("H4").is_err());
        assert!(Note::try_from("").is_err());

        assert_eq!(
            Note::try_from("C4")?,
            Note::new(Letter::C, Accidental::Natural, 4)
        );
        assert_eq!(
            Note::try_from("c#3")?,
            Note::new(Letter::C, Accidental::Sharp, 3)
        );
        assert_eq!(
            Note::try_from("Bb2")?,
            Note::new(Letter::B, Accidental::Flat, 2)
        );
        assert_eq!(
            Note::try_from("Abb1")?,
            Note::new(Letter::A, Accidental::DoubleFlat, 1)
        );
        assert_eq!(
            Note::try_from("Gx5")?,
            Note::new(Letter::G, Accidental::DoubleSharp, 5)
        );
        // missing octave defaults to 4
        assert_eq!(
            Note::try_from("F#")?,
            Note::new(Letter::F, Accidental::Sharp, 4)
        );
        Ok(())
    }

    #[test]
    fn note_serialization() -> Result<()> {
        assert_eq!(Note::try_from("C4")?.to_string(), "C4");
        assert_eq!(Note::try_from("Eb3")?.to_string(), "Eb3");
        assert_eq!(Note::try_from("F##6")?.to_string(), "F##6");
        assert_eq!(Note::try_from("Db4")?.pitch_class_name(), "Db");
        Ok(())
    }

    #[test]
    fn chroma_and_midi() -> Result<()> {
        assert_eq!(Note::try_from("C4")?.midi(), 60);
        assert_eq!(Note::try_from("A4")?.midi(), 69);
        assert_eq!(Note::try_from("C-1")?.midi(), 0);
        // enharmonics share a chroma but not a spelling
        let ds = Note::try_from("D#4")?;
        let eb = Note::try_from("Eb4")?;
        assert_eq!(ds.chroma(), eb.chroma());
        assert_eq!(ds.midi(), eb.midi());
        assert_ne!(ds, eb);
        assert_eq!(ds.pitch_cmp(&eb), std::cmp::Ordering::Equal);
        // B#3 wraps the chroma, not the octave digit
        assert_eq!(Note::try_from("B#3")?.chroma(), 0);
        assert_eq!(Note::try_from("B#3")?.midi(), Note::try_from("C4")?.midi());
        Ok(())
    }

    #[test]
    fn transposition_spelling() -> Result<()> {
        let m3 = Interval::try_from("m3")?;
        let maj3 = Interval::try_from("M3")?;
        let p5 = Interval::try_from("P5")?;
        let p8 = Interval::try_from("P8")?;
        assert_eq!(Note::try_from("D4")?.transposed(m3), Note::try_from("F4")?);
        assert_eq!(Note::try_from("B3")?.transposed(maj3), Note::try_from("D#4")?);
        assert_eq!(Note::try_from("Bb3")?.transposed(p5), Note::try_from("F4")?);
        assert_eq!(Note::try_from("A4")?.transposed(p8), Note::try_from("A5")?);
        // letter wrap carries the octave
        assert_eq!(Note::try_from("G4")?.transposed(p5), Note::try_from("D5")?);
        Ok(())
    }

    #[test]
    fn normalization() -> Result<()> {
        assert_eq!(Note::try_from("E#4")?.normalized(), Note::try_from("F4")?);
        assert_eq!(Note::try_from("Cb4")?.normalized(), Note::try_from("B3")?);
        assert_eq!(Note::try_from("Fbb4")?.normalized(), Note::try_from("Eb4")?);
        assert_eq!(Note::try_from("G##4")?.normalized(), Note::try_from("A4")?);
        // already simple spellings stay put
        assert_eq!(Note::try_from("C#4")?.normalized(), Note::try_from("C#4")?);
        assert_eq!(Note::try_from("Db4")?.normalized(), Note::try_from("Db4")?);
        Ok(())
    }

    #[test]
    fn batch_parse() {
        assert!(parse_notes(&["C4", "E4", "G4"]).is_ok());
        assert!(parse_notes(&["C4", "?4"]).is_err());
    }
}
