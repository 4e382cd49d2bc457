//! Named chords: root + quality specs parsed from symbols like "Cmaj7".

use std::collections::HashMap;
use std::fmt::Display;

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::note::Note;

// --------------------------------------------------------------------------------------------------

// chord tone interval lists, spelled (not just semitone offsets) so resolved
// voicings carry the correct accidentals
const MAJOR: [Interval; 3] = [Interval::P1, Interval::M3, Interval::P5];
const MINOR: [Interval; 3] = [Interval::P1, Interval::MINOR3, Interval::P5];
const DIMINISHED: [Interval; 3] = [Interval::P1, Interval::MINOR3, Interval::D5];
const AUGMENTED: [Interval; 3] = [Interval::P1, Interval::M3, Interval::A5];
const MAJOR7: [Interval; 4] = [Interval::P1, Interval::M3, Interval::P5, Interval::M7];
const MINOR7: [Interval; 4] = [Interval::P1, Interval::MINOR3, Interval::P5, Interval::MINOR7];
const DOMINANT7: [Interval; 4] = [Interval::P1, Interval::M3, Interval::P5, Interval::MINOR7];
const HALF_DIMINISHED7: [Interval; 4] =
    [Interval::P1, Interval::MINOR3, Interval::D5, Interval::MINOR7];
const DIMINISHED7: [Interval; 4] = [Interval::P1, Interval::MINOR3, Interval::D5, Interval::D7];
const MINOR_MAJOR7: [Interval; 4] = [Interval::P1, Interval::MINOR3, Interval::P5, Interval::M7];
const SUS2: [Interval; 3] = [Interval::P1, Interval::M2, Interval::P5];
const SUS4: [Interval; 3] = [Interval::P1, Interval::P4, Interval::P5];
const MAJOR6: [Interval; 4] = [Interval::P1, Interval::M3, Interval::P5, Interval::M6];
const MINOR6: [Interval; 4] = [Interval::P1, Interval::MINOR3, Interval::P5, Interval::M6];

/// Chord quality of a named chord spec.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Minor7,
    Dominant7,
    HalfDiminished7,
    Diminished7,
    MinorMajor7,
    Sus2,
    Sus4,
    Major6,
    Minor6,
}

impl ChordQuality {
    /// Chord tone intervals from the root, in root-position order.
    pub fn intervals(&self) -> &'static [Interval] {
        match self {
            ChordQuality::Major => &MAJOR,
            ChordQuality::Minor => &MINOR,
            ChordQuality::Diminished => &DIMINISHED,
            ChordQuality::Augmented => &AUGMENTED,
            ChordQuality::Major7 => &MAJOR7,
            ChordQuality::Minor7 => &MINOR7,
            ChordQuality::Dominant7 => &DOMINANT7,
            ChordQuality::HalfDiminished7 => &HALF_DIMINISHED7,
            ChordQuality::Diminished7 => &DIMINISHED7,
            ChordQuality::MinorMajor7 => &MINOR_MAJOR7,
            ChordQuality::Sus2 => &SUS2,
            ChordQuality::Sus4 => &SUS4,
            ChordQuality::Major6 => &MAJOR6,
            ChordQuality::Minor6 => &MINOR6,
        }
    }

    /// Canonical suffix for chord symbol display.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::MinorMajor7 => "mMaj7",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Major6 => "6",
            ChordQuality::Minor6 => "m6",
        }
    }
}

// map of all known chord suffixes with various aliases
lazy_static! {
    static ref QUALITY_TABLE: HashMap<&'static str, ChordQuality> = {
        HashMap::from([
            ("", ChordQuality::Major),
            ("M", ChordQuality::Major),
            ("maj", ChordQuality::Major),
            ("major", ChordQuality::Major),
            ("m", ChordQuality::Minor),
            ("min", ChordQuality::Minor),
            ("minor", ChordQuality::Minor),
            ("dim", ChordQuality::Diminished),
            ("o", ChordQuality::Diminished),
            ("aug", ChordQuality::Augmented),
            ("+", ChordQuality::Augmented),
            ("maj7", ChordQuality::Major7),
            ("M7", ChordQuality::Major7),
            ("m7", ChordQuality::Minor7),
            ("min7", ChordQuality::Minor7),
            ("7", ChordQuality::Dominant7),
            ("dom7", ChordQuality::Dominant7),
            ("m7b5", ChordQuality::HalfDiminished7),
            ("min7b5", ChordQuality::HalfDiminished7),
            ("dim7", ChordQuality::Diminished7),
            ("o7", ChordQuality::Diminished7),
            ("mMaj7", ChordQuality::MinorMajor7),
            ("minMaj7", ChordQuality::MinorMajor7),
            ("sus2", ChordQuality::Sus2),
            ("sus4", ChordQuality::Sus4),
            ("6", ChordQuality::Major6),
            ("m6", ChordQuality::Minor6),
        ])
    };
}

/// Sorted list of all known chord suffix aliases.
pub fn quality_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = QUALITY_TABLE.keys().copied().collect();
    names.sort_unstable();
    names
}

// --------------------------------------------------------------------------------------------------

/// A named chord: spelled root plus quality, e.g. "Bbm7b5".
///
/// This is the validated, tagged form of the chord name strings that lesson
/// data is authored with. It is built once at data-definition time; nothing
/// re-parses strings per validation call.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ChordSpec {
    root: Note,
    quality: ChordQuality,
}

impl ChordSpec {
    pub fn new(root: Note, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Root-position voicing anchored at the given octave.
    pub fn notes(&self, octave: i32) -> Vec<Note> {
        let root = Note::new(self.root.letter(), self.root.accidental(), octave);
        self.quality
            .intervals()
            .iter()
            .map(|interval| root.transposed(*interval))
            .collect()
    }

    /// Deduped pitch-class set of the chord tones, in root-position order.
    pub fn pitch_classes(&self) -> Vec<u8> {
        let mut classes = Vec::new();
        for note in self.notes(4) {
            let chroma = note.chroma();
            if !classes.contains(&chroma) {
                classes.push(chroma);
            }
        }
        classes
    }
}

impl TryFrom<&str> for ChordSpec {
    type Error = Error;

    /// Try converting a chord symbol in the form `$root$quality` where $root
    /// is a letter with optional accidental and $quality is a suffix from the
    /// alias table, e.g. "C", "Gm", "Bbmaj7", "F#dim".
    fn try_from(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidChord(s.to_string());
        let mut root_len = 1;
        let first = s.chars().next().ok_or_else(invalid)?;
        if !first.is_ascii_alphabetic() {
            return Err(invalid());
        }
        // greedy accidental scan; 'b' before a valid suffix is part of the root
        for c in s[1..].chars() {
            if c == '#' || c == 'b' {
                root_len += 1;
            } else {
                break;
            }
        }
        // "Cm7b5": the scan must not eat quality text, so back off while the
        // remainder is not a known suffix but a shorter root would make it one
        while root_len > 1 && !QUALITY_TABLE.contains_key(&s[root_len..]) {
            root_len -= 1;
        }
        let root = Note::try_from(&s[..root_len]).map_err(|_| invalid())?;
        let quality = QUALITY_TABLE.get(&s[root_len..]).ok_or_else(invalid)?;
        Ok(Self::new(root, *quality))
    }
}

impl Display for ChordSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root.pitch_class_name(), self.quality.suffix())
    }
}

// --------------------------------------------------------------------------------------------------
