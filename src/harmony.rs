//! Functional harmony: labeled chords in a key, with inversions resolved on
//! scale-degree indices.

use std::fmt::Display;

use crate::error::{Error, Result};
use crate::note::Note;
use crate::scale::{Scale, ScaleType};

// -------------------------------------------------------------------------------------------------

/// Harmonic function label of a progression step.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, derive_more::Display)]
pub enum FunctionalLabel {
    /// Tonic
    T,
    /// Supertonic seventh chord
    II,
    /// Subdominant
    S,
    /// Dominant
    D,
    /// Leading-tone seventh chord
    VII,
}

impl FunctionalLabel {
    /// 0-based scale degree of the chord root.
    pub fn root_degree(self) -> usize {
        match self {
            FunctionalLabel::T => 0,
            FunctionalLabel::II => 1,
            FunctionalLabel::S => 3,
            FunctionalLabel::D => 4,
            FunctionalLabel::VII => 6,
        }
    }

    /// II and VII appear as seventh chords in the progression sequences even
    /// when their inversion code spells a triad.
    fn seventh_by_default(self) -> bool {
        matches!(self, FunctionalLabel::II | FunctionalLabel::VII)
    }
}

// -------------------------------------------------------------------------------------------------

/// Inversion code naming which chord tone sounds in the bass.
///
/// `53`/`6`/`64` are the triad codes, `7`/`65`/`43`/`2` the seventh chord
/// codes and `3` the incomplete triad (root and third, no fifth).
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Inversion {
    Root53,
    Six,
    SixFour,
    Seven,
    SixFive,
    FourThree,
    Two,
    Three,
}

impl Inversion {
    pub fn code(self) -> &'static str {
        match self {
            Inversion::Root53 => "53",
            Inversion::Six => "6",
            Inversion::SixFour => "64",
            Inversion::Seven => "7",
            Inversion::SixFive => "65",
            Inversion::FourThree => "43",
            Inversion::Two => "2",
            Inversion::Three => "3",
        }
    }

    fn needs_seventh(self) -> bool {
        matches!(
            self,
            Inversion::Seven | Inversion::SixFive | Inversion::FourThree | Inversion::Two
        )
    }
}

impl TryFrom<&str> for Inversion {
    type Error = Error;

    fn try_from(code: &str) -> Result<Self> {
        match code {
            "53" => Ok(Inversion::Root53),
            "6" => Ok(Inversion::Six),
            "64" => Ok(Inversion::SixFour),
            "7" => Ok(Inversion::Seven),
            "65" => Ok(Inversion::SixFive),
            "43" => Ok(Inversion::FourThree),
            "2" => Ok(Inversion::Two),
            "3" => Ok(Inversion::Three),
            _ => Err(Error::InvalidStep(code.to_string())),
        }
    }
}

impl Display for Inversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// -------------------------------------------------------------------------------------------------

/// One step of a harmonic progression: function, inversion and whether the
/// step borrows the harmonic-major scale (lowered submediant).
///
/// The harmonic flag is a per-step property: adjacent steps of the same
/// sequence resolve against the unaltered major scale.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct FunctionalStep {
    pub label: FunctionalLabel,
    pub inversion: Inversion,
    pub harmonic: bool,
}

impl FunctionalStep {
    pub const fn new(label: FunctionalLabel, inversion: Inversion, harmonic: bool) -> Self {
        Self {
            label,
            inversion,
            harmonic,
        }
    }

    /// Scale type this step resolves against in a major-key progression.
    pub fn scale_type(&self) -> ScaleType {
        if self.harmonic {
            ScaleType::HarmonicMajor
        } else {
            ScaleType::Major
        }
    }

    /// Chord tone structure as degree offsets from the functional root:
    /// triad, seventh chord, or the incomplete `3` triad that omits the
    /// fifth.
    pub fn structure(&self) -> &'static [usize] {
        if self.inversion == Inversion::Three {
            &[0, 2]
        } else if self.inversion.needs_seventh() || self.label.seventh_by_default() {
            &[0, 2, 4, 6]
        } else {
            &[0, 2, 4]
        }
    }
}

impl TryFrom<&str> for FunctionalStep {
    type Error = Error;

    /// Try converting a step label such as "T53", "II2 (harm)" or "D65".
    fn try_from(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidStep(s.to_string());
        let (body, harmonic) = match s.strip_suffix(" (harm)") {
            Some(body) => (body, true),
            None => (s, false),
        };
        // match the longer labels first, "II" starts like nothing else but
        // a plain prefix scan would split "VII" wrong
        let (label, code) = if let Some(code) = body.strip_prefix("VII") {
            (FunctionalLabel::VII, code)
        } else if let Some(code) = body.strip_prefix("II") {
            (FunctionalLabel::II, code)
        } else if let Some(code) = body.strip_prefix('T') {
            (FunctionalLabel::T, code)
        } else if let Some(code) = body.strip_prefix('S') {
            (FunctionalLabel::S, code)
        } else if let Some(code) = body.strip_prefix('D') {
            (FunctionalLabel::D, code)
        } else {
            return Err(invalid());
        };
        let inversion = Inversion::try_from(code).map_err(|_| invalid())?;
        Ok(Self::new(label, inversion, harmonic))
    }
}

impl Display for FunctionalStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label, self.inversion)?;
        if self.harmonic {
            write!(f, " (harm)")?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// Rotate root-position chord tone degrees into the given inversion.
///
/// Rotation happens on scale-degree indices, before any note resolution:
/// tones moved below their original position get +7 degrees (one octave), so
/// the result is ascending by construction and the first entry is the
/// intended bass. Resolving afterwards means harmonic-major alteration and
/// key transposition apply exactly once.
pub fn apply_inversion(degrees: &[usize], inversion: Inversion) -> Result<Vec<usize>> {
    let require = |needed: usize| {
        if degrees.len() < needed {
            Err(Error::InvalidInversion {
                code: inversion.code(),
                required: needed,
                tones: degrees.len(),
            })
        } else {
            Ok(())
        }
    };
    match inversion {
        Inversion::Root53 | Inversion::Seven | Inversion::Three => Ok(degrees.to_vec()),
        Inversion::Six => {
            require(3)?;
            Ok(vec![degrees[1], degrees[2], degrees[0] + 7])
        }
        Inversion::SixFour => {
            require(3)?;
            Ok(vec![degrees[2], degrees[0] + 7, degrees[1] + 7])
        }
        Inversion::SixFive => {
            require(4)?;
            Ok(vec![degrees[1], degrees[2], degrees[3], degrees[0] + 7])
        }
        Inversion::FourThree => {
            require(4)?;
            Ok(vec![degrees[2], degrees[3], degrees[0] + 7, degrees[1] + 7])
        }
        Inversion::Two => {
            require(4)?;
            Ok(vec![
                degrees[3],
                degrees[0] + 7,
                degrees[1] + 7,
                degrees[2] + 7,
            ])
        }
    }
}

/// Chord tone scale degrees for a functional step, inversion applied.
pub fn chord_degrees(step: &FunctionalStep) -> Result<Vec<usize>> {
    let root = step.label.root_degree();
    let tones: Vec<usize> = step.structure().iter().map(|offset| root + offset).collect();
    apply_inversion(&tones, step.inversion)
}

/// Resolve a functional step to spelled notes in the given scale. The first
/// note is the intended bass; the list ascends by construction.
pub fn resolve(scale: &Scale, step: &FunctionalStep) -> Result<Vec<Note>> {
    Ok(chord_degrees(step)?
        .into_iter()
        .map(|degree| scale.note_at_degree(degree))
        .collect())
}

/// Resolve a functional step in a major key anchored at the given root note,
/// switching to harmonic major for harmonic-flagged steps.
pub fn resolve_in_key(key_root: Note, step: &FunctionalStep) -> Result<Vec<Note>> {
    let scale = Scale::new(key_root, step.scale_type());
    resolve(&scale, step)
}

// --------------------------------------------------------------------------------------------------
