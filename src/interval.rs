//! Interval arithmetic: quality + number codes mapped to exact semitone counts.

use std::fmt::Display;

use crate::error::{Error, Result};

// -------------------------------------------------------------------------------------------------

/// Interval quality. Perfect applies to unison, fourth, fifth and octave;
/// major and minor to the rest.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, derive_more::Display)]
pub enum Quality {
    #[display("d")]
    Diminished,
    #[display("m")]
    Minor,
    #[display("M")]
    Major,
    #[display("P")]
    Perfect,
    #[display("A")]
    Augmented,
}

// -------------------------------------------------------------------------------------------------

/// A melodic or harmonic interval, e.g. `m3`, `P5`, `A4`.
///
/// Used both for transposition (where the letter distance matters for
/// spelling) and for categorizing exercise distractors.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Interval {
    quality: Quality,
    number: u8,
}

impl Interval {
    pub const P1: Interval = Interval::unchecked(Quality::Perfect, 1);
    pub const M2: Interval = Interval::unchecked(Quality::Major, 2);
    pub const MINOR2: Interval = Interval::unchecked(Quality::Minor, 2);
    pub const M3: Interval = Interval::unchecked(Quality::Major, 3);
    pub const MINOR3: Interval = Interval::unchecked(Quality::Minor, 3);
    pub const P4: Interval = Interval::unchecked(Quality::Perfect, 4);
    pub const A4: Interval = Interval::unchecked(Quality::Augmented, 4);
    pub const D5: Interval = Interval::unchecked(Quality::Diminished, 5);
    pub const P5: Interval = Interval::unchecked(Quality::Perfect, 5);
    pub const A5: Interval = Interval::unchecked(Quality::Augmented, 5);
    pub const M6: Interval = Interval::unchecked(Quality::Major, 6);
    pub const MINOR6: Interval = Interval::unchecked(Quality::Minor, 6);
    pub const D7: Interval = Interval::unchecked(Quality::Diminished, 7);
    pub const M7: Interval = Interval::unchecked(Quality::Major, 7);
    pub const MINOR7: Interval = Interval::unchecked(Quality::Minor, 7);
    pub const P8: Interval = Interval::unchecked(Quality::Perfect, 8);

    /// Pool of intervals used by identification exercises.
    pub const BASIC: [Interval; 10] = [
        Self::MINOR2,
        Self::M2,
        Self::MINOR3,
        Self::M3,
        Self::P4,
        Self::P5,
        Self::MINOR6,
        Self::M6,
        Self::MINOR7,
        Self::M7,
    ];

    /// `BASIC` plus the perfect octave, for construction exercises.
    pub const BASIC_WITH_OCTAVE: [Interval; 11] = [
        Self::MINOR2,
        Self::M2,
        Self::MINOR3,
        Self::M3,
        Self::P4,
        Self::P5,
        Self::MINOR6,
        Self::M6,
        Self::MINOR7,
        Self::M7,
        Self::P8,
    ];

    const fn unchecked(quality: Quality, number: u8) -> Self {
        Self { quality, number }
    }

    /// Create an interval, validating the quality/number combination:
    /// perfect-class numbers (1, 4, 5, 8) take d/P/A, the rest take d/m/M/A.
    pub fn new(quality: Quality, number: u8) -> Result<Self> {
        let invalid = || Error::InvalidInterval(format!("{}{}", quality, number));
        if !(1..=8).contains(&number) {
            return Err(invalid());
        }
        let perfect_class = matches!(number, 1 | 4 | 5 | 8);
        match quality {
            Quality::Perfect if !perfect_class => Err(invalid()),
            Quality::Major | Quality::Minor if perfect_class => Err(invalid()),
            _ => Ok(Self { quality, number }),
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Exact semitone count of the interval.
    pub fn semitones(&self) -> i32 {
        // natural size of the major/perfect interval per number
        const NATURAL: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];
        let natural = NATURAL[(self.number - 1) as usize];
        let perfect_class = matches!(self.number, 1 | 4 | 5 | 8);
        let adjust = match self.quality {
            Quality::Perfect | Quality::Major => 0,
            Quality::Minor => -1,
            Quality::Augmented => 1,
            Quality::Diminished if perfect_class => -1,
            Quality::Diminished => -2,
        };
        natural + adjust
    }

    /// Letter distance covered by the interval: a third spans two letters.
    pub fn letter_steps(&self) -> usize {
        (self.number - 1) as usize
    }
}

impl TryFrom<&str> for Interval {
    type Error = Error;

    /// Try converting an interval code such as "m3", "P5" or "A4".
    fn try_from(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInterval(s.to_string());
        let mut chars = s.chars();
        let quality = match chars.next().ok_or_else(invalid)? {
            'd' => Quality::Diminished,
            'm' => Quality::Minor,
            'M' => Quality::Major,
            'P' => Quality::Perfect,
            'A' => Quality::Augmented,
            _ => return Err(invalid()),
        };
        let number = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| invalid())?;
        Interval::new(quality, number).map_err(|_| invalid())
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.quality, self.number)
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn interval_string_conversion() -> Result<()> {
        assert!(Interval::try_from("").is_err());
        assert!(Interval::try_from("x3").is_err());
        assert!(Interval::try_from("P3").is_err());
        assert!(Interval::try_from("M5").is_err());
        assert!(Interval::try_from("m9").is_err());

        assert_eq!(Interval::try_from("m3")?, Interval::MINOR3);
        assert_eq!(Interval::try_from("P5")?, Interval::P5);
        assert_eq!(Interval::try_from("A4")?, Interval::A4);
        assert_eq!(Interval::try_from("d5")?, Interval::D5);
        assert_eq!(Interval::MINOR7.to_string(), "m7");
        assert_eq!(Interval::P8.to_string(), "P8");
        Ok(())
    }

    #[test]
    fn semitone_counts() {
        assert_eq!(Interval::P1.semitones(), 0);
        assert_eq!(Interval::MINOR2.semitones(), 1);
        assert_eq!(Interval::M3.semitones(), 4);
        assert_eq!(Interval::P4.semitones(), 5);
        assert_eq!(Interval::A4.semitones(), 6);
        assert_eq!(Interval::D5.semitones(), 6);
        assert_eq!(Interval::A5.semitones(), 8);
        assert_eq!(Interval::D7.semitones(), 9);
        assert_eq!(Interval::MINOR7.semitones(), 10);
        assert_eq!(Interval::P8.semitones(), 12);
    }

    #[test]
    fn letter_steps() {
        assert_eq!(Interval::P1.letter_steps(), 0);
        assert_eq!(Interval::MINOR3.letter_steps(), 2);
        assert_eq!(Interval::P8.letter_steps(), 7);
    }
}
