//! Multiple-choice exercise generation with controlled randomization.
//!
//! Questions are ephemeral: regenerated per attempt, never persisted. All
//! randomness flows through a [`Shuffler`] so tests can pin a seed.

use rand::{rng, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::interval::{Interval, Quality};
use crate::note::{Accidental, Letter, Note};
use crate::scale::{Scale, ScaleType};

// -------------------------------------------------------------------------------------------------

/// Random source for exercise generation.
///
/// Seeded from the thread RNG by default; pass an explicit seed for
/// reproducible output.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: Xoshiro256PlusPlus,
}

impl Shuffler {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rng().random());
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Unbiased Fisher-Yates shuffle: walk from the last index down, swapping
    /// with a uniformly random index in `[0, i]`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.random_range(0..=i);
            items.swap(i, j);
        }
    }

    /// Uniformly random element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty());
        &items[self.rng.random_range(0..items.len())]
    }

    /// Uniformly random index below `len`.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0);
        self.rng.random_range(0..len)
    }

    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    /// Build a multiple-choice option list: `count` distractors drawn from
    /// `pool` (padded from `fillers` when the pool runs short), plus the
    /// correct answer exactly once, in shuffled order.
    pub fn generate_options(
        &mut self,
        correct: &str,
        pool: &[&str],
        fillers: &[&str],
        count: usize,
    ) -> Vec<String> {
        let mut wrong: Vec<&str> = Vec::new();
        for option in pool {
            if *option != correct && !wrong.contains(option) {
                wrong.push(option);
            }
        }
        self.shuffle(&mut wrong);
        wrong.truncate(count);
        // pad with cross-category fillers when the natural pool runs short
        for filler in fillers {
            if wrong.len() >= count {
                break;
            }
            if *filler != correct && !wrong.contains(filler) {
                wrong.push(filler);
            }
        }
        let mut options: Vec<String> = wrong.into_iter().map(String::from).collect();
        options.push(correct.to_string());
        self.shuffle(&mut options);
        options
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new(None)
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ExerciseKind {
    IntervalIdentification,
    IntervalConstruction,
    IntervalQualityDrill,
    ScaleIdentification,
    ScaleConstruction,
    DegreeIdentification,
}

/// A generated multiple-choice prompt with its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseQuestion {
    pub kind: ExerciseKind,
    pub prompt: String,
    /// Notes for the staff-rendering collaborator.
    pub display_notes: Vec<Note>,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub hint: Option<String>,
}

/// Whether the two interval notes sound together or one after the other.
/// Only the prompt wording differs.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum IntervalFlavor {
    Harmonic,
    Melodic,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Direction {
    Up,
    Down,
}

// exercise pools, kept to keys that read well on a staff
const NATURAL_LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

// the two competing qualities per interval number, for the quality drill
const QUALITY_PAIRS: [(&str, [Interval; 2]); 6] = [
    ("2nd", [Interval::MINOR2, Interval::M2]),
    ("3rd", [Interval::MINOR3, Interval::M3]),
    ("4th", [Interval::P4, Interval::A4]),
    ("5th", [Interval::D5, Interval::P5]),
    ("6th", [Interval::MINOR6, Interval::M6]),
    ("7th", [Interval::MINOR7, Interval::M7]),
];

const CHROMATIC_NAMES: [&str; 17] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "Db", "Eb", "Gb", "Ab", "Bb",
];

const MAJOR_ROOTS: [(Letter, Accidental); 6] = [
    (Letter::C, Accidental::Natural),
    (Letter::G, Accidental::Natural),
    (Letter::D, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::B, Accidental::Flat),
    (Letter::A, Accidental::Natural),
];

const MINOR_ROOTS: [(Letter, Accidental); 5] = [
    (Letter::A, Accidental::Natural),
    (Letter::E, Accidental::Natural),
    (Letter::D, Accidental::Natural),
    (Letter::G, Accidental::Natural),
    (Letter::B, Accidental::Natural),
];

const DEGREE_KEYS: [(Letter, Accidental); 7] = [
    (Letter::C, Accidental::Natural),
    (Letter::G, Accidental::Natural),
    (Letter::D, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::B, Accidental::Flat),
    (Letter::A, Accidental::Natural),
    (Letter::E, Accidental::Flat),
];

fn root_note(spelling: (Letter, Accidental), octave: i32) -> Note {
    Note::new(spelling.0, spelling.1, octave)
}

fn quality_word(quality: Quality) -> &'static str {
    match quality {
        Quality::Diminished => "diminished",
        Quality::Minor => "minor",
        Quality::Major => "major",
        Quality::Perfect => "perfect",
        Quality::Augmented => "augmented",
    }
}

fn scale_label(root: Note, kind: ScaleType) -> String {
    let kind = match kind {
        ScaleType::Major => "Major",
        _ => "Minor",
    };
    format!("{} {}", root.pitch_class_name(), kind)
}

// -------------------------------------------------------------------------------------------------

/// Two notes on the staff, name the interval.
pub fn interval_identification(shuffler: &mut Shuffler, flavor: IntervalFlavor) -> ExerciseQuestion {
    let octave = if shuffler.coin() { 4 } else { 3 };
    let root = Note::new(*shuffler.pick(&NATURAL_LETTERS), Accidental::Natural, octave);
    let interval = *shuffler.pick(&Interval::BASIC);
    let second = root.transposed(interval);

    let correct = interval.to_string();
    let pool: Vec<String> = Interval::BASIC
        .iter()
        .filter(|i| **i != interval)
        .map(|i| i.to_string())
        .collect();
    let pool: Vec<&str> = pool.iter().map(String::as_str).collect();
    let options = shuffler.generate_options(&correct, &pool, &[], 5);

    ExerciseQuestion {
        kind: ExerciseKind::IntervalIdentification,
        prompt: match flavor {
            IntervalFlavor::Harmonic => "Name this harmonic interval".to_string(),
            IntervalFlavor::Melodic => "Name this melodic interval".to_string(),
        },
        display_notes: vec![root, second],
        correct_answer: correct,
        options,
        hint: Some("Count the letter distance between the two notes, including both".to_string()),
    }
}

/// "What note lies a m3 up from D?" -- answer and distractors are note names.
pub fn interval_construction(shuffler: &mut Shuffler, direction: Direction) -> ExerciseQuestion {
    let octave = match direction {
        Direction::Up => 4,
        Direction::Down => 5,
    };
    let root = Note::new(*shuffler.pick(&NATURAL_LETTERS), Accidental::Natural, octave);
    let interval = *shuffler.pick(&Interval::BASIC_WITH_OCTAVE);

    let resolve = |interval: Interval| match direction {
        Direction::Up => root.transposed(interval),
        Direction::Down => Note::from_midi_simple(root.midi() - interval.semitones(), true),
    };
    let target = resolve(interval);
    let correct = target.pitch_class_name();

    // distractors: where the other intervals land from the same root
    let mut pool: Vec<String> = Vec::new();
    for other in Interval::BASIC_WITH_OCTAVE {
        if other == interval {
            continue;
        }
        let candidate = resolve(other);
        if candidate.chroma() != target.chroma() {
            pool.push(candidate.pitch_class_name());
        }
    }
    let pool: Vec<&str> = pool.iter().map(String::as_str).collect();
    let options = shuffler.generate_options(&correct, &pool, &[], 5);

    let (prompt, hint) = match direction {
        Direction::Up => (
            format!("What note is a {} up from {}?", interval, root.pitch_class_name()),
            format!("Count {} semitones up from {}", interval.semitones(), root),
        ),
        Direction::Down => (
            format!("What note is a {} down from {}?", interval, root.pitch_class_name()),
            format!("Count {} semitones down from {}", interval.semitones(), root),
        ),
    };

    ExerciseQuestion {
        kind: ExerciseKind::IntervalConstruction,
        prompt,
        display_notes: vec![root],
        correct_answer: correct,
        options,
        hint: Some(hint),
    }
}

/// "What note is a minor 3rd up from E?" -- two qualities compete per
/// interval number, so the decisive distractor is always one semitone off.
pub fn interval_quality_drill(shuffler: &mut Shuffler) -> ExerciseQuestion {
    let octave = if shuffler.coin() { 4 } else { 3 };
    let root = Note::new(*shuffler.pick(&NATURAL_LETTERS), Accidental::Natural, octave);
    let (number_name, pair) = *shuffler.pick(&QUALITY_PAIRS);
    let interval = *shuffler.pick(&pair);

    let target = Note::from_midi_simple(root.midi() + interval.semitones(), false);
    let correct = target.pitch_class_name();

    // the other quality's landing note must always be among the options
    let mut pool: Vec<String> = Vec::new();
    for other in pair {
        let candidate = Note::from_midi_simple(root.midi() + other.semitones(), false);
        if candidate.chroma() != target.chroma() {
            pool.push(candidate.pitch_class_name());
        }
    }
    let pool: Vec<&str> = pool.iter().map(String::as_str).collect();
    let mut fillers: Vec<&str> = CHROMATIC_NAMES.to_vec();
    shuffler.shuffle(&mut fillers);
    let options = shuffler.generate_options(&correct, &pool, &fillers, 5);

    let quality = quality_word(interval.quality());
    ExerciseQuestion {
        kind: ExerciseKind::IntervalQualityDrill,
        prompt: format!(
            "What note is a {} {} up from {}?",
            quality,
            number_name,
            root.pitch_class_name()
        ),
        display_notes: vec![root],
        correct_answer: correct,
        options,
        hint: Some(format!(
            "A {} {} spans {} semitones",
            quality,
            number_name,
            interval.semitones()
        )),
    }
}

/// Displayed scale run -> pick its name.
pub fn scale_identification(shuffler: &mut Shuffler) -> ExerciseQuestion {
    let kind = if shuffler.coin() {
        ScaleType::Major
    } else {
        ScaleType::NaturalMinor
    };
    let roots: &[(Letter, Accidental)] = match kind {
        ScaleType::Major => &MAJOR_ROOTS,
        _ => &MINOR_ROOTS,
    };
    let root = root_note(*shuffler.pick(roots), 4);
    let scale = Scale::new(root, kind);
    let correct = scale_label(root, kind);

    let mut pool: Vec<String> = Vec::new();
    for spelling in MAJOR_ROOTS {
        pool.push(scale_label(root_note(spelling, 4), ScaleType::Major));
    }
    for spelling in MINOR_ROOTS {
        pool.push(scale_label(root_note(spelling, 4), ScaleType::NaturalMinor));
    }
    let pool: Vec<&str> = pool.iter().map(String::as_str).collect();
    let options = shuffler.generate_options(&correct, &pool, &[], 5);

    ExerciseQuestion {
        kind: ExerciseKind::ScaleIdentification,
        prompt: "What scale is this?".to_string(),
        display_notes: scale.notes(),
        correct_answer: correct,
        options,
        hint: None,
    }
}

/// "Build the G major scale" -> pick the correct note sequence.
pub fn scale_construction(shuffler: &mut Shuffler) -> ExerciseQuestion {
    let kind = if shuffler.coin() {
        ScaleType::Major
    } else {
        ScaleType::NaturalMinor
    };
    let (roots, other_kind, other_roots) = match kind {
        ScaleType::Major => (&MAJOR_ROOTS[..], ScaleType::NaturalMinor, &MINOR_ROOTS[..]),
        _ => (&MINOR_ROOTS[..], ScaleType::Major, &MAJOR_ROOTS[..]),
    };
    let spelling = *shuffler.pick(roots);
    let root = root_note(spelling, 4);

    let note_list = |root: Note, kind: ScaleType| {
        Scale::new(root, kind)
            .notes()
            .iter()
            .map(|n| n.pitch_class_name())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let correct = note_list(root, kind);

    let mut options = vec![correct.clone()];
    // wrong root, same type
    let other_spellings: Vec<(Letter, Accidental)> =
        roots.iter().copied().filter(|s| *s != spelling).collect();
    options.push(note_list(root_note(*shuffler.pick(&other_spellings), 4), kind));
    // same root, other type, when that root exists in the other pool
    if other_roots.contains(&spelling) {
        options.push(note_list(root, other_kind));
    }
    // wrong root and type
    let foreign: Vec<(Letter, Accidental)> = other_roots
        .iter()
        .copied()
        .filter(|s| *s != spelling)
        .collect();
    options.push(note_list(root_note(*shuffler.pick(&foreign), 4), other_kind));
    shuffler.shuffle(&mut options);

    let kind_name = match kind {
        ScaleType::Major => "major",
        _ => "natural minor",
    };
    ExerciseQuestion {
        kind: ExerciseKind::ScaleConstruction,
        prompt: format!("Build the {} {} scale", root.pitch_class_name(), kind_name),
        display_notes: vec![root],
        correct_answer: correct,
        options,
        hint: Some(
            match kind {
                ScaleType::Major => "Major scale pattern: W-W-H-W-W-W-H",
                _ => "Natural minor pattern: W-H-W-W-H-W-W",
            }
            .to_string(),
        ),
    }
}

/// One note in a key -> name its scale degree, or spot that it is foreign.
pub fn degree_identification(shuffler: &mut Shuffler) -> ExerciseQuestion {
    const NON_DIATONIC: &str = "Non-diatonic";

    let root = root_note(*shuffler.pick(&DEGREE_KEYS), 4);
    let scale = Scale::new(root, ScaleType::Major);

    let (display, correct) = if shuffler.chance(0.2) {
        let foreign: Vec<u8> = (0..12).filter(|chroma| !scale.contains(*chroma)).collect();
        let chroma = *shuffler.pick(&foreign);
        let note = Note::from_midi_simple(60 + chroma as i32, false);
        (note, NON_DIATONIC.to_string())
    } else {
        let degree = shuffler.pick_index(7);
        (scale.note_at_degree(degree), (degree + 1).to_string())
    };

    let pool = ["1", "2", "3", "4", "5", "6", "7", NON_DIATONIC];
    let pool: Vec<&str> = pool
        .iter()
        .copied()
        .filter(|o| *o != correct.as_str())
        .collect();
    let options = shuffler.generate_options(&correct, &pool, &[], 5);

    let scale_notes = scale
        .notes()
        .iter()
        .map(|n| n.pitch_class_name())
        .collect::<Vec<_>>()
        .join(" ");
    ExerciseQuestion {
        kind: ExerciseKind::DegreeIdentification,
        prompt: format!(
            "In {} major: which scale degree is this note?",
            root.pitch_class_name()
        ),
        display_notes: vec![display],
        correct_answer: correct,
        options,
        hint: Some(format!("{} major: {}", root.pitch_class_name(), scale_notes)),
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn count_of(options: &[String], value: &str) -> usize {
        options.iter().filter(|o| *o == value).count()
    }

    #[test]
    fn seeded_shuffler_is_reproducible() {
        let mut a = Shuffler::new(Some(42));
        let mut b = Shuffler::new(Some(42));
        let mut left: Vec<u32> = (0..32).collect();
        let mut right: Vec<u32> = (0..32).collect();
        a.shuffle(&mut left);
        b.shuffle(&mut right);
        assert_eq!(left, right);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut shuffler = Shuffler::new(Some(1));
        let mut items: Vec<u32> = (0..100).collect();
        shuffler.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn options_contain_correct_exactly_once() {
        let mut shuffler = Shuffler::new(Some(7));
        for _ in 0..50 {
            let options =
                shuffler.generate_options("M3", &["m2", "M2", "m3", "P4"], &[], 3);
            assert_eq!(options.len(), 4);
            assert_eq!(count_of(&options, "M3"), 1);
        }
    }

    #[test]
    fn options_dedupe_pool_against_correct() {
        let mut shuffler = Shuffler::new(Some(7));
        let options =
            shuffler.generate_options("M3", &["M3", "m3", "m3", "P4"], &[], 3);
        assert_eq!(options.len(), 3);
        assert_eq!(count_of(&options, "M3"), 1);
        assert_eq!(count_of(&options, "m3"), 1);
    }

    #[test]
    fn options_pad_from_fillers() {
        let mut shuffler = Shuffler::new(Some(7));
        let options = shuffler.generate_options("M3", &["m3"], &["P4", "P5", "m6"], 3);
        assert_eq!(options.len(), 4);
        assert_eq!(count_of(&options, "M3"), 1);
        assert!(options.contains(&"m3".to_string()));
    }

    #[test]
    fn interval_identification_questions() {
        let mut shuffler = Shuffler::new(Some(3));
        for _ in 0..50 {
            let q = interval_identification(&mut shuffler, IntervalFlavor::Harmonic);
            assert_eq!(q.kind, ExerciseKind::IntervalIdentification);
            assert_eq!(q.display_notes.len(), 2);
            assert_eq!(q.options.len(), 6);
            assert_eq!(count_of(&q.options, &q.correct_answer), 1);
            // the displayed pair really spans the named interval
            let interval = Interval::try_from(q.correct_answer.as_str()).unwrap();
            assert_eq!(
                q.display_notes[1].midi() - q.display_notes[0].midi(),
                interval.semitones()
            );
        }
    }

    #[test]
    fn interval_construction_questions() {
        let mut shuffler = Shuffler::new(Some(4));
        for direction in [Direction::Up, Direction::Down] {
            for _ in 0..50 {
                let q = interval_construction(&mut shuffler, direction);
                assert_eq!(count_of(&q.options, &q.correct_answer), 1);
                // no distractor shares the correct answer's pitch class
                let target = Note::try_from(q.correct_answer.as_str()).unwrap();
                for option in &q.options {
                    if *option != q.correct_answer {
                        let note = Note::try_from(option.as_str()).unwrap();
                        assert_ne!(note.chroma(), target.chroma());
                    }
                }
            }
        }
    }

    #[test]
    fn interval_quality_drill_questions() {
        let mut shuffler = Shuffler::new(Some(11));
        for _ in 0..100 {
            let q = interval_quality_drill(&mut shuffler);
            assert_eq!(q.kind, ExerciseKind::IntervalQualityDrill);
            assert_eq!(q.display_notes.len(), 1);
            assert_eq!(q.options.len(), 6);
            assert_eq!(count_of(&q.options, &q.correct_answer), 1);
            // the competing quality lands one semitone off the answer and
            // is always offered
            let target = Note::try_from(q.correct_answer.as_str()).unwrap();
            let has_neighbor = q.options.iter().any(|option| {
                *option != q.correct_answer
                    && Note::try_from(option.as_str())
                        .map(|n| {
                            let distance = (n.chroma() as i32 - target.chroma() as i32)
                                .rem_euclid(12);
                            distance == 1 || distance == 11
                        })
                        .unwrap_or(false)
            });
            assert!(has_neighbor, "{}", q.prompt);
        }
    }

    #[test]
    fn scale_identification_questions() {
        let mut shuffler = Shuffler::new(Some(5));
        for _ in 0..50 {
            let q = scale_identification(&mut shuffler);
            assert_eq!(q.display_notes.len(), 7);
            assert_eq!(q.options.len(), 6);
            assert_eq!(count_of(&q.options, &q.correct_answer), 1);
        }
    }

    #[test]
    fn scale_construction_questions() {
        let mut shuffler = Shuffler::new(Some(6));
        for _ in 0..50 {
            let q = scale_construction(&mut shuffler);
            assert!(q.options.len() >= 3);
            assert_eq!(count_of(&q.options, &q.correct_answer), 1);
            assert_eq!(q.correct_answer.split(' ').count(), 7);
        }
    }

    #[test]
    fn degree_identification_questions() {
        let mut shuffler = Shuffler::new(Some(8));
        let mut saw_non_diatonic = false;
        for _ in 0..200 {
            let q = degree_identification(&mut shuffler);
            assert_eq!(q.options.len(), 6);
            assert_eq!(count_of(&q.options, &q.correct_answer), 1);
            if q.correct_answer == "Non-diatonic" {
                saw_non_diatonic = true;
            } else {
                let degree: usize = q.correct_answer.parse().unwrap();
                assert!((1..=7).contains(&degree));
            }
        }
        assert!(saw_non_diatonic);
    }
}
