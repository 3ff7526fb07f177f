//! Pitch
//!
//! Named, octave-qualified pitches over the seven-letter diatonic alphabet.
//! Every value is exact: a pitch is a letter, an accidental offset and an
//! octave, never a frequency.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::accidental::{decode, encode, is_accidental_char, FormatError};
use crate::interval::Interval;

/// Number of pitch letters.
pub(crate) const LETTER_COUNT: i32 = 7;

/// Semitones per octave.
pub(crate) const SEMITONES: i32 = 12;

/// Octave assumed by [`Pitch::from_str`] when the text carries none.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Letters in scale order, starting from C.
const LETTERS: [char; LETTER_COUNT as usize] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Natural semitone value of each letter, in `LETTERS` order.
const DIATONIC: [i32; LETTER_COUNT as usize] = [0, 2, 4, 5, 7, 9, 11];

/// Letter index for `A..=G`, indexed from `A`.
const INDEX_FROM_A: [usize; LETTER_COUNT as usize] = [5, 6, 0, 1, 2, 3, 4];

/// Default (letter index, accidental) spelling per pitch class: sharps, except Bb.
const DEFAULT_SPELLINGS: [(usize, i32); SEMITONES as usize] = [
    (0, 0),
    (0, 1),
    (1, 0),
    (1, 1),
    (2, 0),
    (3, 0),
    (3, 1),
    (4, 0),
    (4, 1),
    (5, 0),
    (6, -1),
    (6, 0),
];

/// Natural semitone value of a (possibly out of range) scale step.
pub(crate) fn diatonic(step: i32) -> i32 {
    DIATONIC[step.rem_euclid(LETTER_COUNT) as usize]
}

/// Map any ASCII letter onto the C..B alphabet by wrapping modulo 7 from `A`.
fn wrap_letter(c: char) -> usize {
    let offset = (c.to_ascii_uppercase() as i32 - 'A' as i32).rem_euclid(LETTER_COUNT);
    INDEX_FROM_A[offset as usize]
}

/// Direction of a transposition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher pitches.
    Up,
    /// Towards lower pitches.
    Down,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// A single spelled pitch with an octave.
///
/// Equality and hashing are enharmonic: `C#4 == Db2`, because only the pitch
/// class (`semitone_index`) is compared.
#[derive(Debug, Clone)]
pub struct Pitch {
    letter_index: usize,
    accidental: i32,
    octave: i32,
}

impl Pitch {
    pub(crate) fn from_parts(letter_index: usize, accidental: i32, octave: i32) -> Self {
        Pitch {
            letter_index,
            accidental,
            octave,
        }
    }

    /// Parse `Letter [Accidental] [Octave]`, e.g. `"D#5"`, `"Bb"`, `"Fbb-1"`.
    ///
    /// Letters outside `A..=G` are wrapped onto the alphabet (`H` reads as `A`).
    /// `default_octave` is used when the text carries no octave.
    pub fn parse(text: &str, default_octave: i32) -> Result<Self, FormatError> {
        let first = text.chars().next().ok_or(FormatError::Empty)?;
        if !first.is_ascii_alphabetic() {
            return Err(FormatError::NoPitchClass(text.to_string()));
        }

        let rest = &text[first.len_utf8()..];
        let split = rest
            .find(|c: char| !is_accidental_char(c))
            .unwrap_or(rest.len());
        let (accidental_text, octave_text) = rest.split_at(split);
        let accidental = decode(accidental_text)?;

        let octave = if octave_text.is_empty() {
            default_octave
        } else if !octave_text.contains(|c: char| c.is_ascii_digit()) {
            return Err(FormatError::InvalidAccidental(rest.to_string()));
        } else {
            octave_text
                .parse::<i32>()
                .map_err(|_| FormatError::InvalidOctave(text.to_string()))?
        };

        let letter_index = wrap_letter(first);
        // the reference number must fit
        octave
            .checked_mul(SEMITONES)
            .and_then(|n| n.checked_add(DIATONIC[letter_index]))
            .and_then(|n| n.checked_add(accidental))
            .ok_or_else(|| FormatError::InvalidOctave(text.to_string()))?;

        Ok(Pitch::from_parts(letter_index, accidental, octave))
    }

    /// Build a pitch from its absolute reference number (`octave * 12 + semitone`).
    ///
    /// Spelled with sharps, except pitch class 10 which is spelled `Bb`.
    pub fn from_number(number: i32) -> Self {
        let (letter_index, accidental) =
            DEFAULT_SPELLINGS[number.rem_euclid(SEMITONES) as usize];
        Pitch::from_parts(letter_index, accidental, number.div_euclid(SEMITONES))
    }

    /// The letter, `C` through `B`.
    pub fn letter(&self) -> char {
        LETTERS[self.letter_index]
    }

    /// Position of the letter in `C D E F G A B`.
    pub fn letter_index(&self) -> usize {
        self.letter_index
    }

    /// Signed accidental offset in semitones.
    pub fn accidental(&self) -> i32 {
        self.accidental
    }

    /// Accidental spelling (`"#"`, `"bb"`, `"x"`, ...).
    pub fn accidental_text(&self) -> String {
        encode(self.accidental)
    }

    /// Octave number.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Pitch class, `0..12`.
    pub fn semitone_index(&self) -> i32 {
        (DIATONIC[self.letter_index] + self.accidental).rem_euclid(SEMITONES)
    }

    /// Absolute pitch number; C0 is 0.
    pub fn reference_number(&self) -> i32 {
        self.octave * SEMITONES + DIATONIC[self.letter_index] + self.accidental
    }

    /// Spelling without octave, e.g. `"Eb"`.
    pub fn pitch_class(&self) -> String {
        let mut out = String::with_capacity(3);
        out.push(self.letter());
        out.push_str(&self.accidental_text());
        out
    }

    /// Alternative spellings of this pitch, self first.
    ///
    /// Only letters within two steps of this one and accidentals of at most two
    /// semitones are considered. The octave is carried so every entry has the
    /// same reference number as `self`.
    pub fn enharmonic_pitches(&self) -> Vec<Pitch> {
        let own = self.letter_index as i32;
        let mut found: Vec<Pitch> = (-2..=2)
            .filter(|&step| step != 0)
            .filter_map(|step| {
                let index = (own + step).rem_euclid(LETTER_COUNT);
                let mut offset = self.semitone_index() - diatonic(index);
                if offset > SEMITONES / 2 {
                    offset -= SEMITONES;
                } else if offset < -SEMITONES / 2 {
                    offset += SEMITONES;
                }
                if offset.abs() > 2 {
                    return None;
                }
                let octave = (self.reference_number() - diatonic(index) - offset)
                    .div_euclid(SEMITONES);
                Some(Pitch::from_parts(index as usize, offset, octave))
            })
            .collect();

        found.sort_by_key(|p| p.accidental.abs());
        found.insert(0, self.clone());
        found
    }

    /// Alternative pitch-class spellings, self first (e.g. `C`, `B#`, `Dbb`).
    pub fn enharmonics(&self) -> Vec<String> {
        self.enharmonic_pitches()
            .iter()
            .map(Pitch::pitch_class)
            .collect()
    }

    /// Transpose by `interval` in `direction`.
    ///
    /// The target letter is always `quantity - 1` letters away; the accidental
    /// is whatever lands exactly on the target semitone.
    pub fn transpose(&self, interval: &Interval, direction: Direction) -> Pitch {
        let sign = direction.sign();
        let steps = self.letter_index as i32 + sign * (interval.quantity() - 1);
        let letter_index = steps.rem_euclid(LETTER_COUNT);
        let octave = self.octave + steps.div_euclid(LETTER_COUNT);

        let target = self.reference_number() + sign * interval.semitones();
        let natural = octave * SEMITONES + diatonic(letter_index);
        Pitch::from_parts(letter_index as usize, target - natural, octave)
    }

    /// Transpose by signed degree text, e.g. `"b3"` up or `"-2"` down.
    pub fn transpose_by(&self, directive: &str) -> Result<Pitch, FormatError> {
        let (direction, degree) = match directive.strip_prefix('-') {
            Some(degree) => (Direction::Down, degree),
            None => (Direction::Up, directive),
        };
        let interval: Interval = degree.parse()?;
        Ok(self.transpose(&interval, direction))
    }

    /// Semitones from `self` up to `other`, octaves included.
    ///
    /// With `class_only`, `other`'s accidental is ignored and only its letter
    /// and octave count.
    pub fn distance(&self, other: &Pitch, class_only: bool) -> i32 {
        let target = if class_only {
            other.reference_number() - other.accidental
        } else {
            other.reference_number()
        };
        target - self.reference_number()
    }
}

/// Parse `pitch` (falling back to `default_octave`), transpose it by the signed
/// degree `directive`, and render the result as `letter + accidental + octave`.
pub fn transpose_text(
    pitch: &str,
    directive: &str,
    default_octave: i32,
) -> Result<String, FormatError> {
    Ok(Pitch::parse(pitch, default_octave)?
        .transpose_by(directive)?
        .to_string())
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.semitone_index() == other.semitone_index()
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitone_index().hash(state);
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s, DEFAULT_OCTAVE)
    }
}
