//! Interval
//!
//! Diatonic intervals as (quantity, quality) pairs. Quantity counts scale steps
//! (1 = unison, 3 = third, 9 = ninth); quality is the semitone deviation from
//! the major-scale default for that quantity, so `b3` is a minor third and `#11`
//! an augmented eleventh.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::accidental::{decode, encode, is_accidental_char, FormatError};
use crate::pitch::{diatonic, Pitch, LETTER_COUNT, SEMITONES};

/// Semitone size of `quantity` at quality 0, octaves included.
fn base_semitones(quantity: i32) -> i32 {
    (quantity - 1).div_euclid(LETTER_COUNT) * SEMITONES + diatonic(quantity - 1)
}

/// Semitone size of `quantity` raised by `quality`, or `None` when it does
/// not fit an `i32`. `quantity` must be at least 1.
fn checked_semitones(quantity: i32, quality: i32) -> Option<i32> {
    (quantity - 1)
        .div_euclid(LETTER_COUNT)
        .checked_mul(SEMITONES)?
        .checked_add(diatonic(quantity - 1))?
        .checked_add(quality)
}

/// Perfect-class degrees (unison, fourth, fifth, octave) invert without the
/// major/minor offset.
fn is_perfect_class(quantity: i32) -> bool {
    matches!((quantity - 1).rem_euclid(LETTER_COUNT), 0 | 3 | 4)
}

/// A musical interval. Equal intervals have equal size in semitones,
/// regardless of spelling: an augmented third equals a perfect fourth.
#[derive(Debug, Copy, Clone)]
pub struct Interval {
    quantity: i32,
    quality: i32,
}

impl Interval {
    /// Build an interval from its parts.
    pub const fn new(quantity: i32, quality: i32) -> Self {
        Interval { quantity, quality }
    }

    /// The interval from `lower` up to `upper`, within one octave.
    pub fn between(lower: &Pitch, upper: &Pitch) -> Self {
        let steps =
            (upper.letter_index() as i32 - lower.letter_index() as i32).rem_euclid(LETTER_COUNT);
        let span = (upper.semitone_index() - lower.semitone_index()).rem_euclid(SEMITONES);
        let mut quality = span - diatonic(steps);
        // B# over C is an augmented seventh, not a seventh eleven semitones short
        if quality < -SEMITONES / 2 {
            quality += SEMITONES;
        } else if quality > SEMITONES / 2 {
            quality -= SEMITONES;
        }
        Interval::new(steps + 1, quality)
    }

    /// Parse a degree token such as `"3"`, `"b9"` or `"#11"`.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let split = text
            .find(|c: char| !is_accidental_char(c))
            .unwrap_or(text.len());
        let (accidental, digits) = text.split_at(split);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidDegree(text.to_string()));
        }
        let quantity = digits
            .parse::<i32>()
            .map_err(|_| FormatError::InvalidDegree(text.to_string()))?;
        if quantity < 1 {
            return Err(FormatError::InvalidDegree(text.to_string()));
        }
        let quality = decode(accidental)?;
        if checked_semitones(quantity, quality).is_none() {
            return Err(FormatError::InvalidDegree(text.to_string()));
        }
        Ok(Interval::new(quantity, quality))
    }

    /// Scale-step count.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Semitone deviation from the default for this quantity.
    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// Degree folded into one octave, `1..=7`.
    pub fn simple_degree(&self) -> usize {
        ((self.quantity - 1).rem_euclid(LETTER_COUNT) + 1) as usize
    }

    /// Whether the interval spans more than an octave (ninths and up).
    pub fn is_compound(&self) -> bool {
        self.quantity > 8
    }

    /// Size in semitones; compound intervals include their full octaves.
    pub fn semitones(&self) -> i32 {
        base_semitones(self.quantity) + self.quality
    }
}

/// Intervals between each adjacent pair of `pitches`.
pub fn intervals_between(pitches: &[Pitch]) -> Vec<Interval> {
    pitches
        .windows(2)
        .map(|pair| Interval::between(&pair[0], &pair[1]))
        .collect()
}

/// Intervals from `root` up to each of `pitches`.
pub fn intervals_from(root: &Pitch, pitches: &[Pitch]) -> Vec<Interval> {
    pitches.iter().map(|p| Interval::between(root, p)).collect()
}

impl Neg for Interval {
    type Output = Interval;

    /// The complementary interval within an octave: thirds become sixths,
    /// major becomes minor, perfect stays perfect.
    fn neg(self) -> Interval {
        let quantity = 8 - (self.quantity - 1).rem_euclid(LETTER_COUNT);
        let quality = if is_perfect_class(quantity) {
            -self.quality
        } else {
            -1 - self.quality
        };
        Interval::new(quantity, quality)
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        let quantity = self.quantity + rhs.quantity - 1;
        let quality = self.semitones() + rhs.semitones() - base_semitones(quantity);
        Interval::new(quantity, quality)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        let quantity = self.quantity - rhs.quantity + 1;
        let quality = self.semitones() - rhs.semitones() - base_semitones(quantity);
        Interval::new(quantity, quality)
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.semitones() == other.semitones()
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitones().hash(state);
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitones().cmp(&other.semitones())
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", encode(self.quality), self.quantity)
    }
}

impl FromStr for Interval {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::parse(s)
    }
}
