//! Chord Detector
//!
//! Root detection and chord naming for an unordered set of sounding notes.
//!
//! The pipeline is pure: distinct spellings are ordered by letter, matched
//! against inversion templates to find the root (falling back to the lowest
//! sounding note), profiled by degree relative to that root, and finally named.

use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, trace};

use crate::accidental::FormatError;
use crate::interval::{intervals_between, Interval};
use crate::pitch::{Pitch, DEFAULT_OCTAVE};
use crate::profile::{chord_suffix, IntervalProfile};

/// Distinct-spelling count at which template matching is skipped.
const TEMPLATE_LIMIT: usize = 5;

/// Extension assumed when no member qualifies (a plain triad).
const TRIAD_EXTENSION: i32 = 5;

/// Adjacent-letter quantity sequences whose second member is the root.
const ROOT_ON_SECOND: &[&[i32]] = &[
    &[4, 3],    // triad
    &[2, 3, 3], // seventh
    &[2, 3],    // seventh, no fifth
    &[2, 5],    // seventh, no third
];

/// Adjacent-letter quantity sequences whose third member is the root.
const ROOT_ON_THIRD: &[&[i32]] = &[
    &[3, 4],    // triad
    &[3, 2, 3], // seventh
    &[5, 2],    // seventh, no fifth
    &[3, 2],    // seventh, no third
];

/// Adjacent-letter quantity sequences whose fourth member is the root.
const ROOT_ON_FOURTH: &[&[i32]] = &[&[3, 3, 2]];

/// One sounding note: its spelling and an absolute pitch value.
///
/// `absolute` only orders notes from low to high; it never decides the pitch
/// class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Pitch spelling, optionally with octave (`"Eb"`, `"D#5"`).
    pub pitch_name: String,
    /// Absolute pitch value used to find the lowest note.
    pub absolute: i32,
}

impl NoteEntry {
    /// Create an entry.
    pub fn new(pitch_name: impl Into<String>, absolute: i32) -> Self {
        NoteEntry {
            pitch_name: pitch_name.into(),
            absolute,
        }
    }
}

impl<S: Into<String>> From<(S, i32)> for NoteEntry {
    fn from((pitch_name, absolute): (S, i32)) -> Self {
        NoteEntry::new(pitch_name, absolute)
    }
}

/// A named chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    /// Root pitch class, e.g. `"Ab"`.
    pub root: String,
    /// Name suffix, e.g. `"m7"`; empty for a major triad.
    pub suffix: String,
}

impl Chord {
    /// Full chord name, root followed by suffix.
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.suffix)
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)
    }
}

/// Errors when detecting chords
#[derive(Debug, Error)]
pub enum ChordError {
    /// No notes were supplied.
    #[error("cannot detect chord with no input")]
    EmptyInput,

    /// A note entry's pitch name could not be parsed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Which position of a letter-ordered chord holds the root, judged from the
/// quantities of its adjacent intervals.
///
/// Stacked thirds (optionally with a fifth gap) put the root first. Returns
/// `None` when no template matches.
pub fn root_position(intervals: &[Interval]) -> Option<usize> {
    let quantities: Vec<i32> = intervals.iter().map(Interval::quantity).collect();

    let stacked_thirds = quantities.contains(&3) && quantities.iter().all(|&q| q == 3 || q == 5);
    if stacked_thirds {
        return Some(0);
    }

    [(ROOT_ON_SECOND, 1), (ROOT_ON_THIRD, 2), (ROOT_ON_FOURTH, 3)]
        .into_iter()
        .find(|(templates, _)| templates.iter().any(|t| *t == quantities.as_slice()))
        .map(|(_, position)| position)
}

/// Whether `interval` is a plain chord tone that may define the extension.
///
/// Sevenths count as major, dominant or diminished; every other degree only
/// unaltered. The older rule counted only the dominant seventh, which names
/// `C-E-G-B` as plain `C`.
fn is_extension_tone(interval: &Interval) -> bool {
    match interval.simple_degree() {
        7 => (-2..=0).contains(&interval.quality()),
        _ => interval.quality() == 0,
    }
}

/// Read seconds, fourths and sixths as the ninths, elevenths and thirteenths
/// they are above a seventh.
fn as_extended(interval: Interval) -> Interval {
    let quantity = interval.quantity();
    if quantity < 8 && quantity % 2 == 0 {
        Interval::new(quantity + 7, interval.quality())
    } else {
        interval
    }
}

/// Builder for `ChordAnalyzer` to customize template matching and parsing
pub struct ChordAnalyzerBuilder {
    template_limit: usize,
    default_octave: i32,
}

impl ChordAnalyzerBuilder {
    /// Create a new builder with template_limit = 5 and default_octave = 4
    pub fn new() -> Self {
        ChordAnalyzerBuilder {
            template_limit: TEMPLATE_LIMIT,
            default_octave: DEFAULT_OCTAVE,
        }
    }

    /// Set the distinct-spelling count from which the lowest note is always
    /// taken as root
    pub fn template_limit(mut self, value: usize) -> Self {
        self.template_limit = value;
        self
    }

    /// Set the octave assumed for pitch names that carry none
    pub fn default_octave(mut self, value: i32) -> Self {
        self.default_octave = value;
        self
    }

    /// Build the `ChordAnalyzer`
    pub fn build(self) -> ChordAnalyzer {
        ChordAnalyzer {
            template_limit: self.template_limit,
            default_octave: self.default_octave,
        }
    }
}

impl Default for ChordAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main chord analyzer
#[derive(Debug, Clone)]
pub struct ChordAnalyzer {
    template_limit: usize,
    default_octave: i32,
}

impl ChordAnalyzer {
    /// Return a builder to customize the analyzer
    pub fn builder() -> ChordAnalyzerBuilder {
        ChordAnalyzerBuilder::new()
    }

    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        ChordAnalyzerBuilder::new().build()
    }

    /// Parse every entry, keeping its absolute value.
    fn parse_notes(&self, notes: &[NoteEntry]) -> Result<Vec<(Pitch, i32)>, ChordError> {
        if notes.is_empty() {
            return Err(ChordError::EmptyInput);
        }
        notes
            .iter()
            .map(|n| -> Result<(Pitch, i32), ChordError> {
                Ok((Pitch::parse(&n.pitch_name, self.default_octave)?, n.absolute))
            })
            .collect()
    }

    /// Distinct spellings in alphabetical letter order (A first), then by
    /// accidental, all placed in the default octave.
    fn distinct_spellings(&self, parsed: &[(Pitch, i32)]) -> Vec<Pitch> {
        let mut spellings: Vec<Pitch> = parsed
            .iter()
            .map(|(p, _)| {
                Pitch::from_parts(p.letter_index(), p.accidental(), self.default_octave)
            })
            .collect();
        spellings.sort_by_key(|p| (p.letter(), p.accidental()));
        spellings.dedup_by_key(|p| (p.letter(), p.accidental()));
        spellings
    }

    fn find_root(
        &self,
        parsed: &[(Pitch, i32)],
        spellings: &[Pitch],
    ) -> Result<Pitch, ChordError> {
        if spellings.len() < self.template_limit {
            let intervals = intervals_between(spellings);
            if let Some(position) = root_position(&intervals) {
                let root = &spellings[position];
                let ordered: Vec<String> = spellings.iter().map(Pitch::pitch_class).collect();
                debug!(
                    spellings = ?ordered,
                    position,
                    root = %root.pitch_class(),
                    "root found by inversion template"
                );
                return Ok(root.clone());
            }
        }

        let (lowest, absolute) = parsed
            .iter()
            .min_by_key(|(_, absolute)| *absolute)
            .ok_or(ChordError::EmptyInput)?;
        debug!(
            distinct = spellings.len(),
            root = %lowest.pitch_class(),
            absolute,
            "no inversion template matched, using lowest note"
        );
        Ok(Pitch::from_parts(
            lowest.letter_index(),
            lowest.accidental(),
            self.default_octave,
        ))
    }

    /// Detect the most plausible root of `notes`.
    ///
    /// The returned pitch carries the configured default octave, not the
    /// octave of any input note.
    ///
    /// Returns `Err(ChordError::EmptyInput)` if `notes` is empty.
    pub fn detect_root(&self, notes: &[NoteEntry]) -> Result<Pitch, ChordError> {
        let parsed = self.parse_notes(notes)?;
        let spellings = self.distinct_spellings(&parsed);
        self.find_root(&parsed, &spellings)
    }

    /// Detect the root and name the chord formed by `notes`.
    ///
    /// Returns:
    /// - `Err(EmptyInput)` if `notes` is empty.
    /// - `Err(Format)` if a pitch name cannot be parsed.
    pub fn detect_chord(&self, notes: &[NoteEntry]) -> Result<Chord, ChordError> {
        let parsed = self.parse_notes(notes)?;
        let spellings = self.distinct_spellings(&parsed);
        let root = self.find_root(&parsed, &spellings)?;

        let members: Vec<Interval> = spellings
            .iter()
            .filter(|p| {
                p.letter_index() != root.letter_index() || p.accidental() != root.accidental()
            })
            .map(|p| Interval::between(&root, p))
            .collect();
        // a second or fourth replacing the third of a plain triad is a suspension
        let suspended = !members
            .iter()
            .any(|i| matches!(i.simple_degree(), 3 | 7));
        let members: Vec<Interval> = members
            .into_iter()
            .map(|i| {
                if suspended && matches!(i.simple_degree(), 2 | 4) {
                    i
                } else {
                    as_extended(i)
                }
            })
            .collect();

        let extension = members
            .iter()
            .filter(|i| is_extension_tone(i))
            .map(Interval::quantity)
            .max()
            .unwrap_or(TRIAD_EXTENSION);
        let profile: IntervalProfile = members.iter().copied().collect();
        let suffix = chord_suffix(extension, &profile);

        let degrees: Vec<String> = members.iter().map(Interval::to_string).collect();
        trace!(
            root = %root.pitch_class(),
            members = ?degrees,
            extension,
            suffix = %suffix,
            "chord named"
        );

        Ok(Chord {
            root: root.pitch_class(),
            suffix,
        })
    }
}

impl Default for ChordAnalyzer {
    fn default() -> Self {
        ChordAnalyzer::new()
    }
}

/// Detect the root of `notes` with the default analyzer.
pub fn detect_root(notes: &[NoteEntry]) -> Result<Pitch, ChordError> {
    ChordAnalyzer::new().detect_root(notes)
}

/// Detect and name the chord formed by `notes` with the default analyzer.
pub fn detect_chord(notes: &[NoteEntry]) -> Result<Chord, ChordError> {
    ChordAnalyzer::new().detect_chord(notes)
}

/// Full chord name (`"Cm7"`) for `notes` with the default analyzer.
pub fn chord_name(notes: &[NoteEntry]) -> Result<String, ChordError> {
    detect_chord(notes).map(|chord| chord.name())
}
