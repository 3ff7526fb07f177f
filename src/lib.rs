//! # chord_namer
//!
//! Exact symbolic music theory: parse pitch and interval notation, transpose
//! and respell pitches without ever touching frequencies, and name the chord
//! formed by an unordered set of sounding notes.
//!
//! ## Example
//! ```rust
//! use chord_namer::{ChordAnalyzer, Direction, Interval, NoteEntry, Pitch};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Pitches and intervals are parsed from plain text
//!     let c: Pitch = "C4".parse()?;
//!     let minor_third: Interval = "b3".parse()?;
//!     assert_eq!(c.transpose(&minor_third, Direction::Up).to_string(), "Eb4");
//!
//!     // 2) Build a chord analyzer
//!     let analyzer = ChordAnalyzer::builder()
//!         .default_octave(3)
//!         .build();
//!
//!     // 3) Name a voicing from (pitch, absolute pitch) pairs
//!     let notes = [
//!         NoteEntry::new("G", 7),
//!         NoteEntry::new("Bb", 10),
//!         NoteEntry::new("D", 14),
//!         NoteEntry::new("F", 17),
//!     ];
//!     let chord = analyzer.detect_chord(&notes)?;
//!     assert_eq!(chord.to_string(), "Gm7");
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Accidental text codec.
pub use accidental::{decode as decode_accidental, encode as encode_accidental, FormatError};

/// Spelled pitches and transposition.
pub use pitch::{transpose_text, Direction, Pitch, DEFAULT_OCTAVE};

/// Diatonic intervals.
pub use interval::{intervals_between, intervals_from, Interval};

/// Degree profiles and chord-name synthesis.
pub use profile::{chord_suffix, IntervalProfile, DEGREES};

/// High‐level chord analysis API.
pub use chord_detector::{
    chord_name, detect_chord, detect_root, root_position, Chord, ChordAnalyzer,
    ChordAnalyzerBuilder, ChordError, NoteEntry,
};

/// Accidental encoding and decoding.
pub mod accidental;

/// Pitch parsing, respelling and transposition.
pub mod pitch;

/// Interval detection and arithmetic.
pub mod interval;

/// Interval profiles and chord-name grammar.
pub mod profile;

/// Chord root detection and naming.
pub mod chord_detector;
