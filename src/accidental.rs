//! Accidentals
//!
//! Conversion between an integer semitone offset and its textual spelling,
//! plus the parse error shared by every notation parser in the crate.

use thiserror::Error;

/// Errors raised while parsing pitch, accidental, or degree notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The accidental run contained something other than `#`, `b` or `x`.
    #[error("invalid accidental `{0}`")]
    InvalidAccidental(String),

    /// Nothing to parse.
    #[error("pitch name cannot be empty")]
    Empty,

    /// No pitch letter at the start of the input.
    #[error("no pitch class found in `{0}`")]
    NoPitchClass(String),

    /// Text after the accidental was not a decimal octave number.
    #[error("invalid octave in `{0}`")]
    InvalidOctave(String),

    /// A degree token without a usable scale-step number.
    #[error("invalid interval degree `{0}`")]
    InvalidDegree(String),
}

/// Characters allowed in an accidental run.
pub(crate) fn is_accidental_char(c: char) -> bool {
    matches!(c, '#' | 'b' | 'x')
}

/// Decode an accidental spelling into a semitone offset.
///
/// `#` counts +1, `x` counts +2 and `b` counts -1; mixed runs are summed, so
/// `"#b"` decodes to 0. Empty text is 0.
pub fn decode(text: &str) -> Result<i32, FormatError> {
    let mut offset = 0;
    for c in text.chars() {
        offset += match c {
            '#' => 1,
            'x' => 2,
            'b' => -1,
            _ => return Err(FormatError::InvalidAccidental(text.to_string())),
        };
    }
    Ok(offset)
}

/// Encode a semitone offset as accidental text.
///
/// Sharps are written as `x` per two semitones plus a trailing `#` for an odd
/// remainder; flats are written as one `b` each.
pub fn encode(offset: i32) -> String {
    match offset {
        0 => String::new(),
        o if o > 0 => {
            let mut out = "x".repeat((o / 2) as usize);
            if o % 2 == 1 {
                out.push('#');
            }
            out
        }
        o => "b".repeat(o.unsigned_abs() as usize),
    }
}
