//! Integration tests for root detection and chord naming.

use chord_namer::{
    chord_name, chord_suffix, detect_chord, detect_root, root_position, ChordAnalyzer, ChordError,
    FormatError, Interval, IntervalProfile, NoteEntry,
};
use lazy_static::lazy_static;
use pretty_assertions::assert_eq;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

fn notes(pairs: &[(&str, i32)]) -> Vec<NoteEntry> {
    pairs.iter().map(|&(name, absolute)| NoteEntry::new(name, absolute)).collect()
}

/// Entries whose order alone decides nothing; every note gets the same height.
fn unpitched(names: &[&str]) -> Vec<NoteEntry> {
    names.iter().map(|&name| NoteEntry::new(name, 0)).collect()
}

fn quantities(qs: &[i32]) -> Vec<Interval> {
    qs.iter().map(|&q| Interval::new(q, 0)).collect()
}

/// Suffix grammar fixture: extension, qualities per degree 1..=7, expected suffix.
struct SuffixCase {
    label: &'static str,
    extension: i32,
    profile: IntervalProfile,
    expected: &'static str,
}

impl SuffixCase {
    fn new(
        label: &'static str,
        extension: i32,
        degrees: [&'static [i32]; 7],
        expected: &'static str,
    ) -> Self {
        SuffixCase {
            label,
            extension,
            profile: IntervalProfile::from_degrees(degrees.map(|d| d.to_vec())),
            expected,
        }
    }
}

lazy_static! {
    static ref SUFFIX_CASES: Vec<SuffixCase> = vec![
        // triads
        SuffixCase::new("major", 5, [&[], &[], &[0], &[], &[0], &[], &[]], ""),
        SuffixCase::new("minor", 5, [&[], &[], &[-1], &[], &[0], &[], &[]], "m"),
        SuffixCase::new("diminished", 5, [&[], &[], &[-1], &[], &[-1], &[], &[]], "o"),
        SuffixCase::new("augmented", 5, [&[], &[], &[0], &[], &[1], &[], &[]], "+"),
        SuffixCase::new("sus2", 5, [&[], &[0], &[], &[], &[0], &[], &[]], "sus2"),
        SuffixCase::new("sus4", 5, [&[], &[], &[], &[0], &[0], &[], &[]], "sus"),
        SuffixCase::new("sus24", 5, [&[], &[0], &[], &[0], &[0], &[], &[]], "sus24"),
        // sevenths
        SuffixCase::new("major7", 7, [&[], &[], &[0], &[], &[0], &[], &[0]], "Maj7"),
        SuffixCase::new("minor7", 7, [&[], &[], &[-1], &[], &[0], &[], &[-1]], "m7"),
        SuffixCase::new("dominant7", 7, [&[], &[], &[0], &[], &[0], &[], &[-1]], "7"),
        SuffixCase::new("minor7b5", 7, [&[], &[], &[-1], &[], &[-1], &[], &[-1]], "m7b5"),
        SuffixCase::new("diminished7", 7, [&[], &[], &[-1], &[], &[-1], &[], &[-2]], "o7"),
        SuffixCase::new("major7#5", 7, [&[], &[], &[0], &[], &[1], &[], &[0]], "Maj7+"),
        SuffixCase::new("dominant7b5", 7, [&[], &[], &[0], &[], &[-1], &[], &[-1]], "7b5"),
        SuffixCase::new("dominant7#5", 7, [&[], &[], &[0], &[], &[1], &[], &[-1]], "7+"),
        SuffixCase::new("dominant7sus", 7, [&[], &[], &[], &[0], &[0], &[], &[-1]], "7sus"),
        SuffixCase::new("dominant7sus2b5", 7, [&[], &[0], &[], &[], &[-1], &[], &[-1]], "7sus2b5"),
        // extensions
        SuffixCase::new("major13#11", 13, [&[], &[0], &[0], &[1], &[0], &[0], &[0]], "Maj13lyd"),
        SuffixCase::new("minor11", 11, [&[], &[0], &[-1], &[0], &[0], &[], &[-1]], "m11"),
        SuffixCase::new("dominant9", 9, [&[], &[0], &[0], &[], &[0], &[], &[-1]], "9"),
        SuffixCase::new("dominant13", 13, [&[], &[0], &[0], &[], &[0], &[0], &[-1]], "13"),
        SuffixCase::new("dominant7b9", 7, [&[], &[-1], &[0], &[], &[0], &[], &[-1]], "7b9"),
        SuffixCase::new("dominant13#11", 13, [&[], &[0], &[0], &[1], &[0], &[0], &[-1]], "13lyd"),
        SuffixCase::new("dominant9b13", 9, [&[], &[0], &[0], &[], &[0], &[-1], &[-1]], "9b13"),
        SuffixCase::new("dominant7#9b13", 7, [&[], &[1], &[0], &[], &[0], &[-1], &[-1]], "7#9b13"),
        SuffixCase::new("dominant7alt", 7, [&[], &[-1, 1], &[0], &[], &[-1, 1], &[], &[-1]], "7alt"),
        // the alt rewrite is literal
        SuffixCase::new("major7 altered", 7, [&[], &[-1, 1], &[0], &[], &[-1, 1], &[], &[0]], "Maj7#9b9#5b5"),
        SuffixCase::new("dominant9 altered", 9, [&[], &[-1, 1], &[0], &[], &[-1, 1], &[], &[-1]], "9#9b9#5b5"),
        SuffixCase::new("dominant7 no b5", 7, [&[], &[-1, 1], &[0], &[], &[1], &[], &[-1]], "7#9b9+"),
        SuffixCase::new("double flat ninth", 7, [&[], &[-2], &[0], &[], &[0], &[], &[-1]], "7bb9"),
        SuffixCase::new("bare major seventh", 5, [&[], &[], &[0], &[], &[0], &[], &[0]], ""),
    ];

    static ref CHORD_CASES: Vec<(Vec<NoteEntry>, &'static str)> = vec![
        (notes(&[("C", 0), ("G", 7), ("E", 16)]), "C"),
        (notes(&[("E", 28), ("C#", 61), ("A", 9)]), "A"),
        (notes(&[("C", 0), ("G", 7), ("Eb", 16)]), "Cm"),
        (notes(&[("F#", 42), ("B", 35), ("D", 38)]), "Bm"),
        (notes(&[("E", 28), ("G", 31), ("C", 36)]), "C"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("Bb", 10)]), "C7"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("B", 11)]), "CMaj7"),
        (notes(&[("C", 0), ("Eb", 3), ("Gb", 6), ("Bb", 10)]), "Cm7b5"),
        (notes(&[("C", 0), ("Eb", 3), ("Gb", 6), ("Bbb", 9)]), "Co7"),
        (notes(&[("C", 0), ("Eb", 3), ("Gb", 6)]), "Co"),
        (notes(&[("C", 0), ("E", 4), ("G#", 8)]), "C+"),
        (notes(&[("C", 0), ("F", 5), ("G", 7)]), "Csus"),
        (notes(&[("C", 0), ("D", 2), ("G", 7)]), "Csus2"),
        (notes(&[("C", 0), ("D", 2), ("F", 5), ("G", 7)]), "Csus24"),
        // added tones over a full triad read as extensions
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("D", 14)]), "C9"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("F", 17)]), "C11"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("A", 9), ("D", 14)]), "C13"),
        (notes(&[("C", 0), ("F", 5), ("G", 7), ("A", 9)]), "C13sus"),
        // stacked thirds from A outrank the bass
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("A", 9)]), "Am7"),
        (notes(&[("C", 0), ("E", 4), ("A", 9)]), "Am"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("Bb", 10), ("D", 14)]), "C9"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("Bb", 10), ("Db", 13)]), "C7b9"),
        (notes(&[("C", 0), ("E", 4), ("G", 7), ("Bb", 10), ("D", 14), ("A", 21)]), "C13"),
        (notes(&[("G2", 31), ("Bb2", 34), ("D3", 38), ("F3", 41)]), "Gm7"),
        (notes(&[("F", 17), ("A", 21), ("C", 24), ("E", 28), ("C", 36)]), "FMaj7"),
    ];
}

#[test]
fn root_templates() {
    assert_eq!(root_position(&quantities(&[3, 3])), Some(0));
    assert_eq!(root_position(&quantities(&[3, 5])), Some(0));
    assert_eq!(root_position(&quantities(&[5, 3])), Some(0));
    assert_eq!(root_position(&quantities(&[3, 4])), Some(2));
    assert_eq!(root_position(&quantities(&[4, 3])), Some(1));
    assert_eq!(root_position(&quantities(&[5, 2])), Some(2));
    assert_eq!(root_position(&quantities(&[2, 3])), Some(1));
    assert_eq!(root_position(&quantities(&[3, 2])), Some(2));
    assert_eq!(root_position(&quantities(&[2, 5])), Some(1));
    assert_eq!(root_position(&quantities(&[3, 3, 3])), Some(0));
    assert_eq!(root_position(&quantities(&[3, 3, 2])), Some(3));
    assert_eq!(root_position(&quantities(&[3, 2, 3])), Some(2));
    assert_eq!(root_position(&quantities(&[2, 3, 3])), Some(1));
}

#[test]
fn ambiguous_templates_do_not_match() {
    for qs in [&[4, 4][..], &[2, 4], &[4, 2], &[2, 4, 4], &[5], &[]] {
        assert_eq!(root_position(&quantities(qs)), None, "{qs:?}");
    }
}

#[test]
fn detects_triad_roots_in_any_order() {
    let cases: [(&[&str], &str); 11] = [
        (&["C", "E", "G"], "C"),
        (&["C", "G", "E"], "C"),
        (&["E", "G", "C"], "C"),
        (&["E", "C", "G"], "C"),
        (&["D", "F#", "A"], "D"),
        (&["F#", "A", "C#"], "F#"),
        (&["Ab", "C", "E"], "Ab"),
        (&["Eb", "Ab", "C"], "Ab"),
        (&["E#", "C#", "G#"], "C#"),
        (&["Eb", "Ab", "C", "G"], "Ab"),
        (&["F", "Bb", "Db", "Ab"], "Bb"),
    ];
    for (names, root) in cases {
        assert_eq!(detect_root(&unpitched(names)).unwrap().pitch_class(), root, "{names:?}");
    }
    assert_eq!(
        detect_root(&unpitched(&["G", "Db", "Bb", "F"])).unwrap().pitch_class(),
        "G"
    );
}

#[test]
fn ambiguous_voicing_falls_back_to_lowest_note() {
    let voicing = notes(&[("C", 0), ("A", 9), ("D", 14), ("G", 19)]);
    assert_eq!(detect_root(&voicing).unwrap().pitch_class(), "C");

    let rotated = notes(&[("C", 12), ("A", 9), ("D", 14), ("G", 19)]);
    assert_eq!(detect_root(&rotated).unwrap().pitch_class(), "A");
}

#[test]
fn template_limit_forces_lowest_note() {
    let analyzer = ChordAnalyzer::builder().template_limit(0).build();
    let first_inversion = notes(&[("E", 28), ("G", 31), ("C", 36)]);
    assert_eq!(analyzer.detect_root(&first_inversion).unwrap().pitch_class(), "E");
    assert_eq!(analyzer.detect_chord(&first_inversion).unwrap().to_string(), "Emb13");
}

#[test]
fn default_octave_applies_to_bare_names() {
    let analyzer = ChordAnalyzer::builder().default_octave(2).build();
    let root = analyzer.detect_root(&unpitched(&["C", "E", "G"])).unwrap();
    assert_eq!(root.to_string(), "C2");

    let voiced = analyzer.detect_root(&unpitched(&["C5", "E5", "G5"])).unwrap();
    assert_eq!(voiced.to_string(), "C2");
}

#[test]
fn names_chords() {
    let failures: Vec<String> = CHORD_CASES
        .par_iter()
        .filter_map(|(entries, expected)| {
            let actual = chord_name(entries).unwrap();
            (actual != *expected).then(|| {
                let spelled: Vec<&str> = entries.iter().map(|e| e.pitch_name.as_str()).collect();
                format!("{spelled:?}: expected {expected}, got {actual}")
            })
        })
        .collect();
    assert!(failures.is_empty(), "{} chords misnamed:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn suffix_grammar() {
    let failures: Vec<String> = SUFFIX_CASES
        .par_iter()
        .filter_map(|case| {
            let actual = chord_suffix(case.extension, &case.profile);
            (actual != case.expected)
                .then(|| format!("{}: expected {:?}, got {:?}", case.label, case.expected, actual))
        })
        .collect();
    assert!(failures.is_empty(), "{} suffixes wrong:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn added_tones_never_vanish_from_the_name() {
    let triad = chord_name(&notes(&[("C", 0), ("E", 4), ("G", 7)])).unwrap();
    for added in [("D", 14), ("F", 17)] {
        let voicing = notes(&[("C", 0), ("E", 4), ("G", 7), added]);
        assert_eq!(detect_root(&voicing).unwrap().pitch_class(), "C", "{added:?}");
        assert_ne!(chord_name(&voicing).unwrap(), triad, "{added:?}");
    }
}

#[test]
fn chord_result_splits_root_and_suffix() {
    let chord = detect_chord(&notes(&[("C", 0), ("G", 7), ("Eb", 16)])).unwrap();
    assert_eq!(chord.root, "C");
    assert_eq!(chord.suffix, "m");
    assert_eq!(chord.name(), "Cm");
    assert_eq!(chord.to_string(), "Cm");
}

#[test]
fn accepts_tuple_entries() {
    let entries: Vec<NoteEntry> = vec![("D#5", 63).into(), ("A#4", 58).into(), ("F##5", 67).into()];
    assert_eq!(chord_name(&entries).unwrap(), "D#");
}

#[test]
fn analysis_is_repeatable() {
    let voicing = notes(&[("Bb", 10), ("D", 14), ("F", 17), ("Ab", 20), ("C", 24)]);
    let first = chord_name(&voicing).unwrap();
    for _ in 0..10 {
        assert_eq!(chord_name(&voicing).unwrap(), first);
    }
    assert_eq!(first, "Bb9");
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(detect_chord(&[]), Err(ChordError::EmptyInput)));
    assert!(matches!(detect_root(&[]), Err(ChordError::EmptyInput)));
    assert_eq!(
        ChordError::EmptyInput.to_string(),
        "cannot detect chord with no input"
    );
}

#[test]
fn malformed_names_surface_format_errors() {
    let result = detect_chord(&notes(&[("C", 0), ("", 4)]));
    assert!(matches!(result, Err(ChordError::Format(FormatError::Empty))));

    let result = detect_chord(&notes(&[("C", 0), ("#", 4)]));
    assert!(matches!(result, Err(ChordError::Format(FormatError::NoPitchClass(_)))));
}
