//! Interval profile
//!
//! Chord members bucketed by scale degree relative to the root, and the
//! grammar that turns such a profile into a chord-name suffix.

use std::cmp::Ordering;

use crate::interval::Interval;

/// Number of degree slots (1 through 7).
pub const DEGREES: usize = 7;

/// Degrees that may carry alterations, with the number they are written as.
const ALTERED_DEGREES: [(usize, &str); 3] = [(2, "9"), (5, "5"), (6, "13")];

/// Qualities present at each scale degree, relative to a chord root.
///
/// Compound degrees share the slot of their simple counterpart, so a ninth
/// lands on degree 2. Each slot is kept sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalProfile {
    degrees: [Vec<i32>; DEGREES],
}

impl IntervalProfile {
    /// An empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build directly from per-degree quality lists, degree 1 first.
    pub fn from_degrees(mut degrees: [Vec<i32>; DEGREES]) -> Self {
        for slot in degrees.iter_mut() {
            slot.sort_unstable();
        }
        IntervalProfile { degrees }
    }

    /// Record `interval` on its simple degree.
    pub fn insert(&mut self, interval: &Interval) {
        let slot = &mut self.degrees[interval.simple_degree() - 1];
        let at = slot.partition_point(|&q| q < interval.quality());
        slot.insert(at, interval.quality());
    }

    /// Qualities at `degree` (1-based). Out-of-range degrees are empty.
    pub fn degree(&self, degree: usize) -> &[i32] {
        match degree {
            1..=DEGREES => &self.degrees[degree - 1],
            _ => &[],
        }
    }

    /// Whether nothing sounds at `degree`.
    pub fn is_empty_at(&self, degree: usize) -> bool {
        self.degree(degree).is_empty()
    }

    /// Whether `degree` holds exactly one member, with `quality`.
    pub fn is_only(&self, degree: usize, quality: i32) -> bool {
        self.degree(degree) == [quality]
    }
}

impl FromIterator<Interval> for IntervalProfile {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut profile = IntervalProfile::new();
        for interval in iter {
            profile.insert(&interval);
        }
        profile
    }
}

/// Chord function (`""` or `"m"`) and suspension suffix.
fn function_and_suspension(profile: &IntervalProfile) -> (&'static str, String) {
    if profile.is_empty_at(3) {
        let mut suspension = String::new();
        if profile.is_only(2, 0) {
            suspension.push_str("sus2");
        }
        if profile.is_only(4, 0) {
            suspension.push_str(if suspension.is_empty() { "sus" } else { "4" });
        }
        ("", suspension)
    } else if profile.is_only(3, -1) {
        ("m", String::new())
    } else {
        ("", String::new())
    }
}

/// Literal rewrites applied to the assembled suffix, in order.
fn rewrite(name: String) -> String {
    if name == "7#9b9#5b5" {
        return "7alt".to_string();
    }
    let mut name = name;
    // diminished already implies the minor third and flat fifth
    if name.contains('o') {
        name = name.replace('m', "").replace("b5", "");
    }
    if name == "mb5" {
        name = "o".to_string();
    }
    if name.ends_with("#5") {
        name = name.replace("#5", "+");
    }
    if name == "Maj" {
        name.clear();
    }
    name
}

/// Synthesize the chord-name suffix for `profile` with the given extension.
///
/// `extension` is the highest chord-tone degree (5 for a triad, 7, 9, 11, 13);
/// it is written out only above 5.
///
/// ```
/// use chord_namer::{chord_suffix, IntervalProfile};
///
/// let dominant = IntervalProfile::from_degrees([
///     vec![], vec![], vec![0], vec![], vec![0], vec![], vec![-1],
/// ]);
/// assert_eq!(chord_suffix(7, &dominant), "7");
/// ```
pub fn chord_suffix(extension: i32, profile: &IntervalProfile) -> String {
    let (function, suspension) = function_and_suspension(profile);

    let mut name = String::from(function);
    if profile.is_only(7, -2) {
        name.push('o');
    }
    if profile.is_only(7, 0) {
        name.push_str("Maj");
    }
    if extension > 5 {
        name.push_str(&extension.to_string());
    }
    if profile.is_only(4, 1) {
        name.push_str("lyd");
    }
    name.push_str(&suspension);

    for (degree, label) in ALTERED_DEGREES {
        for &alteration in profile.degree(degree).iter().rev() {
            match alteration.cmp(&0) {
                Ordering::Greater => {
                    name.push('#');
                    name.push_str(label);
                }
                Ordering::Less => {
                    name.push_str(&"b".repeat(alteration.unsigned_abs() as usize));
                    name.push_str(label);
                }
                Ordering::Equal => {}
            }
        }
    }

    rewrite(name)
}
