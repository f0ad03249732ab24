//! Nearest-name lookup for unrecognized parameter names.

use std::fmt;

use crate::distance;

/// The known names closest to an unrecognized one.
///
/// `names` holds every name tied at the minimum `distance`, sorted so that
/// diagnostics are the same from run to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub names: Vec<String>,
    pub distance: usize,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(" or "))
    }
}

/// Find the name(s) in `known` at the smallest edit distance from `bad`.
///
/// No threshold is applied: any non-empty `known` yields a suggestion.
/// Returns `None` only if `known` is empty.
pub fn closest_match<'a, I>(bad: &str, known: I) -> Option<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<usize> = None;
    let mut names: Vec<String> = Vec::new();

    for name in known {
        let dist = distance::levenshtein(bad, name);
        match best {
            Some(min) if dist > min => {}
            Some(min) if dist == min => names.push(name.to_string()),
            _ => {
                best = Some(dist);
                names.clear();
                names.push(name.to_string());
            }
        }
    }

    let distance = best?;
    names.sort();
    names.dedup();
    Some(Suggestion { names, distance })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_closest_name() {
        let s = closest_match("verbos", ["verbose", "count", "src"]).unwrap();
        assert_eq!(s.names, vec!["verbose"]);
        assert_eq!(s.distance, 1);
        assert_eq!(s.to_string(), "verbose");
    }

    #[test]
    fn ties_are_sorted_and_joined() {
        let s = closest_match("cat", ["hat", "bat", "dog"]).unwrap();
        assert_eq!(s.names, vec!["bat", "hat"]);
        assert_eq!(s.distance, 1);
        assert_eq!(s.to_string(), "bat or hat");
    }

    #[test]
    fn smaller_distance_resets_ties() {
        // "bbt" and "hht" tie at 2 before "cats" at 1 replaces them
        let s = closest_match("cat", ["bbt", "hht", "cats"]).unwrap();
        assert_eq!(s.names, vec!["cats"]);
        assert_eq!(s.distance, 1);
    }

    #[test]
    fn distant_names_still_suggested() {
        let s = closest_match("zzzzzzzz", ["a"]).unwrap();
        assert_eq!(s.names, vec!["a"]);
        assert_eq!(s.distance, 8);
    }

    #[test]
    fn order_of_known_names_does_not_matter() {
        let a = closest_match("cat", ["hat", "bat"]).unwrap();
        let b = closest_match("cat", ["bat", "hat"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn no_known_names() {
        assert_eq!(closest_match("x", std::iter::empty()), None);
    }
}
