//! String distance metrics. Both compare `char`s, not bytes.

/// Edit distance: the fewest single-character insertions, deletions or
/// substitutions turning `a` into `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Length-adjusted Hamming distance.
///
/// Starts from the difference in length, then adds one for every position
/// where the shorter string differs from the start of the longer one.
pub fn hamming(a: &str, b: &str) -> usize {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let mismatches = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca != cb)
        .count();
    a_len.abs_diff(b_len) + mismatches
}
