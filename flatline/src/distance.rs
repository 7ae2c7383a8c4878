//! Levenshtein edit distance between strings.

/// Returns the number of single-char insertions, deletions and
/// substitutions needed to turn `a` into `b`.
///
/// Returns `None` if either string is empty.
///
/// ```rust
/// use flatline::levenshtein;
///
/// assert_eq!(levenshtein("foo", "foo"), Some(0));
/// assert_eq!(levenshtein("foo", "bar"), Some(3));
/// assert_eq!(levenshtein("", "bar"), None);
/// ```
pub fn levenshtein(a: &str, b: &str) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return None;
    }

    // Single rolling row of the cost matrix.
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &x) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diagonal
            } else {
                1 + diagonal.min(row[j]).min(above)
            };
            diagonal = above;
        }
    }

    row.last().copied()
}

/// Returns the edit distance as a percentage of the longer string's length.
///
/// ```rust
/// use flatline::str_dist;
///
/// assert_eq!(str_dist("foo", "bar"), Some(100.0));
/// let d = str_dist("something", "somewhere").unwrap();
/// assert!((d - 44.44).abs() < 0.01);
/// ```
pub fn str_dist(a: &str, b: &str) -> Option<f64> {
    let distance = levenshtein(a, b)?;
    let longest = a.chars().count().max(b.chars().count());

    Some(distance as f64 * 100.0 / longest as f64)
}
