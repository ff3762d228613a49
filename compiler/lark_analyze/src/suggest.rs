//! "Did you mean" suggestions.

/// Pick the candidate closest to `wanted`, if any is close enough.
///
/// The threshold scales with the length of the name so short names do
/// not attract wild guesses: distance must be at most a third of the
/// name's length, minimum one.
pub fn closest<'a, I>(wanted: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_distance = (wanted.chars().count() / 3).max(1);
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if candidate == wanted {
            continue;
        }
        let d = edit_distance(wanted, candidate);
        if d <= max_distance && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((candidate, d));
        }
    }
    best.map(|(name, _)| name)
}

/// Levenshtein distance over chars, two-row form.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let subst = prev[j] + usize::from(ca != cb);
            row[j + 1] = subst.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}
