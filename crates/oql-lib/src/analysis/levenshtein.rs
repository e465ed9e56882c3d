//! Edit distance for "did you mean" suggestions.

/// Levenshtein distance over `char`s.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Candidates within `max_distance` of `input`, closest first.
///
/// Ties go to the more frequently used candidate, then to the name.
pub fn suggestions<'a, I>(input: &str, candidates: I, max_distance: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut scored: Vec<_> = candidates
        .into_iter()
        .filter_map(|(name, count)| {
            // Length difference is a lower bound on the distance.
            if name.chars().count().abs_diff(input.chars().count()) > max_distance {
                return None;
            }
            let distance = levenshtein(input, name);
            (distance <= max_distance).then_some((distance, count, name))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)));
    scored.into_iter().map(|(_, _, name)| name).collect()
}
