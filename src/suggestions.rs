//! # Error Suggestions
//!
//! Helpers for attaching hints to errors. Errors should tell users what went
//! wrong AND how to fix it; most input mistakes in this crate are misspelled
//! field names, so the main helper here is a "did you mean" lookup.

use crate::catalog::TokenField;

/// Build a "did you mean" hint for a name that is close to one of `candidates`.
///
/// Returns `None` when nothing is within edit distance 2.
pub fn did_you_mean<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    find_similar(input, candidates).map(|s| format!("Did you mean '{s}'?"))
}

/// Hint for a name that should have been one of the shared token attributes.
///
/// Falls back to listing every attribute when no close match exists.
pub fn unknown_token_field(input: &str) -> String {
    did_you_mean(input, TokenField::ALL.iter().map(|f| f.name())).unwrap_or_else(|| {
        let names: Vec<&str> = TokenField::ALL.iter().map(|f| f.name()).collect();
        format!("Valid token fields are: {}", names.join(", "))
    })
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row variant: only the previous row is needed.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
