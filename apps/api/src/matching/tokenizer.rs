//! Significant-token extraction shared by the relevance and alignment stages.

use std::collections::BTreeSet;

/// Function words carrying no topical signal.
const STOP_WORDS: &[&str] = &[
    "a", "ability", "about", "across", "all", "an", "and", "any", "are", "as", "at", "be", "been",
    "being", "but", "by", "can", "do", "etc", "experience", "experienced", "for", "from", "has",
    "have", "in", "including", "into", "is", "it", "its", "job", "looking", "new", "of", "on",
    "or", "other", "our", "out", "over", "per", "responsibilities", "responsible", "role",
    "skills", "strong", "such", "team", "than", "that", "the", "their", "them", "these", "this",
    "those", "through", "to", "under", "up", "using", "via", "was", "we", "were", "what", "which",
    "while", "who", "will", "with", "within", "work", "worked", "working", "would", "year",
    "years", "you", "your",
];

/// Seniority and filler words that appear in titles of every discipline.
/// "Senior Accountant" must not look related to "Senior Python Developer".
const GENERIC_ROLE_WORDS: &[&str] = &[
    "associate", "chief", "head", "ii", "iii", "intern", "jr", "junior", "lead", "level", "mid",
    "principal", "sr", "senior", "staff", "trainee",
];

/// Inflection suffixes folded away so "development", "developing" and
/// "developed" compare equal. Checked in order; the first that fits wins.
/// Agent nouns ("developer", "manager") keep their "-er" so a title never
/// matches a bare verb; see [`agent_roots`].
const SUFFIXES: &[&str] = &["ments", "ment", "ings", "ing", "ed", "s", "e"];

const AGENT_SUFFIXES: &[&str] = &["er", "or"];

/// Shortest stem a suffix may leave behind.
const MIN_STEM_CHARS: usize = 4;

/// Lower-cased, stemmed significant tokens of `text`.
///
/// Splits on anything that is not alphanumeric, `+` or `#` (so "c++" and "c#"
/// survive), drops stop words, generic role words, pure numbers and single
/// characters, then folds common inflections.
pub fn significant_tokens(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !is_term_char(c))
        .filter(|token| is_significant(token))
        .map(stem)
        .collect()
}

/// Union of the significant tokens of every text.
pub fn significant_tokens_of<'a, I>(texts: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().flat_map(significant_tokens).collect()
}

fn is_significant(token: &str) -> bool {
    token.chars().count() >= 2
        && token.chars().any(char::is_alphabetic)
        && !STOP_WORDS.contains(&token)
        && !GENERIC_ROLE_WORDS.contains(&token)
}

/// Strips inflection suffixes until none fits ("engineering" -> "engineer").
fn stem(token: &str) -> String {
    let mut current = token;
    while let Some(rest) = SUFFIXES.iter().find_map(|suffix| {
        let rest = current.strip_suffix(suffix)?;
        let keeps_s = *suffix == "s" && rest.ends_with(['s', 'i', 'u']);
        (rest.chars().count() >= MIN_STEM_CHARS && !keeps_s).then_some(rest)
    }) {
        current = rest;
    }
    current.to_string()
}

/// `tokens` plus the verb stem behind every agent noun ("developer" ->
/// "develop", "administrator" -> "administrat"). For measuring how much of
/// the work an entry covers, not for deciding whether the role is related.
pub fn agent_roots(tokens: &BTreeSet<String>) -> BTreeSet<String> {
    let mut expanded = tokens.clone();
    for token in tokens {
        let root = AGENT_SUFFIXES
            .iter()
            .find_map(|suffix| token.strip_suffix(suffix))
            .filter(|root| root.chars().count() >= MIN_STEM_CHARS);
        if let Some(root) = root {
            expanded.insert(stem(root));
        }
    }
    expanded
}

/// Canonical comparison form for skill names and weightage keys.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Characters that belong to a term: "c" is not inside "c++" or "c#".
fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Whether `needle` occurs in `haystack` with no term character on either
/// side. Both arguments must already be normalized.
pub fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(is_term_char) && !after.is_some_and(is_term_char)
    })
}
