use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Orders strings of one writing system.
///
/// Implementations must be total orders that return `Equal` for identical
/// strings; homograph numbering relies on it.
pub trait Collator: Send + Sync + fmt::Debug {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Culture-insensitive collation.
///
/// Compares base letters first (decomposed, marks dropped, lowercased), then
/// marks, then falls back to ordinal order so distinct strings never tie.
#[derive(Debug, Default, Clone, Copy)]
pub struct InvariantCollator;

impl Collator for InvariantCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        base_letters(a)
            .cmp(base_letters(b))
            .then_with(|| folded(a).cmp(folded(b)))
            .then_with(|| a.cmp(b))
    }
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Plain code point order.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdinalCollator;

impl Collator for OrdinalCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}
