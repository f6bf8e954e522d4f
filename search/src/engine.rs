//! Closest-form selection.

use crate::config::MatcherConfig;
use crate::distance::edit_distance;
use crate::query::MatchOptions;
use crate::results::Tiers;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

fn normalize<'a>(form: &'a str, config: &MatcherConfig) -> Cow<'a, str> {
    if config.normalize {
        Cow::Owned(form.nfd().collect())
    } else {
        Cow::Borrowed(form)
    }
}

/// Returns the strings from `forms` closest to `target`.
///
/// See [`find_closest_forms_by`] for the selection rules.
pub fn find_closest_forms<'a, I>(
    forms: I,
    target: &str,
    options: MatchOptions,
    config: &MatcherConfig,
) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    find_closest_forms_by(forms, |form| Some(*form), target, options, config)
}

/// Returns the items whose extracted form is closest to `target`.
///
/// Items without a form, or with an empty one, are skipped. Items farther than
/// `config.max_distance` are never returned. With
/// [`MatchOptions::IncludePrefixedForms`] every form that starts with the
/// target has distance 0. With [`MatchOptions::IncludeNextClosestForms`] the
/// tier at the smallest distance above the minimum is appended after the
/// closest tier.
pub fn find_closest_forms_by<T, I, F>(
    items: I,
    extract: F,
    target: &str,
    options: MatchOptions,
    config: &MatcherConfig,
) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<&str>,
{
    let prefixed = options.includes_prefixed_forms();
    let target = normalize(target, config);
    let mut tiers = Tiers::new(options.includes_next_closest_forms());
    let mut examined = 0usize;

    for item in items {
        let distance = {
            let Some(form) = extract(&item).filter(|form| !form.is_empty()) else {
                continue;
            };
            examined += 1;
            let form = normalize(form, config);

            if prefixed && form.starts_with(target.as_ref()) {
                Some(0)
            } else {
                let cutoff = tiers
                    .bound()
                    .map_or(config.max_distance, |bound| bound.min(config.max_distance));
                edit_distance(&target, &form, cutoff, prefixed)
            }
        };

        if let Some(distance) = distance {
            tiers.offer(item, distance);
        }
    }

    let matches = tiers.into_vec();
    tracing::trace!(
        form = %target,
        examined,
        matched = matches.len(),
        ?options,
        "closest forms selected"
    );
    matches
}
