//! Bounded Damerau-Levenshtein distance.

/// Placeholder for cells that lie outside the evaluated band.
const OUT_OF_BAND: usize = usize::MAX;

/// Returns the optimal-string-alignment distance from `a` to `b`, or `None`
/// once it is known to exceed `max_distance`.
///
/// Insertion, deletion, substitution and transposition of two adjacent
/// characters all cost 1. Only a band of `max_distance` cells either side of
/// the diagonal is evaluated, and evaluation stops at the first row whose
/// every cell is over the maximum.
///
/// With `suffix_forgiving`, whatever part of `b` is left over after aligning
/// all of `a` costs nothing: the result is the smallest distance from `a` to
/// any prefix of `b`. This makes the function asymmetric:
///
/// ```
/// use lexicon_search::edit_distance;
///
/// assert_eq!(edit_distance("case", "cased", 1, true), Some(0));
/// assert_eq!(edit_distance("cased", "case", 1, true), Some(1));
/// assert_eq!(edit_distance("abo", "habo", 0, false), None);
/// ```
pub fn edit_distance(a: &str, b: &str, max_distance: usize, suffix_forgiving: bool) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n1, n2) = (a.len(), b.len());

    if n1 == 0 || n2 == 0 {
        if suffix_forgiving {
            return Some(0);
        }
        let distance = n1.max(n2);
        return (distance <= max_distance).then_some(distance);
    }

    if !suffix_forgiving && n1.abs_diff(n2) > max_distance {
        return None;
    }

    // Three physical rows: i - 2 (transpositions), i - 1, and i.
    let mut before_previous = vec![OUT_OF_BAND; n2 + 1];
    let mut previous: Vec<usize> = (0..=n2)
        .map(|j| if j <= max_distance { j } else { OUT_OF_BAND })
        .collect();
    let mut current = vec![OUT_OF_BAND; n2 + 1];

    for i in 1..=n1 {
        current.fill(OUT_OF_BAND);

        let first = i.saturating_sub(max_distance);
        let last = i.saturating_add(max_distance).min(n2);
        let mut row_min = OUT_OF_BAND;

        if first == 0 {
            current[0] = i;
            row_min = i;
        }

        for j in first.max(1)..=last {
            let substitution = usize::from(a[i - 1] != b[j - 1]);
            let mut distance = previous[j - 1].saturating_add(substitution);
            distance = distance.min(previous[j].saturating_add(1));
            distance = distance.min(current[j - 1].saturating_add(1));

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                distance = distance.min(before_previous[j - 2].saturating_add(1));
            }

            current[j] = distance;
            row_min = row_min.min(distance);
        }

        // Row minima never decrease, so nothing below can come back under the max.
        if row_min > max_distance {
            return None;
        }

        std::mem::swap(&mut before_previous, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = if suffix_forgiving {
        previous.iter().copied().min().unwrap_or(OUT_OF_BAND)
    } else {
        previous[n2]
    };

    (distance <= max_distance).then_some(distance)
}
