//! Match policy types.

/// Which distance tiers `find_closest_forms` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchOptions {
    /// Only the candidates at the minimum distance.
    #[default]
    ClosestOnly,
    /// Forms that begin with the target count as distance 0.
    IncludePrefixedForms,
    /// Also return the tier right behind the closest one.
    IncludeNextClosestForms,
    IncludePrefixedAndNextClosestForms,
}

impl MatchOptions {
    pub fn includes_prefixed_forms(self) -> bool {
        matches!(
            self,
            Self::IncludePrefixedForms | Self::IncludePrefixedAndNextClosestForms
        )
    }

    pub fn includes_next_closest_forms(self) -> bool {
        matches!(
            self,
            Self::IncludeNextClosestForms | Self::IncludePrefixedAndNextClosestForms
        )
    }
}
