use redb::TypeName;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Opaque identity of one entity inside one repository.
///
/// Identities are handed out in increasing order and never reused, so sorting
/// by identity is sorting by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Rebuilds an identity previously obtained from [`RepositoryId::into_raw`].
    ///
    /// Only stores need this, to hand back the identities they were given.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl redb::Key for RepositoryId {
    fn compare(data1: &[u8], data2: &[u8]) -> Ordering {
        data1.cmp(data2)
    }
}

impl redb::Value for RepositoryId {
    type SelfType<'a> = Self;
    type AsBytes<'a> = [u8; 8];

    fn fixed_width() -> Option<usize> {
        Some(8)
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let bytes: [u8; 8] = data.try_into().expect("invalid repository id width");
        Self(u64::from_be_bytes(bytes))
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        value.0.to_be_bytes()
    }

    fn type_name() -> TypeName {
        TypeName::new("lexicon::RepositoryId")
    }
}

#[cfg(test)]
mod tests;
