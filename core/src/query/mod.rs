//! Queries over repository items and the result sets they produce.

mod results;
mod sort;

pub use results::{RecordToken, ResultSet};
pub use sort::{FieldComparer, SortDefinition};

use crate::types::Fields;

/// Maps one item to zero or more result rows.
pub trait Query<T> {
    fn results(&self, item: &T) -> Vec<Fields>;
}

/// A [`Query`] backed by a closure.
pub struct DelegateQuery<F>(F);

impl<F> DelegateQuery<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> Query<T> for DelegateQuery<F>
where
    F: Fn(&T) -> Vec<Fields>,
{
    fn results(&self, item: &T) -> Vec<Fields> {
        (self.0)(item)
    }
}
