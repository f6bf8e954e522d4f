use crate::types::{Collator, FieldValue};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub type FieldComparer = Arc<dyn Fn(&FieldValue, &FieldValue) -> Ordering + Send + Sync>;

/// One key of a multi-key sort: a field name and how to compare its values.
///
/// Tokens missing the field compare as if it held [`FieldValue::Null`].
#[derive(Clone)]
pub struct SortDefinition {
    field: String,
    comparer: FieldComparer,
}

impl SortDefinition {
    pub fn new<F>(field: impl Into<String>, comparer: F) -> Self
    where
        F: Fn(&FieldValue, &FieldValue) -> Ordering + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            comparer: Arc::new(comparer),
        }
    }

    /// Orders by [`FieldValue`]'s own order, nulls first.
    pub fn natural(field: impl Into<String>) -> Self {
        Self::new(field, |a, b| a.cmp(b))
    }

    /// Orders text with `collator`, nulls first.
    pub fn collated(field: impl Into<String>, collator: Arc<dyn Collator>) -> Self {
        Self::new(field, move |a, b| match (a, b) {
            (FieldValue::Text(a), FieldValue::Text(b)) => collator.compare(a, b),
            _ => a.cmp(b),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn compare(&self, a: &FieldValue, b: &FieldValue) -> Ordering {
        (self.comparer)(a, b)
    }
}

impl fmt::Debug for SortDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDefinition")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
