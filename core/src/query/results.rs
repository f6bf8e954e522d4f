use crate::error::Result;
use crate::query::SortDefinition;
use crate::repository::Repository;
use crate::types::{FieldValue, Fields, RepositoryId};
use std::collections::HashSet;

static NULL: FieldValue = FieldValue::Null;

/// One row of a query result: the identity of the item it came from plus
/// named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordToken {
    id: RepositoryId,
    fields: Fields,
}

impl RecordToken {
    pub fn new(id: RepositoryId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> RepositoryId {
        self.id
    }

    /// `None` for an unknown or empty name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        if name.is_empty() {
            return None;
        }
        self.fields.get(name)
    }

    /// Text of a field; `None` when missing, null, or not text.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The item this row was produced from.
    pub fn resolve<'r, T>(&self, repository: &'r Repository<T>) -> Result<&'r T> {
        repository.get_item(self.id)
    }
}

/// Ordered, owned collection of [`RecordToken`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    tokens: Vec<RecordToken>,
}

impl ResultSet {
    /// Takes its own copy; later changes to the source do not show through.
    pub fn new(tokens: impl IntoIterator<Item = RecordToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RecordToken> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordToken> {
        self.tokens.iter()
    }

    /// For attaching computed columns after the fact.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, RecordToken> {
        self.tokens.iter_mut()
    }

    /// Identities in token order, duplicates kept.
    pub fn ids(&self) -> Vec<RepositoryId> {
        self.tokens.iter().map(RecordToken::id).collect()
    }

    pub fn into_vec(self) -> Vec<RecordToken> {
        self.tokens
    }
}

/// Lookup.
impl ResultSet {
    pub fn find_first_index(&self, id: RepositoryId) -> Option<usize> {
        self.find_first_index_from(id, 0)
    }

    /// Searches from `start` onwards. A start past the end finds nothing.
    pub fn find_first_index_from(&self, id: RepositoryId, start: usize) -> Option<usize> {
        self.tokens
            .iter()
            .skip(start)
            .position(|t| t.id == id)
            .map(|i| i + start)
    }

    pub fn find_first(&self, id: RepositoryId) -> Option<&RecordToken> {
        self.find_first_index(id).map(|i| &self.tokens[i])
    }

    pub fn find_first_index_by<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&RecordToken) -> bool,
    {
        self.tokens.iter().position(predicate)
    }

    pub fn find_first_by<P>(&self, predicate: P) -> Option<&RecordToken>
    where
        P: Fn(&RecordToken) -> bool,
    {
        self.tokens.iter().find(|t| predicate(t))
    }
}

/// Reordering and filtering.
impl ResultSet {
    /// Stable multi-key sort; later keys break ties of earlier ones.
    pub fn sort(&mut self, definitions: &[SortDefinition]) {
        self.tokens.sort_by(|a, b| {
            definitions
                .iter()
                .map(|d| {
                    let left = a.get(d.field()).unwrap_or(&NULL);
                    let right = b.get(d.field()).unwrap_or(&NULL);
                    d.compare(left, right)
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    pub fn sort_by_repository_id(&mut self) {
        self.tokens.sort_by_key(RecordToken::id);
    }

    pub fn remove_all<P>(&mut self, predicate: P)
    where
        P: Fn(&RecordToken) -> bool,
    {
        self.tokens.retain(|t| !predicate(t));
    }

    /// Drops placeholder rows of items that also have a substantive row.
    ///
    /// A token is removed when `is_removable` holds for its `field` and some
    /// other token with the same identity is not removable. Items whose rows
    /// are all removable keep all of them. Survivors keep their order.
    pub fn coalesce<P>(&mut self, field: &str, is_removable: P)
    where
        P: Fn(Option<&FieldValue>) -> bool,
    {
        let removable: Vec<bool> = self
            .tokens
            .iter()
            .map(|t| is_removable(t.get(field)))
            .collect();

        let substantive: HashSet<RepositoryId> = self
            .tokens
            .iter()
            .zip(&removable)
            .filter(|(_, removable)| !**removable)
            .map(|(t, _)| t.id)
            .collect();

        let mut flags = removable.into_iter();
        self.tokens.retain(|t| {
            let removable = flags.next().unwrap_or(false);
            !(removable && substantive.contains(&t.id))
        });
    }
}

impl std::ops::Index<usize> for ResultSet {
    type Output = RecordToken;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = RecordToken;
    type IntoIter = std::vec::IntoIter<RecordToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RecordToken;
    type IntoIter = std::slice::Iter<'a, RecordToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<RecordToken> for ResultSet {
    fn from_iter<I: IntoIterator<Item = RecordToken>>(iter: I) -> Self {
        Self::new(iter)
    }
}
