use crate::dictionary::LexEntryRepository;
use crate::dictionary::fields::{
    FORM, GLOSS, GLOSS_WRITING_SYSTEM, GUID, HAS_HOMOGRAPH, HOMOGRAPH_NUMBER, ID, SEMANTIC_DOMAIN,
    SENSE, SENSE_NUMBER, WRITING_SYSTEM,
};
use crate::error::{RepositoryError, Result};
use crate::model::{LanguageForm, LexEntry};
use crate::query::{DelegateQuery, ResultSet, SortDefinition};
use crate::types::{FieldValue, Fields, InvariantCollator, RepositoryId, WritingSystem};
use lexicon_search::{MatchOptions, find_closest_forms_by};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

fn row<const N: usize>(fields: [(&str, FieldValue); N]) -> Fields {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Splits `;`-separated text into trimmed, non-empty pieces, appending those
/// not already in `pieces`.
fn merge_pieces(pieces: &mut Vec<String>, text: &str) {
    for piece in text.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        if !pieces.iter().any(|existing| existing == piece) {
            pieces.push(piece.to_string());
        }
    }
}

/// Sorted views.
impl LexEntryRepository {
    /// One token per entry keyed by headword (citation form, else lexical
    /// form), with homograph numbering attached.
    pub fn get_all_entries_sorted_by_headword(&self, ws: &WritingSystem) -> Result<ResultSet> {
        let mut results = self.query(|entry| {
            vec![row([(FORM, non_empty(entry.headword(ws.id())).into())])]
        })?;
        results.sort(&[SortDefinition::collated(FORM, ws.collator())]);
        number_homographs(&mut results);
        Ok(results)
    }

    pub fn get_all_entries_sorted_by_lexical_form(&self, ws: &WritingSystem) -> Result<ResultSet> {
        let mut results = self.query(|entry| {
            vec![row([(FORM, non_empty(entry.lexical_form.get(ws.id())).into())])]
        })?;
        results.sort(&[SortDefinition::collated(FORM, ws.collator())]);
        Ok(results)
    }

    /// Like [`Self::get_all_entries_sorted_by_lexical_form`], but entries
    /// lacking `ws` fall back to their first available alternative. The
    /// `WritingSystem` field names whichever writing system supplied `Form`.
    pub fn get_all_entries_sorted_by_lexical_form_or_alternative(
        &self,
        ws: &WritingSystem,
    ) -> Result<ResultSet> {
        let mut results = self.query(|entry| {
            let (form, source) = match non_empty(entry.lexical_form.get(ws.id())) {
                Some(form) => (Some(form), ws.id()),
                None => match entry.lexical_form.first_alternative() {
                    Some(alternative) => {
                        (Some(alternative.form.as_str()), &alternative.writing_system)
                    }
                    None => (None, ws.id()),
                },
            };
            vec![row([
                (FORM, form.into()),
                (WRITING_SYSTEM, source.as_str().into()),
            ])]
        })?;
        results.sort(&[SortDefinition::collated(FORM, ws.collator())]);
        Ok(results)
    }

    /// One token per distinct definition or gloss piece of every sense.
    ///
    /// Definition and gloss text in `ws` is split on `;`. A sense without any
    /// piece still yields one token with a null `Form`.
    pub fn get_all_entries_sorted_by_definition_or_gloss(
        &self,
        ws: &WritingSystem,
    ) -> Result<ResultSet> {
        let mut results = self.query(|entry| {
            let mut rows = Vec::new();
            for (index, sense) in entry.senses.iter().enumerate() {
                let mut pieces = Vec::new();
                merge_pieces(&mut pieces, sense.definition.get(ws.id()));
                merge_pieces(&mut pieces, sense.gloss.get(ws.id()));

                let sense_index = FieldValue::Integer(index as i64);
                if pieces.is_empty() {
                    rows.push(row([(FORM, FieldValue::Null), (SENSE, sense_index)]));
                } else {
                    rows.extend(
                        pieces
                            .into_iter()
                            .map(|piece| row([(FORM, piece.into()), (SENSE, sense_index.clone())])),
                    );
                }
            }
            rows
        })?;
        results.sort(&[
            SortDefinition::collated(FORM, ws.collator()),
            SortDefinition::natural(SENSE),
        ]);
        Ok(results)
    }

    /// One token per distinct (entry, domain) pair found under `field_name`
    /// in any sense.
    pub fn get_entries_with_semantic_domain_sorted_by_semantic_domain(
        &self,
        field_name: &str,
    ) -> Result<ResultSet> {
        if field_name.is_empty() {
            return Err(RepositoryError::invalid_argument(
                "field_name",
                "must not be empty",
            ));
        }

        let mut results = self.query(|entry| {
            let mut domains: Vec<&str> = Vec::new();
            for sense in &entry.senses {
                for domain in sense.options(field_name) {
                    if !domain.is_empty() && !domains.contains(&domain.as_str()) {
                        domains.push(domain);
                    }
                }
            }
            domains
                .into_iter()
                .map(|domain| row([(SEMANTIC_DOMAIN, domain.into())]))
                .collect()
        })?;
        results.sort(&[SortDefinition::collated(
            SEMANTIC_DOMAIN,
            Arc::new(InvariantCollator),
        )]);
        Ok(results)
    }
}

/// Matching.
impl LexEntryRepository {
    /// Entries whose lexical form in `ws` is closest to `form`.
    ///
    /// Candidates come from the lexical-form view, so tokens of one tier keep
    /// that view's collated order.
    pub fn get_entries_with_similar_lexical_form(
        &self,
        form: &str,
        ws: &WritingSystem,
        options: MatchOptions,
    ) -> Result<ResultSet> {
        let candidates = self.get_all_entries_sorted_by_lexical_form(ws)?;
        let matches = find_closest_forms_by(
            candidates,
            |token| token.get_str(FORM),
            form,
            options,
            &self.matcher,
        );
        Ok(ResultSet::new(matches))
    }

    pub fn get_entries_with_matching_lexical_form(
        &self,
        form: &str,
        ws: &WritingSystem,
    ) -> Result<ResultSet> {
        let mut results = self.get_all_entries_sorted_by_lexical_form(ws)?;
        results.remove_all(|token| token.get_str(FORM) != Some(form));
        Ok(results)
    }

    /// One token per sense whose gloss in `gloss.writing_system` equals
    /// `gloss.form`, sorted by the entry's lexical form in `ws`.
    pub fn get_entries_with_matching_gloss_sorted_by_lexical_form(
        &self,
        gloss: &LanguageForm,
        ws: &WritingSystem,
    ) -> Result<ResultSet> {
        if gloss.form.is_empty() {
            return Err(RepositoryError::invalid_argument(
                "gloss",
                "form must not be empty",
            ));
        }

        let mut results = self.query(|entry| {
            let lexical_form = non_empty(entry.lexical_form.get(ws.id()));
            entry
                .senses
                .iter()
                .enumerate()
                .filter(|(_, sense)| sense.gloss.get(&gloss.writing_system) == gloss.form)
                .map(|(index, _)| {
                    row([
                        (FORM, lexical_form.into()),
                        (GLOSS, gloss.form.as_str().into()),
                        (GLOSS_WRITING_SYSTEM, gloss.writing_system.as_str().into()),
                        (SENSE_NUMBER, FieldValue::Integer(index as i64)),
                    ])
                })
                .collect()
        })?;
        results.sort(&[
            SortDefinition::collated(FORM, ws.collator()),
            SortDefinition::natural(SENSE_NUMBER),
        ]);
        Ok(results)
    }
}

/// Lookups.
impl LexEntryRepository {
    /// 1-based position of the entry among entries sharing its headword in
    /// `ws`, in insertion order; 0 when the headword is unique or empty.
    pub fn get_homograph_number(&self, id: RepositoryId, ws: &WritingSystem) -> Result<u32> {
        self.entries.get_item(id)?;

        let results = self.get_all_entries_sorted_by_headword(ws)?;
        let token = results
            .find_first(id)
            .ok_or_else(|| RepositoryError::OutOfRange(format!("item {id}")))?;

        Ok(token
            .get(HOMOGRAPH_NUMBER)
            .and_then(FieldValue::as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0))
    }

    pub fn get_lex_entry_with_matching_guid(&self, guid: Uuid) -> Result<Option<&LexEntry>> {
        if guid.is_nil() {
            return Err(RepositoryError::OutOfRange("nil guid".to_string()));
        }

        let results = self.query(|entry| {
            if entry.guid() == guid {
                vec![row([(GUID, guid.into())])]
            } else {
                Vec::new()
            }
        })?;
        self.single_match(&results, GUID, guid.to_string())
    }

    pub fn get_lex_entry_with_matching_id(&self, id: &str) -> Result<Option<&LexEntry>> {
        if id.is_empty() {
            return Err(RepositoryError::OutOfRange("empty id".to_string()));
        }

        let results = self.query(|entry| {
            if entry.id() == Some(id) {
                vec![row([(ID, id.into())])]
            } else {
                Vec::new()
            }
        })?;
        self.single_match(&results, ID, id.to_string())
    }
}

/// Internal helpers.
impl LexEntryRepository {
    fn query<F>(&self, f: F) -> Result<ResultSet>
    where
        F: Fn(&LexEntry) -> Vec<Fields>,
    {
        self.entries.get_items_matching(&DelegateQuery::new(f))
    }

    fn single_match(
        &self,
        results: &ResultSet,
        field: &'static str,
        value: String,
    ) -> Result<Option<&LexEntry>> {
        match results.len() {
            0 => Ok(None),
            1 => Ok(Some(self.entries.get_item(results[0].id())?)),
            count => {
                tracing::warn!(field, %value, count, "duplicate unique key");
                Err(RepositoryError::Ambiguous { field, value })
            }
        }
    }
}

/// Attaches `HomographNumber` and `HasHomograph` to a headword-sorted set.
///
/// Tokens sharing a `Form` are numbered 1, 2, 3... in set order; unique and
/// null forms get 0.
fn number_homographs(results: &mut ResultSet) {
    let mut group_sizes: HashMap<String, u32> = HashMap::new();
    for token in results.iter() {
        if let Some(form) = token.get_str(FORM) {
            *group_sizes.entry(form.to_string()).or_default() += 1;
        }
    }

    let mut seen: HashMap<String, u32> = HashMap::new();
    for token in results.iter_mut() {
        let number = match token.get_str(FORM).map(str::to_string) {
            Some(form) if group_sizes.get(&form).is_some_and(|size| *size > 1) => {
                let position = seen.entry(form).or_default();
                *position += 1;
                *position
            }
            _ => 0,
        };
        token.set(HOMOGRAPH_NUMBER, number);
        token.set(HAS_HOMOGRAPH, number > 0);
    }
}
