use crate::types::WritingSystemId;
use serde::{Deserialize, Serialize};

/// Text in one writing system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageForm {
    pub writing_system: WritingSystemId,
    pub form: String,
    /// Marks the alternative preferred for display.
    #[serde(default)]
    pub starred: bool,
}

impl LanguageForm {
    pub fn new(writing_system: WritingSystemId, form: impl Into<String>) -> Self {
        Self {
            writing_system,
            form: form.into(),
            starred: false,
        }
    }
}

/// The same text rendered in several writing systems, at most one form each.
///
/// Alternatives keep the order in which their writing systems were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiText {
    forms: Vec<LanguageForm>,
}

impl MultiText {
    pub fn new() -> Self {
        Self::default()
    }

    /// The form in `ws`, or `""` when there is none.
    pub fn get(&self, ws: &WritingSystemId) -> &str {
        self.find(ws).map_or("", |f| f.form.as_str())
    }

    pub fn find(&self, ws: &WritingSystemId) -> Option<&LanguageForm> {
        self.forms.iter().find(|f| &f.writing_system == ws)
    }

    /// Sets the form in `ws`. Empty text removes the alternative.
    pub fn set(&mut self, ws: &WritingSystemId, text: impl Into<String>) {
        let text = text.into();
        let position = self.forms.iter().position(|f| &f.writing_system == ws);

        match (position, text.is_empty()) {
            (Some(i), true) => {
                self.forms.remove(i);
            }
            (Some(i), false) => self.forms[i].form = text,
            (None, true) => {}
            (None, false) => self.forms.push(LanguageForm::new(ws.clone(), text)),
        }
    }

    pub fn set_starred(&mut self, ws: &WritingSystemId, starred: bool) {
        if let Some(form) = self.forms.iter_mut().find(|f| &f.writing_system == ws) {
            form.starred = starred;
        }
    }

    pub fn contains(&self, ws: &WritingSystemId) -> bool {
        self.find(ws).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn forms(&self) -> &[LanguageForm] {
        &self.forms
    }

    /// The first alternative that has any text.
    pub fn first_alternative(&self) -> Option<&LanguageForm> {
        self.forms.iter().find(|f| !f.form.is_empty())
    }

    /// The form in `ws`, else the starred alternative, else the first one.
    pub fn best_alternative(&self, ws: &WritingSystemId) -> Option<&LanguageForm> {
        self.find(ws)
            .or_else(|| self.forms.iter().find(|f| f.starred))
            .or_else(|| self.first_alternative())
    }
}

impl<'a> IntoIterator for &'a MultiText {
    type Item = &'a LanguageForm;
    type IntoIter = std::slice::Iter<'a, LanguageForm>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.iter()
    }
}
