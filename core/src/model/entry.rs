use crate::model::multitext::MultiText;
use crate::types::WritingSystemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Property key holding a sense's semantic domains.
pub const SEMANTIC_DOMAIN_DDP4: &str = "semantic-domain-ddp4";

/// A dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexEntry {
    guid: Uuid,
    id: Option<String>,
    creation_time: DateTime<Utc>,
    modification_time: DateTime<Utc>,
    pub lexical_form: MultiText,
    pub citation_form: MultiText,
    pub senses: Vec<LexSense>,
}

impl Default for LexEntry {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            guid: Uuid::new_v4(),
            id: None,
            creation_time: now,
            modification_time: now,
            lexical_form: MultiText::default(),
            citation_form: MultiText::default(),
            senses: Vec::new(),
        }
    }
}

impl LexEntry {
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    pub fn set_guid(&mut self, guid: Uuid) {
        self.guid = guid;
    }

    /// Human-assigned identifier, distinct from the GUID.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn modification_time(&self) -> DateTime<Utc> {
        self.modification_time
    }

    pub(crate) fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.creation_time = at;
        self.modification_time = at;
    }

    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.modification_time = at;
    }

    /// Citation form in `ws` when present, otherwise the lexical form.
    pub fn headword(&self, ws: &WritingSystemId) -> &str {
        match self.citation_form.get(ws) {
            "" => self.lexical_form.get(ws),
            citation => citation,
        }
    }

    /// Short description for logs and change notifications.
    pub fn label(&self) -> String {
        match self.lexical_form.first_alternative() {
            Some(form) => form.form.clone(),
            None => self.guid.to_string(),
        }
    }
}

/// One meaning of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexSense {
    pub definition: MultiText,
    pub gloss: MultiText,
    /// Option-list properties, e.g. [`SEMANTIC_DOMAIN_DDP4`].
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
}

impl LexSense {
    /// Values stored under `field`, in insertion order.
    pub fn options(&self, field: &str) -> &[String] {
        self.properties
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_option(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.properties
            .entry(field.into())
            .or_default()
            .push(value.into());
    }
}
