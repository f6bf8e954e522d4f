use std::fmt;
use std::sync::Arc;

/// Change notification for subscribers of a [`super::LexEntryRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// A dirty entry was saved.
    Modified { label: String },
    Deleted { label: String },
}

impl EntryEvent {
    pub fn label(&self) -> &str {
        match self {
            EntryEvent::Modified { label } | EntryEvent::Deleted { label } => label,
        }
    }
}

pub type EntryListener = Arc<dyn Fn(&EntryEvent) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    listeners: Vec<EntryListener>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: EntryListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&self, event: &EntryEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "entry event");
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
