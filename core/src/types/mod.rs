pub(crate) mod clock;
pub use clock::{Clock, SystemClock};

pub(crate) mod collation;
pub use collation::{Collator, InvariantCollator, OrdinalCollator};

pub(crate) mod config;
pub use config::{Config, ConfigError, RepositoryConfig, RepositorySettings};

pub(crate) mod field;
pub use field::{FieldValue, Fields, is_null_or_empty};

pub(crate) mod id;
pub use id::RepositoryId;

pub(crate) mod writing_system;
pub use writing_system::{WritingSystem, WritingSystemId, WritingSystemIdError};
