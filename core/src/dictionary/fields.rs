//! Field names carried by the lexicon views.

pub const FORM: &str = "Form";
pub const WRITING_SYSTEM: &str = "WritingSystem";
pub const SENSE: &str = "Sense";
pub const SEMANTIC_DOMAIN: &str = "SemanticDomain";
pub const GLOSS: &str = "Gloss";
pub const GLOSS_WRITING_SYSTEM: &str = "GlossWritingSystem";
pub const SENSE_NUMBER: &str = "SenseNumber";
pub const HOMOGRAPH_NUMBER: &str = "HomographNumber";
pub const HAS_HOMOGRAPH: &str = "HasHomograph";
pub const GUID: &str = "Guid";
pub const ID: &str = "Id";
