pub mod analyze;
pub mod conversation;
pub mod extraction;
pub mod incident;

pub use analyze::AnalyzeRequest;
pub use conversation::{ConversationEntry, Role};
pub use extraction::ExtractedIncident;
pub use incident::{Field, Flag, IncidentRecord};
