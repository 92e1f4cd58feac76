//! Barrier bank, the dimension-to-barrier rule table, and suggestion resolution.

mod catalog;
mod record;
mod rules;
mod suggestions;

pub use catalog::{BarrierBankEntry, BarrierCatalog, BarrierSeverity, CatalogError};
pub use record::{BarrierList, BarrierRecord, BarrierSource, BarrierStatus};
pub use rules::{RuleTableError, SuggestionRules};
pub use suggestions::{BarrierSuggestion, SuggestionEngine, SUGGESTION_THRESHOLD};
