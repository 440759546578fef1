//! Search refinement and request derivation.
//!
//! - [`filter`]: Filter criteria (radius, categories, budget) and validated edits
//! - [`region`]: Regional phrase extraction from address labels
//! - [`request`]: Pure search request builder

pub mod filter;
pub mod region;
pub mod request;

pub use filter::{BudgetBasis, BudgetInput, FilterCriteria, FilterEdit, FilterState};
pub use region::{augment_query, RegionVocabulary};
pub use request::{RequestInputs, SearchRequest};
