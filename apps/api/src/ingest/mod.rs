// Profile ingestion: uploads and pasted text in, best-effort Profile out.
// Parsing never hard-fails; anything unrecognized becomes a warning and the
// caller receives a partial profile plus a completeness report.

pub mod analyzer;
pub mod completeness;
pub mod extract;
pub mod fields;
pub mod handlers;
pub mod heuristics;

pub use completeness::{compute_completeness, CompletenessReport};
