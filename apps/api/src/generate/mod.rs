// Document generation engine: prompt assembly, model drafting, and the
// deterministic fallback used when a draft fails or comes back unusable.
// All model calls go through the Drafter trait; no HTTP elsewhere in this tree.

pub mod drafter;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod prompts;

pub use drafter::Drafter;
pub use generator::generate_documents;
