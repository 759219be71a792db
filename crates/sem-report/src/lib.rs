//! sem-report — the Reporting phase's pure operations: sanity checks, CSV
//! formatting, and narrative generation over an `ExecutionResult` (§4.7).

pub mod format;
pub mod narrative;
pub mod sanity;

pub use format::{format_results, FormattedResult};
pub use narrative::{explain_failure, explain_results, Narrative};
pub use sanity::{sanity_check, ImplausiblePercentage, SanityReport};
