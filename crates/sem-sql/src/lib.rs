//! sem-sql — renders a `FinalizedPlan` into executable SQL (§4.4) and runs
//! the static syntax and semantic scans over it (§4.5).

pub mod aggregation;
pub mod error;
pub mod predicate;
pub mod renderer;
pub mod report;
pub mod semantic;
pub mod syntax;

pub use error::{RenderError, RenderResult};
pub use renderer::render_sql;
pub use report::{ValidationIssue, ValidationReport};
pub use semantic::validate_semantic;
pub use syntax::validate_syntax;
