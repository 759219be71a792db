//! sem-macro — Cube.dev-style `{CUBE}.FIELD` / `{FIELD}` / `{ENTITY.FIELD}`
//! token expansion over entity field expressions.

pub mod error;
pub mod expander;

pub use error::{MacroError, MacroResult};
pub use expander::{expand, qualify_simple_column, ExpandContext};
