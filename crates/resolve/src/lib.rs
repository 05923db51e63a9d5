//! Variable resolution over [`VariantTable`](varitab_variant::VariantTable)s.
//!
//! A [`VariantResolver`] maps `table:variable` keys to tables (and optionally to computed
//! values). On top of it this crate provides:
//!
//! - [`try_resolve`] / [`try_modify`]: single-key read and write.
//! - [`apply_modifications`] / [`evaluate_all`]: comma-separated clause lists such as
//!   `gold += 10, quest:stage = 2` or `gold >= 100, !quest:done`.
//! - [`CustomResolver`]: a ready-made resolver built from registered tables, aliases and
//!   computed variables.

pub mod batch;
pub mod clause;
mod custom;
mod error;
mod resolver;
mod split;

pub use batch::{apply_modifications, apply_modifications_with, evaluate_all, evaluate_all_with};
pub use clause::{Comparison, ComparisonTest, EvaluateClause, ModifyClause, Modification, Operand};
pub use custom::{CustomResolver, VariableGetter};
pub use error::ClauseError;
pub use resolver::{VariantResolver, VariantResolverExt, try_modify, try_resolve};
pub use split::{CLAUSE_SEPARATOR, SplitClauses, split_clauses};
