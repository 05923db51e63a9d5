//! Clause lists applied or evaluated in one call.

use crate::clause::{Comparison, EvaluateClause, ModifyClause, Modification};
use crate::split::{CLAUSE_SEPARATOR, split_clauses};
use crate::VariantResolver;

/// Applies every [`Modification`] in the comma-separated `text`.
///
/// Every clause runs even after an earlier one fails. Returns `true` only if all of them
/// parsed and applied; blank text applies nothing and succeeds.
pub fn apply_modifications<R>(resolver: &R, cx: &R::Context, text: &str) -> bool
where
	R: VariantResolver + ?Sized,
{
	apply_modifications_with::<Modification, R>(resolver, cx, text)
}

/// [`apply_modifications`] over a caller-supplied clause grammar.
pub fn apply_modifications_with<M, R>(resolver: &R, cx: &R::Context, text: &str) -> bool
where
	M: ModifyClause,
	R: VariantResolver + ?Sized,
{
	split_clauses(text, CLAUSE_SEPARATOR).fold(true, |all_applied, clause| {
		let applied = match M::parse_clause(clause) {
			Ok(parsed) => parsed.execute(resolver, cx),
			Err(err) => {
				tracing::warn!(%clause, %err, "skipping malformed modification clause");
				false
			}
		};
		all_applied & applied
	})
}

/// Evaluates the comma-separated [`Comparison`] clauses in `text`.
///
/// Stops at the first clause that fails to parse or evaluates false. Blank text is `true`.
pub fn evaluate_all<R>(resolver: &R, cx: &R::Context, text: &str) -> bool
where
	R: VariantResolver + ?Sized,
{
	evaluate_all_with::<Comparison, R>(resolver, cx, text)
}

/// [`evaluate_all`] over a caller-supplied clause grammar.
pub fn evaluate_all_with<C, R>(resolver: &R, cx: &R::Context, text: &str) -> bool
where
	C: EvaluateClause,
	R: VariantResolver + ?Sized,
{
	split_clauses(text, CLAUSE_SEPARATOR).all(|clause| match C::parse_clause(clause) {
		Ok(parsed) => parsed.evaluate(resolver, cx),
		Err(err) => {
			tracing::warn!(%clause, %err, "malformed evaluation clause");
			false
		}
	})
}
