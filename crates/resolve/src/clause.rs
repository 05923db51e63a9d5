//! Text grammar for modification and comparison clauses.
//!
//! ```text
//! modification := key ('=' | '+=' | '-=' | '*=' | '/=') operand
//! comparison   := key ('==' | '!=' | '<' | '<=' | '>' | '>=') operand
//!               | key
//!               | '!' key
//! key          := [table ':'] variable
//! operand      := literal | key
//! ```
//!
//! Operators inside `"..."` segments are treated as part of the key or literal.

use std::fmt;

use varitab_variant::{CompareOperator, ModifyOperator, TableKeyPair, Variant, find_unquoted};

use crate::{ClauseError, VariantResolver, try_modify, try_resolve};

/// A clause that changes resolver state.
pub trait ModifyClause: Sized {
	fn parse_clause(text: &str) -> Result<Self, ClauseError>;

	/// Applies the clause. Returns `false` if it could not be applied.
	fn execute<R>(&self, resolver: &R, cx: &R::Context) -> bool
	where
		R: VariantResolver + ?Sized;
}

/// A clause that tests resolver state.
pub trait EvaluateClause: Sized {
	fn parse_clause(text: &str) -> Result<Self, ClauseError>;

	fn evaluate<R>(&self, resolver: &R, cx: &R::Context) -> bool
	where
		R: VariantResolver + ?Sized;
}

/// Right-hand side of a clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
	Value(Variant),
	/// Read through [`try_resolve`] when the clause runs.
	Key(TableKeyPair),
}

impl Operand {
	/// Parses a [`Variant`] literal, or a variable key when the text is not a literal.
	pub fn try_parse(text: &str) -> Option<Self> {
		let text = text.trim();
		if let Some(value) = Variant::try_parse(text) {
			return Some(Self::Value(value));
		}
		parse_key(text).ok().map(Self::Key)
	}

	pub fn resolve<R>(&self, resolver: &R, cx: &R::Context) -> Option<Variant>
	where
		R: VariantResolver + ?Sized,
	{
		match *self {
			Self::Value(value) => Some(value),
			Self::Key(key) => try_resolve(resolver, cx, key),
		}
	}
}

impl fmt::Display for Operand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => write!(f, "{value}"),
			Self::Key(key) => write!(f, "{key}"),
		}
	}
}

/// `key <op> operand` assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modification {
	pub key: TableKeyPair,
	pub operator: ModifyOperator,
	pub operand: Operand,
}

impl ModifyClause for Modification {
	fn parse_clause(text: &str) -> Result<Self, ClauseError> {
		let text = text.trim();
		if text.is_empty() {
			return Err(ClauseError::Empty);
		}

		let eq = find_unquoted(text, |c| c == '=').ok_or(ClauseError::MissingOperator)?;
		let (lhs, rhs) = (&text[..eq], &text[eq + 1..]);

		let (lhs, operator) = match lhs.chars().next_back() {
			Some('+') => (&lhs[..lhs.len() - 1], ModifyOperator::Add),
			Some('-') => (&lhs[..lhs.len() - 1], ModifyOperator::Subtract),
			Some('*') => (&lhs[..lhs.len() - 1], ModifyOperator::Multiply),
			Some('/') => (&lhs[..lhs.len() - 1], ModifyOperator::Divide),
			_ => (lhs, ModifyOperator::Set),
		};

		let key = parse_key(lhs)?;
		let operand = Operand::try_parse(rhs).ok_or(ClauseError::InvalidOperand)?;
		Ok(Self { key, operator, operand })
	}

	fn execute<R>(&self, resolver: &R, cx: &R::Context) -> bool
	where
		R: VariantResolver + ?Sized,
	{
		let Some(operand) = self.operand.resolve(resolver, cx) else {
			tracing::trace!(clause = %self, "modification operand did not resolve");
			return false;
		};
		tracing::trace!(clause = %self, %operand, "applying modification");
		try_modify(resolver, cx, self.key, self.operator, operand)
	}
}

impl fmt::Display for Modification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.key, self.operator, self.operand)
	}
}

/// What a [`Comparison`] checks about its key's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparisonTest {
	Truthy,
	Falsy,
	Compare(CompareOperator, Operand),
}

/// `key <op> operand`, `key`, or `!key` test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
	pub key: TableKeyPair,
	pub test: ComparisonTest,
}

impl EvaluateClause for Comparison {
	fn parse_clause(text: &str) -> Result<Self, ClauseError> {
		let text = text.trim();
		if text.is_empty() {
			return Err(ClauseError::Empty);
		}

		let Some(idx) = find_unquoted(text, |c| matches!(c, '=' | '!' | '<' | '>')) else {
			return Ok(Self {
				key: parse_key(text)?,
				test: ComparisonTest::Truthy,
			});
		};

		let rest = &text[idx..];
		let operator = CompareOperator::ALL
			.into_iter()
			.filter(|op| rest.starts_with(op.symbol()))
			.max_by_key(|op| op.symbol().len());

		let Some(operator) = operator else {
			if idx == 0 && rest.starts_with('!') {
				return Ok(Self {
					key: parse_key(&rest[1..])?,
					test: ComparisonTest::Falsy,
				});
			}
			return Err(ClauseError::MissingOperator);
		};

		let key = parse_key(&text[..idx])?;
		let operand = Operand::try_parse(&rest[operator.symbol().len()..]).ok_or(ClauseError::InvalidOperand)?;
		Ok(Self {
			key,
			test: ComparisonTest::Compare(operator, operand),
		})
	}

	fn evaluate<R>(&self, resolver: &R, cx: &R::Context) -> bool
	where
		R: VariantResolver + ?Sized,
	{
		let value = try_resolve(resolver, cx, self.key).unwrap_or_default();
		let result = match self.test {
			ComparisonTest::Truthy => value.is_truthy(),
			ComparisonTest::Falsy => !value.is_truthy(),
			ComparisonTest::Compare(operator, operand) => {
				let rhs = operand.resolve(resolver, cx).unwrap_or_default();
				operator.evaluate(value, rhs)
			}
		};
		tracing::trace!(clause = %self, %value, result, "evaluated comparison");
		result
	}
}

impl fmt::Display for Comparison {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.test {
			ComparisonTest::Truthy => write!(f, "{}", self.key),
			ComparisonTest::Falsy => write!(f, "!{}", self.key),
			ComparisonTest::Compare(operator, operand) => write!(f, "{} {operator} {operand}", self.key),
		}
	}
}

/// Parses a clause key, rejecting whitespace and operator characters outside quotes.
fn parse_key(text: &str) -> Result<TableKeyPair, ClauseError> {
	let text = text.trim();
	if find_unquoted(text, |c| c.is_whitespace() || matches!(c, '=' | '!' | '<' | '>')).is_some() {
		return Err(ClauseError::InvalidKey);
	}
	TableKeyPair::try_parse(text).ok_or(ClauseError::InvalidKey)
}

#[cfg(test)]
mod tests;
