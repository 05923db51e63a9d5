use std::fmt;

use crate::Variant;

/// How [`VariantTable::modify`](crate::VariantTable::modify) combines the current value with
/// an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifyOperator {
	Set,
	Add,
	Subtract,
	Multiply,
	Divide,
}

impl ModifyOperator {
	pub const ALL: [Self; 5] = [Self::Set, Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

	/// Assignment token in clause text.
	pub const fn symbol(self) -> &'static str {
		match self {
			Self::Set => "=",
			Self::Add => "+=",
			Self::Subtract => "-=",
			Self::Multiply => "*=",
			Self::Divide => "/=",
		}
	}

	/// Combines `current` with `operand`.
	pub fn apply(self, current: Variant, operand: Variant) -> Variant {
		match self {
			Self::Set => operand,
			Self::Add => current + operand,
			Self::Subtract => current - operand,
			Self::Multiply => current * operand,
			Self::Divide => current / operand,
		}
	}
}

impl fmt::Display for ModifyOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

/// Relational operator used by comparison clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOperator {
	Equal,
	NotEqual,
	Less,
	LessOrEqual,
	Greater,
	GreaterOrEqual,
}

impl CompareOperator {
	pub const ALL: [Self; 6] = [
		Self::Equal,
		Self::NotEqual,
		Self::Less,
		Self::LessOrEqual,
		Self::Greater,
		Self::GreaterOrEqual,
	];

	pub const fn symbol(self) -> &'static str {
		match self {
			Self::Equal => "==",
			Self::NotEqual => "!=",
			Self::Less => "<",
			Self::LessOrEqual => "<=",
			Self::Greater => ">",
			Self::GreaterOrEqual => ">=",
		}
	}

	/// Evaluates `lhs <op> rhs`. Unordered pairs only satisfy `!=`.
	pub fn evaluate(self, lhs: Variant, rhs: Variant) -> bool {
		match self {
			Self::Equal => lhs == rhs,
			Self::NotEqual => lhs != rhs,
			Self::Less => lhs < rhs,
			Self::LessOrEqual => lhs <= rhs,
			Self::Greater => lhs > rhs,
			Self::GreaterOrEqual => lhs >= rhs,
		}
	}
}

impl fmt::Display for CompareOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}
