//! The [`Variant`] value type.
//!
//! # Arithmetic
//!
//! `+ - * /` promote operands to a common numeric kind:
//!
//! - `Null` counts as `Int(0)` and `Bool` as `Int(0)`/`Int(1)`.
//! - `Int` with `Int` stays `Int` and wraps on overflow.
//! - Anything with a `Float` becomes `Float`.
//! - Integer division by zero yields `Null` and emits a warning.
//! - `Hash` only combines through `Hash + Null` (either order), which keeps the hash. Every
//!   other combination involving a hash yields `Null`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use varitab_strhash::{CUSTOM_HASH_PREFIX, STRING_PREFIX, StringHash32};

/// A small dynamically typed value.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
	#[default]
	Null,
	Bool(bool),
	Int(i32),
	Float(f32),
	Hash(StringHash32),
}

/// Coarse kind of a [`Variant`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
	Null,
	Bool,
	Int,
	Float,
	Hash,
}

impl fmt::Display for VariantKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Hash => "hash",
		};
		f.write_str(name)
	}
}

#[derive(Clone, Copy)]
enum Numeric {
	Int(i32),
	Float(f32),
}

#[derive(Clone, Copy, Debug)]
enum ArithOp {
	Add,
	Sub,
	Mul,
	Div,
}

impl Variant {
	pub const NULL: Self = Self::Null;

	pub fn kind(&self) -> VariantKind {
		match self {
			Self::Null => VariantKind::Null,
			Self::Bool(_) => VariantKind::Bool,
			Self::Int(_) => VariantKind::Int,
			Self::Float(_) => VariantKind::Float,
			Self::Hash(_) => VariantKind::Hash,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Truthiness used by bare comparison clauses.
	pub fn is_truthy(&self) -> bool {
		match *self {
			Self::Null => false,
			Self::Bool(b) => b,
			Self::Int(i) => i != 0,
			Self::Float(f) => f != 0.0,
			Self::Hash(h) => !h.is_empty(),
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match *self {
			Self::Bool(b) => Some(b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i32> {
		match *self {
			Self::Int(i) => Some(i),
			_ => None,
		}
	}

	/// Returns the value as a float if it is numeric.
	pub fn as_float(&self) -> Option<f32> {
		match *self {
			Self::Int(i) => Some(i as f32),
			Self::Float(f) => Some(f),
			_ => None,
		}
	}

	pub fn as_hash(&self) -> Option<StringHash32> {
		match *self {
			Self::Hash(h) => Some(h),
			_ => None,
		}
	}

	fn numeric(self) -> Option<Numeric> {
		match self {
			Self::Null => Some(Numeric::Int(0)),
			Self::Bool(b) => Some(Numeric::Int(i32::from(b))),
			Self::Int(i) => Some(Numeric::Int(i)),
			Self::Float(f) => Some(Numeric::Float(f)),
			Self::Hash(_) => None,
		}
	}

	fn arith(self, rhs: Self, op: ArithOp) -> Self {
		if let (Self::Hash(h), Self::Null, ArithOp::Add) | (Self::Null, Self::Hash(h), ArithOp::Add) =
			(self, rhs, op)
		{
			return Self::Hash(h);
		}

		let (Some(lhs), Some(rhs)) = (self.numeric(), rhs.numeric()) else {
			tracing::debug!(lhs = %self.kind(), rhs = %rhs.kind(), ?op, "non-numeric variant arithmetic");
			return Self::Null;
		};

		match (lhs, rhs) {
			(Numeric::Int(a), Numeric::Int(b)) => match op {
				ArithOp::Add => Self::Int(a.wrapping_add(b)),
				ArithOp::Sub => Self::Int(a.wrapping_sub(b)),
				ArithOp::Mul => Self::Int(a.wrapping_mul(b)),
				ArithOp::Div if b == 0 => {
					tracing::warn!(dividend = a, "integer variant division by zero");
					Self::Null
				}
				ArithOp::Div => Self::Int(a.wrapping_div(b)),
			},
			(a, b) => {
				let (a, b) = (a.to_f32(), b.to_f32());
				Self::Float(match op {
					ArithOp::Add => a + b,
					ArithOp::Sub => a - b,
					ArithOp::Mul => a * b,
					ArithOp::Div => a / b,
				})
			}
		}
	}

	/// Parses a literal: `null`, `true`/`false`, an integer, a float, or a hash literal
	/// (`@1A2B3C4D`, `'text`, `"text"`).
	///
	/// Returns `None` for anything else, including bare identifiers.
	pub fn try_parse(text: &str) -> Option<Self> {
		if text.is_empty() {
			return None;
		}
		if text.eq_ignore_ascii_case("null") {
			return Some(Self::Null);
		}
		if text.eq_ignore_ascii_case("true") {
			return Some(Self::Bool(true));
		}
		if text.eq_ignore_ascii_case("false") {
			return Some(Self::Bool(false));
		}
		if let Ok(i) = text.parse::<i32>() {
			return Some(Self::Int(i));
		}
		if text.contains(['.', 'e', 'E'])
			&& text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
			&& let Ok(f) = text.parse::<f32>()
		{
			return Some(Self::Float(f));
		}

		let is_hash_literal = match text.strip_prefix(CUSTOM_HASH_PREFIX) {
			Some(digits) => digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
			None => text.starts_with(STRING_PREFIX) || (text.len() >= 2 && text.starts_with('"') && text.ends_with('"')),
		};
		if is_hash_literal {
			return StringHash32::try_parse(text).map(Self::Hash);
		}
		None
	}
}

impl Numeric {
	fn to_f32(self) -> f32 {
		match self {
			Self::Int(i) => i as f32,
			Self::Float(f) => f,
		}
	}
}

impl Add for Variant {
	type Output = Variant;

	fn add(self, rhs: Self) -> Self::Output {
		self.arith(rhs, ArithOp::Add)
	}
}

impl Sub for Variant {
	type Output = Variant;

	fn sub(self, rhs: Self) -> Self::Output {
		self.arith(rhs, ArithOp::Sub)
	}
}

impl Mul for Variant {
	type Output = Variant;

	fn mul(self, rhs: Self) -> Self::Output {
		self.arith(rhs, ArithOp::Mul)
	}
}

impl Div for Variant {
	type Output = Variant;

	fn div(self, rhs: Self) -> Self::Output {
		self.arith(rhs, ArithOp::Div)
	}
}

impl PartialEq for Variant {
	fn eq(&self, other: &Self) -> bool {
		match (*self, *other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Hash(a), Self::Hash(b)) => a == b,
			(Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
				self.as_float() == other.as_float()
			}
			_ => false,
		}
	}
}

impl PartialOrd for Variant {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (*self, *other) {
			(Self::Null, Self::Null) => Some(Ordering::Equal),
			(Self::Bool(a), Self::Bool(b)) => Some(a.cmp(&b)),
			(Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
			(Self::Hash(a), Self::Hash(b)) => Some(a.cmp(&b)),
			(Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
				self.as_float()?.partial_cmp(&other.as_float()?)
			}
			_ => None,
		}
	}
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(i) => write!(f, "{i}"),
			Self::Float(v) => write!(f, "{v:?}"),
			Self::Hash(h) => f.write_str(&h.to_debug_string()),
		}
	}
}

impl fmt::Debug for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Hash(h) => f.debug_tuple("Hash").field(h).finish(),
		}
	}
}

impl From<bool> for Variant {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<i32> for Variant {
	fn from(v: i32) -> Self {
		Self::Int(v)
	}
}

impl From<f32> for Variant {
	fn from(v: f32) -> Self {
		Self::Float(v)
	}
}

impl From<StringHash32> for Variant {
	fn from(v: StringHash32) -> Self {
		Self::Hash(v)
	}
}
