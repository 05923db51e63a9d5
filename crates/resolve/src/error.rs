/// Reasons a clause failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
	#[error("empty clause")]
	Empty,
	#[error("clause has no recognised operator")]
	MissingOperator,
	#[error("clause names an invalid variable key")]
	InvalidKey,
	#[error("clause has an invalid operand")]
	InvalidOperand,
}
