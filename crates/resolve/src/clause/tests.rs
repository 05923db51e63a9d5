use pretty_assertions::assert_eq;
use rstest::rstest;
use varitab_strhash::StringHash32;

use super::*;

fn key(name: &str) -> TableKeyPair {
	TableKeyPair::variable(StringHash32::new(name))
}

#[rstest]
#[case("hp = 10", ModifyOperator::Set)]
#[case("hp += 10", ModifyOperator::Add)]
#[case("hp-=10", ModifyOperator::Subtract)]
#[case("hp *= 10", ModifyOperator::Multiply)]
#[case("hp /=10", ModifyOperator::Divide)]
fn modification_operators(#[case] text: &str, #[case] operator: ModifyOperator) {
	let clause = Modification::parse_clause(text).unwrap();
	assert_eq!(clause.key, key("hp"));
	assert_eq!(clause.operator, operator);
	assert_eq!(clause.operand, Operand::Value(Variant::Int(10)));
}

#[test]
fn modification_negative_operand_is_not_subtract() {
	let clause = Modification::parse_clause("hp = -3").unwrap();
	assert_eq!(clause.operator, ModifyOperator::Set);
	assert_eq!(clause.operand, Operand::Value(Variant::Int(-3)));
}

#[test]
fn modification_with_table_and_key_operand() {
	let clause = Modification::parse_clause("player:gold += bonus").unwrap();
	assert_eq!(clause.key, TableKeyPair::new(StringHash32::new("player"), StringHash32::new("gold")));
	assert_eq!(clause.operand, Operand::Key(key("bonus")));
}

#[test]
fn modification_quoted_operand_is_hash() {
	let clause = Modification::parse_clause(r#"name = "a = b""#).unwrap();
	assert_eq!(clause.operand, Operand::Value(Variant::Hash(StringHash32::new("a = b"))));
}

#[rstest]
#[case("", ClauseError::Empty)]
#[case("   ", ClauseError::Empty)]
#[case("hp", ClauseError::MissingOperator)]
#[case("= 5", ClauseError::InvalidKey)]
#[case("two words = 5", ClauseError::InvalidKey)]
#[case("hp =", ClauseError::InvalidOperand)]
#[case("hp == 5", ClauseError::InvalidOperand)]
fn modification_errors(#[case] text: &str, #[case] expected: ClauseError) {
	assert_eq!(Modification::parse_clause(text), Err(expected));
}

#[rstest]
#[case("hp == 1", CompareOperator::Equal)]
#[case("hp != 1", CompareOperator::NotEqual)]
#[case("hp < 1", CompareOperator::Less)]
#[case("hp <= 1", CompareOperator::LessOrEqual)]
#[case("hp>1", CompareOperator::Greater)]
#[case("hp >= 1", CompareOperator::GreaterOrEqual)]
fn comparison_operators(#[case] text: &str, #[case] operator: CompareOperator) {
	let clause = Comparison::parse_clause(text).unwrap();
	assert_eq!(clause.key, key("hp"));
	assert_eq!(clause.test, ComparisonTest::Compare(operator, Operand::Value(Variant::Int(1))));
}

#[test]
fn comparison_bare_and_negated_keys() {
	let bare = Comparison::parse_clause("has_key").unwrap();
	assert_eq!(bare.test, ComparisonTest::Truthy);
	assert_eq!(bare.key, key("has_key"));

	let negated = Comparison::parse_clause("! has_key").unwrap();
	assert_eq!(negated.test, ComparisonTest::Falsy);
	assert_eq!(negated.key, key("has_key"));
}

#[rstest]
#[case("", ClauseError::Empty)]
#[case("hp = 1", ClauseError::MissingOperator)]
#[case("hp ! 1", ClauseError::MissingOperator)]
#[case("== 1", ClauseError::InvalidKey)]
#[case("!hp == 1", ClauseError::InvalidKey)]
#[case("hp <", ClauseError::InvalidOperand)]
fn comparison_errors(#[case] text: &str, #[case] expected: ClauseError) {
	assert_eq!(Comparison::parse_clause(text), Err(expected));
}

#[test]
fn display_is_readable() {
	let modification = Modification::parse_clause("hp += 2").unwrap();
	assert!(modification.to_string().ends_with(" += 2"));

	let comparison = Comparison::parse_clause("hp >= 1.5").unwrap();
	assert!(comparison.to_string().ends_with(" >= 1.5"));
}
