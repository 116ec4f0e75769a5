//! Unit tests for the type checker module.
//!
//! This module contains tests for type checking including:
//! - Declarations and the symbol table
//! - Assignment compatibility and integer widening
//! - Conditions of `if`, `while` and `for`
//! - Operator typing rules
//! - Error positions and error collection

use crate::{
    ast::{ast::Program, types::TypeTag},
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

use super::type_checker::{analyze, type_check, Environment};

fn parse_program(source: &str) -> Program {
    let (tokens, _) = tokenize(source).unwrap();
    parse(tokens).unwrap()
}

fn first_error(declaration: &str, body: &str) -> Option<Error> {
    let source = format!("program var dim {} begin {} end .", declaration, body);
    type_check(&parse_program(&source)).1
}

fn first_error_impl(declaration: &str, body: &str) -> ErrorImpl {
    first_error(declaration, body)
        .unwrap()
        .get_internal_error()
        .clone()
}

#[test]
fn test_integer_assignment() {
    assert!(first_error("x %", "let x eq 5").is_none());
}

#[test]
fn test_integer_widens_into_real() {
    assert!(first_error("x !", "let x eq 5").is_none());
}

#[test]
fn test_real_does_not_narrow_into_integer() {
    let source = "program var dim x %\nbegin\n  let x eq 5.0\nend .";
    let (_, error) = type_check(&parse_program(source));
    let error = error.unwrap();

    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::TypeMatchError {
            expected: TypeTag::Integer,
            received: TypeTag::Real,
        }
    );
    assert_eq!(*error.get_position(), Position::new(3, 7));
}

#[test]
fn test_boolean_assignment() {
    assert!(first_error("b $", "let b eq true ; b eq not false").is_none());
    assert_eq!(
        first_error_impl("b $", "let b eq 1"),
        ErrorImpl::TypeMatchError {
            expected: TypeTag::Boolean,
            received: TypeTag::Integer,
        }
    );
}

#[test]
fn test_redeclaration() {
    let error = first_error("x, x %", "").unwrap();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableAlreadyDeclared {
            variable: String::from("x"),
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 20));
}

#[test]
fn test_if_with_boolean_literal() {
    assert!(first_error("x %", "if true then output(1) end_else").is_none());
}

#[test]
fn test_undeclared_assignment_target() {
    assert_eq!(
        first_error_impl("x %", "let y eq 1"),
        ErrorImpl::VariableNotDeclared {
            variable: String::from("y"),
        }
    );
}

#[test]
fn test_undeclared_variable_in_expression() {
    assert_eq!(
        first_error_impl("x %", "let x eq y plus 1"),
        ErrorImpl::VariableNotDeclared {
            variable: String::from("y"),
        }
    );
}

#[test]
fn test_undeclared_input_name() {
    let error = first_error("x %", "input(x y)").unwrap();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: String::from("y"),
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 35));
}

#[test]
fn test_if_condition_not_boolean() {
    let source = "program var dim x %\nbegin\n  if x then output(1) end_else\nend .";
    let error = type_check(&parse_program(source)).1.unwrap();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ConditionNotBoolean {
            construct: String::from("if"),
            received: TypeTag::Integer,
        }
    );
    assert_eq!(*error.get_position(), Position::new(3, 3));
}

#[test]
fn test_while_condition_not_boolean() {
    let source = "program var dim x %\nbegin\n  do while x plus 1 output(x) loop\nend .";
    let error = type_check(&parse_program(source)).1.unwrap();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ConditionNotBoolean {
            construct: String::from("while"),
            received: TypeTag::Integer,
        }
    );
    assert_eq!(*error.get_position(), Position::new(3, 14));
}

#[test]
fn test_for_condition() {
    assert!(first_error("x %", "for ( ; ; ) output(x)").is_none());
    assert!(first_error("x %", "for (x; x lt 10; x plus 1) output(x)").is_none());
    assert_eq!(
        first_error_impl("x %", "for ( ; x ; ) output(x)"),
        ErrorImpl::ConditionNotBoolean {
            construct: String::from("for"),
            received: TypeTag::Integer,
        }
    );
}

#[test]
fn test_nested_statements_are_checked() {
    assert_eq!(
        first_error_impl("x %", "if true then { output(1) ; let x eq true } end_else"),
        ErrorImpl::TypeMatchError {
            expected: TypeTag::Integer,
            received: TypeTag::Boolean,
        }
    );
    assert!(matches!(
        first_error_impl("x %", "if true then output(1) else output(y) end_else"),
        ErrorImpl::VariableNotDeclared { .. }
    ));
    assert!(matches!(
        first_error_impl("x %", "do while true input(z) loop"),
        ErrorImpl::VariableNotDeclared { .. }
    ));
}

#[test]
fn test_arithmetic_operands() {
    assert!(first_error("i %", "let i eq 2 mult 3 min 1").is_none());
    assert_eq!(
        first_error_impl("b $", "let b eq 1 plus true"),
        ErrorImpl::ArithmeticOperandError {
            operator: String::from("plus"),
            left: TypeTag::Integer,
            right: TypeTag::Boolean,
        }
    );
}

#[test]
fn test_mixed_arithmetic_is_real() {
    assert!(first_error("r !", "let r eq 1 plus 2.5").is_none());
    assert_eq!(
        first_error_impl("i %", "let i eq 1 plus 2.5"),
        ErrorImpl::TypeMatchError {
            expected: TypeTag::Integer,
            received: TypeTag::Real,
        }
    );
}

#[test]
fn test_dividend_must_be_real() {
    assert!(first_error("r !", "let r eq 4.0 div 2").is_none());
    assert_eq!(
        first_error_impl("r !", "let r eq 4 div 2.0"),
        ErrorImpl::InvalidDividend {
            received: TypeTag::Integer,
        }
    );
}

#[test]
fn test_comparison_operands() {
    assert!(first_error("b $", "let b eq 1 lt 2").is_none());
    assert!(first_error("b $", "let b eq 1.5 ge 2.5").is_none());
    assert!(first_error("b $", "let b eq true ne false").is_none());
    assert_eq!(
        first_error_impl("b $", "let b eq 1 lt 2.0"),
        ErrorImpl::ComparisonTypeMismatch {
            operator: String::from("lt"),
            left: TypeTag::Integer,
            right: TypeTag::Real,
        }
    );
}

#[test]
fn test_logical_operands() {
    assert!(first_error("b $", "let b eq true and b or false").is_none());
    assert_eq!(
        first_error_impl("b $", "let b eq true and 1"),
        ErrorImpl::LogicalOperandError {
            operator: String::from("and"),
            left: TypeTag::Boolean,
            right: TypeTag::Integer,
        }
    );
}

#[test]
fn test_not_operand() {
    let error = first_error("b $", "let b eq not 1").unwrap();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NotOperandError {
            received: TypeTag::Integer,
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 40));
}

#[test]
fn test_binary_error_reported_at_left_operand() {
    let error = first_error("b $", "let b eq 1 plus true").unwrap();

    assert_eq!(*error.get_position(), Position::new(1, 36));
}

#[test]
fn test_number_literal_types() {
    assert!(first_error("x %", "let x eq 10e5").is_none());
    assert!(first_error("x %", "let x eq 1010b plus 3fh mult 17o min 12d").is_none());
    assert_eq!(
        first_error_impl("x %", "let x eq 1e-3"),
        ErrorImpl::TypeMatchError {
            expected: TypeTag::Integer,
            received: TypeTag::Real,
        }
    );
}

#[test]
fn test_type_check_returns_symbol_table() {
    let program = parse_program("program var dim a, b ! begin end .");
    let (type_checker, error) = type_check(&program);

    assert!(error.is_none());
    assert_eq!(type_checker.environment.len(), 2);
    assert_eq!(type_checker.environment.get_variable("a"), Some(TypeTag::Real));
    assert_eq!(type_checker.environment.get_variable("c"), None);
}

#[test]
fn test_analyze_collects_every_error() {
    let program = parse_program(
        "program var dim x, x % begin let x eq true ; output(y) ; let x eq 1 end .",
    );

    let errors = analyze(&program);
    let names: Vec<&str> = errors.iter().map(|error| error.get_error_name()).collect();
    assert_eq!(
        names,
        vec!["VariableAlreadyDeclared", "TypeMatchError", "VariableNotDeclared"]
    );

    let (_, first) = type_check(&program);
    assert_eq!(first.as_ref(), errors.first());
}

#[test]
fn test_analyze_starts_fresh() {
    let program = parse_program("program var dim x % begin let x eq 1 end .");

    assert!(analyze(&program).is_empty());
    assert!(analyze(&program).is_empty());
    assert!(type_check(&program).1.is_none());
}

#[test]
fn test_environment_declarations() {
    let mut environment = Environment::new();

    assert!(environment
        .declare_variable("x", TypeTag::Integer, Position::start())
        .is_ok());
    assert!(environment
        .declare_variable("x", TypeTag::Real, Position::new(2, 1))
        .is_err());
    assert_eq!(environment.get_variable("x"), Some(TypeTag::Integer));

    let error = environment
        .fetch_variable_type("y", Position::new(4, 2))
        .unwrap_err();
    assert_eq!(*error.get_position(), Position::new(4, 2));
}

#[test]
fn test_type_tag_accepts() {
    assert!(TypeTag::Real.accepts(TypeTag::Integer));
    assert!(TypeTag::Real.accepts(TypeTag::Real));
    assert!(!TypeTag::Integer.accepts(TypeTag::Real));
    assert!(!TypeTag::Boolean.accepts(TypeTag::Integer));
    assert_eq!(TypeTag::from_suffix("!"), Some(TypeTag::Real));
    assert_eq!(TypeTag::Boolean.to_string(), "boolean ($)");
}
