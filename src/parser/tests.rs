//! Unit tests for the parser module.
//!
//! This module contains tests for parsing including:
//! - The program skeleton and the declaration
//! - Every statement form
//! - Operator precedence and associativity
//! - Syntax errors and their positions

use crate::{
    ast::{
        ast::{NodeKind, Program},
        expressions::{BinaryOperator, Expr, PrefixOperator},
        statements::Stmt,
        types::TypeTag,
    },
    errors::errors::{ErrorImpl, ErrorKind, ParseResult},
    lexer::lexer::tokenize,
    Position,
};

use super::parser::{parse, MAX_NESTING_DEPTH};

fn parse_source(source: &str) -> ParseResult<Program> {
    let (tokens, _) = tokenize(source).unwrap();
    parse(tokens)
}

fn nested_parentheses(depth: usize) -> String {
    format!(
        "program var dim x $ begin let x eq {}true{} end .",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

fn parse_body(body: &str) -> Vec<Stmt> {
    let source = format!("program var dim a, b, c, x $ begin {} end .", body);
    parse_source(&source).unwrap().body
}

/// Parses `let x eq <expression>` and returns the expression.
fn parse_expression(expression: &str) -> Expr {
    let mut body = parse_body(&format!("let x eq {}", expression));
    match body.remove(0) {
        Stmt::Assign(assign) => assign.value,
        other => panic!("Expected an assignment, got {:?}", other.kind()),
    }
}

fn binary_parts(expr: &Expr) -> (&Expr, BinaryOperator, &Expr) {
    match expr {
        Expr::Binary(binary) => (&binary.left, binary.operator, &binary.right),
        other => panic!("Expected a binary expression, got {:?}", other.kind()),
    }
}

fn number_value(expr: &Expr) -> &str {
    match expr {
        Expr::Number(number) => &number.value,
        other => panic!("Expected a number, got {:?}", other.kind()),
    }
}

fn symbol_value(expr: &Expr) -> &str {
    match expr {
        Expr::Symbol(symbol) => &symbol.value,
        other => panic!("Expected a symbol, got {:?}", other.kind()),
    }
}

#[test]
fn test_parse_minimal_program() {
    let program = parse_source("program var dim x % begin end .").unwrap();

    assert_eq!(program.kind(), NodeKind::Program);
    assert_eq!(program.kind().to_string(), "program");
    assert_eq!(program.get_position(), Position::new(1, 1));
    assert!(program.body.is_empty());
    assert_eq!(program.declaration.kind(), NodeKind::Decl);
    assert_eq!(program.declaration.type_tag, TypeTag::Integer);
    assert_eq!(program.declaration.names.len(), 1);
    assert_eq!(program.declaration.names[0].name, "x");
}

#[test]
fn test_parse_keywords_case_insensitive() {
    let program = parse_source("PROGRAM Var DIM X ! BEGIN END .").unwrap();

    assert_eq!(program.declaration.type_tag, TypeTag::Real);
    assert_eq!(program.declaration.names[0].name, "X");
}

#[test]
fn test_parse_declaration_list() {
    let program = parse_source("program var dim a, b, c $ begin end .").unwrap();
    let names: Vec<&str> = program
        .declaration
        .names
        .iter()
        .map(|name| name.name.as_str())
        .collect();

    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(program.declaration.type_tag, TypeTag::Boolean);
    assert_eq!(program.declaration.names[2].position, Position::new(1, 23));
    assert_eq!(program.declaration.position, Position::new(1, 25));
}

#[test]
fn test_parse_assignment_with_and_without_let() {
    let body = parse_body("let x eq true ; x eq false");

    assert_eq!(body.len(), 2);
    for stmt in &body {
        match stmt {
            Stmt::Assign(assign) => assert_eq!(assign.identifier, "x"),
            other => panic!("Expected an assignment, got {:?}", other.kind()),
        }
    }
}

#[test]
fn test_parse_statement_positions() {
    let source = "program var dim x %\nbegin\n  let x eq 1 plus 2\nend .";
    let program = parse_source(source).unwrap();

    let Stmt::Assign(assign) = &program.body[0] else {
        panic!("Expected an assignment");
    };
    assert_eq!(assign.position, Position::new(3, 7));
    assert_eq!(assign.value.get_position(), Position::new(3, 14));

    let (left, _, _) = binary_parts(&assign.value);
    assert_eq!(left.get_position(), Position::new(3, 12));
}

#[test]
fn test_parse_if_without_else() {
    let body = parse_body("if true then output(1) end_else");

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("Expected an if statement");
    };
    assert!(matches!(if_stmt.condition, Expr::Boolean(_)));
    assert_eq!(if_stmt.then_body.kind(), NodeKind::Output);
    assert!(if_stmt.else_body.is_none());
}

#[test]
fn test_parse_if_with_else() {
    let body = parse_body("if a then output(1) else output(2) end_else");

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("Expected an if statement");
    };
    let else_body = if_stmt.else_body.as_ref().unwrap();
    assert_eq!(else_body.kind(), NodeKind::Output);
}

#[test]
fn test_parse_while_loop() {
    let body = parse_body("do while a let a eq false loop");

    let Stmt::While(while_stmt) = &body[0] else {
        panic!("Expected a while statement");
    };
    assert_eq!(symbol_value(&while_stmt.condition), "a");
    assert_eq!(while_stmt.body.kind(), NodeKind::Assign);
}

#[test]
fn test_parse_for_with_empty_clauses() {
    let body = parse_body("for ( ; ; ) output(1)");

    let Stmt::For(for_stmt) = &body[0] else {
        panic!("Expected a for statement");
    };
    assert!(for_stmt.init.is_none());
    assert!(for_stmt.condition.is_none());
    assert!(for_stmt.increment.is_none());
    assert_eq!(for_stmt.body.kind(), NodeKind::Output);
}

#[test]
fn test_parse_for_with_clauses() {
    let body = parse_body("for (a; a lt b; b) output(a)");

    let Stmt::For(for_stmt) = &body[0] else {
        panic!("Expected a for statement");
    };
    assert_eq!(symbol_value(for_stmt.init.as_ref().unwrap()), "a");
    assert_eq!(for_stmt.condition.as_ref().unwrap().kind(), NodeKind::Binop);
    assert_eq!(symbol_value(for_stmt.increment.as_ref().unwrap()), "b");
}

#[test]
fn test_parse_input_names() {
    let body = parse_body("input(a b c)");

    let Stmt::Input(input) = &body[0] else {
        panic!("Expected an input statement");
    };
    let names: Vec<&str> = input.names.iter().map(|name| name.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_parse_compound_with_trailing_semicolon() {
    let body = parse_body("if a then { output(1) ; output(2) ; } end_else");

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("Expected an if statement");
    };
    let Stmt::Compound(compound) = if_stmt.then_body.as_ref() else {
        panic!("Expected a compound statement");
    };
    assert_eq!(compound.iter().count(), 2);
    assert!(compound.iter().all(|stmt| stmt.kind() == NodeKind::Output));
}

#[test]
fn test_parse_statements_with_optional_separators() {
    let body = parse_body("output(a) ; output(b) output(c) ;");

    assert_eq!(body.len(), 3);
}

#[test]
fn test_parse_multiplicative_binds_tighter() {
    let expr = parse_expression("1 plus 2 mult 3");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Plus);
    assert_eq!(number_value(left), "1");

    let (inner_left, inner_operator, inner_right) = binary_parts(right);
    assert_eq!(inner_operator, BinaryOperator::Mult);
    assert_eq!(number_value(inner_left), "2");
    assert_eq!(number_value(inner_right), "3");
}

#[test]
fn test_parse_left_associativity() {
    let expr = parse_expression("1 min 2 min 3");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Min);
    assert_eq!(number_value(right), "3");

    let (inner_left, inner_operator, inner_right) = binary_parts(left);
    assert_eq!(inner_operator, BinaryOperator::Min);
    assert_eq!(number_value(inner_left), "1");
    assert_eq!(number_value(inner_right), "2");
}

#[test]
fn test_parse_logical_precedence() {
    let expr = parse_expression("a or b and c");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Or);
    assert_eq!(symbol_value(left), "a");
    assert_eq!(binary_parts(right).1, BinaryOperator::And);
}

#[test]
fn test_parse_comparison_below_additive() {
    let expr = parse_expression("a plus 1 lt b");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Lt);
    assert_eq!(binary_parts(left).1, BinaryOperator::Plus);
    assert_eq!(symbol_value(right), "b");
}

#[test]
fn test_parse_not_binds_tightest() {
    let expr = parse_expression("not a and b");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::And);
    assert_eq!(symbol_value(right), "b");

    let Expr::Prefix(prefix) = left else {
        panic!("Expected a prefix expression");
    };
    assert_eq!(prefix.operator, PrefixOperator::Not);
    assert_eq!(symbol_value(&prefix.right_expr), "a");
}

#[test]
fn test_parse_parentheses_override_precedence() {
    let expr = parse_expression("(1 plus 2) mult 3");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Mult);
    assert_eq!(binary_parts(left).1, BinaryOperator::Plus);
    assert_eq!(number_value(right), "3");
}

#[test]
fn test_parse_missing_type_suffix() {
    let error = parse_source("program var dim x begin end .").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("a type suffix (`%`, `!` or `$`)"),
            found: String::from("begin"),
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 19));
}

#[test]
fn test_parse_missing_end_else() {
    let error = parse_source("program var dim x $ begin if x then output(1) end .").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("`end_else`"),
            found: String::from("end"),
        }
    );
}

#[test]
fn test_parse_unexpected_end_of_input() {
    let error = parse_source("program var dim x %").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedEndOfInput {
            expected: String::from("`begin`"),
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 20));
}

#[test]
fn test_parse_empty_token_stream() {
    let error = parse(vec![]).unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedEndOfInput { .. }
    ));
    assert_eq!(*error.get_position(), Position::start());
}

#[test]
fn test_parse_missing_expression() {
    let error = parse_source("program var dim x % begin let x eq ; end .").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("an expression"),
            found: String::from(";"),
        }
    );
}

#[test]
fn test_parse_compound_not_allowed_at_top_level() {
    let error = parse_source("program var dim x % begin { output(1) } end .").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("`end`"),
            found: String::from("{"),
        }
    );
}

#[test]
fn test_parse_unknown_statement() {
    let error = parse_source("program var dim x % begin then end .").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("a statement"),
            found: String::from("then"),
        }
    );
}

#[test]
fn test_parse_trailing_tokens() {
    let (mut tokens, _) = tokenize("program var dim x % begin end .").unwrap();
    let extra = tokens[0].clone();
    tokens.push(extra);

    let error = parse(tokens).unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken { expected, .. } if expected == "end of input"
    ));
}

#[test]
fn test_parse_not_is_not_a_variable_name() {
    let error = parse_source("program var dim x % begin let not eq 1 end .").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: String::from("an identifier"),
            found: String::from("not"),
        }
    );
}

#[test]
fn test_parse_nesting_within_limit() {
    let program = parse_source(&nested_parentheses(200)).unwrap();

    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_parse_parentheses_too_deep() {
    let error = parse_source(&nested_parentheses(1000)).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        }
    );
    assert_eq!(*error.get_position(), Position::new(1, 291));
}

#[test]
fn test_parse_not_chain_too_deep() {
    let source = format!("program var dim x $ begin let x eq {}true end .", "not ".repeat(1000));
    let error = parse_source(&source).unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::NestingTooDeep { .. }
    ));
}

#[test]
fn test_parse_operator_chain_depth() {
    let short = format!("program var dim x % begin let x eq {}1 end .", "1 plus ".repeat(100));
    assert!(parse_source(&short).is_ok());

    let long = format!("program var dim x % begin let x eq {}1 end .", "1 plus ".repeat(1000));
    let error = parse_source(&long).unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::NestingTooDeep { .. }
    ));
}

#[test]
fn test_parse_nested_statements_too_deep() {
    let source = format!(
        "program var dim x % begin {}output(1){} end .",
        "if true then ".repeat(1000),
        " end_else".repeat(1000)
    );
    let error = parse_source(&source).unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::NestingTooDeep { .. }
    ));
}

#[test]
fn test_program_outline() {
    let source = "program var dim x %\nbegin\n  let x eq 1 plus 2\nend .";
    let program = parse_source(source).unwrap();

    let expected = "\
program [1, 1]
  decl: integer (%) [1, 19]
    id: x [1, 17]
  assign: x [3, 7]
    binop: plus [3, 14]
      number: 1 [3, 12]
      number: 2 [3, 19]
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_program_outline_skips_missing_children() {
    let source =
        "program var dim a, b $ begin if not a then input(a b) end_else ; for ( ; a ; ) output(1) end .";
    let program = parse_source(source).unwrap();

    let expected = "\
program [1, 1]
  decl: boolean ($) [1, 22]
    id: a [1, 17]
    id: b [1, 20]
  if [1, 30]
    unop: not [1, 33]
      id: a [1, 37]
    input [1, 44]
      id: a [1, 50]
      id: b [1, 52]
  for [1, 66]
    id: a [1, 74]
    output [1, 80]
      number: 1 [1, 87]
";
    assert_eq!(program.to_string(), expected);
    assert_eq!(program.body[1].to_string().lines().count(), 4);
}
