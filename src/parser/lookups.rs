use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::ParseResult,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence. Binary operators are left-associative: the right
/// operand is parsed with a threshold one above the operator's own.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Or = 10,
    And = 20,
    Relational = 30,
    Additive = 40,
    Multiplicative = 50,
    Unary = 60,
}

impl BindingPower {
    pub fn value(self) -> u8 {
        self as u8
    }
}

pub type StmtHandler = fn(&mut Parser) -> ParseResult<Stmt>;
pub type NUDHandler = fn(&mut Parser) -> ParseResult<Expr>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> ParseResult<Expr>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led("or", BindingPower::Or, parse_binary_expr);
    parser.led("and", BindingPower::And, parse_binary_expr);

    // Relational
    parser.led("lt", BindingPower::Relational, parse_binary_expr);
    parser.led("le", BindingPower::Relational, parse_binary_expr);
    parser.led("gt", BindingPower::Relational, parse_binary_expr);
    parser.led("ge", BindingPower::Relational, parse_binary_expr);
    parser.led("ne", BindingPower::Relational, parse_binary_expr);
    parser.led("eq", BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led("plus", BindingPower::Additive, parse_binary_expr);
    parser.led("min", BindingPower::Additive, parse_binary_expr);
    parser.led("mult", BindingPower::Multiplicative, parse_binary_expr);
    parser.led("div", BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    // `not` and `(`
    parser.nud(TokenKind::Op, parse_prefix_expr);

    // Statements (`{` is matched by value in `parse_stmt`)
    parser.stmt(TokenKind::Identifier, parse_assignment_stmt);
    parser.stmt(TokenKind::Let, parse_assignment_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Do, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Input, parse_input_stmt);
    parser.stmt(TokenKind::Output, parse_output_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<&'static str, LEDHandler>;
pub type BPLookup = HashMap<&'static str, BindingPower>;
