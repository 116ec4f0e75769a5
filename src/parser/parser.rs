//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry
//! point. The parser keeps lookup tables for:
//! - Statement handlers, keyed by the statement's leading token kind
//! - NUD (null denotation) handlers for prefix positions
//! - LED (left denotation) handlers for binary operators
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl, ParseResult},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_program,
};

/// Deepest allowed nesting of statements and expression nodes.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Returned once the tokens run out
    eof: Token,
    /// Current statement and expression nesting
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser with its lookup tables installed.
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_position = tokens
            .last()
            .map(|token| {
                Position::new(
                    token.position.line,
                    token.position.column + token.value.chars().count() as u32,
                )
            })
            .unwrap_or_else(Position::start);

        let mut parser = Parser {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::EOF,
                value: String::new(),
                position: eof_position,
            },
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// Builds the error for finding the current token where `expected` should be.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.to_string(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.value.clone(),
            }
        };
        Error::new(error, token.position)
    }

    /// Expects a token of the specified kind and consumes it.
    pub fn expect(&mut self, expected_kind: TokenKind) -> ParseResult<Token> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected_kind.describe()));
        }
        Ok(self.advance().clone())
    }

    /// Expects the delimiter or operator `value` and consumes it.
    pub fn expect_op(&mut self, value: &str) -> ParseResult<Token> {
        if !self.current_token().is_op(value) {
            return Err(self.unexpected(&format!("`{}`", value)));
        }
        Ok(self.advance().clone())
    }

    /// Descends one nesting level, failing at the current token past `MAX_NESTING_DEPTH`.
    pub fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current_token().position,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a binary operator.
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator word as the lexer produces it
    /// * `binding_power` - The precedence for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, operator: &'static str, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(operator, binding_power);
        self.led_lookup.insert(operator, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token kind.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token kind.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a token sequence into a program.
///
/// This is the main entry point for parsing. The whole sequence must be
/// consumed by the single `program` production; trailing tokens are an
/// error.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens);
    let program = parse_program(&mut parser)?;

    if parser.has_tokens() {
        return Err(parser.unexpected(TokenKind::EOF.describe()));
    }

    debug!(statements = program.body.len(), "parsing finished");
    Ok(program)
}
