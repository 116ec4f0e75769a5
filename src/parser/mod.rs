//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a token sequence into
//! a single `Program` root. Statements are parsed by recursive descent,
//! expressions by precedence climbing:
//!
//! - Statement parsing (declaration, assignment, control flow, input/output)
//! - Expression parsing (binary operators, `not`, literals, grouping)
//! - Positioned syntax errors on the first mismatch
//!
//! Prefix positions dispatch through NUD (null denotation) handlers keyed
//! by token kind; infix operators through LED (left denotation) handlers
//! keyed by operator word, each with a fixed precedence.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
