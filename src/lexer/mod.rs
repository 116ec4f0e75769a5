//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of keywords, word operators, identifiers and numeric literals
//! - The four lexeme classification tables and `(table, index)` references
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tables;
pub mod tokens;
