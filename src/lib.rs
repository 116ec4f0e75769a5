#![allow(clippy::module_inception)]

use std::{fmt::Display, time::Instant};

use tracing::{debug, instrument};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::tokenize, tables::LexemeTables, tokens::Token},
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Everything the front end produces for a program that passed all three stages.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub tables: LexemeTables,
    pub program: Program,
}

/// Runs the lexer, the parser and the type checker in order, stopping at the first error.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn check(source: &str) -> Result<Compilation, Error> {
    let start = Instant::now();
    let (tokens, tables) = tokenize(source)?;
    debug!(elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let program = parse(tokens.clone())?;
    debug!(elapsed = ?parse_start.elapsed(), "parsed");

    let type_check_start = Instant::now();
    let (_, error) = type_check(&program);
    debug!(elapsed = ?type_check_start.elapsed(), "type checked");

    if let Some(error) = error {
        return Err(error);
    }

    Ok(Compilation {
        tokens,
        tables,
        program,
    })
}

/// Returns the text of `line` (1-based), without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)? as usize)
        .map(|text| text.trim_end_matches('\r'))
}

pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: VariableNotDeclared (Variable `y` not declared, ...)
        -> sample.dim
           |
         3 | let x eq y ;
           | ---------^
    */

    let position = error.get_position();
    let line_text = get_line(source, position.line).unwrap_or_default();

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();
    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}:{}\n", file, position));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
