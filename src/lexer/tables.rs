//! Lexeme classification tables.
//!
//! Every token maps to a `(table, index)` pair. Keywords and delimiters
//! live in fixed tables; numeric literals and identifiers are appended
//! the first time they are seen. Indices are 1-based and never change
//! once assigned.

use std::{collections::HashMap, fmt::Display};

use tracing::trace;

use super::tokens::{Token, TokenKind, DELIMITERS, KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    Keywords = 1,
    Delimiters = 2,
    Numbers = 3,
    Identifiers = 4,
}

impl TableId {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A `(table, index)` reference, rendered as `(2, 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub table: TableId,
    pub index: usize,
}

impl Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.table, self.index)
    }
}

/// An append-only, duplicate-free sequence of lexemes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexemeTable {
    values: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl LexemeTable {
    pub fn new() -> Self {
        LexemeTable::default()
    }

    pub fn fixed(values: &[&str]) -> Self {
        let mut table = LexemeTable::new();
        for value in values {
            table.register(value);
        }
        table
    }

    /// Returns the index of `value`, appending it if it is new.
    pub fn register(&mut self, value: &str) -> usize {
        if let Some(index) = self.lookup.get(value) {
            return *index;
        }

        self.values.push(value.to_string());
        let index = self.values.len();
        self.lookup.insert(value.to_string(), index);
        index
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.lookup.get(value).copied()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index.checked_sub(1)?).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.values.iter()
    }
}

/// The four classification tables of one lexer run.
#[derive(Debug, Clone, PartialEq)]
pub struct LexemeTables {
    keywords: LexemeTable,
    delimiters: LexemeTable,
    numbers: LexemeTable,
    identifiers: LexemeTable,
}

impl Default for LexemeTables {
    fn default() -> Self {
        LexemeTables::new()
    }
}

impl LexemeTables {
    pub fn new() -> Self {
        LexemeTables {
            keywords: LexemeTable::fixed(&KEYWORDS),
            delimiters: LexemeTable::fixed(&DELIMITERS),
            numbers: LexemeTable::new(),
            identifiers: LexemeTable::new(),
        }
    }

    pub fn table(&self, id: TableId) -> &LexemeTable {
        match id {
            TableId::Keywords => &self.keywords,
            TableId::Delimiters => &self.delimiters,
            TableId::Numbers => &self.numbers,
            TableId::Identifiers => &self.identifiers,
        }
    }

    pub fn register_number(&mut self, value: &str) -> usize {
        let index = self.numbers.register(value);
        trace!(value, index, "number lexeme");
        index
    }

    pub fn register_identifier(&mut self, value: &str) -> usize {
        let index = self.identifiers.register(value);
        trace!(value, index, "identifier lexeme");
        index
    }

    /// Resolves a token against its classification table.
    ///
    /// Keywords and operators are looked up by their lowercased value in the
    /// fixed tables; numbers and identifiers are registered if unseen.
    /// Returns `None` for the parser's end-of-input sentinel.
    pub fn token_to_table_ref(&mut self, token: &Token) -> Option<TableRef> {
        let (table, index) = match token.kind {
            TokenKind::Op => (
                TableId::Delimiters,
                self.delimiters.index_of(&token.value.to_lowercase())?,
            ),
            TokenKind::Number => (TableId::Numbers, self.register_number(&token.value)),
            TokenKind::Identifier => (
                TableId::Identifiers,
                self.register_identifier(&token.value),
            ),
            kind if kind.is_keyword() => (
                TableId::Keywords,
                self.keywords.index_of(&token.value.to_lowercase())?,
            ),
            _ => return None,
        };

        Some(TableRef { table, index })
    }
}
