use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::Position;

/// Reserved words, in classification table order.
pub const KEYWORDS: [&str; 21] = [
    "program", "var", "begin", "end", "dim", "let", "if", "then", "else", "end_else", "for", "do",
    "while", "loop", "input", "output", "%", "!", "$", "true", "false",
];

/// Delimiters and operators, in classification table order.
pub const DELIMITERS: [&str; 23] = [
    ".", ";", ",", "{", "}", "=", "(", ")", "ne", "eq", "lt", "le", "gt", "ge", " ", "~", "plus",
    "min", "or", "mult", "div", "and", "not",
];

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("program", TokenKind::Program);
        map.insert("var", TokenKind::Var);
        map.insert("begin", TokenKind::Begin);
        map.insert("end", TokenKind::End);
        map.insert("dim", TokenKind::Dim);
        map.insert("let", TokenKind::Let);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("end_else", TokenKind::EndElse);
        map.insert("for", TokenKind::For);
        map.insert("do", TokenKind::Do);
        map.insert("while", TokenKind::While);
        map.insert("loop", TokenKind::Loop);
        map.insert("input", TokenKind::Input);
        map.insert("output", TokenKind::Output);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };

    /// Multi-letter operators that lex as `Op` rather than as identifiers.
    pub static ref WORD_OPERATORS: HashSet<&'static str> = [
        "ne", "eq", "lt", "le", "gt", "ge", "plus", "min", "mult", "div", "and", "or", "not",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Appended by the parser, never produced by the lexer.
    EOF,
    Number,
    Identifier,
    /// Delimiters and operators, word operators included.
    Op,

    // Reserved
    Program,
    Var,
    Begin,
    End,
    Dim,
    Let,
    If,
    Then,
    Else,
    EndElse,
    For,
    Do,
    While,
    Loop,
    Input,
    Output,
    True,
    False,

    // Type suffixes
    Percent,
    Exclamation,
    Dollar,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            TokenKind::EOF | TokenKind::Number | TokenKind::Identifier | TokenKind::Op
        )
    }

    /// How the kind is named in syntax error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "a number",
            TokenKind::Identifier => "an identifier",
            TokenKind::Op => "an operator",
            TokenKind::Program => "`program`",
            TokenKind::Var => "`var`",
            TokenKind::Begin => "`begin`",
            TokenKind::End => "`end`",
            TokenKind::Dim => "`dim`",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::EndElse => "`end_else`",
            TokenKind::For => "`for`",
            TokenKind::Do => "`do`",
            TokenKind::While => "`while`",
            TokenKind::Loop => "`loop`",
            TokenKind::Input => "`input`",
            TokenKind::Output => "`output`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Percent => "`%`",
            TokenKind::Exclamation => "`!`",
            TokenKind::Dollar => "`$`",
        }
    }

    pub fn is_type_suffix(&self) -> bool {
        matches!(
            self,
            TokenKind::Percent | TokenKind::Exclamation | TokenKind::Dollar
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {:?}, {}", self.kind, self.value, self.position)
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Whether this is the delimiter or operator `value`.
    pub fn is_op(&self, value: &str) -> bool {
        self.kind == TokenKind::Op && self.value == value
    }
}
