use std::iter::Peekable;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl, LexResult},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    tables::{LexemeTables, TableId, TableRef},
    tokens::{Token, TokenKind, RESERVED_LOOKUP, WORD_OPERATORS},
};

/// Receives the text matched by its pattern at the current position.
pub type RegexHandler = fn(&mut Lexer, String) -> LexResult<()>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Tried in order at every position; the first match wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^\{\*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: terminator_handler },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ",") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "}") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "=") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ")") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Op, "~") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Exclamation, "!") },
        RegexPattern { regex: Regex::new(r"^\$").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dollar, "$") },
    ];
}

/// Scanner state for one source text.
///
/// The classification tables belong to the lexer instance and grow as
/// numbers and identifiers are scanned.
pub struct Lexer {
    tokens: Vec<Token>,
    tables: LexemeTables,
    source: String,
    /// Byte offset into `source`.
    pos: usize,
    line: u32,
    column: u32,
    /// Set once the `.` program terminator has been scanned.
    halted: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            tables: LexemeTables::new(),
            source: source.to_string(),
            pos: 0,
            line: 1,
            column: 1,
            halted: false,
        }
    }

    /// Advances `n` bytes, keeping the line and column counters in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        trace!(kind = %token.kind, value = %token.value, position = %token.position, "token");
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn tables(&self) -> &LexemeTables {
        &self.tables
    }

    pub fn into_tables(self) -> LexemeTables {
        self.tables
    }

    pub fn token_to_table_ref(&mut self, token: &Token) -> Option<TableRef> {
        self.tables.token_to_table_ref(token)
    }

    /// Scans the rest of the source, stopping after the `.` terminator.
    ///
    /// On failure no tokens are returned; the tables keep whatever was
    /// registered before the fault.
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        while !self.at_eof() && !self.halted {
            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            match matched {
                Some((handler, text)) => handler(self, text)?,
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedCharacter {
                            character: self.at().unwrap_or_default(),
                        },
                        self.position(),
                    ))
                }
            }
        }

        debug!(
            tokens = self.tokens.len(),
            numbers = self.tables.table(TableId::Numbers).len(),
            identifiers = self.tables.table(TableId::Identifiers).len(),
            "lexing finished"
        );
        Ok(std::mem::take(&mut self.tokens))
    }
}

fn skip_handler(lexer: &mut Lexer, matched: String) -> LexResult<()> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, opener: String) -> LexResult<()> {
    let start = lexer.position();
    let closing = lexer.remainder()[opener.len()..].find("*}");

    match closing {
        Some(offset) => {
            lexer.advance_n(opener.len() + offset + 2);
            Ok(())
        }
        None => Err(Error::new(ErrorImpl::UnterminatedComment, start)),
    }
}

fn terminator_handler(lexer: &mut Lexer, matched: String) -> LexResult<()> {
    let position = lexer.position();
    lexer.push(MK_TOKEN!(TokenKind::Op, matched.clone(), position));
    lexer.advance_n(matched.len());
    lexer.halted = true;
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, value: String) -> LexResult<()> {
    let position = lexer.position();
    let lowered = value.to_lowercase();
    let length = value.len();

    let token = if let Some(kind) = RESERVED_LOOKUP.get(lowered.as_str()) {
        MK_TOKEN!(*kind, value, position)
    } else if WORD_OPERATORS.contains(lowered.as_str()) {
        MK_TOKEN!(TokenKind::Op, lowered, position)
    } else {
        lexer.tables.register_identifier(&value);
        MK_TOKEN!(TokenKind::Identifier, value, position)
    };

    lexer.push(token);
    lexer.advance_n(length);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, _first_digit: String) -> LexResult<()> {
    let start = lexer.position();
    let literal = scan_number(lexer.remainder())
        .map_err(|literal| Error::new(ErrorImpl::MalformedNumber { literal }, start))?;

    lexer.tables.register_number(&literal);
    let length = literal.len();
    lexer.push(MK_TOKEN!(TokenKind::Number, literal, start));
    lexer.advance_n(length);
    Ok(())
}

fn take_while<I: Iterator<Item = char>>(
    chars: &mut Peekable<I>,
    predicate: impl Fn(char) -> bool,
) -> String {
    let mut run = String::new();
    while let Some(&ch) = chars.peek() {
        if !predicate(ch) {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn is_hex_letter(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a'..='f')
}

/// Scans one numeric literal from the start of `source`.
///
/// Returns the literal's raw text, or the text scanned so far when the
/// literal is malformed. The order of the checks decides ambiguous tails:
/// a base suffix wins over everything, then `E`/`e` (which may still turn
/// into a hexadecimal tail when letters follow it), then a hexadecimal
/// tail, then a fractional part.
fn scan_number(source: &str) -> Result<String, String> {
    let mut chars = source.chars().peekable();

    let int_part = take_while(&mut chars, |ch| ch.is_ascii_digit());
    let mut value = int_part.clone();
    if int_part.is_empty() {
        return Err(value);
    }

    match chars.peek().copied() {
        Some(suffix @ ('B' | 'b')) => {
            if !int_part.chars().all(|ch| matches!(ch, '0' | '1')) {
                return Err(value);
            }
            value.push(suffix);
            return Ok(value);
        }
        Some(suffix @ ('O' | 'o')) => {
            if !int_part.chars().all(|ch| matches!(ch, '0'..='7')) {
                return Err(value);
            }
            value.push(suffix);
            return Ok(value);
        }
        Some(suffix @ ('D' | 'd')) => {
            value.push(suffix);
            return Ok(value);
        }
        Some(marker @ ('E' | 'e')) => {
            chars.next();
            value.push(marker);

            match chars.peek().copied() {
                Some(sign @ ('+' | '-')) => {
                    chars.next();
                    value.push(sign);
                }
                Some(ch) if is_hex_letter(ch) => {
                    let hex_tail = take_while(&mut chars, is_hex_letter);
                    value.push_str(&hex_tail);
                    return match chars.peek().copied() {
                        Some(suffix @ ('H' | 'h')) => {
                            value.push(suffix);
                            Ok(value)
                        }
                        _ => Err(value),
                    };
                }
                _ => {}
            }

            let exponent = take_while(&mut chars, |ch| ch.is_ascii_digit());
            if exponent.is_empty() {
                return Err(value);
            }
            value.push_str(&exponent);
        }
        _ => {}
    }

    let hex_tail = take_while(&mut chars, is_hex_letter);
    if !hex_tail.is_empty() {
        value.push_str(&hex_tail);
        return match chars.peek().copied() {
            Some(suffix @ ('H' | 'h')) => {
                value.push(suffix);
                Ok(value)
            }
            _ => Err(value),
        };
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        value.push('.');

        let fraction = take_while(&mut chars, |ch| ch.is_ascii_digit());
        if fraction.is_empty() {
            return Err(value);
        }
        value.push_str(&fraction);

        if let Some(marker @ ('E' | 'e')) = chars.peek().copied() {
            chars.next();
            value.push(marker);

            if let Some(sign @ ('+' | '-')) = chars.peek().copied() {
                chars.next();
                value.push(sign);
            }

            let exponent = take_while(&mut chars, |ch| ch.is_ascii_digit());
            if exponent.is_empty() {
                return Err(value);
            }
            value.push_str(&exponent);
        }
    }

    Ok(value)
}

/// Tokenizes `source` with a fresh lexer, returning the tokens and the tables they populated.
pub fn tokenize(source: &str) -> LexResult<(Vec<Token>, LexemeTables)> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;
    Ok((tokens, lexer.into_tables()))
}
