//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed tokens
//!
//! These macros reduce boilerplate in the lexer's pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$position` - Where the token starts
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            value: $value,
            position: $position,
        }
    };
}

/// Creates a default lexer handler for a token with fixed text.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer past the token's text.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal token text (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^;").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Op, ";"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: String| -> LexResult<()> {
            let position = lexer.position();
            lexer.push(MK_TOKEN!($kind, String::from($value), position));
            lexer.advance_n($value.len());
            Ok(())
        }
    };
}
