use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::TypeTag, Position};

pub type LexResult<T> = Result<T, Error>;
pub type ParseResult<T> = Result<T, Error>;
pub type SemanticResult<T> = Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{position}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The stage an error was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
        }
    }
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnterminatedComment
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::UnrecognisedCharacter { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorKind::Syntax,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::ConditionNotBoolean { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ArithmeticOperandError { .. }
            | ErrorImpl::InvalidDividend { .. }
            | ErrorImpl::LogicalOperandError { .. }
            | ErrorImpl::ComparisonTypeMismatch { .. }
            | ErrorImpl::NotOperandError { .. } => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ArithmeticOperandError { .. } => "ArithmeticOperandError",
            ErrorImpl::InvalidDividend { .. } => "InvalidDividend",
            ErrorImpl::LogicalOperandError { .. } => "LogicalOperandError",
            ErrorImpl::ComparisonTypeMismatch { .. } => "ComparisonTypeMismatch",
            ErrorImpl::NotOperandError { .. } => "NotOperandError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment opened here is never closed with `*}`"))
            }
            ErrorImpl::MalformedNumber { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, check its digits against the base suffix",
                literal
            )),
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::UnexpectedEndOfInput { expected } => ErrorTip::Suggestion(format!(
                "Expected {} before the end of the program text",
                expected
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Statements and expressions may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` not declared, add it to the `dim` list",
                variable
            )),
            ErrorImpl::ConditionNotBoolean { construct, .. } => ErrorTip::Suggestion(format!(
                "The condition of `{}` must be boolean (`$`)",
                construct
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArithmeticOperandError { operator, .. } => ErrorTip::Suggestion(format!(
                "`{}` only accepts integer (`%`) or real (`!`) operands",
                operator
            )),
            ErrorImpl::InvalidDividend { .. } => ErrorTip::Suggestion(String::from(
                "The left operand of `div` must be real (`!`)",
            )),
            ErrorImpl::LogicalOperandError { operator, .. } => ErrorTip::Suggestion(format!(
                "`{}` only accepts boolean (`$`) operands",
                operator
            )),
            ErrorImpl::ComparisonTypeMismatch { left, right, .. } => ErrorTip::Suggestion(format!(
                "Compared values must have the same type, found `{}` and `{}`",
                left, right
            )),
            ErrorImpl::NotOperandError { .. } => {
                ErrorTip::Suggestion(String::from("`not` only applies to boolean (`$`) values"))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("malformed number literal {literal:?}")]
    MalformedNumber { literal: String },
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },

    // Syntax
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected {expected}, found end of input")]
    UnexpectedEndOfInput { expected: String },
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    // Semantic
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("condition of {construct} must be {}, received {received}", TypeTag::Boolean)]
    ConditionNotBoolean { construct: String, received: TypeTag },
    #[error("cannot assign {received} to {expected}")]
    TypeMatchError { expected: TypeTag, received: TypeTag },
    #[error("operator {operator} expects numeric operands, received {left} and {right}")]
    ArithmeticOperandError { operator: String, left: TypeTag, right: TypeTag },
    #[error("dividend must be {}, received {received}", TypeTag::Real)]
    InvalidDividend { received: TypeTag },
    #[error("operator {operator} expects boolean operands, received {left} and {right}")]
    LogicalOperandError { operator: String, left: TypeTag, right: TypeTag },
    #[error("operator {operator} compares {left} with {right}")]
    ComparisonTypeMismatch { operator: String, left: TypeTag, right: TypeTag },
    #[error("not applied to {received}")]
    NotOperandError { received: TypeTag },
}
