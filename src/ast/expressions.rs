use std::fmt::{self, Display, Formatter};

use crate::Position;

use super::ast::{write_node, NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(SymbolExpr),
    Number(NumberExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Symbol(_) => NodeKind::Id,
            Expr::Number(_) => NodeKind::Number,
            Expr::Boolean(_) => NodeKind::Bool,
            Expr::Prefix(_) => NodeKind::Unop,
            Expr::Binary(_) => NodeKind::Binop,
        }
    }

    /// Writes this expression and its operands as outline lines starting at `depth`.
    pub(crate) fn write_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Expr::Symbol(symbol) => {
                write_node(f, depth, self.kind(), Some(&symbol.value), symbol.position)
            }
            Expr::Number(number) => {
                write_node(f, depth, self.kind(), Some(&number.value), number.position)
            }
            Expr::Boolean(boolean) => {
                write_node(f, depth, self.kind(), Some(&boolean.value), boolean.position)
            }
            Expr::Prefix(prefix) => {
                write_node(f, depth, self.kind(), Some(&prefix.operator), prefix.position)?;
                prefix.right_expr.write_tree(f, depth + 1)
            }
            Expr::Binary(binary) => {
                write_node(f, depth, self.kind(), Some(&binary.operator), binary.position)?;
                binary.left.write_tree(f, depth + 1)?;
                binary.right.write_tree(f, depth + 1)
            }
        }
    }

    pub fn get_position(&self) -> Position {
        match self {
            Expr::Symbol(expr) => expr.position,
            Expr::Number(expr) => expr.position,
            Expr::Boolean(expr) => expr.position,
            Expr::Prefix(expr) => expr.position,
            Expr::Binary(expr) => expr.position,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

// LITERALS

/// Symbol Expression
/// A reference to a declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl NumberBase {
    pub fn radix(&self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }
}

/// Number Expression
/// Keeps the literal exactly as written, suffix letters included.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: String,
    pub position: Position,
}

impl NumberExpr {
    /// A literal is real when it has a fractional part or a negative exponent.
    pub fn is_real(&self) -> bool {
        self.value.contains('.') || self.value.to_ascii_lowercase().contains("e-")
    }

    pub fn base(&self) -> NumberBase {
        match self.value.chars().last().map(|c| c.to_ascii_lowercase()) {
            Some('b') => NumberBase::Binary,
            Some('o') => NumberBase::Octal,
            Some('h') => NumberBase::Hexadecimal,
            _ => NumberBase::Decimal,
        }
    }

    /// The value of an integer literal in any base.
    ///
    /// Returns `None` for real literals and for values that overflow `u64`.
    pub fn integer_value(&self) -> Option<u64> {
        if self.is_real() {
            return None;
        }

        let base = self.base();
        match base {
            NumberBase::Binary | NumberBase::Octal | NumberBase::Hexadecimal => {
                let digits = &self.value[..self.value.len() - 1];
                u64::from_str_radix(digits, base.radix()).ok()
            }
            NumberBase::Decimal => {
                let literal = self
                    .value
                    .strip_suffix(['d', 'D'])
                    .unwrap_or(&self.value);
                match literal.split_once(['e', 'E']) {
                    Some((mantissa, exponent)) => {
                        let exponent: u32 = exponent.trim_start_matches('+').parse().ok()?;
                        let mantissa: u64 = mantissa.parse().ok()?;
                        mantissa.checked_mul(10u64.checked_pow(exponent)?)
                    }
                    None => literal.parse().ok(),
                }
            }
        }
    }

    /// The value of a real literal, `None` for integer literals.
    pub fn real_value(&self) -> Option<f64> {
        if !self.is_real() {
            return None;
        }
        self.value.parse().ok()
    }

    /// Binary rendering of the literal.
    ///
    /// Integers in any base become their binary digits (`17o` is `1111`).
    /// Reals become the 32 bits of their IEEE-754 single-precision value:
    /// sign, exponent, then mantissa.
    pub fn to_binary(&self) -> Option<String> {
        match self.real_value() {
            Some(real) => Some(format!("{:032b}", (real as f32).to_bits())),
            None => self.integer_value().map(|value| format!("{:b}", value)),
        }
    }
}

/// Boolean Expression
/// `true` or `false`, spelled as in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub position: Position,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Not,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not")
    }
}

/// Prefix Expression
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub right_expr: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Min,
    Mult,
    Div,
}

impl BinaryOperator {
    pub fn from_word(word: &str) -> Option<BinaryOperator> {
        Some(match word {
            "or" => BinaryOperator::Or,
            "and" => BinaryOperator::And,
            "eq" => BinaryOperator::Eq,
            "ne" => BinaryOperator::Ne,
            "lt" => BinaryOperator::Lt,
            "le" => BinaryOperator::Le,
            "gt" => BinaryOperator::Gt,
            "ge" => BinaryOperator::Ge,
            "plus" => BinaryOperator::Plus,
            "min" => BinaryOperator::Min,
            "mult" => BinaryOperator::Mult,
            "div" => BinaryOperator::Div,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Eq => "eq",
            BinaryOperator::Ne => "ne",
            BinaryOperator::Lt => "lt",
            BinaryOperator::Le => "le",
            BinaryOperator::Gt => "gt",
            BinaryOperator::Ge => "ge",
            BinaryOperator::Plus => "plus",
            BinaryOperator::Min => "min",
            BinaryOperator::Mult => "mult",
            BinaryOperator::Div => "div",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Plus | BinaryOperator::Min | BinaryOperator::Mult | BinaryOperator::Div
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::Ne
                | BinaryOperator::Lt
                | BinaryOperator::Le
                | BinaryOperator::Gt
                | BinaryOperator::Ge
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binary Expression
/// Positioned at the operator token.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub position: Position,
}
