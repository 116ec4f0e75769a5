use crate::{
    ast::expressions::{
        BinaryExpr, BinaryOperator, BooleanExpr, Expr, NumberExpr, PrefixExpr, PrefixOperator,
        SymbolExpr,
    },
    errors::errors::ParseResult,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose binary operators all bind at least as tightly as `min_precedence`.
///
/// Every call and every operator folded into the left operand counts as one
/// nesting level, so the depth of the resulting tree stays within
/// `MAX_NESTING_DEPTH`.
pub fn parse_expr(parser: &mut Parser, min_precedence: u8) -> ParseResult<Expr> {
    parser.enter_nesting()?;
    let mut levels = 1;
    let expr = parse_nested_expr(parser, min_precedence, &mut levels);
    parser.leave_nesting(levels);
    expr
}

fn parse_nested_expr(
    parser: &mut Parser,
    min_precedence: u8,
    levels: &mut usize,
) -> ParseResult<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("an expression"));
    };

    let mut left = nud(parser)?;

    // While the current operator binds at least as tightly as required, keep extending lhs
    loop {
        let token = parser.current_token();
        if token.kind != TokenKind::Op {
            break;
        }

        let operator = token.value.as_str();
        let (Some(bp), Some(led)) = (
            parser.get_bp_lookup().get(operator).copied(),
            parser.get_led_lookup().get(operator).copied(),
        ) else {
            break;
        };

        if bp.value() < min_precedence {
            break;
        }

        parser.enter_nesting()?;
        *levels += 1;
        left = led(parser, left, bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> ParseResult<Expr> {
    let token = parser.current_token();

    let expr = match token.kind {
        TokenKind::Identifier => Expr::Symbol(SymbolExpr {
            value: token.value.clone(),
            position: token.position,
        }),
        TokenKind::Number => Expr::Number(NumberExpr {
            value: token.value.clone(),
            position: token.position,
        }),
        TokenKind::True | TokenKind::False => Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            position: token.position,
        }),
        _ => return Err(parser.unexpected("an expression")),
    };

    parser.advance();
    Ok(expr)
}

/// Handles the operator tokens allowed in prefix position: `not` and `(`.
pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult<Expr> {
    let token = parser.current_token();

    match token.value.as_str() {
        "not" => {
            let position = parser.advance().position;
            let operand = parse_expr(parser, BindingPower::Unary.value())?;

            Ok(Expr::Prefix(PrefixExpr {
                operator: PrefixOperator::Not,
                right_expr: Box::new(operand),
                position,
            }))
        }
        "(" => parse_grouping_expr(parser),
        _ => Err(parser.unexpected("an expression")),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> ParseResult<Expr> {
    parser.expect_op("(")?;
    let expr = parse_expr(parser, BindingPower::Default.value())?;
    parser.expect_op(")")?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> ParseResult<Expr> {
    let Some(operator) = BinaryOperator::from_word(&parser.current_token().value) else {
        return Err(parser.unexpected("a binary operator"));
    };
    let position = parser.advance().position;

    let right = parse_expr(parser, bp.value() + 1)?;

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        position,
    }))
}
