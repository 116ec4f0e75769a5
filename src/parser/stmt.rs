use crate::{
    ast::{
        ast::Program,
        expressions::Expr,
        statements::{
            AssignStmt, CompoundStmt, DeclStmt, ForStmt, IfStmt, InputStmt, NameRef, OutputStmt,
            Stmt, WhileStmt,
        },
        types::TypeTag,
    },
    errors::errors::ParseResult,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// `program var <declaration> begin <statement>* end .`
pub fn parse_program(parser: &mut Parser) -> ParseResult<Program> {
    let position = parser.expect(TokenKind::Program)?.position;
    parser.expect(TokenKind::Var)?;

    let declaration = parse_declaration(parser)?;

    parser.expect(TokenKind::Begin)?;

    let mut body = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Op | TokenKind::End
    ) {
        body.push(parse_stmt(parser)?);

        if parser.current_token().is_op(";") {
            parser.advance();
        }
    }

    parser.expect(TokenKind::End)?;
    parser.expect_op(".")?;

    Ok(Program {
        declaration,
        body,
        position,
    })
}

pub fn parse_declaration(parser: &mut Parser) -> ParseResult<DeclStmt> {
    parser.expect(TokenKind::Dim)?;

    let mut names = vec![parse_name(parser)?];
    while parser.current_token().is_op(",") {
        parser.advance();
        names.push(parse_name(parser)?);
    }

    let suffix = parser.current_token();
    let type_tag = match TypeTag::from_suffix(&suffix.value) {
        Some(type_tag) if suffix.kind.is_type_suffix() => type_tag,
        _ => return Err(parser.unexpected("a type suffix (`%`, `!` or `$`)")),
    };
    let position = parser.advance().position;

    Ok(DeclStmt {
        names,
        type_tag,
        position,
    })
}

fn parse_name(parser: &mut Parser) -> ParseResult<NameRef> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(NameRef {
        name: token.value,
        position: token.position,
    })
}

pub fn parse_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    parser.enter_nesting()?;
    let stmt = parse_nested_stmt(parser);
    parser.leave_nesting(1);
    stmt
}

fn parse_nested_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    if parser.current_token().is_op("{") {
        return parse_compound_stmt(parser);
    }

    let token_kind = parser.current_token_kind();
    let handler = parser.get_stmt_lookup().get(&token_kind).copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("a statement")),
    }
}

/// `{ stmt ; stmt ; ... }` - a `;` directly before `}` is allowed.
pub fn parse_compound_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.expect_op("{")?.position;

    let mut body = vec![parse_stmt(parser)?];
    while parser.current_token().is_op(";") {
        parser.advance();
        if parser.current_token().is_op("}") {
            break;
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect_op("}")?;

    Ok(Stmt::Compound(CompoundStmt { body, position }))
}

/// `[let] ID eq expression`
pub fn parse_assignment_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    if parser.current_token_kind() == TokenKind::Let {
        parser.advance();
    }

    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.expect_op("eq")?;
    let value = parse_expr(parser, BindingPower::Default.value())?;

    Ok(Stmt::Assign(AssignStmt {
        identifier: identifier.value,
        value,
        position: identifier.position,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default.value())?;
    parser.expect(TokenKind::Then)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    parser.expect(TokenKind::EndElse)?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_body: Box::new(then_body),
        else_body,
        position,
    }))
}

/// `do while expression statement loop`
pub fn parse_while_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.advance().position;
    parser.expect(TokenKind::While)?;

    let condition = parse_expr(parser, BindingPower::Default.value())?;
    let body = parse_stmt(parser)?;

    parser.expect(TokenKind::Loop)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
        position,
    }))
}

/// Parses a `for` clause, or nothing when the clause's closing delimiter comes first.
fn parse_optional_clause(parser: &mut Parser, closing: &str) -> ParseResult<Option<Expr>> {
    if parser.current_token().is_op(closing) {
        return Ok(None);
    }
    Ok(Some(parse_expr(parser, BindingPower::Default.value())?))
}

/// `for ( [expr] ; [expr] ; [expr] ) statement`
pub fn parse_for_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.advance().position;
    parser.expect_op("(")?;

    let init = parse_optional_clause(parser, ";")?;
    parser.expect_op(";")?;
    let condition = parse_optional_clause(parser, ";")?;
    parser.expect_op(";")?;
    let increment = parse_optional_clause(parser, ")")?;
    parser.expect_op(")")?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::For(ForStmt {
        init,
        condition,
        increment,
        body: Box::new(body),
        position,
    }))
}

/// `input ( ID ID ... )` - names are separated by whitespace only.
pub fn parse_input_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.advance().position;
    parser.expect_op("(")?;

    let mut names = vec![parse_name(parser)?];
    while parser.current_token_kind() == TokenKind::Identifier {
        names.push(parse_name(parser)?);
    }

    parser.expect_op(")")?;

    Ok(Stmt::Input(InputStmt { names, position }))
}

pub fn parse_output_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let position = parser.advance().position;
    parser.expect_op("(")?;
    let value = parse_expr(parser, BindingPower::Default.value())?;
    parser.expect_op(")")?;

    Ok(Stmt::Output(OutputStmt { value, position }))
}
