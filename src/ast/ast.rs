use std::fmt::{self, Display, Formatter};

use crate::Position;

use super::statements::{DeclStmt, Stmt};

/// Node Kinds
///
/// One tag per node kind the parser produces. Statements and expressions
/// are closed enums, so every consumer matches them exhaustively; the tag
/// exists for rendering and for callers that only need to know the shape.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Program,
    Decl,
    Compound,
    Assign,
    If,
    While,
    For,
    Input,
    Output,
    Id,
    Number,
    Bool,
    Unop,
    Binop,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Decl => "decl",
            NodeKind::Compound => "compound",
            NodeKind::Assign => "assign",
            NodeKind::If => "if",
            NodeKind::While => "while",
            NodeKind::For => "for",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Id => "id",
            NodeKind::Number => "number",
            NodeKind::Bool => "bool",
            NodeKind::Unop => "unop",
            NodeKind::Binop => "binop",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writes one line of a tree outline: `kind: value [line, column]`,
/// indented by two spaces per level.
pub(crate) fn write_node(
    f: &mut Formatter<'_>,
    depth: usize,
    kind: NodeKind,
    value: Option<&dyn Display>,
    position: Position,
) -> fmt::Result {
    write!(f, "{:indent$}{}", "", kind, indent = depth * 2)?;
    if let Some(value) = value {
        write!(f, ": {}", value)?;
    }
    writeln!(f, " [{}, {}]", position.line, position.column)
}

/// The root of the tree: one declaration followed by the statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declaration: DeclStmt,
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl Program {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Program
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// Renders the tree as an indented outline, one node per line.
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_node(f, 0, self.kind(), None, self.position)?;
        self.declaration.write_tree(f, 1)?;
        for stmt in self.iter() {
            stmt.write_tree(f, 1)?;
        }
        Ok(())
    }
}
