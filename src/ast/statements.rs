use std::fmt::{self, Display, Formatter};

use crate::Position;

use super::{
    ast::{write_node, NodeKind},
    expressions::Expr,
    types::TypeTag,
};

/// A name listed in a `dim` declaration or an `input` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct NameRef {
    pub name: String,
    pub position: Position,
}

/// `dim a, b, c %` - every listed name gets the one type suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub names: Vec<NameRef>,
    pub type_tag: TypeTag,
    /// Position of the type suffix.
    pub position: Position,
}

impl NameRef {
    fn write_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        write_node(f, depth, NodeKind::Id, Some(&self.name), self.position)
    }
}

impl DeclStmt {
    pub fn kind(&self) -> NodeKind {
        NodeKind::Decl
    }

    pub(crate) fn write_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        write_node(f, depth, self.kind(), Some(&self.type_tag), self.position)?;
        for name in self.names.iter() {
            name.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Input(InputStmt),
    Output(OutputStmt),
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::Compound(_) => NodeKind::Compound,
            Stmt::Assign(_) => NodeKind::Assign,
            Stmt::If(_) => NodeKind::If,
            Stmt::While(_) => NodeKind::While,
            Stmt::For(_) => NodeKind::For,
            Stmt::Input(_) => NodeKind::Input,
            Stmt::Output(_) => NodeKind::Output,
        }
    }

    /// Writes this statement and its children as outline lines starting at `depth`.
    pub(crate) fn write_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Stmt::Compound(compound) => {
                write_node(f, depth, self.kind(), None, compound.position)?;
                for stmt in compound.iter() {
                    stmt.write_tree(f, depth + 1)?;
                }
            }
            Stmt::Assign(assign) => {
                write_node(f, depth, self.kind(), Some(&assign.identifier), assign.position)?;
                assign.value.write_tree(f, depth + 1)?;
            }
            Stmt::If(if_stmt) => {
                write_node(f, depth, self.kind(), None, if_stmt.position)?;
                if_stmt.condition.write_tree(f, depth + 1)?;
                if_stmt.then_body.write_tree(f, depth + 1)?;
                if let Some(else_body) = &if_stmt.else_body {
                    else_body.write_tree(f, depth + 1)?;
                }
            }
            Stmt::While(while_stmt) => {
                write_node(f, depth, self.kind(), None, while_stmt.position)?;
                while_stmt.condition.write_tree(f, depth + 1)?;
                while_stmt.body.write_tree(f, depth + 1)?;
            }
            Stmt::For(for_stmt) => {
                write_node(f, depth, self.kind(), None, for_stmt.position)?;
                let clauses = [&for_stmt.init, &for_stmt.condition, &for_stmt.increment];
                for clause in clauses.into_iter().flatten() {
                    clause.write_tree(f, depth + 1)?;
                }
                for_stmt.body.write_tree(f, depth + 1)?;
            }
            Stmt::Input(input) => {
                write_node(f, depth, self.kind(), None, input.position)?;
                for name in input.names.iter() {
                    name.write_tree(f, depth + 1)?;
                }
            }
            Stmt::Output(output) => {
                write_node(f, depth, self.kind(), None, output.position)?;
                output.value.write_tree(f, depth + 1)?;
            }
        }
        Ok(())
    }

    pub fn get_position(&self) -> Position {
        match self {
            Stmt::Compound(stmt) => stmt.position,
            Stmt::Assign(stmt) => stmt.position,
            Stmt::If(stmt) => stmt.position,
            Stmt::While(stmt) => stmt.position,
            Stmt::For(stmt) => stmt.position,
            Stmt::Input(stmt) => stmt.position,
            Stmt::Output(stmt) => stmt.position,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl CompoundStmt {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub identifier: String,
    pub value: Expr,
    /// Position of the assigned identifier.
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub position: Position,
}

/// `for ( init ; condition ; increment ) body` - each clause may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Expr>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputStmt {
    pub names: Vec<NameRef>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputStmt {
    pub value: Expr,
    pub position: Position,
}
