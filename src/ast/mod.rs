/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the node kind enumeration
/// - expressions: Definitions for the expression kinds
/// - statements: Definitions for the statement kinds
/// - types: The type tags checked by the type checker
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
