//! Type checking and semantic analysis module.
//!
//! This module walks the AST once and checks it against the language's
//! three type tags while:
//!
//! - Registering declared names in a flat, write-once symbol table
//! - Resolving every identifier reference against that table
//! - Inferring the type tag of every expression
//! - Validating assignments and control-flow conditions
//!
//! `type_check` stops at the first error; `analyze` reports one error per
//! failing statement and keeps going.

pub mod type_checker;

#[cfg(test)]
mod tests;
