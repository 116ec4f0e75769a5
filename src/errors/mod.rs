//! Error types and error handling for the front end.
//!
//! This module defines the single positioned error type shared by the
//! lexer, the parser and the type checker. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each stage
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
