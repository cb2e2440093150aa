//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! lexer's token stream into AST nodes. It handles:
//!
//! - Top-level constructs (function definitions, extern declarations, bare expressions)
//! - Expression parsing (literals, variables, calls, grouping, conditionals)
//! - Binary operators through precedence climbing over a mutable operator table
//!
//! The parser never recovers on its own: a failing parse returns an error and
//! leaves the lookahead on the offending token, so the caller decides how to
//! resynchronise.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod tests;
