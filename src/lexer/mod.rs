//! Lexical analysis module for the front end.
//!
//! This module contains the lexer that converts a stream of characters
//! into tokens for the parser. It handles:
//!
//! - Recognition of keywords, identifiers, literals and single-character tokens
//! - Line comments and whitespace
//! - Token position tracking for error reporting
//!
//! The lexer pulls one character at a time and never looks further ahead
//! than a single character, so it can sit directly on top of an interactive
//! input stream.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
