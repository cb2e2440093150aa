//! Error types and error handling for the front end.
//!
//! This module defines the single error type shared by every stage of the
//! pipeline. It includes:
//!
//! - An error structure carrying the source position of the failing construct
//! - The error variants raised by the parser, the compiler and the runtime
//! - A coarse category used by the driver to decide how to recover
//! - Error names and tips for the REPL rendering

pub mod errors;
