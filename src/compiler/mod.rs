//! Reference backend for the language.
//!
//! This module lowers function definitions to a small register-based
//! intermediate form and executes it. It handles:
//!
//! - Compilation units and their lifetimes
//! - Lowering of expressions into instructions
//! - Execution on an explicit-frame virtual machine
//! - The runtime primitives `extern` declarations bind to

pub mod compiler;
pub mod exec;
pub mod expr;
pub mod ir;
pub mod stdlib;
pub mod value;
