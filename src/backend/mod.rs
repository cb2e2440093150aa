//! The contract between the front end and whatever turns AST into running code.
//!
//! The driver only talks to a code generator through the [`backend::Backend`]
//! trait, so the pipeline can be exercised against any implementation. The
//! reference implementation lives in [`crate::compiler`].

pub mod backend;
