//! The read-eval loop tying parser, session state and backend together.
//!
//! Each call to [`driver::Driver::step`] consumes one top-level construct:
//! a definition, an extern declaration, a bare expression or a stray `;`.

pub mod driver;
