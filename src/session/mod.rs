//! Session-scoped state threaded through the parser, the driver and the backend.
//!
//! - `session`: the symbol table, the prototype table and the session value
//!   that owns them together with the operator table
//! - `config`: the settings a session is created from

pub mod config;
pub mod session;

#[cfg(test)]
mod tests;
