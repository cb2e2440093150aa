/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Literal values, expression nodes, prototypes and functions
pub mod ast;
