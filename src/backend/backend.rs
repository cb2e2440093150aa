use std::fmt::{Debug, Display};

use crate::{
    ast::ast::{Expr, Function, Prototype},
    errors::errors::ErrorImpl,
    session::session::{PrototypeTable, SymbolTable},
};

/// Identifies one acquired compilation unit.
///
/// The generation changes every time a unit slot is released, so a handle
/// that outlives its unit is detected instead of silently reaching a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitHandle {
    index: usize,
    generation: u32,
}

impl UnitHandle {
    pub fn new(index: usize, generation: u32) -> Self {
        UnitHandle { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A finalized unit. Not `Clone`: it is given back exactly once through
/// [`Backend::release_unit`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a compiled unit holds backend resources until it is released"]
pub struct CompiledUnit {
    handle: UnitHandle,
}

impl CompiledUnit {
    pub fn new(handle: UnitHandle) -> Self {
        CompiledUnit { handle }
    }

    pub fn handle(&self) -> UnitHandle {
        self.handle
    }
}

/// What the driver needs from a code generator and execution engine.
pub trait Backend {
    /// Handle for a lowered value; the symbol table maps parameter names to these.
    type Value: Clone;
    /// Handle for a declared or defined function.
    type Function;
    /// What invoking a compiled function produces.
    type Output: Clone + Debug + Display;

    /// Opens a fresh unit that already knows every prototype in `prototypes`.
    fn acquire_unit(&mut self, prototypes: &PrototypeTable) -> Result<UnitHandle, ErrorImpl>;

    /// Registers a signature in `unit`. Fails when the name is already known
    /// with a different number of parameters.
    fn declare_function(
        &mut self,
        unit: UnitHandle,
        prototype: &Prototype,
    ) -> Result<Self::Function, ErrorImpl>;

    /// Compiles `function` into `unit`.
    ///
    /// `symbols` is cleared and filled with the parameters right before the
    /// body is lowered. Fails with `Redefinition` when the name already has a
    /// body; on any failure nothing of the function is left in the unit.
    fn define_function(
        &mut self,
        unit: UnitHandle,
        function: &Function,
        symbols: &mut SymbolTable<Self::Value>,
    ) -> Result<Self::Function, ErrorImpl>;

    /// Lowers `expr` into the function currently being defined.
    fn emit(
        &mut self,
        expr: &Expr,
        symbols: &SymbolTable<Self::Value>,
    ) -> Result<Self::Value, ErrorImpl>;

    /// Closes `unit` for further definitions and makes its functions callable.
    fn finalize_unit(&mut self, unit: UnitHandle) -> Result<CompiledUnit, ErrorImpl>;

    /// Drops a unit that was never finalized.
    fn abandon_unit(&mut self, unit: UnitHandle) -> Result<(), ErrorImpl>;

    /// Drops a finalized unit and everything defined in it.
    fn release_unit(&mut self, unit: CompiledUnit) -> Result<(), ErrorImpl>;

    /// Resolves the zero-argument function `name` in `unit` and calls it.
    fn lookup_and_invoke(
        &mut self,
        unit: &CompiledUnit,
        name: &str,
    ) -> Result<Self::Output, ErrorImpl>;
}
