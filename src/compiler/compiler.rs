//! Reference backend.
//!
//! Functions are lowered to the register form in [`super::ir`] and run by the
//! virtual machine in [`super::exec`]. Compilation units live in slots that
//! are reused after release; each slot carries a generation so handles to a
//! released unit are rejected.

use std::{
    collections::HashMap,
    io::{self, Write},
    rc::Rc,
};

use log::{debug, info};

use crate::{
    ast::ast::{Expr, Function, Prototype},
    backend::backend::{Backend, CompiledUnit, UnitHandle},
    errors::errors::ErrorImpl,
    session::{
        config::DEFAULT_MAX_CALL_DEPTH,
        session::{PrototypeTable, SymbolTable},
    },
};

use super::{
    exec::{self, Callee},
    expr::gen_expression,
    ir::{CompiledFunction, FunctionBuilder, Reg},
    stdlib,
    value::Value,
};

#[derive(Debug, Default)]
struct Unit {
    /// Every function name the unit may call, with its arity
    declarations: HashMap<String, usize>,
    /// Bodies defined in this unit
    functions: HashMap<String, Rc<CompiledFunction>>,
    finalized: bool,
}

#[derive(Debug)]
struct UnitSlot {
    generation: u32,
    unit: Option<Unit>,
}

pub struct Compiler {
    units: Vec<UnitSlot>,
    /// The function whose body is being lowered, with the unit it goes into
    active: Option<(UnitHandle, FunctionBuilder)>,
    /// Name of every live body to the unit holding it
    bodies: HashMap<String, UnitHandle>,
    sink: Box<dyn Write>,
    max_call_depth: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}

fn unit_ref(units: &[UnitSlot], handle: UnitHandle) -> Result<&Unit, ErrorImpl> {
    match units.get(handle.index()) {
        Some(UnitSlot {
            generation,
            unit: Some(unit),
        }) if *generation == handle.generation() => Ok(unit),
        _ => Err(ErrorImpl::StaleUnit),
    }
}

fn unit_mut(units: &mut [UnitSlot], handle: UnitHandle) -> Result<&mut Unit, ErrorImpl> {
    match units.get_mut(handle.index()) {
        Some(UnitSlot {
            generation,
            unit: Some(unit),
        }) if *generation == handle.generation() => Ok(unit),
        _ => Err(ErrorImpl::StaleUnit),
    }
}

impl Compiler {
    /// A backend whose output primitives write to stderr.
    pub fn new() -> Self {
        Compiler::with_sink(Box::new(io::stderr()))
    }

    pub fn with_sink(sink: Box<dyn Write>) -> Self {
        Compiler {
            units: vec![],
            active: None,
            bodies: HashMap::new(),
            sink,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Number of units currently acquired and not yet released.
    pub fn live_units(&self) -> usize {
        self.units.iter().filter(|slot| slot.unit.is_some()).count()
    }

    /// The lowered form of a live body, if there is one.
    pub fn function(&self, name: &str) -> Option<Rc<CompiledFunction>> {
        let handle = self.bodies.get(name)?;
        let unit = unit_ref(&self.units, *handle).ok()?;
        unit.functions.get(name).cloned()
    }

    /// Drops every body registered for `handle` and frees its slot.
    fn free_slot(&mut self, handle: UnitHandle) -> Result<(), ErrorImpl> {
        unit_ref(&self.units, handle)?;

        if matches!(&self.active, Some((active, _)) if *active == handle) {
            self.active = None;
        }
        self.bodies.retain(|_, owner| *owner != handle);

        if let Some(slot) = self.units.get_mut(handle.index()) {
            slot.unit = None;
            slot.generation = slot.generation.wrapping_add(1);
        }

        debug!("released unit {}", handle.index());
        Ok(())
    }

    fn resolve(
        units: &[UnitSlot],
        bodies: &HashMap<String, UnitHandle>,
        name: &str,
    ) -> Option<Callee> {
        let body = bodies
            .get(name)
            .and_then(|handle| unit_ref(units, *handle).ok())
            .filter(|unit| unit.finalized)
            .and_then(|unit| unit.functions.get(name));

        match body {
            Some(function) => Some(Callee::Function(Rc::clone(function))),
            None => stdlib::lookup(name).map(Callee::Primitive),
        }
    }
}

impl Backend for Compiler {
    type Value = Reg;
    type Function = Prototype;
    type Output = Value;

    fn acquire_unit(&mut self, prototypes: &PrototypeTable) -> Result<UnitHandle, ErrorImpl> {
        let mut unit = Unit::default();
        for prototype in prototypes.iter() {
            unit.declarations
                .insert(prototype.name.clone(), prototype.arity());
        }

        let handle = match self.units.iter().position(|slot| slot.unit.is_none()) {
            Some(index) => {
                let slot = &mut self.units[index];
                slot.unit = Some(unit);
                UnitHandle::new(index, slot.generation)
            }
            None => {
                self.units.push(UnitSlot {
                    generation: 0,
                    unit: Some(unit),
                });
                UnitHandle::new(self.units.len() - 1, 0)
            }
        };

        debug!("acquired unit {}", handle.index());
        Ok(handle)
    }

    fn declare_function(
        &mut self,
        unit: UnitHandle,
        prototype: &Prototype,
    ) -> Result<Prototype, ErrorImpl> {
        let target = unit_mut(&mut self.units, unit)?;
        if target.finalized {
            return Err(ErrorImpl::UnitFinalized);
        }

        if let Some(arity) = target.declarations.get(&prototype.name) {
            if *arity != prototype.arity() {
                return Err(ErrorImpl::SignatureMismatch {
                    function: prototype.name.clone(),
                    expected: *arity,
                    received: prototype.arity(),
                });
            }
        }

        target
            .declarations
            .insert(prototype.name.clone(), prototype.arity());
        Ok(prototype.clone())
    }

    fn define_function(
        &mut self,
        unit: UnitHandle,
        function: &Function,
        symbols: &mut SymbolTable<Reg>,
    ) -> Result<Prototype, ErrorImpl> {
        let prototype = &function.prototype;
        let name = prototype.name.clone();

        let target = unit_ref(&self.units, unit)?;
        if target.finalized {
            return Err(ErrorImpl::UnitFinalized);
        }
        let previous = target.declarations.get(&name).copied();

        if let Some(parameter) = prototype.duplicate_parameter() {
            return Err(ErrorImpl::DuplicateParameter {
                function: name,
                parameter: String::from(parameter),
            });
        }

        if self.bodies.contains_key(&name) {
            return Err(ErrorImpl::Redefinition { function: name });
        }

        // Declared before lowering so the body can call itself
        self.declare_function(unit, prototype)?;

        symbols.clear();
        let mut builder = FunctionBuilder::new(&name, prototype.arity());
        for (index, param) in prototype.params.iter().enumerate() {
            symbols.insert(param, builder.param(index));
        }

        self.active = Some((unit, builder));
        let lowered = self.emit(&function.body, symbols);
        let (_, builder) = self.active.take().ok_or(ErrorImpl::NoActiveFunction)?;
        symbols.clear();

        let result = match lowered {
            Ok(result) => result,
            Err(error) => {
                if previous.is_none() {
                    unit_mut(&mut self.units, unit)?.declarations.remove(&name);
                }
                return Err(error);
            }
        };

        let compiled = builder.finish(result);
        debug!("lowered {}:\n{}", name, compiled);

        unit_mut(&mut self.units, unit)?
            .functions
            .insert(name.clone(), Rc::new(compiled));
        self.bodies.insert(name, unit);

        info!("defined {}", prototype);
        Ok(prototype.clone())
    }

    fn emit(&mut self, expr: &Expr, symbols: &SymbolTable<Reg>) -> Result<Reg, ErrorImpl> {
        let (handle, builder) = self.active.as_mut().ok_or(ErrorImpl::NoActiveFunction)?;
        let unit = unit_ref(&self.units, *handle)?;

        gen_expression(builder, &unit.declarations, expr, symbols)
    }

    fn finalize_unit(&mut self, unit: UnitHandle) -> Result<CompiledUnit, ErrorImpl> {
        let target = unit_mut(&mut self.units, unit)?;
        if target.finalized {
            return Err(ErrorImpl::UnitFinalized);
        }
        target.finalized = true;

        debug!(
            "finalized unit {} with {} functions",
            unit.index(),
            target.functions.len()
        );
        Ok(CompiledUnit::new(unit))
    }

    fn abandon_unit(&mut self, unit: UnitHandle) -> Result<(), ErrorImpl> {
        if unit_ref(&self.units, unit)?.finalized {
            return Err(ErrorImpl::UnitFinalized);
        }
        self.free_slot(unit)
    }

    fn release_unit(&mut self, unit: CompiledUnit) -> Result<(), ErrorImpl> {
        self.free_slot(unit.handle())
    }

    fn lookup_and_invoke(&mut self, unit: &CompiledUnit, name: &str) -> Result<Value, ErrorImpl> {
        let target = unit_ref(&self.units, unit.handle())?;
        let function = target
            .functions
            .get(name)
            .filter(|_| target.finalized)
            .cloned()
            .ok_or_else(|| ErrorImpl::SymbolNotFound {
                symbol: String::from(name),
            })?;

        if function.arity != 0 {
            return Err(ErrorImpl::ArityMismatch {
                function: String::from(name),
                expected: function.arity,
                received: 0,
            });
        }

        let units = &self.units;
        let bodies = &self.bodies;
        let result = exec::run(
            function,
            vec![],
            |callee| Compiler::resolve(units, bodies, callee),
            self.sink.as_mut(),
            self.max_call_depth,
        );
        self.sink.flush()?;

        result
    }
}
