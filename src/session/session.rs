use std::collections::HashMap;

use crate::{
    ast::ast::Prototype,
    errors::errors::ErrorImpl,
    parser::lookups::OperatorTable,
};

use super::config::SessionConfig;

/// Variable name to backend value handle.
///
/// Holds only the parameters of the function whose body is being compiled;
/// there is no nesting and nothing survives into the next function.
#[derive(Debug, Clone)]
pub struct SymbolTable<V> {
    values: HashMap<String, V>,
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        SymbolTable {
            values: HashMap::new(),
        }
    }
}

impl<V> SymbolTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn insert(&mut self, name: &str, value: V) {
        self.values.insert(String::from(name), value);
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Function name to its most recently declared prototype.
#[derive(Debug, Clone, Default)]
pub struct PrototypeTable {
    prototypes: HashMap<String, Prototype>,
}

impl PrototypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.prototypes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Records `prototype`, replacing an earlier one with the same name.
    ///
    /// Fails without changing the table when an earlier prototype of that
    /// name has a different number of parameters.
    pub fn declare(&mut self, prototype: &Prototype) -> Result<(), ErrorImpl> {
        if let Some(existing) = self.prototypes.get(&prototype.name) {
            if existing.arity() != prototype.arity() {
                return Err(ErrorImpl::SignatureMismatch {
                    function: prototype.name.clone(),
                    expected: existing.arity(),
                    received: prototype.arity(),
                });
            }
        }

        self.prototypes
            .insert(prototype.name.clone(), prototype.clone());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prototype> {
        self.prototypes.values()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

/// Everything one read-eval-print session shares between top-level constructs.
#[derive(Debug, Clone)]
pub struct Session<V> {
    pub operators: OperatorTable,
    pub prototypes: PrototypeTable,
    pub symbols: SymbolTable<V>,
}

impl<V> Default for Session<V> {
    fn default() -> Self {
        Session::from_config(&SessionConfig::default())
    }
}

impl<V> Session<V> {
    pub fn from_config(config: &SessionConfig) -> Self {
        Session {
            operators: config.operator_table(),
            prototypes: PrototypeTable::new(),
            symbols: SymbolTable::new(),
        }
    }
}
