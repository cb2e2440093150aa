use log::{debug, info, warn};

use crate::{
    ast::ast::{Function, Prototype},
    backend::backend::{Backend, CompiledUnit, UnitHandle},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Keyword, Token},
    },
    parser::{
        decl::{parse_definition, parse_extern, parse_top_level_expr},
        parser::Parser,
    },
    session::{config::SessionConfig, session::Session},
};

/// What one top-level construct amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<O> {
    /// A top-level `;`
    Skipped,
    Defined(String),
    Declared(String),
    Evaluated(O),
    /// The construct was dropped; the session continues with the next one.
    Failed(Error),
}

pub struct Driver<I: Iterator<Item = char>, B: Backend> {
    parser: Parser<I>,
    session: Session<B::Value>,
    backend: B,
    /// Unit receiving definitions and extern declarations
    active: Option<UnitHandle>,
    /// Finalized units holding definitions; kept until the driver finishes
    retained: Vec<CompiledUnit>,
}

impl<B: Backend> Driver<std::vec::IntoIter<char>, B> {
    /// Driver over an in-memory string, named after `config.source_name`.
    pub fn from_source(source: &str, backend: B, config: &SessionConfig) -> Self {
        let chars = source.chars().collect::<Vec<char>>().into_iter();
        Driver::from_chars(chars, backend, config)
    }
}

impl<I: Iterator<Item = char>, B: Backend> Driver<I, B> {
    /// Driver reading characters from `chars` on demand.
    pub fn from_chars(chars: I, backend: B, config: &SessionConfig) -> Self {
        let lexer = Lexer::new(chars, Some(config.source_name.clone()));
        Driver::new(Parser::new(lexer), backend, config)
    }

    pub fn new(mut parser: Parser<I>, backend: B, config: &SessionConfig) -> Self {
        parser.set_max_depth(config.max_nesting_depth);

        Driver {
            parser,
            session: Session::from_config(config),
            backend,
            active: None,
            retained: vec![],
        }
    }

    pub fn session(&self) -> &Session<B::Value> {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of finalized definition units still held.
    pub fn retained_units(&self) -> usize {
        self.retained.len()
    }

    /// Processes one top-level construct. Returns `None` once the input is exhausted.
    pub fn step(&mut self) -> Option<Event<B::Output>> {
        let event = match self.parser.current_token() {
            Token::EOF => return None,
            Token::Char(';') => {
                self.parser.advance();
                Event::Skipped
            }
            Token::Keyword(Keyword::Func) => self.handle_definition(),
            Token::Keyword(Keyword::Extern) => self.handle_extern(),
            _ => self.handle_top_level_expression(),
        };

        match &event {
            Event::Failed(error) => warn!("{:?} error: {}", error.category(), error),
            Event::Evaluated(value) => info!("evaluated to {}", value),
            _ => {}
        }

        Some(event)
    }

    /// Runs the session to the end of the input and returns every event.
    pub fn run(&mut self) -> Vec<Event<B::Output>> {
        let mut events = vec![];
        while let Some(event) = self.step() {
            events.push(event);
        }
        events
    }

    /// Releases every unit still held and hands the backend back.
    pub fn finish(mut self) -> Result<B, ErrorImpl> {
        if let Some(unit) = self.active.take() {
            self.backend.abandon_unit(unit)?;
        }
        for unit in self.retained.drain(..) {
            self.backend.release_unit(unit)?;
        }

        Ok(self.backend)
    }

    /// Reports a parse failure and drops one token so the loop makes progress.
    fn recover(&mut self, error: Error) -> Event<B::Output> {
        let skipped = self.parser.advance();
        debug!("skipped {:?} after parse error", skipped);
        Event::Failed(error)
    }

    fn active_unit(&mut self) -> Result<UnitHandle, ErrorImpl> {
        match self.active {
            Some(unit) => Ok(unit),
            None => {
                let unit = self.backend.acquire_unit(&self.session.prototypes)?;
                self.active = Some(unit);
                Ok(unit)
            }
        }
    }

    fn handle_definition(&mut self) -> Event<B::Output> {
        let position = self.parser.get_position();
        let function = match parse_definition(&mut self.parser, &self.session.operators) {
            Ok(function) => function,
            Err(error) => return self.recover(error),
        };

        match self.define(&function) {
            Ok(()) => {
                info!("read function definition {}", function.prototype);
                Event::Defined(function.prototype.name)
            }
            Err(error) => Event::Failed(Error::new(error, position)),
        }
    }

    fn define(&mut self, function: &Function) -> Result<(), ErrorImpl> {
        self.session.prototypes.declare(&function.prototype)?;

        let unit = self.active_unit()?;
        if let Err(error) = self
            .backend
            .define_function(unit, function, &mut self.session.symbols)
        {
            // The next unit is seeded again from the prototype table
            self.active = None;
            self.backend.abandon_unit(unit)?;
            return Err(error);
        }

        // Definitions are finalized right away so later units can call them
        let compiled = self.backend.finalize_unit(unit)?;
        self.active = None;
        self.retained.push(compiled);

        Ok(())
    }

    fn handle_extern(&mut self) -> Event<B::Output> {
        let position = self.parser.get_position();
        let prototype = match parse_extern(&mut self.parser) {
            Ok(prototype) => prototype,
            Err(error) => return self.recover(error),
        };

        match self.declare(&prototype) {
            Ok(()) => {
                info!("read extern {}", prototype);
                Event::Declared(prototype.name)
            }
            Err(error) => Event::Failed(Error::new(error, position)),
        }
    }

    fn declare(&mut self, prototype: &Prototype) -> Result<(), ErrorImpl> {
        self.session.prototypes.declare(prototype)?;

        let unit = self.active_unit()?;
        self.backend.declare_function(unit, prototype)?;

        Ok(())
    }

    fn handle_top_level_expression(&mut self) -> Event<B::Output> {
        let position = self.parser.get_position();
        let function = match parse_top_level_expr(&mut self.parser, &self.session.operators) {
            Ok(function) => function,
            Err(error) => return self.recover(error),
        };

        match self.evaluate(&function) {
            Ok(value) => Event::Evaluated(value),
            Err(error) => Event::Failed(Error::new(error, position)),
        }
    }

    /// Compiles `function` into a unit of its own, runs it and releases the
    /// unit whatever the outcome.
    fn evaluate(&mut self, function: &Function) -> Result<B::Output, ErrorImpl> {
        let unit = self.backend.acquire_unit(&self.session.prototypes)?;

        if let Err(error) = self
            .backend
            .define_function(unit, function, &mut self.session.symbols)
        {
            self.backend.abandon_unit(unit)?;
            return Err(error);
        }

        let compiled = match self.backend.finalize_unit(unit) {
            Ok(compiled) => compiled,
            Err(error) => {
                self.backend.abandon_unit(unit)?;
                return Err(error);
            }
        };

        let result = self.backend.lookup_and_invoke(&compiled, function.name());
        self.backend.release_unit(compiled)?;

        result
    }
}
