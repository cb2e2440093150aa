//! Unit tests for session state and configuration.

use super::{
    config::{ConfigError, SessionConfig},
    session::{PrototypeTable, Session, SymbolTable},
};
use crate::{ast::ast::Prototype, errors::errors::ErrorImpl, parser::lookups::OperatorTable};

fn proto(name: &str, params: &[&str]) -> Prototype {
    Prototype::new(name, params.iter().map(|p| p.to_string()).collect())
}

#[test]
fn test_symbol_table_clear() {
    let mut symbols = SymbolTable::new();
    symbols.insert("a", 1u32);
    symbols.insert("b", 2u32);

    assert_eq!(symbols.get("a"), Some(&1));
    assert_eq!(symbols.len(), 2);

    symbols.clear();
    assert!(symbols.is_empty());
    assert_eq!(symbols.get("a"), None);
}

#[test]
fn test_symbol_table_last_insert_wins() {
    let mut symbols = SymbolTable::new();
    symbols.insert("a", 1u32);
    symbols.insert("a", 7u32);

    assert_eq!(symbols.get("a"), Some(&7));
}

#[test]
fn test_prototype_table_redeclare_same_arity() {
    let mut table = PrototypeTable::new();
    table.declare(&proto("f", &["a"])).unwrap();
    table.declare(&proto("f", &["b"])).unwrap();

    assert_eq!(table.get("f"), Some(&proto("f", &["b"])));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_prototype_table_rejects_arity_change() {
    let mut table = PrototypeTable::new();
    table.declare(&proto("f", &["a"])).unwrap();

    assert_eq!(
        table.declare(&proto("f", &["a", "b"])),
        Err(ErrorImpl::SignatureMismatch {
            function: "f".to_string(),
            expected: 1,
            received: 2
        })
    );
    assert_eq!(table.get("f"), Some(&proto("f", &["a"])));
}

#[test]
fn test_default_session_uses_default_operators() {
    let session: Session<u32> = Session::default();

    assert_eq!(session.operators, OperatorTable::default());
    assert!(session.prototypes.is_empty());
    assert!(session.symbols.is_empty());
}

#[test]
fn test_config_operator_overrides() {
    let config = SessionConfig::default()
        .with_operator('^', 60)
        .with_operator('<', 0);
    let table = config.operator_table();

    assert_eq!(table.get('^'), Some(60));
    assert_eq!(table.get('<'), None);
    assert_eq!(table.get('*'), Some(40));
}

#[test]
fn test_parse_operator() {
    assert_eq!(SessionConfig::parse_operator("^=60"), Ok(('^', 60)));
    assert_eq!(SessionConfig::parse_operator("==5"), Ok(('=', 5)));
    assert_eq!(SessionConfig::parse_operator("+=-1"), Ok(('+', -1)));
    assert_eq!(
        SessionConfig::parse_operator("^60"),
        Err(ConfigError::MalformedOperator("^60".to_string()))
    );
    assert_eq!(
        SessionConfig::parse_operator("**=60"),
        Err(ConfigError::OperatorNotSingleChar("**".to_string()))
    );
    assert_eq!(
        SessionConfig::parse_operator("^=high"),
        Err(ConfigError::InvalidPrecedence("high".to_string()))
    );
}
