//! Symbol table and scope management

use std::collections::HashMap;

use super::types::Type;
use crate::frontend::lexer::Token;

/// A symbol in the symbol table
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    /// Token of the defining occurrence, kept for redefinition messages
    pub decl: Token,
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
}

/// A scope containing symbols
///
/// Scopes form a chain; leaving a scope drops every symbol defined in it.
#[derive(Debug)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            parent: None,
        }
    }

    /// Define a symbol in the current scope
    ///
    /// Fails when the name is already taken in this scope, returning the
    /// earlier symbol. Shadowing an outer scope's symbol is allowed.
    pub fn define(&mut self, symbol: Symbol) -> Result<(), Symbol> {
        if let Some(existing) = self.symbols.get(&symbol.name) {
            return Err(existing.clone());
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Look up a symbol, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        if let Some(sym) = self.symbols.get(name) {
            Some(sym)
        } else if let Some(parent) = &self.parent {
            parent.lookup(name)
        } else {
            None
        }
    }

    /// Look up a symbol in this scope only
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Push a new child scope
    pub fn push_child(&mut self) {
        let old_scope = std::mem::replace(self, Scope::new());
        self.parent = Some(Box::new(old_scope));
    }

    /// Take the parent scope, replacing self with the parent
    pub fn pop_to_parent(&mut self) -> bool {
        if let Some(parent) = self.parent.take() {
            *self = *parent;
            true
        } else {
            false
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Span;
    use crate::frontend::lexer::TokenKind;

    fn symbol(name: &str, ty: Type) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Variable,
            ty,
            decl: Token::new(TokenKind::Symbol, name.to_string(), Span::default(), 0, 0),
        }
    }

    #[test]
    fn test_define_and_lookup() {
        let mut scope = Scope::new();
        scope.define(symbol("a", Type::Real)).unwrap();
        assert_eq!(scope.lookup("a").unwrap().ty, Type::Real);
        assert!(scope.lookup("b").is_none());
    }

    #[test]
    fn test_redefinition_in_same_scope_fails() {
        let mut scope = Scope::new();
        scope.define(symbol("a", Type::Real)).unwrap();
        let earlier = scope.define(symbol("a", Type::Bool)).unwrap_err();
        assert_eq!(earlier.ty, Type::Real);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut scope = Scope::new();
        scope.define(symbol("a", Type::Real)).unwrap();
        scope.push_child();
        scope.define(symbol("a", Type::Bool)).unwrap();
        assert_eq!(scope.lookup("a").unwrap().ty, Type::Bool);
        assert!(scope.pop_to_parent());
        assert_eq!(scope.lookup("a").unwrap().ty, Type::Real);
    }

    #[test]
    fn test_leaving_a_scope_drops_its_symbols() {
        let mut scope = Scope::new();
        scope.push_child();
        scope.define(symbol("a", Type::Real)).unwrap();
        assert!(scope.lookup("a").is_some());
        assert!(scope.pop_to_parent());
        assert!(scope.lookup("a").is_none());
        // The root scope has no parent to pop to
        assert!(!scope.pop_to_parent());
    }

    #[test]
    fn test_lookup_local_ignores_outer_scopes() {
        let mut scope = Scope::new();
        scope.define(symbol("a", Type::Real)).unwrap();
        scope.push_child();
        assert!(scope.lookup("a").is_some());
        assert!(scope.lookup_local("a").is_none());
    }
}
