//! Semantic analysis: symbol resolution and type checking

mod analyzer;
mod scope;
mod types;

pub use analyzer::SemanticAnalyzer;
pub use scope::{Scope, Symbol, SymbolKind};
pub use types::Type;
