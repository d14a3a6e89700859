//! Front end for the Riv language
//!
//! The pipeline is lexer -> parser -> semantic analyzer. Each stage can be
//! driven on its own; `parse` and `check` wire them together for callers that
//! just want a tree.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

use crate::common::CompileResult;
use ast::SyntaxTree;

/// Parse a source unit into a syntax tree
pub fn parse(source: &str) -> CompileResult<SyntaxTree> {
    parser::Parser::new(source)?.program()
}

/// Parse and semantically check a source unit
pub fn check(source: &str) -> CompileResult<SyntaxTree> {
    let tree = parse(source)?;
    sema::SemanticAnalyzer::new().analyze(&tree)?;
    Ok(tree)
}
