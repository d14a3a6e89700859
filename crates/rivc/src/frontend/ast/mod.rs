//! Syntax tree representation
//!
//! Every node carries the token it was built from plus an ordered list of
//! children; the node kind alone decides how both are interpreted. Children
//! mirror source order (a binary operator holds `[left, right]`), and a node
//! is never mutated once the parser has produced it.

mod postfix;

pub use postfix::postfix;

use crate::frontend::lexer::Token;

/// Closed set of syntax tree node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Program,
    Block,
    FunctionDefinition,
    FunctionParametersDefinition,
    FunctionCall,
    VariableDefinition,
    Variable,
    BinaryOperator,
    UnaryOperator,
    Literal,
    Return,
    If,
    Else,
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub kind: TreeKind,
    pub token: Token,
    pub children: Vec<SyntaxTree>,
}

impl SyntaxTree {
    pub fn new(kind: TreeKind, token: Token, children: Vec<SyntaxTree>) -> Self {
        Self {
            kind,
            token,
            children,
        }
    }

    /// Node without children (literals, variable references)
    pub fn leaf(kind: TreeKind, token: Token) -> Self {
        Self::new(kind, token, Vec::new())
    }
}
