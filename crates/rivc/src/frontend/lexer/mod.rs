//! Lexical analysis for Riv source text

mod scanner;
mod token;

pub use scanner::Lexer;
pub use token::{Token, TokenKind};
