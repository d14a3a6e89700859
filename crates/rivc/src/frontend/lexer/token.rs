//! Token definitions for the Riv lexer

use crate::common::Span;
use logos::Logos;

/// Token with source location
///
/// `line` and `col` are 0-based and point at the token's first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, span: Span, line: usize, col: usize) -> Self {
        Self {
            kind,
            text,
            span,
            line,
            col,
        }
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Symbol => format!("identifier '{}'", self.text),
            TokenKind::Number => format!("number '{}'", self.text),
            TokenKind::Bof => "beginning of input".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// All token kinds in Riv
///
/// Word scanning follows a longest-run rule: anything that is not whitespace
/// and not an operator/punctuation character belongs to the current word. A
/// word starting with a digit is a NUMBER, otherwise a keyword or SYMBOL.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
pub enum TokenKind {
    // === Keywords ===
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,

    // === Words ===
    #[regex(r"[0-9][^ \t\r\n\f(){};,+\-*/\^<>=!&|]*", priority = 3)]
    Number,

    #[regex(
        r"[^ \t\r\n\f0-9(){};,+\-*/\^<>=!&|][^ \t\r\n\f(){};,+\-*/\^<>=!&|]*",
        priority = 2
    )]
    Symbol,

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,

    // Comparison
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    // Logical
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Assignment
    #[token("=")]
    Assign,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Sentinels, never produced by the scanner itself
    Bof,
    Eof,
}

impl TokenKind {
    /// `true`, `false` or a number
    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::True | TokenKind::False)
    }

    /// Operators accepted in prefix position
    pub fn is_unary_op(self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus | TokenKind::Bang)
    }

    pub fn is_arithmetic_op(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Caret
        )
    }

    pub fn is_relational_op(self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq
        )
    }

    pub fn is_equality_op(self) -> bool {
        matches!(self, TokenKind::EqEq | TokenKind::NotEq)
    }

    /// Binary logical connectives (`!` is covered by `is_unary_op`)
    pub fn is_logical_op(self) -> bool {
        matches!(self, TokenKind::AmpAmp | TokenKind::PipePipe)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Elif => write!(f, "'elif'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Symbol => write!(f, "identifier"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::AmpAmp => write!(f, "'&&'"),
            TokenKind::PipePipe => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Bof => write!(f, "beginning of input"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
