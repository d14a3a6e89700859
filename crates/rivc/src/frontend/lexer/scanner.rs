//! Lexer implementation using logos
//!
//! The logos-generated scanner is wrapped with the cursor discipline the
//! parser relies on: a freshly built lexer is positioned on a BOF sentinel,
//! `advance` returns the token it was positioned on while eagerly scanning
//! the next one, and `peek_at` gives k-token lookahead without consuming
//! anything. Once the input is exhausted every further token is EOF, pinned
//! at the final byte offset.

use std::collections::VecDeque;

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;

/// Lexer for Riv source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    /// Byte offset of the first character of each line
    line_starts: Vec<usize>,
    /// The token the lexer is currently positioned on
    current: Token,
    /// Tokens already scanned ahead of `current` by `peek_at`
    lookahead: VecDeque<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code, positioned on BOF
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            inner: TokenKind::lexer(source),
            line_starts,
            current: Token::new(TokenKind::Bof, String::new(), Span::default(), 0, 0),
            lookahead: VecDeque::new(),
            at_eof: false,
        }
    }

    /// Return the token the lexer is positioned on and move to the next one
    pub fn advance(&mut self) -> CompileResult<Token> {
        let next = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Peek the token the lexer is currently positioned on
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Token that would be current after `n` more `advance` calls
    ///
    /// Consumes nothing; `peek_at(0)` is the current token, and peeking past
    /// the end of input yields EOF.
    pub fn peek_at(&mut self, n: usize) -> CompileResult<&Token> {
        if n == 0 {
            return Ok(&self.current);
        }
        while self.lookahead.len() < n {
            let token = self.scan_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[n - 1])
    }

    /// Scan a new token from source
    fn scan_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            return Ok(self.eof_token());
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(self.make_token(kind, span.start, span.end))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                let (line, col) = self.position(span.start);
                Err(CompileError::lexer(
                    format!(
                        "unexpected character '{}' at line {}, column {}",
                        self.inner.slice(),
                        line + 1,
                        col + 1
                    ),
                    Span::new(span.start, span.end),
                ))
            }
            None => {
                self.at_eof = true;
                Ok(self.eof_token())
            }
        }
    }

    fn eof_token(&self) -> Token {
        let len = self.inner.source().len();
        let (line, col) = self.position(len);
        Token::new(TokenKind::Eof, String::new(), Span::new(len, len), line, col)
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        let (line, col) = self.position(start);
        let text = self.inner.source()[start..end].to_string();
        Token::new(kind, text, Span::new(start, end), line, col)
    }

    /// 0-based line and column of a byte offset
    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&s| s <= offset) - 1;
        (line, offset - self.line_starts[line])
    }

    /// Tokenize the entire source and return all tokens (without BOF)
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.advance()?;
            if matches!(token.kind, TokenKind::Bof) {
                continue;
            }
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        let mut tokens = Lexer::new(source).tokenize_all().unwrap();
        tokens.pop(); // drop EOF
        tokens.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_numbers_and_words() {
        assert_eq!(texts("1 23 456"), ["1", "23", "456"]);
        assert_eq!(texts("a bc defg"), ["a", "bc", "defg"]);
        assert_eq!(
            kinds("a 12"),
            [TokenKind::Symbol, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false return if elif else"),
            [
                TokenKind::True,
                TokenKind::False,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Elif,
                TokenKind::Else,
                TokenKind::Eof,
            ]
        );
        // A longer word containing a keyword is still one identifier
        assert_eq!(kinds("iffy"), [TokenKind::Symbol, TokenKind::Eof]);
    }

    #[test]
    fn test_operators_break_words() {
        assert_eq!(texts("a+bc/d"), ["a", "+", "bc", "/", "d"]);
        assert_eq!(
            texts("2+(3-(4*5)+ab)-cd"),
            ["2", "+", "(", "3", "-", "(", "4", "*", "5", ")", "+", "ab", ")", "-", "cd"]
        );
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(
            texts("a<b&&c>=d||f!=g"),
            ["a", "<", "b", "&&", "c", ">=", "d", "||", "f", "!=", "g"]
        );
        assert_eq!(
            kinds("<= < >= > == != ="),
            [
                TokenKind::LtEq,
                TokenKind::Lt,
                TokenKind::GtEq,
                TokenKind::Gt,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Assign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_power_alias() {
        assert_eq!(
            kinds("1^2**3"),
            [
                TokenKind::Number,
                TokenKind::Caret,
                TokenKind::Number,
                TokenKind::Caret,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
        assert_eq!(texts("1^2**3"), ["1", "^", "2", "**", "3"]);
    }

    #[test]
    fn test_number_swallows_trailing_letters() {
        // Word scanning is a run of non-operator characters; a word starting
        // with a digit is a single NUMBER token.
        assert_eq!(texts("123abc"), ["123abc"]);
        assert_eq!(kinds("123abc"), [TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_lone_ampersand_is_rejected() {
        assert!(Lexer::new("a & b").tokenize_all().is_err());
        assert!(Lexer::new("a | b").tokenize_all().is_err());
    }

    #[test]
    fn test_bof_then_tokens() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Bof);
        let number = lexer.advance().unwrap();
        assert_eq!(number.kind, TokenKind::Number);
        assert_eq!(number.text, "1");
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("ab");
        lexer.advance().unwrap(); // BOF
        lexer.advance().unwrap(); // ab
        let first_eof = lexer.advance().unwrap();
        let second_eof = lexer.advance().unwrap();
        assert_eq!(first_eof.kind, TokenKind::Eof);
        assert_eq!(first_eof, second_eof);
        assert_eq!(first_eof.span, Span::new(2, 2));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a = 1");
        lexer.advance().unwrap(); // BOF
        assert_eq!(lexer.peek_at(0).unwrap().text, "a");
        assert_eq!(lexer.peek_at(1).unwrap().kind, TokenKind::Assign);
        assert_eq!(lexer.peek_at(2).unwrap().text, "1");
        assert_eq!(lexer.peek_at(3).unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.peek_at(9).unwrap().kind, TokenKind::Eof);

        // The same tokens still come out of advance, in order
        assert_eq!(lexer.advance().unwrap().text, "a");
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Assign);
        assert_eq!(lexer.advance().unwrap().text, "1");
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("a\n  b\nc").tokenize_all().unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (0, 0));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 0));
    }
}
