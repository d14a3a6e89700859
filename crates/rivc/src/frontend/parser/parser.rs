//! Recursive descent parser for Riv
//!
//! Each grammar rule is a method that reads tokens through the lexer's
//! current-token/lookahead interface and builds a `SyntaxTree`. Tokens are
//! consumed strictly forward; statement-kind disambiguation uses at most
//! three tokens of lookahead and never backtracks. The first grammar
//! violation aborts the parse, there is no recovery.

use crate::common::{CompileError, CompileResult};
use crate::frontend::ast::{SyntaxTree, TreeKind};
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser for Riv
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// BOF token of the source unit; the Program node is hung off it
    bof: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let bof = lexer.advance()?;
        Ok(Self { lexer, bof })
    }

    /// Parse a whole source unit until EOF
    pub fn program(&mut self) -> CompileResult<SyntaxTree> {
        let mut children = Vec::new();
        while !self.at_end() {
            children.push(self.item()?);
        }
        Ok(SyntaxTree::new(
            TreeKind::Program,
            self.bof.clone(),
            children,
        ))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        self.lexer.current()
    }

    fn peek_kind(&mut self, n: usize) -> CompileResult<TokenKind> {
        Ok(self.lexer.peek_at(n)?.kind)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        self.lexer.advance()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            let token = self.current();
            Err(CompileError::parser(
                format!(
                    "expected {}, found {} at line {}, column {}",
                    kind,
                    token.describe(),
                    token.line + 1,
                    token.col + 1
                ),
                token.span,
            ))
        }
    }

    fn binary(op: Token, left: SyntaxTree, right: SyntaxTree) -> SyntaxTree {
        SyntaxTree::new(TreeKind::BinaryOperator, op, vec![left, right])
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// One top-level item: block, conditional, function definition or sentence
    fn item(&mut self) -> CompileResult<SyntaxTree> {
        let kind = self.current().kind;
        match kind {
            TokenKind::LBrace => self.block(),
            TokenKind::If => self.conditional(),
            TokenKind::Symbol
                if self.peek_kind(1)? == TokenKind::Symbol
                    && self.peek_kind(2)? == TokenKind::LParen =>
            {
                self.function_definition()
            }
            _ => self.sentence(),
        }
    }

    /// A single `;`-terminated statement
    pub fn sentence(&mut self) -> CompileResult<SyntaxTree> {
        let kind = self.current().kind;
        let statement = match kind {
            TokenKind::Return => self.return_statement()?,
            TokenKind::Symbol if self.peek_kind(1)? == TokenKind::Assign => self.assignment()?,
            TokenKind::Symbol if self.peek_kind(1)? == TokenKind::Symbol => {
                self.variable_definition()?
            }
            _ => self.expression()?,
        };
        self.expect(TokenKind::Semi)?;
        Ok(statement)
    }

    fn return_statement(&mut self) -> CompileResult<SyntaxTree> {
        let keyword = self.advance()?;
        let value = self.expression()?;
        Ok(SyntaxTree::new(TreeKind::Return, keyword, vec![value]))
    }

    /// `name = expression`; only a bare symbol is a valid target, anything
    /// else never reaches here and fails on the stray `=` instead
    fn assignment(&mut self) -> CompileResult<SyntaxTree> {
        let name = self.advance()?;
        let eq = self.expect(TokenKind::Assign)?;
        let value = self.expression()?;
        Ok(Self::binary(
            eq,
            SyntaxTree::leaf(TreeKind::Variable, name),
            value,
        ))
    }

    /// `type name [= expr] (, name [= expr])*`
    fn variable_definition(&mut self) -> CompileResult<SyntaxTree> {
        let type_token = self.advance()?;
        let mut declarators = Vec::new();
        loop {
            let name = self.expect(TokenKind::Symbol)?;
            let variable = SyntaxTree::leaf(TreeKind::Variable, name);
            let declarator = if self.check(TokenKind::Assign) {
                let eq = self.advance()?;
                let value = self.expression()?;
                Self::binary(eq, variable, value)
            } else {
                variable
            };
            declarators.push(declarator);
            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }
        Ok(SyntaxTree::new(
            TreeKind::VariableDefinition,
            type_token,
            declarators,
        ))
    }

    /// `{ (block | sentence)* }`
    fn block(&mut self) -> CompileResult<SyntaxTree> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut children = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            if self.check(TokenKind::LBrace) {
                children.push(self.block()?);
            } else {
                children.push(self.sentence()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(SyntaxTree::new(TreeKind::Block, open, children))
    }

    /// `if (expr) block` with optional `elif`/`else` continuations; an `elif`
    /// clause nests as a further conditional under the same node shape
    fn conditional(&mut self) -> CompileResult<SyntaxTree> {
        let keyword = self.advance()?; // 'if' or 'elif'
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.block()?;

        let mut children = vec![condition, body];
        match self.current().kind {
            TokenKind::Elif => children.push(self.conditional()?),
            TokenKind::Else => {
                let else_token = self.advance()?;
                let else_body = self.block()?;
                children.push(SyntaxTree::new(
                    TreeKind::Else,
                    else_token,
                    vec![else_body],
                ));
            }
            _ => {}
        }
        Ok(SyntaxTree::new(TreeKind::If, keyword, children))
    }

    /// `returnType name (type name, ...) block`
    fn function_definition(&mut self) -> CompileResult<SyntaxTree> {
        let return_type = self.advance()?;
        let name = self.expect(TokenKind::Symbol)?;
        let parameters = self.function_parameters()?;
        let body = self.block()?;
        Ok(SyntaxTree::new(
            TreeKind::FunctionDefinition,
            return_type,
            vec![SyntaxTree::leaf(TreeKind::Variable, name), parameters, body],
        ))
    }

    /// `( [type name (, type name)*] )`
    fn function_parameters(&mut self) -> CompileResult<SyntaxTree> {
        let open = self.expect(TokenKind::LParen)?;
        let mut parameters = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let type_token = self.expect(TokenKind::Symbol)?;
                let name = self.expect(TokenKind::Symbol)?;
                parameters.push(SyntaxTree::new(
                    TreeKind::VariableDefinition,
                    type_token,
                    vec![SyntaxTree::leaf(TreeKind::Variable, name)],
                ));
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(SyntaxTree::new(
            TreeKind::FunctionParametersDefinition,
            open,
            parameters,
        ))
    }

    // =========================================================================
    // Expressions, lowest to highest precedence
    // =========================================================================

    pub fn expression(&mut self) -> CompileResult<SyntaxTree> {
        self.disjunction()
    }

    fn disjunction(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.conjunction()?;
        while self.check(TokenKind::PipePipe) {
            let op = self.advance()?;
            root = Self::binary(op, root, self.conjunction()?);
        }
        Ok(root)
    }

    fn conjunction(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.equality()?;
        while self.check(TokenKind::AmpAmp) {
            let op = self.advance()?;
            root = Self::binary(op, root, self.equality()?);
        }
        Ok(root)
    }

    fn equality(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.relation()?;
        while self.current().kind.is_equality_op() {
            let op = self.advance()?;
            root = Self::binary(op, root, self.relation()?);
        }
        Ok(root)
    }

    /// Relational operators apply at most once: `a < b >= c` is a syntax
    /// error, while equality chains freely. The asymmetry is part of the
    /// language.
    fn relation(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.arithmetic()?;
        if self.current().kind.is_relational_op() {
            let op = self.advance()?;
            root = Self::binary(op, root, self.arithmetic()?);
        }
        Ok(root)
    }

    fn arithmetic(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.term()?;
        while matches!(self.current().kind, TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance()?;
            root = Self::binary(op, root, self.term()?);
        }
        Ok(root)
    }

    fn term(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.factor()?;
        while matches!(self.current().kind, TokenKind::Star | TokenKind::Slash) {
            let op = self.advance()?;
            root = Self::binary(op, root, self.factor()?);
        }
        Ok(root)
    }

    /// Power is right-associative: the right operand recurses into `factor`
    fn factor(&mut self) -> CompileResult<SyntaxTree> {
        let mut root = self.base_power()?;
        while self.check(TokenKind::Caret) {
            let op = self.advance()?;
            root = Self::binary(op, root, self.factor()?);
        }
        Ok(root)
    }

    fn base_power(&mut self) -> CompileResult<SyntaxTree> {
        match self.current().kind {
            kind if kind.is_unary_op() => {
                let op = self.advance()?;
                let operand = self.base_power()?;
                Ok(SyntaxTree::new(TreeKind::UnaryOperator, op, vec![operand]))
            }
            kind if kind.is_literal() => Ok(SyntaxTree::leaf(TreeKind::Literal, self.advance()?)),
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Symbol => self.symbol_or_call(),
            _ => {
                let token = self.current();
                Err(CompileError::parser(
                    format!(
                        "expected an expression, found {} at line {}, column {}",
                        token.describe(),
                        token.line + 1,
                        token.col + 1
                    ),
                    token.span,
                ))
            }
        }
    }

    /// A bare identifier is a variable reference unless a `(` follows
    fn symbol_or_call(&mut self) -> CompileResult<SyntaxTree> {
        if self.peek_kind(1)? != TokenKind::LParen {
            return Ok(SyntaxTree::leaf(TreeKind::Variable, self.advance()?));
        }

        let name = self.advance()?;
        self.advance()?; // '('
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(SyntaxTree::new(TreeKind::FunctionCall, name, arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::postfix;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        postfix(&Parser::new(source).unwrap().program().unwrap())
    }

    fn render_expr(source: &str) -> String {
        postfix(&Parser::new(source).unwrap().expression().unwrap())
    }

    fn parse_err(source: &str) -> CompileError {
        Parser::new(source).unwrap().program().unwrap_err()
    }

    #[test]
    fn test_lonely_factor() {
        assert_eq!(render_expr("123"), "123");
        assert_eq!(render("123;"), "123");
    }

    #[test]
    fn test_addition_and_subtraction() {
        assert_eq!(render_expr("12+34"), "12 34 +");
        assert_eq!(render_expr("12-34-56-78"), "12 34 - 56 - 78 -");
    }

    #[test]
    fn test_multiplication_and_division() {
        assert_eq!(render_expr("12*34"), "12 34 *");
        assert_eq!(render_expr("12/34/56/78"), "12 34 / 56 / 78 /");
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(render("12+34*56;"), "12 34 56 * +");
        assert_eq!(
            render("12 + 34 * 56 / 78 + 90 / 123;"),
            "12 34 56 * 78 / + 90 123 / +"
        );
    }

    #[test]
    fn test_parenthesized_grouping() {
        assert_eq!(render_expr("(12+34)*56"), "12 34 + 56 *");
        assert_eq!(
            render_expr("(12+34)*(56+78*(90+123))"),
            "12 34 + 56 78 90 123 + * + *"
        );
        assert_eq!(render_expr("(12+(34*(56/(78))))"), "12 34 56 78 / * +");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(render("1--2;"), "1 2 (-) -");
        assert_eq!(
            render_expr("1---(---(2--3)-4)-(-5)"),
            "1 2 3 (-) - (-) (-) (-) 4 - (-) (-) - 5 (-) -"
        );
        assert_eq!(render_expr("!true"), "true (!)");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(render("1^2^3;"), "1 2 3 ^ ^");
        assert_eq!(render_expr("1^(2*3)^(4*5)"), "1 2 3 * 4 5 * ^ ^");
        assert_eq!(
            render_expr("1^(2*3^2^2^2)^(4*5)"),
            "1 2 3 2 2 2 ^ ^ ^ * 4 5 * ^ ^"
        );
    }

    #[test]
    fn test_double_star_spelling_of_power() {
        assert_eq!(render("123**45;"), "123 45 **");
        assert_eq!(render_expr("1**2**3"), "1 2 3 ** **");
    }

    #[test]
    fn test_relational_operators() {
        assert_eq!(render_expr("12+3<45"), "12 3 + 45 <");
        assert_eq!(render_expr("12+3 >=(45^6)"), "12 3 + 45 6 ^ >=");
    }

    #[test]
    fn test_relational_operators_do_not_chain() {
        assert!(matches!(
            parse_err("1 < 2 >= 4;"),
            CompileError::Parser { .. }
        ));
    }

    #[test]
    fn test_equality_operators_chain() {
        assert_eq!(render("1 == 2 != 4;"), "1 2 == 4 !=");
        assert_eq!(render_expr("123 == 3"), "123 3 ==");
        assert_eq!(render_expr("12+3 != (45^6)"), "12 3 + 45 6 ^ !=");
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(render_expr("12 == 3 && 45 != 67"), "12 3 == 45 67 != &&");
        assert_eq!(
            render_expr("12<3 && (4 > 5 || 6) || 7 != 8"),
            "12 3 < 4 5 > 6 || && 7 8 != ||"
        );
    }

    #[test]
    fn test_missing_operand_is_rejected() {
        for source in ["1-;", "1*;", "12+;", "!;"] {
            assert!(matches!(parse_err(source), CompileError::Parser { .. }));
        }
    }

    #[test]
    fn test_empty_expression_is_rejected() {
        for source in [";", "();"] {
            assert!(matches!(parse_err(source), CompileError::Parser { .. }));
        }
    }

    #[test]
    fn test_missing_semicolon_is_rejected() {
        let err = parse_err("123");
        match err {
            CompileError::Parser { message, .. } => {
                assert!(message.contains("';'"), "message: {message}");
            }
            other => panic!("expected parser error, got {other:?}"),
        }
    }

    #[test]
    fn test_variable_definition_with_mixed_declarators() {
        assert_eq!(
            render("int a = 12*3+4, b, c = 56*(7+8);"),
            "int (a = 12 3 * 4 +), (b), (c = 56 7 8 + *)"
        );
        assert_eq!(render("real a;"), "real (a)");
    }

    #[test]
    fn test_assignment_statement() {
        assert_eq!(render("a = 1+2;"), "a 1 2 + =");
    }

    #[test]
    fn test_assignment_to_non_symbol_is_rejected() {
        assert!(matches!(
            parse_err("12 + 3 = 45;"),
            CompileError::Parser { .. }
        ));
    }

    #[test]
    fn test_block_rendering() {
        assert_eq!(render("{real a;}"), "{\nreal (a)\n}");
        assert_eq!(render("{real a; {bool b;}}"), "{\nreal (a)\n{\nbool (b)\n}\n}");
        assert_eq!(render("{}"), "{\n}");
    }

    #[test]
    fn test_conditional_rendering() {
        assert_eq!(render("if(true){real a;}"), "if(true){\nreal (a)\n}");
        assert_eq!(
            render("if(1 > 2){real a;}else{real b;}"),
            "if(1 2 >){\nreal (a)\n}else{\nreal (b)\n}"
        );
        assert_eq!(
            render("if(1 > 2){real a;}elif(1 == 2){real b;}else{real c;}"),
            "if(1 2 >){\nreal (a)\n}elif(1 2 ==){\nreal (b)\n}else{\nreal (c)\n}"
        );
    }

    #[test]
    fn test_function_definition_rendering() {
        assert_eq!(
            render("real f(real x, bool y){return x;}"),
            "real f(real (x), bool (y)){\nreturn x\n}"
        );
        assert_eq!(render("bool g(){return true;}"), "bool g(){\nreturn true\n}");
    }

    #[test]
    fn test_function_call_rendering() {
        assert_eq!(render("f(1+2, 3);"), "f( (1 2 +) , (3) )");
        assert_eq!(render("f();"), "f()");
        assert_eq!(render_expr("f(g(1))"), "f( (g( (1) )) )");
    }

    #[test]
    fn test_malformed_parameter_lists() {
        for source in [
            "real f(real x,){}",
            "real f(real x,,bool y){}",
            "real f(real x bool y){}",
            "real f(real){}",
        ] {
            assert!(matches!(parse_err(source), CompileError::Parser { .. }));
        }
    }

    #[test]
    fn test_trailing_or_double_comma_in_declaration() {
        for source in ["real a,;", "real a,,b;"] {
            assert!(matches!(parse_err(source), CompileError::Parser { .. }));
        }
    }

    #[test]
    fn test_program_joins_items_with_newlines() {
        assert_eq!(render("1+2; 3*4;"), "1 2 +\n3 4 *");
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_parenthesization_is_idempotent() {
        for expr in ["12+34*56", "1^2^3", "a && b || !c", "f(1, 2) == 3"] {
            let plain = render(&format!("{expr};"));
            let wrapped = render(&format!("({expr});"));
            assert_eq!(plain, wrapped);
        }
    }

    #[test]
    fn test_expect_error_carries_position() {
        let err = Parser::new("(1+2").unwrap().expression().unwrap_err();
        match err {
            CompileError::Parser { message, .. } => {
                assert!(message.contains("expected ')'"), "message: {message}");
                assert!(message.contains("line 1"), "message: {message}");
            }
            other => panic!("expected parser error, got {other:?}"),
        }
    }
}
