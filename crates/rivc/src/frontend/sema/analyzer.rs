//! Semantic analyzer: name resolution and type checking
//!
//! Walks the syntax tree once, maintaining a scope chain. Names must be
//! defined before use, a name may be defined only once per scope, and the
//! two types never mix implicitly. Analysis aborts on the first violation.

use super::scope::{Scope, Symbol, SymbolKind};
use super::types::Type;
use crate::common::{CompileError, CompileResult};
use crate::frontend::ast::{SyntaxTree, TreeKind};
use crate::frontend::lexer::{Token, TokenKind};

/// Semantic analyzer for Riv programs
pub struct SemanticAnalyzer {
    scope: Scope,
    current_function_return_type: Option<Type>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            current_function_return_type: None,
        }
    }

    /// Analyze a tree rooted at any statement-level node
    pub fn analyze(&mut self, tree: &SyntaxTree) -> CompileResult<()> {
        match tree.kind {
            TreeKind::Program => {
                for child in &tree.children {
                    self.analyze(child)?;
                }
                Ok(())
            }
            TreeKind::Block => {
                self.scope.push_child();
                for child in &tree.children {
                    self.analyze(child)?;
                }
                self.scope.pop_to_parent();
                Ok(())
            }
            TreeKind::VariableDefinition => self.analyze_variable_definition(tree),
            TreeKind::FunctionDefinition => self.analyze_function_definition(tree),
            TreeKind::If => self.analyze_conditional(tree),
            TreeKind::Else => self.analyze(&tree.children[0]),
            TreeKind::Return => self.analyze_return(tree),
            // Expression statements, including assignments
            _ => self.expression_type(tree).map(|_| ()),
        }
    }

    fn analyze_variable_definition(&mut self, tree: &SyntaxTree) -> CompileResult<()> {
        let ty = self.named_type(&tree.token)?;
        for declarator in &tree.children {
            let (name_token, value) = if declarator.kind == TreeKind::BinaryOperator {
                (&declarator.children[0].token, Some(&declarator.children[1]))
            } else {
                (&declarator.token, None)
            };

            if let Some(value) = value {
                let value_ty = self.expression_type(value)?;
                if value_ty != ty {
                    return Err(CompileError::type_error(
                        format!(
                            "cannot initialize '{}' of type {} with a value of type {} {}",
                            name_token.text,
                            ty,
                            value_ty,
                            at(name_token)
                        ),
                        name_token.span,
                    ));
                }
            }

            self.define(name_token, SymbolKind::Variable, ty)?;
        }
        Ok(())
    }

    /// Functions register in the enclosing scope; parameters and body locals
    /// share one scope, so a local may not reuse a parameter name.
    fn analyze_function_definition(&mut self, tree: &SyntaxTree) -> CompileResult<()> {
        let return_type = self.named_type(&tree.token)?;
        let name_token = &tree.children[0].token;
        self.define(name_token, SymbolKind::Function, return_type)?;

        self.scope.push_child();
        for parameter in &tree.children[1].children {
            let param_type = self.named_type(&parameter.token)?;
            self.define(&parameter.children[0].token, SymbolKind::Parameter, param_type)?;
        }

        let previous = self.current_function_return_type.replace(return_type);
        for statement in &tree.children[2].children {
            self.analyze(statement)?;
        }
        self.current_function_return_type = previous;
        self.scope.pop_to_parent();
        Ok(())
    }

    fn analyze_conditional(&mut self, tree: &SyntaxTree) -> CompileResult<()> {
        let condition = &tree.children[0];
        let condition_ty = self.expression_type(condition)?;
        if condition_ty != Type::Bool {
            return Err(CompileError::type_error(
                format!(
                    "condition must be bool, found {} {}",
                    condition_ty,
                    at(&condition.token)
                ),
                condition.token.span,
            ));
        }
        self.analyze(&tree.children[1])?;
        if let Some(tail) = tree.children.get(2) {
            self.analyze(tail)?;
        }
        Ok(())
    }

    fn analyze_return(&mut self, tree: &SyntaxTree) -> CompileResult<()> {
        let value_ty = self.expression_type(&tree.children[0])?;
        if let Some(expected) = self.current_function_return_type {
            if value_ty != expected {
                return Err(CompileError::type_error(
                    format!(
                        "return type mismatch: expected {}, found {} {}",
                        expected,
                        value_ty,
                        at(&tree.token)
                    ),
                    tree.token.span,
                ));
            }
        }
        Ok(())
    }

    /// Compute the type of an expression subtree
    fn expression_type(&self, tree: &SyntaxTree) -> CompileResult<Type> {
        match tree.kind {
            TreeKind::Literal => match tree.token.kind {
                TokenKind::True | TokenKind::False => Ok(Type::Bool),
                _ => Ok(Type::Real),
            },
            TreeKind::Variable => self.symbol_type(&tree.token),
            TreeKind::FunctionCall => {
                let ty = self.symbol_type(&tree.token)?;
                for argument in &tree.children {
                    self.expression_type(argument)?;
                }
                Ok(ty)
            }
            TreeKind::UnaryOperator => self.unary_type(tree),
            TreeKind::BinaryOperator => {
                if tree.token.kind == TokenKind::Assign {
                    self.assignment_type(tree)
                } else {
                    self.binary_type(tree)
                }
            }
            _ => Err(CompileError::type_error(
                format!("expected an expression {}", at(&tree.token)),
                tree.token.span,
            )),
        }
    }

    fn unary_type(&self, tree: &SyntaxTree) -> CompileResult<Type> {
        let operand_ty = self.expression_type(&tree.children[0])?;
        let (expected, result) = match tree.token.kind {
            TokenKind::Bang => (Type::Bool, Type::Bool),
            _ => (Type::Real, Type::Real),
        };
        if operand_ty != expected {
            return Err(CompileError::type_error(
                format!(
                    "operator '{}' expects a {} operand, found {} {}",
                    tree.token.text,
                    expected,
                    operand_ty,
                    at(&tree.token)
                ),
                tree.token.span,
            ));
        }
        Ok(result)
    }

    fn binary_type(&self, tree: &SyntaxTree) -> CompileResult<Type> {
        let left = self.expression_type(&tree.children[0])?;
        let right = self.expression_type(&tree.children[1])?;
        let op = &tree.token;

        if op.kind.is_equality_op() {
            return if left == right {
                Ok(Type::Bool)
            } else {
                Err(CompileError::type_error(
                    format!("cannot compare {} with {} {}", left, right, at(op)),
                    op.span,
                ))
            };
        }

        let (expected, result) = if op.kind.is_arithmetic_op() {
            (Type::Real, Type::Real)
        } else if op.kind.is_relational_op() {
            (Type::Real, Type::Bool)
        } else {
            // '&&' and '||' are the only binary operators left
            (Type::Bool, Type::Bool)
        };
        if left != expected || right != expected {
            return Err(CompileError::type_error(
                format!(
                    "operator '{}' expects {} operands, found {} and {} {}",
                    op.text,
                    expected,
                    left,
                    right,
                    at(op)
                ),
                op.span,
            ));
        }
        Ok(result)
    }

    fn assignment_type(&self, tree: &SyntaxTree) -> CompileResult<Type> {
        let target = &tree.children[0].token;
        let target_ty = self.symbol_type(target)?;
        let value_ty = self.expression_type(&tree.children[1])?;
        if value_ty != target_ty {
            return Err(CompileError::type_error(
                format!(
                    "cannot assign {} to '{}' of type {} {}",
                    value_ty,
                    target.text,
                    target_ty,
                    at(target)
                ),
                target.span,
            ));
        }
        Ok(target_ty)
    }

    fn define(&mut self, name_token: &Token, kind: SymbolKind, ty: Type) -> CompileResult<()> {
        let symbol = Symbol {
            name: name_token.text.clone(),
            kind,
            ty,
            decl: name_token.clone(),
        };
        self.scope.define(symbol).map_err(|earlier| {
            CompileError::redefinition(
                format!(
                    "symbol '{}' already defined {}; redefined {}",
                    name_token.text,
                    at(&earlier.decl),
                    at(name_token)
                ),
                name_token.span,
            )
        })
    }

    fn symbol_type(&self, name_token: &Token) -> CompileResult<Type> {
        self.scope
            .lookup(&name_token.text)
            .map(|symbol| symbol.ty)
            .ok_or_else(|| {
                CompileError::undefined_symbol(
                    format!("undefined symbol '{}' {}", name_token.text, at(name_token)),
                    name_token.span,
                )
            })
    }

    fn named_type(&self, type_token: &Token) -> CompileResult<Type> {
        Type::from_name(&type_token.text).ok_or_else(|| {
            CompileError::type_error(
                format!("unknown type '{}' {}", type_token.text, at(type_token)),
                type_token.span,
            )
        })
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-based source position, as it appears in error messages
fn at(token: &Token) -> String {
    format!("at line {}, column {}", token.line + 1, token.col + 1)
}
