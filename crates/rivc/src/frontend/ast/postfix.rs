//! Canonical postfix rendering of syntax trees
//!
//! This is the textual serialization used as the conformance oracle in the
//! test suite: expressions come out in postfix order, statements and
//! definitions keep a small amount of fixed punctuation around them.

use super::{SyntaxTree, TreeKind};
use crate::frontend::lexer::TokenKind;

/// Render a syntax tree to its canonical textual form
pub fn postfix(tree: &SyntaxTree) -> String {
    match tree.kind {
        TreeKind::Program => tree
            .children
            .iter()
            .map(postfix)
            .collect::<Vec<_>>()
            .join("\n"),

        TreeKind::Block => {
            let mut out = String::from("{\n");
            for child in &tree.children {
                out.push_str(&postfix(child));
                out.push('\n');
            }
            out.push('}');
            out
        }

        TreeKind::If => {
            let mut out = format!(
                "{}({}){}",
                tree.token.text,
                postfix(&tree.children[0]),
                postfix(&tree.children[1])
            );
            if let Some(tail) = tree.children.get(2) {
                out.push_str(&postfix(tail));
            }
            out
        }

        TreeKind::Else => format!("{}{}", tree.token.text, postfix(&tree.children[0])),

        TreeKind::FunctionDefinition => format!(
            "{} {}{}{}",
            tree.token.text,
            postfix(&tree.children[0]),
            postfix(&tree.children[1]),
            postfix(&tree.children[2])
        ),

        TreeKind::FunctionParametersDefinition => {
            let params: Vec<_> = tree.children.iter().map(postfix).collect();
            format!("({})", params.join(", "))
        }

        TreeKind::FunctionCall => {
            let mut args = String::new();
            for (index, child) in tree.children.iter().enumerate() {
                if index > 0 {
                    args.push(',');
                }
                args.push_str(&format!(" ({}) ", postfix(child)));
            }
            format!("{}({})", tree.token.text, args)
        }

        TreeKind::VariableDefinition => {
            let mut out = tree.token.text.clone();
            for (index, child) in tree.children.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&format!(" ({})", render_declarator(child)));
            }
            out
        }

        TreeKind::Return => format!("{} {}", tree.token.text, postfix(&tree.children[0])),

        TreeKind::BinaryOperator => format!(
            "{} {} {}",
            postfix(&tree.children[0]),
            postfix(&tree.children[1]),
            tree.token.text
        ),

        TreeKind::UnaryOperator => {
            format!("{} ({})", postfix(&tree.children[0]), tree.token.text)
        }

        TreeKind::Variable | TreeKind::Literal => tree.token.text.clone(),
    }
}

/// A declarator is either a bare name or an assignment; the assignment
/// renders infix (`name = <expr postfix>`), not as a postfix `=` operation.
fn render_declarator(child: &SyntaxTree) -> String {
    if child.kind == TreeKind::BinaryOperator && child.token.kind == TokenKind::Assign {
        format!(
            "{} = {}",
            child.children[0].token.text,
            postfix(&child.children[1])
        )
    } else {
        postfix(child)
    }
}
