//! Riv Compiler - front end for the Riv language
//!
//! This library provides the analysis pipeline for Riv, a small imperative
//! expression language with `real` and `bool` values: tokenizing, recursive
//! descent parsing, and scope-aware semantic analysis.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Frontend** (`frontend/`): lexer, parser, syntax trees and semantic analysis
//! - **Common** (`common/`): shared infrastructure (errors, spans, diagnostics)

pub mod common;
pub mod frontend;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use frontend::{check, parse};
