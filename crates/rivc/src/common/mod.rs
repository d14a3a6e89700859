//! Infrastructure shared across the front end

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::Span;
