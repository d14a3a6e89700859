//! Grammar-driven construction of syntax trees

#[allow(clippy::module_inception)]
mod parser;

pub use parser::Parser;
