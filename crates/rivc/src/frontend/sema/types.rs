//! The Riv type system

/// A Riv type
///
/// The language has exactly two types. Numeric literals and arithmetic are
/// `real`, truth values and comparisons are `bool`, and there are no implicit
/// conversions between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Real,
    Bool,
}

impl Type {
    /// Resolve a type name as written in source
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "real" => Some(Type::Real),
            "bool" => Some(Type::Bool),
            _ => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Real => write!(f, "real"),
            Type::Bool => write!(f, "bool"),
        }
    }
}
