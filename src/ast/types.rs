use std::fmt::Display;

/// Type Tag
///
/// The only three types of the language. Declarations name them with a
/// one-character suffix: `%` integer, `!` real, `$` boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Integer,
    Real,
    Boolean,
}

impl TypeTag {
    pub fn from_suffix(suffix: &str) -> Option<TypeTag> {
        match suffix {
            "%" => Some(TypeTag::Integer),
            "!" => Some(TypeTag::Real),
            "$" => Some(TypeTag::Boolean),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TypeTag::Integer => "%",
            TypeTag::Real => "!",
            TypeTag::Boolean => "$",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Real)
    }

    /// Whether a value of type `source` may be stored in a variable of this type.
    ///
    /// Types must match exactly, except that an integer widens into a real.
    pub fn accepts(&self, source: TypeTag) -> bool {
        *self == source || (*self == TypeTag::Real && source == TypeTag::Integer)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Integer => "integer",
            TypeTag::Real => "real",
            TypeTag::Boolean => "boolean",
        };
        write!(f, "{} ({})", name, self.suffix())
    }
}
