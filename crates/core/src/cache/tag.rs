use std::str::FromStr;

use super::CacheError;

/// Selects how a value is encoded on write and decoded on read.
///
/// The tag used to read a key must match the tag it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Structured text (JSON).
    Json,
    /// Markup (XML) wrapped in a `<value>` root element.
    Xml,
    /// Store-native scalar passed through unencoded.
    Raw,
}

impl TypeTag {
    /// Numeric wire code of the tag (`"1"`, `"2"`, `"3"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Json => "1",
            Self::Xml => "2",
            Self::Raw => "3",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = CacheError;

    /// Accepts the numeric code or a name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "json" | "structured" => Ok(Self::Json),
            "2" | "xml" | "markup" => Ok(Self::Xml),
            "3" | "raw" | "single" => Ok(Self::Raw),
            _ => Err(CacheError::InvalidTag(s.to_string())),
        }
    }
}
