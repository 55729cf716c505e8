use std::{fmt, str::FromStr};

/// How an alias ledger upload treats donor names that match no known donor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AliasImportMode {
    /// Unknown names are logged and skipped, the rest of the upload is applied.
    #[default]
    Lenient,
    /// Any unknown name rejects the whole upload.
    Strict,
}

impl FromStr for AliasImportMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected `lenient` or `strict`, got {other:?}")),
        }
    }
}

impl fmt::Display for AliasImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}
