use crate::SchemaError;
use std::fmt;
use std::str::FromStr;

/// The interpreter runtime whose version is being swapped.
///
/// Python is the only supported family; anything else is rejected at
/// parse time, before any external call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    #[default]
    Python,
}

impl Kernel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
        }
    }

    /// A pinned dependency specifier for this kernel, e.g. `python=3.9`.
    pub fn spec(self, version: &str) -> String {
        format!("{}={version}", self.as_str())
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kernel {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(Self::Python),
            other => Err(SchemaError::UnsupportedKernel(other.to_owned())),
        }
    }
}
