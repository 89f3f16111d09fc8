use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A conda environment descriptor as produced by `conda env export`.
///
/// Field declaration order matches conda's own key order
/// (`name`, `channels`, `dependencies`, `prefix`) so that serializing a
/// parsed descriptor reproduces an equivalent document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Absent in `--from-history` exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// One entry of a descriptor's dependency list: either a bare specifier
/// string (`python=3.10`, `pip`) or the embedded pip sub-list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Dependency {
    Spec(String),
    Pip(PipBlock),
}

impl Dependency {
    pub fn spec(value: impl Into<String>) -> Self {
        Self::Spec(value.into())
    }

    /// The bare specifier string, `None` for the pip sub-list.
    pub fn as_spec(&self) -> Option<&str> {
        match self {
            Self::Spec(s) => Some(s),
            Self::Pip(_) => None,
        }
    }
}

/// The `pip:` mapping embedded in a dependency list. A well-formed
/// descriptor carries at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipBlock {
    pub pip: Vec<String>,
}

impl PipBlock {
    pub fn is_empty(&self) -> bool {
        self.pip.is_empty()
    }
}

impl EnvDescriptor {
    pub fn to_yaml_string(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

pub fn parse_descriptor_str(input: &str) -> Result<EnvDescriptor, SchemaError> {
    Ok(serde_yaml::from_str(input)?)
}

pub fn parse_descriptor_file(path: impl AsRef<Path>) -> Result<EnvDescriptor, SchemaError> {
    let content = fs::read_to_string(path)?;
    parse_descriptor_str(&content)
}

pub fn write_descriptor_file(
    path: impl AsRef<Path>,
    descriptor: &EnvDescriptor,
) -> Result<(), SchemaError> {
    fs::write(path, descriptor.to_yaml_string()?)?;
    Ok(())
}
