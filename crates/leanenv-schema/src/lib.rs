//! Environment descriptor schema for leanenv.
//!
//! This crate defines the data layer: the YAML environment descriptor
//! (`EnvDescriptor`) with its ordered dependency list, kernel version
//! normalization (`normalize_version`), pip pin stripping
//! (`extract_pip_block`), and the deterministic naming rules for new
//! environments and output files.

pub mod descriptor;
pub mod kernel;
pub mod naming;
pub mod pip;
pub mod version;

pub use descriptor::{
    parse_descriptor_file, parse_descriptor_str, write_descriptor_file, Dependency, EnvDescriptor,
    PipBlock,
};
pub use kernel::Kernel;
pub use naming::{
    intermediate_file_name, resolve_env_name, resolve_output_path, DEFAULT_ENV_NAME,
};
pub use pip::extract_pip_block;
pub use version::{dotless, normalize_version};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read descriptor file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse descriptor: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("ambiguous version '{0}': two or more digits but no period (did you mean a dotted version?)")]
    InvalidVersionFormat(String),
    #[error("unsupported kernel '{0}', only 'python' is implemented")]
    UnsupportedKernel(String),
}
