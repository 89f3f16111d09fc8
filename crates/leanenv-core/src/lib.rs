//! Core orchestration for leanenv.
//!
//! This crate ties together the schema layer and the exporter backends
//! into the `CloneEngine` — one synchronous run that fetches both export
//! views of an environment, merges them into a lean descriptor with the
//! kernel version swapped, and writes the result. It also provides the
//! dependency-list editor, the `.condarc` policy reader, and the
//! clone-phase state machine.

pub mod condarc;
pub mod editor;
pub mod engine;
pub mod lifecycle;

pub use condarc::read_add_pip_policy;
pub use editor::{apply_edit, EditContext};
pub use engine::{CloneEngine, CloneOutcome, CloneRequest};
pub use lifecycle::{validate_transition, ClonePhase};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("schema error: {0}")]
    Schema(#[from] leanenv_schema::SchemaError),
    #[error("export error: {0}")]
    Export(#[from] leanenv_export::ExportError),
    #[error("environment not found: {0} (typo in the environment name?)")]
    EnvNotFound(String),
    #[error("output file was not produced: {0}")]
    OutputNotProduced(PathBuf),
    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
