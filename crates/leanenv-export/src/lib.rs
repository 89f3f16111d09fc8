//! Exporter backends and conda installation discovery for leanenv.
//!
//! This crate implements the external-collaborator layer: the
//! `EnvExporter` trait with a real conda backend (blocking subprocess
//! with a bounded timeout) and a mock backend for tests, the closed
//! `ExportView` type for the two export flavors, and discovery of the
//! local conda installation (root, `envs/` directory, user `.condarc`).

pub mod conda;
pub mod exporter;
pub mod install;
pub mod mock;
pub mod view;

pub use conda::CondaExporter;
pub use exporter::{select_exporter, EnvExporter};
pub use install::CondaInstall;
pub use mock::MockExporter;
pub use view::ExportView;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("exporter '{0}' is not available on this system")]
    ExporterUnavailable(String),
    #[error("export command failed ({command}): {detail}")]
    ExportFailed { command: String, detail: String },
    #[error("export command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },
    #[error("export produced non-UTF-8 output: {command}")]
    InvalidOutput { command: String },
    #[error("no conda installation found (set CONDA_ROOT or CONDA_PREFIX)")]
    NoCondaInstall,
}
