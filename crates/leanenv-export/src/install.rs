use crate::ExportError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A located conda installation: root directory, `envs/` subdirectory,
/// and the user's `.condarc` path (which may not exist).
#[derive(Debug, Clone)]
pub struct CondaInstall {
    root: PathBuf,
    condarc: PathBuf,
}

impl CondaInstall {
    /// Discover the installation from the process environment:
    /// `CONDA_ROOT` first, then `CONDA_PREFIX`; the user `.condarc` is
    /// looked up under `HOME`.
    pub fn discover() -> Result<Self, ExportError> {
        let root = std::env::var_os("CONDA_ROOT")
            .or_else(|| std::env::var_os("CONDA_PREFIX"))
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .ok_or(ExportError::NoCondaInstall)?;
        let condarc = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default()
            .join(".condarc");
        debug!("conda root: {}", root.display());
        Ok(Self { root, condarc })
    }

    /// Construct from explicit paths (tests, non-standard layouts).
    pub fn at(root: impl Into<PathBuf>, condarc: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            condarc: condarc.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn envs_dir(&self) -> PathBuf {
        self.root.join("envs")
    }

    /// Install prefix for a named environment.
    pub fn env_prefix(&self, env_name: &str) -> PathBuf {
        self.envs_dir().join(env_name)
    }

    pub fn env_exists(&self, env_name: &str) -> bool {
        self.env_prefix(env_name).is_dir()
    }

    /// The user `.condarc`, only when the file actually exists.
    pub fn user_condarc(&self) -> Option<&Path> {
        if self.condarc.is_file() {
            Some(&self.condarc)
        } else {
            info!("no user .condarc found at {}", self.condarc.display());
            None
        }
    }
}
