use crate::condarc::read_add_pip_policy;
use crate::editor::{apply_edit, EditContext};
use crate::lifecycle::{validate_transition, ClonePhase};
use crate::CoreError;
use leanenv_export::{CondaInstall, EnvExporter, ExportView};
use leanenv_schema::{
    extract_pip_block, intermediate_file_name, normalize_version, parse_descriptor_str,
    resolve_env_name, resolve_output_path, write_descriptor_file, EnvDescriptor, Kernel,
    DEFAULT_ENV_NAME,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// One clone request: which environment to lean-clone and how to name
/// the result.
#[derive(Debug, Clone)]
pub struct CloneRequest {
    pub old_ver: String,
    pub new_ver: String,
    pub env_to_clone: String,
    /// `"default"` derives the name from kernel and new version.
    pub new_env_name: String,
    pub kernel: Kernel,
    /// Strip periods from an explicitly requested name.
    pub dotless_name: bool,
    /// Directory for the output file; the user's home when `None`.
    pub output_dir: Option<PathBuf>,
    /// Also write the raw export streams next to the output.
    pub keep_intermediate: bool,
}

impl CloneRequest {
    pub fn new(
        old_ver: impl Into<String>,
        new_ver: impl Into<String>,
        env_to_clone: impl Into<String>,
    ) -> Self {
        Self {
            old_ver: old_ver.into(),
            new_ver: new_ver.into(),
            env_to_clone: env_to_clone.into(),
            new_env_name: DEFAULT_ENV_NAME.to_owned(),
            kernel: Kernel::Python,
            dotless_name: false,
            output_dir: None,
            keep_intermediate: false,
        }
    }
}

/// Result of a successful clone run.
#[derive(Debug)]
pub struct CloneOutcome {
    pub env_name: String,
    pub output_path: PathBuf,
    /// Raw export snapshots, when the request asked to keep them.
    pub intermediate: Vec<PathBuf>,
    pub descriptor: EnvDescriptor,
}

/// Central orchestrator for one clone run.
///
/// Sequences the two export invocations, the pip extraction, the
/// dependency-list edit, and the final save, advancing through the
/// `ClonePhase` chain. Owns no state across runs; rerunning the whole
/// command is always safe, and nothing is retried automatically.
pub struct CloneEngine {
    install: CondaInstall,
    exporter: Box<dyn EnvExporter>,
}

impl CloneEngine {
    pub fn new(install: CondaInstall, exporter: Box<dyn EnvExporter>) -> Self {
        Self { install, exporter }
    }

    pub fn clone_env(&self, request: &CloneRequest) -> Result<CloneOutcome, CoreError> {
        let mut phase = ClonePhase::Init;
        match self.run(request, &mut phase) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                debug!("clone failed in phase {phase}");
                let _ = advance(&mut phase, ClonePhase::Failed);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        request: &CloneRequest,
        phase: &mut ClonePhase,
    ) -> Result<CloneOutcome, CoreError> {
        // Validation happens before any external call.
        let old_ver = normalize_version(&request.old_ver)?;
        let new_ver = normalize_version(&request.new_ver)?;
        if old_ver == new_ver {
            // not an error: the user just wants a lean yml
            warn!("old and new kernel versions are identical ({old_ver})");
        }

        if !self.install.env_exists(&request.env_to_clone) {
            return Err(CoreError::EnvNotFound(request.env_to_clone.clone()));
        }

        let output_dir = request
            .output_dir
            .clone()
            .unwrap_or_else(default_output_dir);
        let mut intermediate = Vec::new();

        let full = self.fetch(request, ExportView::NoBuildStrings, &output_dir, &mut intermediate)?;
        let pip_block = extract_pip_block(&full, true);
        drop(full);
        advance(phase, ClonePhase::FetchedFull)?;

        let mut history =
            self.fetch(request, ExportView::FromHistory, &output_dir, &mut intermediate)?;
        advance(phase, ClonePhase::FetchedHistory)?;

        let add_pip_policy = read_add_pip_policy(self.install.user_condarc())?;
        let env_name = resolve_env_name(
            &request.new_env_name,
            request.kernel,
            &new_ver,
            request.dotless_name,
        );
        let context = EditContext {
            kernel: request.kernel,
            old_version: old_ver,
            new_version: new_ver,
            new_env_name: env_name.clone(),
            new_prefix: self.install.env_prefix(&env_name).display().to_string(),
            pip_block,
            add_pip_policy,
        };
        apply_edit(&mut history, &context);
        advance(phase, ClonePhase::Merged)?;

        let output_path = resolve_output_path(&output_dir, &env_name, &request.env_to_clone);
        write_descriptor_file(&output_path, &history)?;
        advance(phase, ClonePhase::Saved)?;

        // Post-condition: the save step must have left a file behind.
        if !output_path.is_file() {
            return Err(CoreError::OutputNotProduced(output_path));
        }
        info!("lean descriptor written to {}", output_path.display());
        advance(phase, ClonePhase::Reported)?;

        Ok(CloneOutcome {
            env_name,
            output_path,
            intermediate,
            descriptor: history,
        })
    }

    fn fetch(
        &self,
        request: &CloneRequest,
        view: ExportView,
        output_dir: &std::path::Path,
        intermediate: &mut Vec<PathBuf>,
    ) -> Result<EnvDescriptor, CoreError> {
        let stream = self.exporter.export(&request.env_to_clone, view)?;
        let descriptor = parse_descriptor_str(&stream)?;
        debug!(
            "fetched {view} view of '{}' ({} dependencies)",
            request.env_to_clone,
            descriptor.dependencies.len()
        );
        if request.keep_intermediate {
            let path = output_dir.join(intermediate_file_name(&request.env_to_clone, view.tag()));
            std::fs::write(&path, &stream)?;
            intermediate.push(path);
        }
        Ok(descriptor)
    }
}

fn advance(phase: &mut ClonePhase, to: ClonePhase) -> Result<(), CoreError> {
    validate_transition(*phase, to)?;
    debug!("phase: {phase} -> {to}");
    *phase = to;
    Ok(())
}

fn default_output_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
