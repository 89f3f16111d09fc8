use crate::exporter::EnvExporter;
use crate::view::ExportView;
use crate::ExportError;
use std::collections::HashMap;

/// Deterministic in-memory exporter for tests.
///
/// For any environment name it synthesizes a plausible pair of export
/// views: the full `--no-builds` stream with pinned versions and a pip
/// sub-list, and the minimal `--from-history` stream with only
/// user-requested packages. Individual streams can be overridden with
/// canned text.
pub struct MockExporter {
    kernel_version: String,
    canned: HashMap<(String, ExportView), String>,
}

impl Default for MockExporter {
    fn default() -> Self {
        Self {
            kernel_version: "3.10".to_owned(),
            canned: HashMap::new(),
        }
    }
}

impl MockExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernel version embedded in synthesized streams (default `3.10`).
    pub fn with_kernel_version(mut self, version: impl Into<String>) -> Self {
        self.kernel_version = version.into();
        self
    }

    /// Replace the stream for one (environment, view) pair.
    pub fn with_canned(
        mut self,
        env_name: impl Into<String>,
        view: ExportView,
        stream: impl Into<String>,
    ) -> Self {
        self.canned.insert((env_name.into(), view), stream.into());
        self
    }

    fn synthesize(&self, env_name: &str, view: ExportView) -> String {
        let ver = &self.kernel_version;
        match view {
            ExportView::NoBuildStrings => format!(
                "name: {env_name}\n\
                 channels:\n\
                 \x20 - defaults\n\
                 dependencies:\n\
                 \x20 - python={ver}.9\n\
                 \x20 - numpy=1.24.1\n\
                 \x20 - pandas=1.5.3\n\
                 \x20 - pip=23.0\n\
                 \x20 - pip:\n\
                 \x20     - networkx==3.0\n\
                 \x20     - requests>=2.28\n\
                 prefix: /opt/conda/envs/{env_name}\n"
            ),
            ExportView::FromHistory => format!(
                "name: {env_name}\n\
                 channels:\n\
                 \x20 - defaults\n\
                 dependencies:\n\
                 \x20 - python={ver}\n\
                 \x20 - numpy\n\
                 \x20 - pandas\n"
            ),
        }
    }
}

impl EnvExporter for MockExporter {
    fn name(&self) -> &str {
        "mock"
    }

    fn available(&self) -> bool {
        true
    }

    fn export(&self, env_name: &str, view: ExportView) -> Result<String, ExportError> {
        if let Some(stream) = self.canned.get(&(env_name.to_owned(), view)) {
            return Ok(stream.clone());
        }
        Ok(self.synthesize(env_name, view))
    }
}
