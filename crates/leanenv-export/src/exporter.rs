use crate::conda::CondaExporter;
use crate::mock::MockExporter;
use crate::view::ExportView;
use crate::ExportError;

/// A synchronous source of textual environment descriptors.
///
/// One export invocation produces the raw YAML stream for a named
/// environment in the requested view. Implementations block until the
/// stream is complete or a bounded timeout elapses.
pub trait EnvExporter {
    fn name(&self) -> &str;

    fn available(&self) -> bool;

    fn export(&self, env_name: &str, view: ExportView) -> Result<String, ExportError>;
}

pub fn select_exporter(name: &str) -> Result<Box<dyn EnvExporter>, ExportError> {
    match name {
        "conda" => Ok(Box::new(CondaExporter::default())),
        "mock" => Ok(Box::new(MockExporter::new())),
        other => Err(ExportError::ExporterUnavailable(other.to_owned())),
    }
}
