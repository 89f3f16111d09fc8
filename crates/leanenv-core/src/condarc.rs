use crate::CoreError;
use std::path::Path;
use tracing::{debug, warn};

const POLICY_KEY: &str = "add_pip_as_python_dependency";

/// Read the `add_pip_as_python_dependency` flag from a user `.condarc`.
///
/// Conda's documented default for this flag is `true`, and a true value
/// is invisible in the `--from-history` export (pip, setuptools and
/// wheel are simply omitted). So: no file, no key, or a non-boolean
/// value all mean `true`; an explicit stored boolean is returned
/// verbatim, including `false`.
pub fn read_add_pip_policy(condarc: Option<&Path>) -> Result<bool, CoreError> {
    let Some(path) = condarc else {
        return Ok(true);
    };
    let content = std::fs::read_to_string(path)?;
    let doc: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(leanenv_schema::SchemaError::ParseYaml)?;

    match doc.get(POLICY_KEY) {
        None => Ok(true),
        Some(serde_yaml::Value::Bool(value)) => {
            debug!("{POLICY_KEY} = {value} (from {})", path.display());
            Ok(*value)
        }
        Some(other) => {
            warn!("{POLICY_KEY} in {} is not a boolean ({other:?}); assuming true", path.display());
            Ok(true)
        }
    }
}
