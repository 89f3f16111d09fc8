use crate::kernel::Kernel;
use crate::version::dotless;
use std::path::{Path, PathBuf};

/// Sentinel value meaning "derive the new environment name from the
/// kernel and version".
pub const DEFAULT_ENV_NAME: &str = "default";

/// Resolve the new environment's name.
///
/// `"default"` produces the first two bytes of the kernel name plus the
/// dotless new version (`py39`). Any other requested name is returned
/// as-is, with periods stripped when `dotless_name` is set.
pub fn resolve_env_name(
    requested: &str,
    kernel: Kernel,
    new_version: &str,
    dotless_name: bool,
) -> String {
    if requested == DEFAULT_ENV_NAME {
        let prefix = &kernel.as_str()[..2];
        return format!("{prefix}{}", dotless(new_version));
    }
    if dotless_name {
        dotless(requested)
    } else {
        requested.to_owned()
    }
}

/// Deterministic output file path: `lean_<new>_from_<source>.yml` under
/// `base_dir`, with periods stripped from both names.
pub fn resolve_output_path(base_dir: &Path, new_env_name: &str, source_env_name: &str) -> PathBuf {
    base_dir.join(format!(
        "lean_{}_from_{}.yml",
        dotless(new_env_name),
        dotless(source_env_name)
    ))
}

/// File name for a raw export snapshot kept next to the final output,
/// e.g. `env_ds310_hist.yml`.
pub fn intermediate_file_name(source_env_name: &str, view_tag: &str) -> String {
    format!("env_{}_{view_tag}.yml", dotless(source_env_name))
}
