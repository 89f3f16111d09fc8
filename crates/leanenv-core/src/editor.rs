use leanenv_schema::{Dependency, EnvDescriptor, Kernel, PipBlock};
use tracing::debug;

/// Everything the dependency-list edit needs besides the history
/// descriptor itself.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub kernel: Kernel,
    pub old_version: String,
    pub new_version: String,
    pub new_env_name: String,
    pub new_prefix: String,
    /// Stripped pip sub-list from the full export, if any.
    pub pip_block: Option<PipBlock>,
    /// `add_pip_as_python_dependency` from the user `.condarc`.
    pub add_pip_policy: bool,
}

/// Rewrite a history descriptor in place into the lean descriptor.
///
/// Step order determines the final list ordering, which downstream
/// tooling treats as significant for readability:
/// 1. new name and prefix;
/// 2. new kernel pin inserted first (unless already first);
/// 3. bare `pip` forced in at position 1;
/// 4. one scan dropping the stale kernel pin and detecting bare
///    `setuptools`/`wheel`;
/// 5. policy-driven appends, applied once after the scan completes;
/// 6. pip sub-list appended last.
///
/// An empty input dependency list is a valid minimal environment.
pub fn apply_edit(descriptor: &mut EnvDescriptor, ctx: &EditContext) {
    descriptor.name = ctx.new_env_name.clone();
    descriptor.prefix = Some(ctx.new_prefix.clone());

    let new_spec = ctx.kernel.spec(&ctx.new_version);
    let old_spec = ctx.kernel.spec(&ctx.old_version);

    let first = descriptor.dependencies.first().and_then(Dependency::as_spec);
    if first != Some(new_spec.as_str()) {
        descriptor.dependencies.insert(0, Dependency::Spec(new_spec));
    }
    descriptor.dependencies.insert(1, Dependency::spec("pip"));

    let mut has_setuptools = false;
    let mut has_wheel = false;
    descriptor.dependencies.retain(|dep| match dep.as_spec() {
        Some(spec) if spec == old_spec => {
            debug!("dropping stale kernel pin '{spec}'");
            false
        }
        Some("setuptools") => {
            has_setuptools = true;
            true
        }
        Some("wheel") => {
            has_wheel = true;
            true
        }
        _ => true,
    });

    if ctx.add_pip_policy {
        if !has_setuptools {
            descriptor.dependencies.push(Dependency::spec("setuptools"));
        }
        if !has_wheel {
            descriptor.dependencies.push(Dependency::spec("wheel"));
        }
    }

    if let Some(block) = &ctx.pip_block {
        if !block.is_empty() {
            descriptor.dependencies.push(Dependency::Pip(block.clone()));
        }
    }
}
