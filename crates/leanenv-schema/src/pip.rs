use crate::descriptor::{Dependency, EnvDescriptor, PipBlock};

/// Locate the first pip sub-list of a descriptor and return a copy,
/// optionally with exact-equality version pins stripped.
///
/// Pin removal is a deliberately narrow match, not requirement parsing:
/// only `name==X.Y(.Z...)` with an all-numeric, dotted version loses its
/// pin. Looser specifiers (`>=`, `~=`, extras, URLs) pass through
/// untouched.
pub fn extract_pip_block(descriptor: &EnvDescriptor, strip_versions: bool) -> Option<PipBlock> {
    let block = descriptor.dependencies.iter().find_map(|dep| match dep {
        Dependency::Pip(block) => Some(block.clone()),
        Dependency::Spec(_) => None,
    })?;

    if !strip_versions {
        return Some(block);
    }
    Some(PipBlock {
        pip: block.pip.iter().map(|req| strip_exact_pin(req)).collect(),
    })
}

fn strip_exact_pin(requirement: &str) -> String {
    if let Some((name, version)) = requirement.split_once("==") {
        if is_dotted_numeric(version) {
            return name.to_owned();
        }
    }
    requirement.to_owned()
}

/// True for versions like `3.0` or `1.2.3`: at least one period, every
/// component a non-empty digit run.
fn is_dotted_numeric(version: &str) -> bool {
    version.contains('.')
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_with_pips(pips: &[&str]) -> EnvDescriptor {
        EnvDescriptor {
            name: "test".to_owned(),
            channels: vec![],
            dependencies: vec![
                Dependency::spec("python=3.10"),
                Dependency::Pip(PipBlock {
                    pip: pips.iter().map(|p| (*p).to_owned()).collect(),
                }),
            ],
            prefix: None,
        }
    }

    #[test]
    fn strips_exact_dotted_pins_only() {
        let desc = descriptor_with_pips(&["networkx==3.0", "foo>=1.0", "bar"]);
        let block = extract_pip_block(&desc, true).unwrap();
        assert_eq!(block.pip, vec!["networkx", "foo>=1.0", "bar"]);
    }

    #[test]
    fn leaves_dotless_exact_pin_untouched() {
        // `==3` has no period in the version, outside the narrow match
        let desc = descriptor_with_pips(&["foo==3", "baz==1.2.3"]);
        let block = extract_pip_block(&desc, true).unwrap();
        assert_eq!(block.pip, vec!["foo==3", "baz"]);
    }

    #[test]
    fn leaves_non_numeric_versions_untouched() {
        let desc = descriptor_with_pips(&["foo==1.2rc1", "bar==."]);
        let block = extract_pip_block(&desc, true).unwrap();
        assert_eq!(block.pip, vec!["foo==1.2rc1", "bar==."]);
    }

    #[test]
    fn no_strip_returns_verbatim_copy() {
        let desc = descriptor_with_pips(&["networkx==3.0"]);
        let block = extract_pip_block(&desc, false).unwrap();
        assert_eq!(block.pip, vec!["networkx==3.0"]);
    }

    #[test]
    fn none_when_descriptor_has_no_pip_block() {
        let desc = EnvDescriptor {
            name: "test".to_owned(),
            channels: vec![],
            dependencies: vec![Dependency::spec("python=3.10")],
            prefix: None,
        };
        assert!(extract_pip_block(&desc, true).is_none());
    }

    #[test]
    fn source_descriptor_is_untouched() {
        let desc = descriptor_with_pips(&["networkx==3.0"]);
        let _ = extract_pip_block(&desc, true);
        let Dependency::Pip(original) = &desc.dependencies[1] else {
            panic!("pip block should still be present");
        };
        assert_eq!(original.pip, vec!["networkx==3.0"]);
    }
}
