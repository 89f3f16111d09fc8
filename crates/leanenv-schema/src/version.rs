use crate::SchemaError;
use tracing::info;

/// Validate a kernel version string and truncate it to `major.minor`.
///
/// Micro versions are dropped on purpose: a pinned micro version
/// frequently makes conda's dependency resolution infeasible. A dotless
/// string of two or more characters is rejected as ambiguous (likely
/// `39` typed where `3.9` was meant).
pub fn normalize_version(ver: &str) -> Result<String, SchemaError> {
    let dots = ver.matches('.').count();
    if dots == 0 {
        if ver.len() > 1 {
            return Err(SchemaError::InvalidVersionFormat(ver.to_owned()));
        }
        return Ok(ver.to_owned());
    }
    if dots >= 2 {
        let truncated: Vec<&str> = ver.splitn(3, '.').take(2).collect();
        info!("version '{ver}' truncated to major.minor");
        return Ok(truncated.join("."));
    }
    Ok(ver.to_owned())
}

/// Strip all periods from a version string, for filename-safe naming.
pub fn dotless(ver: &str) -> String {
    ver.replace('.', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_micro_version() {
        assert_eq!(normalize_version("3.9.8").unwrap(), "3.9");
        assert_eq!(normalize_version("3.10.0.1").unwrap(), "3.10");
    }

    #[test]
    fn rejects_dotless_multi_digit() {
        assert!(matches!(
            normalize_version("31"),
            Err(SchemaError::InvalidVersionFormat(_))
        ));
        assert!(normalize_version("310").is_err());
    }

    #[test]
    fn single_period_is_identity() {
        assert_eq!(normalize_version("31.0").unwrap(), "31.0");
        assert_eq!(normalize_version("3.10").unwrap(), "3.10");
    }

    #[test]
    fn single_character_is_identity() {
        assert_eq!(normalize_version("3").unwrap(), "3");
    }

    #[test]
    fn dotless_strips_periods() {
        assert_eq!(dotless("3.10"), "310");
        assert_eq!(dotless("39"), "39");
    }
}
