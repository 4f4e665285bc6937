//! Correlation IDs attached to log lines

use crate::env::{EnvSource, RealEnv};
use once_cell::sync::Lazy;
use uuid::Uuid;

/// Environment variable that pins the process-wide default correlation ID
pub const CORRELATION_ID_ENV: &str = "ADDNUMS_CORRELATION_ID";

static DEFAULT_CORRELATION_ID: Lazy<String> = Lazy::new(|| default_from(&RealEnv::new()));

/// The correlation ID used when a caller does not pass one.
///
/// Resolved once per process: `ADDNUMS_CORRELATION_ID` when set and not
/// blank, otherwise a fresh UUID v4.
pub fn default_correlation_id() -> &'static str {
    DEFAULT_CORRELATION_ID.as_str()
}

/// Resolve the default correlation ID from an environment source
pub fn default_from<E: EnvSource + ?Sized>(env: &E) -> String {
    env.var(CORRELATION_ID_ENV)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Pick the explicit ID when given, the process default otherwise
pub fn resolve(explicit: Option<&str>) -> &str {
    match explicit {
        Some(id) => id,
        None => default_correlation_id(),
    }
}

/// Log line prefixes for one correlation ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPrefixes {
    /// `"{id} - "`
    pub info: String,
    /// `"correlation_ID:{id} "`
    pub error: String,
}

impl LogPrefixes {
    /// Build prefixes for `id`; an empty ID yields empty prefixes
    pub fn for_id(id: &str) -> Self {
        if id.is_empty() {
            return Self {
                info: String::new(),
                error: String::new(),
            };
        }
        Self {
            info: format!("{id} - "),
            error: format!("correlation_ID:{id} "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;

    #[test]
    fn test_prefixes_for_id() {
        let prefixes = LogPrefixes::for_id("abc-123");
        assert_eq!(prefixes.info, "abc-123 - ");
        assert_eq!(prefixes.error, "correlation_ID:abc-123 ");
    }

    #[test]
    fn test_empty_id_has_no_prefixes() {
        let prefixes = LogPrefixes::for_id("");
        assert!(prefixes.info.is_empty());
        assert!(prefixes.error.is_empty());
    }

    #[test]
    fn test_default_from_env() {
        let env = MockEnv::new();
        env.set(CORRELATION_ID_ENV, "  pinned-id ");
        assert_eq!(default_from(&env), "pinned-id");
    }

    #[test]
    fn test_default_generates_uuid_when_unset_or_blank() {
        let env = MockEnv::new();
        let generated = default_from(&env);
        assert!(Uuid::parse_str(&generated).is_ok());

        env.set(CORRELATION_ID_ENV, "   ");
        assert!(Uuid::parse_str(&default_from(&env)).is_ok());
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        assert_eq!(resolve(Some("given")), "given");
        assert_eq!(resolve(Some("")), "");
        assert_eq!(resolve(None), default_correlation_id());
        assert_eq!(default_correlation_id(), default_correlation_id());
    }
}
