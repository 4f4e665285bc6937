//! Environment trait definitions

/// Read access to environment variables
///
/// # Examples
///
/// ```
/// use addnums::env::EnvSource;
///
/// fn port<E: EnvSource>(env: &E) -> Option<String> {
///     env.var("AGENT_PORT")
/// }
/// ```
pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid Unicode
    fn var(&self, key: &str) -> Option<String>;
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
