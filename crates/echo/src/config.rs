//! crates/echo/src/config.rs
//! Snapshot of an echo context's mutable settings.

/// Label token used when none is configured.
pub const DEFAULT_LABEL: &str = "bract";

/// Verbosity and label settings for an [`Echo`](crate::Echo) context.
///
/// A config is a plain value: build one to construct a context, read one back
/// with [`Echo::config`](crate::Echo::config), or push one into a live context
/// with [`Echo::apply`](crate::Echo::apply).
///
/// ```
/// use echo::{DEFAULT_LABEL, EchoConfig};
///
/// let config = EchoConfig::default();
/// assert!(!config.verbose);
/// assert_eq!(config.label, DEFAULT_LABEL);
///
/// let config = config.with_verbose(true).with_label("svc");
/// assert!(config.verbose);
/// assert_eq!(config.label, "svc");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EchoConfig {
    /// Whether gated messages are written.
    pub verbose: bool,
    /// Label token prefixing every line. Any string is accepted.
    pub label: String,
}

impl EchoConfig {
    /// Returns the config with `verbose` replaced.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the config with `label` replaced.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            label: DEFAULT_LABEL.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet_with_default_label() {
        let config = EchoConfig::default();
        assert!(!config.verbose);
        assert_eq!(config.label, "bract");
    }

    #[test]
    fn empty_label_is_accepted() {
        let config = EchoConfig::default().with_label("");
        assert_eq!(config.label, "");
    }
}
