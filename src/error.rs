//! Error types for the widget engine.

use thiserror::Error;

/// Geometry resolution failures.
///
/// These are programming errors in screen construction code: a provider
/// reading a widget that does not exist yet in program order, or a widget
/// whose geometry depends on itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A provider read a widget constructed later than the one being resolved.
    #[error("`{widget}` reads `{dependency}`, which is constructed after it")]
    OrderDependency {
        /// The widget whose provider performed the read.
        widget: String,
        /// The widget that was read too early.
        dependency: String,
    },

    /// Geometry was requested while the widget itself was being resolved.
    #[error("geometry of `{widget}` depends on itself")]
    Cycle {
        /// The widget caught in the cycle.
        widget: String,
    },

    /// The owner chain does not reach a root group.
    #[error("`{widget}` is not attached to a root group")]
    Detached {
        /// The detached widget.
        widget: String,
    },
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::UiConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level error type of the crate.
#[derive(Error, Debug)]
pub enum UiError {
    /// Geometry resolution failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal I/O failed.
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The logging subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_messages_name_widgets() {
        let err = LayoutError::OrderDependency {
            widget: "Menu-Settings".into(),
            dependency: "Menu-Exit".into(),
        };
        assert_eq!(
            err.to_string(),
            "`Menu-Settings` reads `Menu-Exit`, which is constructed after it"
        );

        let err: UiError = LayoutError::Cycle { widget: "Alert".into() }.into();
        assert_eq!(err.to_string(), "geometry of `Alert` depends on itself");
    }
}
