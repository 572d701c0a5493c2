use thiserror::Error;

use crate::config::Mode;

/// Translation error. Each variant is one failure category, and its display
/// is the exact message the node outputs in place of a translation. Existing
/// graphs inspect these strings, so the wording must not change.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A source or target name isn't in the language table. Detected before
    /// any request is sent.
    #[error("Error: Invalid language selection.")]
    InvalidSelection,

    /// The server couldn't be reached at all.
    #[error("Error: Could not connect to the translation server.{}", connect_hint(.mode))]
    Connection { mode: Mode },

    #[error("Error: The request to the translation server timed out.")]
    Timeout,

    /// Everything else: error statuses, unreadable bodies, other transport
    /// problems. Holds the underlying description.
    #[error("Error: An error occurred while trying to connect to the translation server: {0}")]
    Request(String),
}

fn connect_hint(mode: &Mode) -> &'static str {
    match mode {
        Mode::Local  => " Is the server running?",
        Mode::Online => "",
    }
}

/// Errors from the host facing side, when the host asks for something the
/// plugin doesn't provide. Translation failures are never reported this way.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// `plugin_init()` came after the nodes were already registered.
    #[error("Translation nodes are already registered")]
    AlreadyInitialized,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid plugin configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid plugin configuration: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_node_output_text() {
        assert_eq!(TranslationError::InvalidSelection.to_string(),
                   "Error: Invalid language selection.");
        assert_eq!(TranslationError::Connection { mode: Mode::Local }.to_string(),
                   "Error: Could not connect to the translation server. \
                    Is the server running?");
        assert_eq!(TranslationError::Connection { mode: Mode::Online }.to_string(),
                   "Error: Could not connect to the translation server.");
        assert_eq!(TranslationError::Timeout.to_string(),
                   "Error: The request to the translation server timed out.");
        assert_eq!(TranslationError::Request("boom".into()).to_string(),
                   "Error: An error occurred while trying to connect to the \
                    translation server: boom");
    }

    #[test]
    fn node_errors_name_the_problem() {
        assert_eq!(NodeError::UnknownNode("Foo".into()).to_string(), "Unknown node: Foo");
        assert_eq!(NodeError::MissingInput("source").to_string(),
                   "Missing required input: source");
    }
}
