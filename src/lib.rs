//! This addon provides translation nodes for a node-graph editor. A node takes
//! some text, the language it's written in, and the language to translate it
//! to, and asks a LibreTranslate server for the translation. The translation
//! is the node's output. If anything goes wrong, the output is a message
//! saying what happened instead.
//!
//! # The addon provides the following nodes
//!
//! * `LibreTranslateLocally` - Translates with a LibreTranslate server running
//!                             on the user's own machine, at
//!                             `http://127.0.0.1:5000/translate`.
//! * `LibreTranslateOnline`  - Translates with the public server at
//!                             `https://libretranslate.com/translate`, using
//!                             an optional API key. Only offered when enabled
//!                             in the `PluginConfig`.
//!

pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod node;

use serde::Serialize;

pub use client::{translate_text_locally, translate_text_online, TranslationClient};
pub use config::{ClientConfig, Endpoint, Mode, PluginConfig};
pub use error::{ConfigError, NodeError, TranslationError};
pub use language::{resolve_code, LanguageEntry};
pub use node::{translate_names, Node, NodeInfo, NodeInputs, NodeOutputs, NodeRegistry};

/// Name, version and description shown in the host's plugin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name        : &'static str,
    pub version     : &'static str,
    pub description : &'static str,
}

/// Called by the host to list the plugin.
///
pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name        : "Libre Translate",
        version     : env!("CARGO_PKG_VERSION"),
        description : "Translates text between 40+ languages with LibreTranslate.",
    }
}

/// Called when the plugin is loaded. Registers the nodes the config enables.
/// # Returns
/// * The process wide registry, or `NodeError::AlreadyInitialized` if the
///   nodes were registered before, in which case `config` is not applied.
///
pub fn plugin_init(config: PluginConfig) -> Result<&'static NodeRegistry, NodeError> {
    NodeRegistry::install(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_info_uses_package_version() {
        let info = plugin_info();
        assert_eq!(info.name, "Libre Translate");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.description.is_empty());
    }
}
