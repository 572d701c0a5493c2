//! Plugin start-up tests
//!
//! Kept in their own test binary: the node registry is process wide, and
//! these tests need it untouched when they start.

use translate_node::{plugin_init, NodeError, NodeRegistry, PluginConfig};

#[test]
fn test_plugin_init_applies_host_config_once() {
    let config = PluginConfig {
        enable_online: true,
        ..PluginConfig::default()
    };
    let registry = plugin_init(config).expect("first init should succeed");
    assert_eq!(
        registry.names(),
        vec!["LibreTranslateLocally", "LibreTranslateOnline"]
    );
    assert!(std::ptr::eq(registry, NodeRegistry::global()));

    // A second init keeps the first config
    let again = plugin_init(PluginConfig::default());
    assert!(matches!(again, Err(NodeError::AlreadyInitialized)));
    assert_eq!(NodeRegistry::global().names().len(), 2);
}
