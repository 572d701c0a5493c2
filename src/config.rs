use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Address of a LibreTranslate server running on the user's own machine.
pub const LOCAL_TRANSLATE_URL: &str = "http://127.0.0.1:5000/translate";

/// The public LibreTranslate instance.
pub const ONLINE_TRANSLATE_URL: &str = "https://libretranslate.com/translate";

/// How long to wait for a translation to come back from the translation
/// server, in milliseconds.
///
const TRANSLATION_SERVER_TIMEOUT_MS: u64 = 30_000;

fn default_local_url() -> String {
    LOCAL_TRANSLATE_URL.to_string()
}

fn default_online_url() -> String {
    ONLINE_TRANSLATE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    TRANSLATION_SERVER_TIMEOUT_MS
}

fn default_enable_online() -> bool {
    false
}

/// Settings for the HTTP side of translation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(default = "default_local_url")]
    pub local_url: String,
    #[serde(default = "default_online_url")]
    pub online_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            local_url: default_local_url(),
            online_url: default_online_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Plugin level settings. Decides which nodes are offered to the host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PluginConfig {
    #[serde(default = "default_enable_online")]
    pub enable_online: bool,
    #[serde(default)]
    pub client: ClientConfig,
}

impl PluginConfig {
    /// Reads the config from JSON. Missing fields take their defaults.
    ///
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PluginConfig = serde_json::from_str(json)?;
        if config.client.timeout_ms == 0 {
            return Err(ConfigError::Invalid("client.timeout_ms must be greater than 0"));
        }
        Ok(config)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enable_online: default_enable_online(),
            client: ClientConfig::default(),
        }
    }
}

/// Which translation server a request goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The server at `ClientConfig::local_url`. Never sends an API key.
    Local,
    /// The server at `ClientConfig::online_url`, with an optional API key.
    Online { api_key: Option<String> },
}

impl Endpoint {
    /// Builds the online endpoint from a key as typed into the node. An empty
    /// key means no key at all.
    ///
    pub fn online(api_key: &str) -> Self {
        Endpoint::Online {
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
        }
    }

    pub fn url<'a>(&self, config: &'a ClientConfig) -> &'a str {
        match self {
            Endpoint::Local       => &config.local_url,
            Endpoint::Online {..} => &config.online_url,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            Endpoint::Local                => None,
            Endpoint::Online { api_key }   => api_key.as_deref()
                                                     .filter(|k| !k.is_empty()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Endpoint::Local       => Mode::Local,
            Endpoint::Online {..} => Mode::Online,
        }
    }
}

/// The endpoint kind without its payload. Carried by errors and log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Online,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_fixed_endpoints() {
        let config = PluginConfig::default();
        assert!(!config.enable_online);
        assert_eq!(config.client.local_url, "http://127.0.0.1:5000/translate");
        assert_eq!(config.client.online_url, "https://libretranslate.com/translate");
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = PluginConfig::from_json(r#"{"enable_online": true}"#).unwrap();
        assert!(config.enable_online);
        assert_eq!(config.client, ClientConfig::default());

        let config = PluginConfig::from_json(
            r#"{"client": {"local_url": "http://localhost:9000/translate", "timeout_ms": 250}}"#,
        )
        .unwrap();
        assert!(!config.enable_online);
        assert_eq!(config.client.local_url, "http://localhost:9000/translate");
        assert_eq!(config.client.online_url, ONLINE_TRANSLATE_URL);
        assert_eq!(config.client.timeout_ms, 250);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(PluginConfig::from_json("{not json").is_err());
        assert!(PluginConfig::from_json(r#"{"enable_online": "yes"}"#).is_err());
    }

    #[test]
    fn from_json_rejects_zero_timeout() {
        let err = PluginConfig::from_json(r#"{"client": {"timeout_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(err.to_string(),
                   "Invalid plugin configuration: client.timeout_ms must be greater than 0");

        let config = PluginConfig::from_json(r#"{"client": {"timeout_ms": 1}}"#).unwrap();
        assert_eq!(config.client.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn empty_api_key_is_no_api_key() {
        assert_eq!(Endpoint::online(""), Endpoint::Online { api_key: None });
        assert_eq!(Endpoint::online("abc").api_key(), Some("abc"));
        let raw = Endpoint::Online { api_key: Some(String::new()) };
        assert_eq!(raw.api_key(), None);
        assert_eq!(Endpoint::Local.api_key(), None);
    }

    #[test]
    fn endpoint_selects_configured_url() {
        let config = ClientConfig::default();
        assert_eq!(Endpoint::Local.url(&config), LOCAL_TRANSLATE_URL);
        assert_eq!(Endpoint::online("k").url(&config), ONLINE_TRANSLATE_URL);
        assert_eq!(Endpoint::online("k").mode(), Mode::Online);
    }
}
