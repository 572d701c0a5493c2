//! The host facing side of the plugin. Each node declares its inputs the way
//! the host's editor should draw them, and turns a map of input values into
//! its single string output.
//!

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::client::TranslationClient;
use crate::config::{Endpoint, PluginConfig};
use crate::error::{NodeError, TranslationError};
use crate::language::{display_names, resolve_code};

/// Input values by input name, as the host hands them over.
pub type NodeInputs  = HashMap<String, String>;

/// Output values, in the order of `NodeInfo::return_types`.
pub type NodeOutputs = Vec<String>;

pub const CATEGORY     : &str = "Translation";
pub const DEFAULT_TEXT : &str = "Hello";

/// How the host should present an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    String { default: &'static str, multiline: bool },
    Choice { options: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name : &'static str,
    #[serde(flatten)]
    pub kind : InputKind,
}

/// Everything the host needs to list a node and draw it in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub name         : &'static str,
    pub display_name : &'static str,
    pub category     : &'static str,
    pub inputs       : Vec<InputSpec>,
    pub return_types : Vec<&'static str>,
    /// The output is meant to be shown to the user, not only wired onwards.
    pub output_node  : bool,
}

/// A node the host can run.
pub trait Node: Send + Sync {
    fn info(&self) -> &NodeInfo;

    /// Runs the node. `Err` is only for inputs the host should never send;
    /// failed translations are reported in the output text.
    ///
    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, NodeError>;
}

/// Translates `text` between two languages given by display name.
/// # Arguments
/// * `client`   - The client that performs the request.
/// * `text`     - The text to translate.
/// * `source`   - Display name of the text's language, e.g. "Auto Detect".
/// * `target`   - Display name of the language to translate to.
/// * `endpoint` - The server to use.
/// # Returns
/// * The translation, or the error text. If either name isn't in the
///   language table, no request is made.
///
pub fn translate_names(client   : &TranslationClient,
                       text     : &str,
                       source   : &str,
                       target   : &str,
                       endpoint : &Endpoint)
    -> String
{
    match (resolve_code(source), resolve_code(target)) {
        (Some(source_code), Some(target_code)) => {
            client.translate_text(text, source_code, target_code, endpoint)
        },
        _ => {
            warn!(source, target, "invalid language selection");
            TranslationError::InvalidSelection.to_string()
        }
    }
}

fn required<'a>(inputs : &'a NodeInputs,
                name   : &'static str)
    -> Result<&'a str, NodeError>
{
    inputs.get(name)
          .map(String::as_str)
          .ok_or(NodeError::MissingInput(name))
}

fn optional<'a>(inputs  : &'a NodeInputs,
                name    : &str,
                default : &'a str)
    -> &'a str
{
    inputs.get(name).map_or(default, String::as_str)
}

/// Inputs shared by both translation nodes.
fn translate_inputs() -> Vec<InputSpec> {
    let languages = display_names();
    vec![
        InputSpec {
            name: "text",
            kind: InputKind::String { default: DEFAULT_TEXT, multiline: true },
        },
        InputSpec {
            name: "source",
            kind: InputKind::Choice { options: languages.clone() },
        },
        InputSpec {
            name: "target",
            kind: InputKind::Choice { options: languages },
        },
    ]
}

/// Translates with a LibreTranslate server on the user's machine.
pub struct LibreTranslateLocally {
    client : Arc<TranslationClient>,
    info   : NodeInfo,
}

impl LibreTranslateLocally {
    pub const NAME: &'static str = "LibreTranslateLocally";

    pub fn new(client: Arc<TranslationClient>) -> Self {
        let info = NodeInfo {
            name         : Self::NAME,
            display_name : "Libre Translate Locally",
            category     : CATEGORY,
            inputs       : translate_inputs(),
            return_types : vec!["STRING"],
            output_node  : true,
        };
        LibreTranslateLocally { client, info }
    }
}

impl Node for LibreTranslateLocally {
    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, NodeError> {
        let text   = optional(inputs, "text", DEFAULT_TEXT);
        let source = required(inputs, "source")?;
        let target = required(inputs, "target")?;

        Ok(vec![translate_names(&self.client, text, source, target,
                                &Endpoint::Local)])
    }
}

/// Translates with the public LibreTranslate server. Takes an API key, which
/// may be left empty.
///
pub struct LibreTranslateOnline {
    client : Arc<TranslationClient>,
    info   : NodeInfo,
}

impl LibreTranslateOnline {
    pub const NAME: &'static str = "LibreTranslateOnline";

    pub fn new(client: Arc<TranslationClient>) -> Self {
        let mut inputs = translate_inputs();
        inputs.push(InputSpec {
            name: "api_key",
            kind: InputKind::String { default: "", multiline: false },
        });
        let info = NodeInfo {
            name         : Self::NAME,
            display_name : "Libre Translate Online",
            category     : CATEGORY,
            inputs,
            return_types : vec!["STRING"],
            output_node  : true,
        };
        LibreTranslateOnline { client, info }
    }
}

impl Node for LibreTranslateOnline {
    fn info(&self) -> &NodeInfo {
        &self.info
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, NodeError> {
        let text    = optional(inputs, "text", DEFAULT_TEXT);
        let source  = required(inputs, "source")?;
        let target  = required(inputs, "target")?;
        let api_key = optional(inputs, "api_key", "");

        Ok(vec![translate_names(&self.client, text, source, target,
                                &Endpoint::online(api_key))])
    }
}

static REGISTRY: OnceLock<NodeRegistry> = OnceLock::new();

/// The nodes this plugin offers, by node name.
pub struct NodeRegistry {
    nodes: BTreeMap<&'static str, Box<dyn Node>>,
}

impl NodeRegistry {
    /// Builds the registry. The local node is always offered; the online node
    /// only when the config enables it.
    ///
    pub fn new(config: &PluginConfig) -> Self {
        let client = Arc::new(TranslationClient::new(config.client.clone()));
        let mut registry = NodeRegistry { nodes: BTreeMap::new() };

        registry.register(LibreTranslateLocally::new(client.clone()));
        if config.enable_online {
            registry.register(LibreTranslateOnline::new(client));
        }
        info!(nodes = ?registry.nodes.keys().collect::<Vec<_>>(),
              "translation nodes registered");
        registry
    }

    /// The process wide registry. Built on first use, from the config given
    /// to `crate::plugin_init()` or from the default config.
    ///
    pub fn global() -> &'static NodeRegistry {
        REGISTRY.get_or_init(|| NodeRegistry::new(&PluginConfig::default()))
    }

    /// Installs the process wide registry built from `config`. Fails if a
    /// registry is already in place, whether from an earlier install or from
    /// a `global()` call that fell back to the default config.
    ///
    pub(crate) fn install(config: &PluginConfig)
        -> Result<&'static NodeRegistry, NodeError>
    {
        if REGISTRY.set(NodeRegistry::new(config)).is_err() {
            warn!(enable_online = config.enable_online,
                  "translation nodes already registered, config ignored");
            return Err(NodeError::AlreadyInitialized);
        }
        Ok(Self::global())
    }

    fn register(&mut self, node: impl Node + 'static) {
        self.nodes.insert(node.info().name, Box::new(node));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Node> {
        self.nodes.get(name).map(|node| node.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.nodes.keys().copied().collect()
    }

    /// Metadata for every registered node, for the host's node listing.
    pub fn infos(&self) -> Vec<&NodeInfo> {
        self.nodes.values().map(|node| node.info()).collect()
    }

    pub fn execute(&self,
                   name   : &str,
                   inputs : &NodeInputs)
        -> Result<NodeOutputs, NodeError>
    {
        self.get(name)
            .ok_or_else(|| NodeError::UnknownNode(name.to_string()))?
            .execute(inputs)
    }
}
