use serde::{Deserialize, Serialize};
use std::error::Error;
use std::format as fm;
use std::io;

use tracing::{debug, warn};
use ureq::ErrorKind;

use crate::config::{ClientConfig, Endpoint, Mode};
use crate::error::TranslationError;
use crate::language::find_by_code;

/// What the node outputs when the server answers without a translation.
pub const NO_TRANSLATION: &str = "No translation found";

/// LibreTranslate request body.
#[derive(Debug, Serialize)]
struct TranslationRequest<'a> {
    q       : &'a str,
    source  : &'a str,
    target  : &'a str,
    format  : &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key : Option<&'a str>,
}

/// LibreTranslate response body. Only the translation is of interest.
#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Sends texts to a LibreTranslate server. The client holds no per-request
/// state, so one instance can serve any number of nodes and threads.
///
#[derive(Clone)]
pub struct TranslationClient {
    agent  : ureq::Agent,
    config : ClientConfig,
}

impl Default for TranslationClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl TranslationClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
                          .timeout(config.timeout())
                          .build();
        TranslationClient { agent, config }
    }

    /// Translates `text` with a single request to the endpoint's server.
    /// # Arguments
    /// * `text`     - The text to translate. May be empty or span lines.
    /// * `source`   - Code of the language of the text, or "auto".
    /// * `target`   - Code of the language to translate to.
    /// * `endpoint` - The server to ask, and the API key for it, if any.
    /// # Returns
    /// * `Ok()` holds the translation, or "No translation found" if the
    ///   server's answer had none. `Err()` holds the failure category.
    ///
    pub fn translate(&self,
                     text     : &str,
                     source   : &str,
                     target   : &str,
                     endpoint : &Endpoint)

        -> Result<String, TranslationError>
    {
        let url  = endpoint.url(&self.config);
        let mode = endpoint.mode();

        let request = TranslationRequest {
            q       : text,
            source,
            target,
            format  : "text",
            api_key : endpoint.api_key(),
        };

        debug!(url, source, target,
               source_name = find_by_code(source).map_or("?", |l| l.name),
               target_name = find_by_code(target).map_or("?", |l| l.name),
               chars = text.chars().count(),
               "sending translation request");

        let result = self.agent
                         .post(url)
                         .set("Content-Type", "application/json")
                         .send_json(&request)
                         .map_err(|err| map_request_error(err, mode))
                         .and_then(|response| {
                             response.into_json::<TranslationResponse>()
                                     .map_err(map_body_error)
                         });
        match result {
            Ok(response) => {
                Ok(response.translated_text
                           .unwrap_or_else(|| NO_TRANSLATION.to_string()))
            },
            Err(err) => {
                warn!(url, ?mode, error = %err, "translation failed");
                Err(err)
            }
        }
    }

    /// Like `translate()`, but folds failures into the returned string, which
    /// is what a node outputs.
    ///
    pub fn translate_text(&self,
                          text     : &str,
                          source   : &str,
                          target   : &str,
                          endpoint : &Endpoint)
        -> String
    {
        flatten(self.translate(text, source, target, endpoint))
    }
}

/// Turns a translation result into node output text.
pub fn flatten(result: Result<String, TranslationError>) -> String {
    result.unwrap_or_else(|err| err.to_string())
}

/// Translates with the LibreTranslate server on this machine, the one at
/// `config.local_url`. Failures come back as the error text.
///
pub fn translate_text_locally(config : &ClientConfig,
                              text   : &str,
                              source : &str,
                              target : &str)
    -> String
{
    TranslationClient::new(config.clone())
        .translate_text(text, source, target, &Endpoint::Local)
}

/// Translates with the public LibreTranslate server, the one at
/// `config.online_url`. An empty `api_key` is left out of the request.
/// Failures come back as the error text.
///
pub fn translate_text_online(config  : &ClientConfig,
                             text    : &str,
                             source  : &str,
                             target  : &str,
                             api_key : &str)
    -> String
{
    TranslationClient::new(config.clone())
        .translate_text(text, source, target, &Endpoint::online(api_key))
}

/// Sorts a failed request into a category. Connection problems are checked
/// first, then timeouts; whatever is left is reported with its description.
///
fn map_request_error(err: ureq::Error, mode: Mode) -> TranslationError {
    match err {
        ureq::Error::Status(code, response) => {
            TranslationError::Request(status_details(code,
                                                     response.status_text(),
                                                     response.get_url()))
        },
        ureq::Error::Transport(transport) => {
            match transport.kind() {
                ErrorKind::ConnectionFailed
                | ErrorKind::Dns
                | ErrorKind::ProxyConnect => {
                    TranslationError::Connection { mode }
                },
                _ if is_timeout(&transport) => TranslationError::Timeout,
                _ => TranslationError::Request(transport.to_string()),
            }
        }
    }
}

/// Describes an error status the way Python's `requests` does, which is the
/// wording existing graphs have seen, e.g.
/// "500 Server Error: Internal Server Error for url: ...".
///
fn status_details(code: u16, reason: &str, url: &str) -> String {
    let side = if code < 500 { "Client" } else { "Server" };
    fm!("{} {} Error: {} for url: {}", code, side, reason, url)
}

/// Failures reading the body of a successful response.
fn map_body_error(err: io::Error) -> TranslationError {
    if is_timeout(&err) {
        TranslationError::Timeout
    } else {
        TranslationError::Request(err.to_string())
    }
}

/// Walks the error's source chain looking for an I/O timeout. Socket read
/// timeouts show up as `WouldBlock` on unix-like systems.
///
fn is_timeout(err: &(dyn Error + 'static)) -> bool {
    let mut next = Some(err);
    while let Some(err) = next {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(io_err.kind(), io::ErrorKind::TimedOut
                                     | io::ErrorKind::WouldBlock) {
                return true;
            }
        }
        next = err.source();
    }
    false
}
