//! The curated list of languages the translation nodes offer, and lookups
//! from the display names shown in the host's choice widgets to the codes the
//! translation server understands.
//!

use serde::Serialize;

/// A single row of the language table: the human readable name shown to the
/// user, and the short code sent to the translation server.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub name : &'static str,
    pub code : &'static str,
}

/// The "let the server figure it out" entry. Only meaningful as a source
/// language.
///
pub const AUTO_DETECT: LanguageEntry = LanguageEntry {
    name: "Auto Detect",
    code: "auto"
};

/// Finds the code for a language display name. The match is exact and case
/// sensitive, since the names come straight from the node's choice list.
/// # Arguments
/// * `name` - The display name, e.g. "French".
/// # Returns
/// * The code for the language, or `None` if the name isn't in the table.
///
pub fn resolve_code(name: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES.iter()
                       .find(|lang| lang.name == name)
                       .map(|lang| lang.code)
}

/// Reverse lookup. Gives back the table entry having the given code.
///
pub fn find_by_code(code: &str) -> Option<&'static LanguageEntry> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

/// The full language table, in presentation order.
///
pub fn languages() -> &'static [LanguageEntry] {
    &SUPPORTED_LANGUAGES
}

/// The display names in presentation order. This is the choice list for the
/// `source` and `target` node inputs.
///
pub fn display_names() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|lang| lang.name).collect()
}

const fn lang(name: &'static str, code: &'static str) -> LanguageEntry {
    LanguageEntry { name, code }
}

// A listing of all the supported languages. Saved graphs store the selected
// name, so names (including "Ukranian") and order must stay as they are.

static SUPPORTED_LANGUAGES: [LanguageEntry; 44] = [
    AUTO_DETECT,
    lang("English",       "en"), lang("Albanian",      "sq"),
    lang("Arabic",        "ar"), lang("Azerbaijani",   "az"),
    lang("Bengali",       "bn"), lang("Bulgarian",     "bg"),
    lang("Catalan",       "ca"), lang("Chinese",       "zh"),
    lang("Chinese (traditional)",                      "zt"),
    lang("Czech",         "cs"), lang("Danish",        "da"),
    lang("Dutch",         "nl"), lang("Esperanto",     "eo"),
    lang("Estonian",      "et"), lang("Finnish",       "fi"),
    lang("French",        "fr"), lang("German",        "de"),
    lang("Greek",         "el"), lang("Hindi",         "hi"),
    lang("Hungarian",     "hu"), lang("Indonesian",    "id"),
    lang("Irish",         "ga"), lang("Italian",       "it"),
    lang("Japanese",      "ja"), lang("Korean",        "ko"),
    lang("Latvian",       "lv"), lang("Lithuanian",    "lt"),
    lang("Malay",         "ms"), lang("Norwegian",     "nb"),
    lang("Persian",       "fa"), lang("Polish",        "pl"),
    lang("Portuguese",    "pt"), lang("Romanian",      "ro"),
    lang("Russian",       "ru"), lang("Slovak",        "sk"),
    lang("Slovenian",     "sl"), lang("Spanish",       "es"),
    lang("Swedish",       "sv"), lang("Tagalog",       "tl"),
    lang("Thai",          "th"), lang("Turkish",       "tr"),
    lang("Ukranian",      "uk"), lang("Urdu",          "ur"),
];
