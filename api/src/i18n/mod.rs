//! Localized message catalogue
//!
//! Messages are read from `i18n/error_messages.toml` when the file exists in
//! the working directory, otherwise from the copy embedded at build time.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub use pd_shared::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub en: String,
    pub fa: String,
    pub code: String,
    pub http_status: u16,
}

impl ErrorMessage {
    pub fn text(&self, lang: Language) -> &str {
        match lang {
            Language::English => &self.en,
            Language::Persian => &self.fa,
        }
    }
}

/// Display name of a form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeName {
    pub en: String,
    pub fa: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorMessages {
    #[serde(default)]
    pub otp: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub validation: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub general: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeName>,
}

const EMBEDDED_MESSAGES: &str = include_str!("../../i18n/error_messages.toml");

pub static ERROR_MESSAGES: Lazy<ErrorMessages> = Lazy::new(|| match load_error_messages() {
    Ok(messages) => messages,
    Err(e) => {
        log::error!("Failed to load error messages, responses will use fallback text: {}", e);
        ErrorMessages::default()
    }
});

fn load_error_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    let config_path = Path::new("i18n/error_messages.toml");

    if config_path.exists() {
        let content = fs::read_to_string(config_path)?;
        let messages: ErrorMessages = toml::from_str(&content)?;
        Ok(messages)
    } else {
        load_default_messages()
    }
}

fn load_default_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    let messages: ErrorMessages = toml::from_str(EMBEDDED_MESSAGES)?;
    Ok(messages)
}

/// Look up `(code, text, http_status)` for a catalogue entry
pub fn get_error_message(category: &str, key: &str, lang: Language) -> Option<(String, String, u16)> {
    let messages = &*ERROR_MESSAGES;

    let category_map = match category {
        "otp" => &messages.otp,
        "validation" => &messages.validation,
        "general" => &messages.general,
        _ => return None,
    };

    category_map
        .get(key)
        .map(|msg| (msg.code.clone(), msg.text(lang).to_string(), msg.http_status))
}

/// Localized display name of a form field, or the raw field name
pub fn attribute_name(field: &str, lang: Language) -> String {
    match ERROR_MESSAGES.attributes.get(field) {
        Some(name) => match lang {
            Language::English => name.en.clone(),
            Language::Persian => name.fa.clone(),
        },
        None => field.replace('_', " "),
    }
}

pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
