use anyhow::Context;
use serde::Serialize;

use crate::{config::FirebaseClientConfig, error::FirebaseError};

/// Marker in the HTML template that is replaced with the client config.
pub const CONFIG_PLACEHOLDER: &str = "__FIREBASE_CONFIG__";

const JSON_INDENT: &[u8] = b"            ";

/// Replaces the single [`CONFIG_PLACEHOLDER`] in `template` with `config`
/// as indented JSON. A template with zero or several placeholders is
/// rejected.
pub fn render(template: &str, config: &FirebaseClientConfig) -> Result<String, FirebaseError> {
    let found = template.matches(CONFIG_PLACEHOLDER).count();
    if found != 1 {
        return Err(FirebaseError::Template(format!(
            "expected exactly one {} placeholder, found {}",
            CONFIG_PLACEHOLDER, found
        )));
    }

    let config_json = to_indented_json(config)?;

    Ok(template.replacen(CONFIG_PLACEHOLDER, &config_json, 1))
}

fn to_indented_json(value: &impl Serialize) -> Result<String, FirebaseError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .context("Failed to serialize Firebase config")?;

    let json = String::from_utf8(buf).context("Serialized Firebase config is not UTF-8")?;
    Ok(json)
}
