//! `{ "botToken": "...", "chatId": ... }` from the state directory.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use vigil_core::errors::NotifyError;

/// Sink credentials. `Debug` never prints the token.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyCredentials {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default, deserialize_with = "chat_id_from_any")]
    pub chat_id: String,
}

impl fmt::Debug for NotifyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Load credentials. A missing file, or an absent or blank field, is `Ok(None)`.
pub fn load_credentials(path: &Path) -> Result<Option<NotifyCredentials>, NotifyError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(NotifyError::Credentials {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    let creds: NotifyCredentials = serde_json::from_str(&content).map_err(|e| NotifyError::Credentials {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    if creds.bot_token.trim().is_empty() || creds.chat_id.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(creds))
}

fn chat_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChatId {
        Number(i64),
        Text(String),
    }
    Ok(match Option::<ChatId>::deserialize(deserializer)? {
        Some(ChatId::Number(n)) => n.to_string(),
        Some(ChatId::Text(s)) => s,
        None => String::new(),
    })
}
