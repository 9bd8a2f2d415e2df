//! Backend credentials projected from the settings file.

use std::fmt;

use crate::error::ProbeError;
use crate::settings::Settings;

/// Settings key holding the backend base URL.
pub const URL_KEY: &str = "VITE_SUPABASE_URL";
/// Settings key holding the anon access key.
pub const ANON_KEY_KEY: &str = "VITE_SUPABASE_ANON_KEY";

/// Base endpoint URL and access key. Both are non-empty once resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl Credentials {
    /// Pick the two required values out of `settings`.
    ///
    /// A missing key and an empty value are treated the same.
    pub fn resolve(settings: &Settings) -> Result<Self, ProbeError> {
        let url = settings.get(URL_KEY).filter(|v| !v.is_empty());
        let key = settings.get(ANON_KEY_KEY).filter(|v| !v.is_empty());

        match (url, key) {
            (Some(url), Some(key)) => Ok(Self {
                url: url.to_string(),
                key: key.to_string(),
            }),
            _ => Err(ProbeError::MissingCredentials),
        }
    }
}

// Keep the access key out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}
