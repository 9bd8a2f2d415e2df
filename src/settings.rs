//! Settings file loading.
//!
//! The file is plain `KEY=VALUE` text, one pair per line. Lines starting with `#`
//! and lines without a `=` are skipped. Values may be wrapped in single or double
//! quotes, which are stripped once.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ProbeError;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".env";

const SEPARATOR: char = '=';
const COMMENT_MARKER: char = '#';

/// Key/value pairs read from a settings file. Read-only after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: HashMap<String, String>,
}

impl Settings {
    /// Read and parse the settings file at `path`.
    ///
    /// The file handle is dropped before this returns on both paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ProbeError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&contents);
        if settings.is_empty() {
            tracing::warn!("{} holds no settings", path.display());
        }
        tracing::debug!(
            "Loaded {} setting(s) from {}",
            settings.len(),
            path.display()
        );
        Ok(settings)
    }

    /// Parse settings text. Later duplicates overwrite earlier ones.
    pub fn parse(contents: &str) -> Self {
        let entries = contents.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    // The comment check is on the raw line, before trimming.
    if line.starts_with(COMMENT_MARKER) {
        return None;
    }
    let (key, value) = line.split_once(SEPARATOR)?;
    Some((key.trim().to_string(), unquote(value.trim()).to_string()))
}

/// Strip one layer of matching single or double quotes.
///
/// A quote without a partner on the other end is kept: `"abc` stays `"abc`.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
