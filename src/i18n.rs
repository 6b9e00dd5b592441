//! Localized dialog texts
//!
//! A language file is a TOML document with a `[strings]` table mapping
//! resource keys to display text:
//!
//! ```toml
//! [strings]
//! DLG_HOST_TITLE = "Nouvelle connexion"
//! BTN_CANCEL = "Annuler"
//! ```
//!
//! Keys missing from the file fall back to the built-in English text.

use crate::error::{DialogError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct LanguageDocument {
    #[serde(default)]
    strings: HashMap<String, String>,
}

/// Key → text table loaded from a language file
#[derive(Debug, Clone, Default)]
pub struct LanguageFile {
    path: Option<PathBuf>,
    strings: HashMap<String, String>,
}

impl LanguageFile {
    /// Built-in English texts only
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load a language file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DialogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut file = Self::parse(&content).map_err(|reason| DialogError::LanguageFile {
            path: path.to_path_buf(),
            reason,
        })?;
        file.path = Some(path.to_path_buf());
        debug!("Loaded {} strings from {:?}", file.strings.len(), path);
        Ok(file)
    }

    /// Parse a language document
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let doc: LanguageDocument = toml::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self {
            path: None,
            strings: doc.strings,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Text for `key`, or `default` when the file has none
    pub fn resolve(&self, key: &str, default: &str) -> String {
        self.strings
            .get(key)
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_uses_default() {
        let lang = LanguageFile::builtin();
        assert_eq!(lang.resolve("BTN_OK", "OK"), "OK");
    }

    #[test]
    fn test_parse_overrides() {
        let lang = LanguageFile::parse(
            r#"
[strings]
BTN_CANCEL = "Annuler"
BTN_HELP = ""
"#,
        )
        .unwrap();
        assert_eq!(lang.resolve("BTN_CANCEL", "Cancel"), "Annuler");
        // empty entries keep the default
        assert_eq!(lang.resolve("BTN_HELP", "Help"), "Help");
        assert_eq!(lang.resolve("BTN_OK", "OK"), "OK");
    }

    #[test]
    fn test_parse_without_strings_table() {
        let lang = LanguageFile::parse("").unwrap();
        assert_eq!(lang.resolve("DLG_HOST_TITLE", "New connection"), "New connection");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(LanguageFile::parse("[strings\nBTN_OK = ").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LanguageFile::load(Path::new("/nonexistent/lang.toml")).unwrap_err();
        assert!(matches!(err, DialogError::Io { .. }));
    }
}
