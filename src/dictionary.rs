use include_dir::{include_dir, Dir};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DICT_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/dict");

/// Words used when no dictionary could be loaded.
pub const FALLBACK_WORDS: [&str; 5] = ["apple", "banana", "cherry", "date", "elderberry"];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("dictionary file {path:?} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("builtin dictionary '{0}' not found")]
    UnknownBuiltin(String),

    #[error("builtin dictionary '{0}' is not valid utf-8")]
    InvalidUtf8(String),
}

/// Ordered list of candidate words, one per whitespace separated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub name: String,
    words: Vec<String>,
}

impl Dictionary {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            name: name.into(),
            words,
        }
    }

    /// Parses whitespace separated text, so a line may hold several words.
    /// Tokens containing control characters are dropped since they cannot
    /// be typed.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let words = text
            .split_whitespace()
            .filter(|word| !word.chars().any(char::is_control))
            .map(str::to_string)
            .collect();
        Self::new(name, words)
    }

    pub fn fallback() -> Self {
        Self::new(
            "fallback",
            FALLBACK_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }

    pub fn builtin(name: &str) -> Result<Self, DictionaryError> {
        let file = DICT_DIR
            .get_file(format!("{name}.txt"))
            .ok_or_else(|| DictionaryError::UnknownBuiltin(name.to_string()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| DictionaryError::InvalidUtf8(name.to_string()))?;
        Ok(Self::from_text(name, text))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let dict = Self::from_text(name, &text);
        debug!("loaded {} words from {:?}", dict.len(), path);
        Ok(dict)
    }

    /// Loads from `path` (or the named builtin when no path is given),
    /// substituting the fallback list on failure or when the source is empty.
    pub fn load_or_fallback(path: Option<&Path>, builtin: &str) -> Self {
        let loaded = match path {
            Some(p) => Self::load(p),
            None => Self::builtin(builtin),
        };

        match loaded {
            Ok(dict) if !dict.is_empty() => dict,
            Ok(dict) => {
                warn!("dictionary '{}' has no words, using fallback", dict.name);
                Self::fallback()
            }
            Err(e) => {
                warn!("failed to load dictionary: {e}, using fallback");
                Self::fallback()
            }
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
