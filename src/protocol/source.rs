//! Table files on disk.
//!
//! The file extension selects the format through [`SOURCE_FORMATS`]. Reads
//! are tolerant: a missing or malformed table is logged and treated as empty,
//! so a run can still paint whatever the remaining tables describe.

use std::fs;
use std::path::Path;

use ron::ser::PrettyConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialization formats a table file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Ron,
}

/// Extension → format lookup table.
pub static SOURCE_FORMATS: [(&str, SourceFormat); 2] = [
    ("json", SourceFormat::Json),
    ("ron", SourceFormat::Ron),
];

/// Errors from reading or writing a table file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unsupported data source '{0}'")]
    UnsupportedFormat(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ron error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("ron error: {0}")]
    RonWrite(#[from] ron::Error),
}

impl SourceFormat {
    /// Looks a format up by file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        SOURCE_FORMATS
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, f)| *f)
    }

    /// Picks the format for a path, or fails with the path's extension.
    pub fn for_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| SourceError::UnsupportedFormat(ext.to_string()))
    }

    /// Parses `text` in this format.
    pub fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T, SourceError> {
        Ok(match self {
            SourceFormat::Json => serde_json::from_str(text)?,
            SourceFormat::Ron => ron::from_str(text)?,
        })
    }

    /// Serializes `value` in this format, pretty-printed.
    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, SourceError> {
        Ok(match self {
            SourceFormat::Json => serde_json::to_string_pretty(value)?,
            SourceFormat::Ron => ron::ser::to_string_pretty(value, PrettyConfig::default())?,
        })
    }
}

/// Reads and decodes a table file, propagating every failure.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let format = SourceFormat::for_path(path)?;
    let text = fs::read_to_string(path)?;
    format.decode(&text)
}

/// Reads a table file, falling back to an empty table on any failure.
pub fn load_table<T: DeserializeOwned + Default>(path: &Path) -> T {
    tracing::info!(path = %path.display(), "loading data from file");
    match read_table(path) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load table");
            tracing::warn!(
                path = %path.display(),
                "assuming file is empty or missing, using an empty table"
            );
            T::default()
        }
    }
}

/// Writes a table file in the format its extension names.
pub fn write_table<T: Serialize>(value: &T, path: &Path) -> Result<(), SourceError> {
    let format = SourceFormat::for_path(path)?;
    fs::write(path, format.encode(value)?)?;
    tracing::info!(path = %path.display(), "wrote table");
    Ok(())
}
