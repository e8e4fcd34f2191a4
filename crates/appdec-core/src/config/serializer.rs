//! Configuration record and its on-disk encoding

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Written once to `<app path>/<tool>.json` at the end of a successful install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Error)]
#[error("Failed to serialize configuration")]
pub struct SerializeError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

/// Turns a [`PersistedConfig`] into the bytes written to disk
///
/// Implementations must be deterministic for a given record.
pub trait ConfigSerializer {
    fn serialize(&self, config: &PersistedConfig) -> Result<Vec<u8>, SerializeError>;
}

/// Pretty-printed JSON followed by a newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl ConfigSerializer for JsonSerializer {
    fn serialize(&self, config: &PersistedConfig) -> Result<Vec<u8>, SerializeError> {
        let mut bytes =
            serde_json::to_vec_pretty(config).map_err(|e| SerializeError(Box::new(e)))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
