//! Persisted component configuration
//!
//! This module provides:
//! - The `{name, version}` record written to `<tool>.json`
//! - Serializers that turn it into bytes

pub mod serializer;

pub use serializer::{ConfigSerializer, JsonSerializer, PersistedConfig, SerializeError};
