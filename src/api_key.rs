//! API key provisioning.
//!
//! The key is a locally generated identifier for this installation: created
//! once, persisted in `config.json`, stable across restarts. It is not a
//! security credential, so the RNG is deliberately non-cryptographic.

use std::path::Path;

use rand::Rng;
use serde_json::Value;

use crate::config;
use crate::error::AppError;

/// Length of a generated API key.
pub const API_KEY_LEN: usize = 32;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh key: 32 characters drawn uniformly from `[0-9a-z]`.
/// No uniqueness check against existing keys; collisions over a 36^32 space
/// are not a practical concern.
pub fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    (0..API_KEY_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Ensure the config record at `config_path` holds an `api_key` and return it.
///
/// Loads the record (missing file yields an empty one), reuses a stored
/// string key as-is, otherwise generates a key and writes the merged record
/// back. The file is only written when a key is actually added, so an intact
/// config is never rewritten. A non-string `api_key` (hand-edited file) is
/// treated as absent and replaced.
///
/// Read, parse, and write failures propagate to the caller.
pub fn provision_api_key(config_path: &Path) -> Result<String, AppError> {
    let mut cfg = config::load_config(config_path)?;

    if let Some(key) = cfg.get("api_key").and_then(Value::as_str) {
        tracing::debug!(path = %config_path.display(), "Reusing persisted API key");
        return Ok(key.to_string());
    }

    let key = generate_api_key();
    cfg.insert("api_key".to_string(), Value::String(key.clone()));
    config::save_config(config_path, &cfg)?;
    tracing::info!(path = %config_path.display(), "Generated new API key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_generated_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), API_KEY_LEN);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generated_keys_differ() {
        // Probabilistic, but two equal draws from a 36^32 space mean a broken RNG.
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn test_provision_creates_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let first = provision_api_key(&path).unwrap();
        assert_eq!(first.len(), API_KEY_LEN);
        assert!(path.exists());

        // A second call against the same file simulates an app restart.
        let second = provision_api_key(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_key_returned_without_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = r#"{"api_key":"k3j9x2m8q1w5e7r4t6y0u9i8o7p6a5s4","theme":"dark"}"#;
        std::fs::write(&path, original).unwrap();

        let key = provision_api_key(&path).unwrap();
        assert_eq!(key, "k3j9x2m8q1w5e7r4t6y0u9i8o7p6a5s4");

        // Byte-identical: an intact config must not be rewritten.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_provision_merges_with_existing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let key = provision_api_key(&path).unwrap();

        let cfg = config::load_config(&path).unwrap();
        assert_eq!(cfg.get("theme"), Some(&json!("dark")));
        assert_eq!(cfg.get("api_key"), Some(&json!(key)));
    }

    #[test]
    fn test_non_string_key_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_key":42,"theme":"dark"}"#).unwrap();

        let key = provision_api_key(&path).unwrap();
        assert_eq!(key.len(), API_KEY_LEN);

        let cfg = config::load_config(&path).unwrap();
        assert_eq!(cfg.get("api_key"), Some(&json!(key)));
        assert_eq!(cfg.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_corrupt_config_propagates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        assert!(provision_api_key(&path).is_err());
    }
}
