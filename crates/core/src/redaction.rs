//! Secret redaction for log and error output
//!
//! Credential values handled by the provisioner are registered here before any
//! command that could echo them runs. Text passing through [`SecretRegistry::redact_text`]
//! has every registered value replaced with a placeholder.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Minimum length for a value to be considered for redaction
const MIN_REDACTION_LENGTH: usize = 8;

/// Replacement text for redacted secrets
pub const REDACTION_PLACEHOLDER: &str = "****";

/// Thread-safe registry for storing secrets that should be redacted
#[derive(Debug, Clone, Default)]
pub struct SecretRegistry {
    inner: Arc<RwLock<HashSet<String>>>,
}

impl SecretRegistry {
    /// Create a new empty secret registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret value to the registry
    ///
    /// Values shorter than the minimum length are ignored to avoid
    /// redacting common words.
    pub fn add_secret(&self, secret: &str) {
        if secret.len() < MIN_REDACTION_LENGTH {
            return;
        }

        if let Ok(mut inner) = self.inner.write() {
            inner.insert(secret.to_string());
        }
    }

    /// Replace every registered secret in `text` with the placeholder
    pub fn redact_text(&self, text: &str) -> String {
        let Ok(inner) = self.inner.read() else {
            return text.to_string();
        };

        // Longest first so a secret containing another is fully masked
        let mut secrets: Vec<&String> = inner.iter().collect();
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut result = text.to_string();
        for secret in secrets {
            if result.contains(secret.as_str()) {
                result = result.replace(secret.as_str(), REDACTION_PLACEHOLDER);
            }
        }
        result
    }

    /// Get the count of registered secrets
    pub fn secret_count(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }
}

static GLOBAL_REGISTRY: Lazy<SecretRegistry> = Lazy::new(SecretRegistry::new);

// scheme://userinfo@ with the userinfo captured out
static URL_USERINFO: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)\b([a-z][a-z0-9+.-]*://)[^/@\s]+@").ok());

/// Replace the userinfo of every URL in `text` with the placeholder
///
/// Covers credentials that were never registered, such as tokens embedded
/// in git configuration written by an earlier run.
pub fn mask_url_userinfo(text: &str) -> String {
    match URL_USERINFO.as_ref() {
        Some(pattern) => pattern
            .replace_all(text, format!("${{1}}{}@", REDACTION_PLACEHOLDER).as_str())
            .into_owned(),
        None => text.to_string(),
    }
}

/// Get the process-wide secret registry
pub fn global_registry() -> &'static SecretRegistry {
    &GLOBAL_REGISTRY
}
