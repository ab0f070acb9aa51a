//! API key resolution.
//!
//! Tries, in order: the managed secrets file, the environment, then a
//! direct terminal prompt. The ordering is a policy decision (prefer
//! managed secrets) — keep it if you add sources.

use std::io::{BufRead, Write};
use std::path::Path;

use secrecy::SecretString;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Filename of the managed secrets file inside the config directory.
pub const SECRETS_FILE: &str = "credentials";

/// Resolve the API key, returning the first non-empty result.
///
/// `None` means no source produced a key — the interactive flow should
/// be disabled with a visible configuration warning.
pub fn resolve_api_key(config_dir: &Path, allow_prompt: bool) -> Option<SecretString> {
    if let Some(key) = from_secrets_file(config_dir) {
        tracing::info!("API key loaded from secrets file");
        return Some(key);
    }
    if let Some(key) = from_env() {
        tracing::info!("API key loaded from {API_KEY_ENV}");
        return Some(key);
    }
    if allow_prompt {
        if let Some(key) = from_terminal() {
            tracing::info!("API key entered at terminal");
            return Some(key);
        }
    }
    None
}

/// First non-empty line of `<config_dir>/credentials`, if present.
fn from_secrets_file(config_dir: &Path) -> Option<SecretString> {
    let path = config_dir.join(SECRETS_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(SecretString::from)
}

fn from_env() -> Option<SecretString> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

/// Ask for the key on the terminal. A blank line means absent.
fn from_terminal() -> Option<SecretString> {
    eprint!("Enter your Gemini API key (blank to skip): ");
    std::io::stderr().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    let key = line.trim();
    if key.is_empty() {
        None
    } else {
        Some(SecretString::from(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn secrets_file_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SECRETS_FILE), "\n  file-key  \n").unwrap();

        let key = from_secrets_file(dir.path()).unwrap();
        assert_eq!(key.expose_secret(), "file-key");
    }

    #[test]
    fn missing_or_empty_secrets_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(from_secrets_file(dir.path()).is_none());

        std::fs::write(dir.path().join(SECRETS_FILE), "\n   \n").unwrap();
        assert!(from_secrets_file(dir.path()).is_none());
    }

    #[test]
    fn resolve_without_sources_or_prompt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        // Note: assumes GEMINI_API_KEY is not set in the test environment.
        if std::env::var(API_KEY_ENV).is_ok() {
            return;
        }
        assert!(resolve_api_key(dir.path(), false).is_none());
    }
}
