#[cfg(test)]
#[path = "secrets_test.rs"]
mod tests;

use std::env;

/// Name of the secret holding the Gemini API key.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

pub struct Secrets {}

impl Secrets {
    /// Looks up a secret by name from the process environment. Empty values
    /// are treated as absent.
    pub fn get(name: &str) -> Option<String> {
        match env::var(name) {
            Ok(val) if !val.trim().is_empty() => return Some(val),
            _ => return None,
        }
    }
}
