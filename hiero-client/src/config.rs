use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Construction parameters for [`crate::HieroClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub private_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Drop for ClientConfig {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("https://api.example.com", "0xdeadbeef");
        let debug = format!("{:?}", config);
        assert!(debug.contains("https://api.example.com"));
        assert!(!debug.contains("deadbeef"));
    }
}
