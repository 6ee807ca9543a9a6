use anyhow::{anyhow, Result};
use hiero_client::ClientConfig;
use serde::Deserialize;
use std::path::Path;

pub const PRIVATE_KEY_ENV: &str = "HIERO_PRIVATE_KEY";

/// Settings read from the optional TOML config file. Command-line flags and
/// the environment take precedence over anything set here.
#[derive(Default, Deserialize)]
pub struct CliConfig {
    pub base_url: Option<String>,
    pub private_key: Option<String>,
}

impl CliConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: CliConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn private_key(&self, env_key: Option<String>) -> Result<String> {
        env_key
            .or_else(|| self.private_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No private key configured; set {} or private_key in the config file",
                    PRIVATE_KEY_ENV
                )
            })
    }

    pub fn client_config(
        &self,
        base_url: Option<String>,
        env_key: Option<String>,
    ) -> Result<ClientConfig> {
        let base_url = base_url
            .or_else(|| self.base_url.clone())
            .ok_or_else(|| anyhow!("No base URL configured; pass --base-url or set base_url"))?;
        Ok(ClientConfig::new(base_url, self.private_key(env_key)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_config_file() {
        let config_content = r#"
base_url = "https://api.example.com/"
private_key = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = CliConfig::load(temp_file.path()).await.unwrap();
        let client_config = config.client_config(None, None).unwrap();
        assert_eq!(client_config.base_url, "https://api.example.com/");
        assert!(client_config.private_key.starts_with("0x59c6"));
    }

    #[tokio::test]
    async fn test_load_rejects_bad_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"base_url = [").unwrap();
        temp_file.flush().unwrap();

        assert!(CliConfig::load(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = CliConfig {
            base_url: Some("https://file.example.com".to_string()),
            private_key: Some("0xfile".to_string()),
        };

        let client_config = config
            .client_config(
                Some("https://flag.example.com".to_string()),
                Some("0xenv".to_string()),
            )
            .unwrap();
        assert_eq!(client_config.base_url, "https://flag.example.com");
        assert_eq!(client_config.private_key, "0xenv");
    }

    #[test]
    fn test_missing_settings_are_errors() {
        let config = CliConfig::default();
        assert!(config.private_key(None).is_err());
        assert!(config.client_config(None, Some("0xenv".to_string())).is_err());
        assert!(config
            .client_config(Some("https://api.example.com".to_string()), None)
            .is_err());
    }
}
