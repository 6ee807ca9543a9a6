use anyhow::{anyhow, Result};
use hiero_protocol::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub async fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow!("Invalid JSON in {:?}: {}", path.as_ref(), e))
}

/// Print the payload on success; print the error object and fail otherwise.
pub fn print_response<T: Serialize>(response: ApiResponse<T>) -> Result<()> {
    match response {
        ApiResponse::Data(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        ApiResponse::Error(error) => {
            eprintln!("{}", serde_json::to_string_pretty(&error)?);
            Err(anyhow!("API request failed: {}", error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiero_protocol::{AgentUpdate, ApiError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"name": "renamed"}"#)
            .unwrap();
        temp_file.flush().unwrap();

        let update: AgentUpdate = read_json_file(temp_file.path()).await.unwrap();
        assert_eq!(update.name.as_deref(), Some("renamed"));
        assert!(update.configuration.is_none());
    }

    #[tokio::test]
    async fn test_read_json_file_rejects_garbage() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"name = renamed").unwrap();
        temp_file.flush().unwrap();

        let result: Result<AgentUpdate> = read_json_file(temp_file.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_print_response_fails_on_error() {
        assert!(print_response(ApiResponse::Data(1)).is_ok());

        let failed: ApiResponse<u32> = ApiResponse::Error(ApiError::new("Unauthorized"));
        let error = print_response(failed).unwrap_err();
        assert!(error.to_string().contains("Unauthorized"));
    }
}
