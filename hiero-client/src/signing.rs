use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

use crate::signer::WalletSigner;

/// A request ready for transport. `body` holds the exact bytes that were
/// signed, so it must be sent as-is.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub signature: String,
}

pub fn sign_request<B: Serialize + ?Sized>(
    method: Method,
    path: &str,
    body: Option<&B>,
    signer: &WalletSigner,
) -> Result<SignedRequest> {
    // Serialize once; the same string is signed and sent.
    let body = body.map(|b| serde_json::to_string(b)).transpose()?;

    let message = canonical_message(body.as_deref());
    let signature = signer.sign_message(message.as_bytes())?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", signature))?,
    );

    Ok(SignedRequest {
        method,
        path: path.to_string(),
        headers,
        body,
        signature,
    })
}

/// The message covered by the bearer signature: the serialized body, or the
/// empty string when there is none. Method and path are not covered.
pub fn canonical_message(body: Option<&str>) -> &str {
    body.unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEV_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn signer() -> WalletSigner {
        WalletSigner::from_private_key(DEV_KEY).unwrap()
    }

    #[test]
    fn test_bodiless_request_signs_empty_string() {
        let signer = signer();
        let request = sign_request::<()>(Method::GET, "/api/v1/agents/42", None, &signer).unwrap();

        assert!(request.body.is_none());
        assert_eq!(request.signature, signer.sign_message(b"").unwrap());
    }

    #[test]
    fn test_body_is_serialized_once_and_signed() {
        let signer = signer();
        let body = json!({"specification": "summarize news", "extra": [1, 2, 3]});
        let request =
            sign_request(Method::POST, "/api/v1/agents/generate", Some(&body), &signer).unwrap();

        let sent = request.body.as_deref().unwrap();
        assert_eq!(sent, serde_json::to_string(&body).unwrap());
        assert_eq!(request.signature, signer.sign_message(sent.as_bytes()).unwrap());
    }

    #[test]
    fn test_headers() {
        let signer = signer();
        let request = sign_request(Method::PUT, "/x", Some(&json!({})), &signer).unwrap();

        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            request.headers[AUTHORIZATION].to_str().unwrap(),
            format!("Bearer {}", request.signature)
        );
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/x");
    }

    #[test]
    fn test_path_and_method_are_not_signed() {
        let signer = signer();
        let body = json!({"input": "hi", "threadId": "t"});
        let a = sign_request(Method::POST, "/api/v1/agents/a/infer", Some(&body), &signer).unwrap();
        let b = sign_request(Method::PUT, "/api/v1/agents/b", Some(&body), &signer).unwrap();

        assert_eq!(a.signature, b.signature);
    }

    #[test]
    fn test_canonical_message() {
        assert_eq!(canonical_message(None), "");
        assert_eq!(canonical_message(Some("{}")), "{}");
    }
}
