use anyhow::{anyhow, Result};
use hiero_protocol::{ApiError, ApiResponse, QueryParams};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::signer::WalletSigner;
use crate::signing::{sign_request, SignedRequest};

/// Client for the agents and services API.
///
/// Every call signs its body with the wallet key and returns an
/// [`ApiResponse`]; failures never surface as `Err` or panics.
pub struct HieroClient {
    base_url: String,
    signer: WalletSigner,
    http: reqwest::Client,
}

impl HieroClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Build a client on top of an existing `reqwest::Client`, e.g. one with
    /// a custom timeout or proxy.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Result<Self> {
        let signer = WalletSigner::from_private_key(&config.private_key)?;
        let base_url = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url)
            .to_string();

        Ok(Self {
            base_url,
            signer,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn signer(&self) -> &WalletSigner {
        &self.signer
    }

    /// Address of the wallet that signs this client's requests.
    pub fn address(&self) -> String {
        self.signer.address()
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match sign_request(method.clone(), path, body, &self.signer) {
            Ok(request) => self.execute(request).await,
            Err(e) => {
                warn!("Failed to sign {} {}: {:#}", method, path, e);
                ApiResponse::Error(ApiError::request_failed(format!("{:#}", e)))
            }
        }
    }

    pub(crate) async fn request_without_body<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> ApiResponse<T> {
        self.request::<T, ()>(method, path, None).await
    }

    /// Send a signed request and normalize the outcome.
    ///
    /// - 2xx: the body decoded as `T`
    /// - other status: the server's error body, passed through
    /// - no response, non-JSON body or undecodable payload: a locally
    ///   synthesized `Request failed` error
    pub async fn execute<T: DeserializeOwned>(&self, request: SignedRequest) -> ApiResponse<T> {
        let method = request.method.clone();
        let path = request.path.clone();

        match self.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {:#}", method, path, e);
                ApiResponse::Error(ApiError::request_failed(format!("{:#}", e)))
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: SignedRequest) -> Result<ApiResponse<T>> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let payload = parse_body(status, &bytes)?;

        if !status.is_success() {
            warn!("{} {} returned {}", request.method, request.path, status);
            return Ok(ApiResponse::Error(error_from_body(status, payload)));
        }

        let data = serde_json::from_value(payload)
            .map_err(|e| anyhow!("Unexpected response payload: {}", e))?;
        Ok(ApiResponse::Data(data))
    }
}

impl std::fmt::Debug for HieroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HieroClient")
            .field("base_url", &self.base_url)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// An empty 2xx body reads as `null` so bodiless successes decode into `()`.
/// An empty error body is a parse failure like any other non-JSON body.
fn parse_body(status: StatusCode, bytes: &[u8]) -> Result<Value> {
    if status.is_success() && bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| anyhow!("Invalid JSON response: {}", e))
}

/// Server error bodies pass through unchanged when they carry a string
/// `error` field; anything else is wrapped under `details`.
fn error_from_body(status: StatusCode, body: Value) -> ApiError {
    match serde_json::from_value::<ApiError>(body.clone()) {
        Ok(error) => error,
        Err(_) => ApiError::with_details(format!("HTTP {}", status.as_u16()), body),
    }
}

/// Append form-encoded parameters to `path`. The `?` is always present, even
/// when no parameter is set.
pub(crate) fn with_query<P: QueryParams>(path: &str, params: Option<&P>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(params) = params {
        for (key, value) in params.query_pairs() {
            query.append_pair(key, &value);
        }
    }
    format!("{}?{}", path, query.finish())
}
