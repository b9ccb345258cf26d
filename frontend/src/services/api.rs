use anyhow::anyhow;
use async_trait::async_trait;
use finanzas_core::TransactionStore;
use gloo::net::http::Request;
use serde::Deserialize;
use shared::{NewTransactionRecord, TransactionRecord};

const DEFAULT_BASE_URL: &str = "http://localhost:54321";
const TRANSACTIONS_PATH: &str = "/rest/v1/transactions";

/// Where the backend lives and which credentials to forward.
///
/// Credentials come from the caller; the form never signs anyone in.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("FINANZAS_API_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            api_key: option_env!("FINANZAS_API_KEY").map(str::to_string),
            access_token: None,
        }
    }
}

/// Error body returned by the REST layer
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// API client for the `transactions` resource
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new API client with the default configuration
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Forward the signed-in user's token on every request
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(token.into());
        self
    }

    fn transactions_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), TRANSACTIONS_PATH)
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Prefer", "return=representation".to_string()),
            ("Accept", "application/vnd.pgrst.object+json".to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            headers.push(("apikey", key.clone()));
        }
        if let Some(token) = self.config.access_token.as_ref().or(self.config.api_key.as_ref()) {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }

    /// Insert one transaction row and return it as stored
    pub async fn insert_transaction(&self, record: &NewTransactionRecord) -> Result<TransactionRecord, String> {
        let url = self.transactions_url();

        let mut builder = Request::post(&url);
        for (name, value) in self.headers() {
            builder = builder.header(name, &value);
        }

        match builder
            .json(&[record])
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<TransactionRecord>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let status = response.status();
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(format!("Server error {}: {}", status, describe_error_body(&error_text)))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TransactionStore for ApiClient {
    async fn insert(&self, record: &NewTransactionRecord) -> anyhow::Result<TransactionRecord> {
        self.insert_transaction(record).await.map_err(|e| anyhow!(e))
    }
}

/// Pull the readable parts out of an error body, falling back to the raw text
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(error) => {
            let mut text = error.message;
            if let Some(code) = error.code {
                text = format!("{} ({})", text, code);
            }
            if let Some(details) = error.details.filter(|d| !d.is_empty()) {
                text = format!("{}: {}", text, details);
            }
            text
        }
        Err(_) => body.trim().to_string(),
    }
}
