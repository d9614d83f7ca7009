use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::HappTvConfig;

use super::flow::ActivationCode;

/// Sends a subscription link to the TV identified by the code
#[async_trait]
pub trait TvActivator: Send + Sync {
    async fn activate(&self, code: &ActivationCode, link: &str) -> Result<(), ActivationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("activation api returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("activation request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct SendTvBody {
    /// base64 of the subscription link
    data: String,
}

#[derive(Debug, Clone)]
pub struct HappClient {
    client: Client,
    endpoint: String,
}

impl HappClient {
    pub fn new(config: &HappTvConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout()).build()?,
            endpoint: config.endpoint.clone(),
        })
    }
    fn url(&self, code: &ActivationCode) -> String {
        format!("{}{code}", self.endpoint)
    }
}

#[async_trait]
impl TvActivator for HappClient {
    async fn activate(&self, code: &ActivationCode, link: &str) -> Result<(), ActivationError> {
        let body = SendTvBody {
            data: STANDARD.encode(link),
        };
        let resp = self.client.post(self.url(code)).json(&body).send().await?;

        let status = resp.status();
        if status == StatusCode::OK {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ActivationError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let client = HappClient::new(&HappTvConfig::default()).unwrap();
        let code = ActivationCode::parse("AB12c").unwrap();
        assert_eq!(client.url(&code), "https://check.happ.su/sendtv/AB12c");

        let body = SendTvBody {
            data: STANDARD.encode("vless://key"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"data": "dmxlc3M6Ly9rZXk="})
        );
    }
}
