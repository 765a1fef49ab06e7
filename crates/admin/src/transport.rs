use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::{AdminError, AdminResult};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Sends one request to an endpoint relative to the admin API root and
/// returns the decoded body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, endpoint: &str, payload: Option<Value>)
    -> AdminResult<Value>;
}

pub struct HttpTransport {
    config: ApiConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> AdminResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
    ) -> AdminResult<Value> {
        let url = self.config.endpoint_url(endpoint);
        debug!(%method, url = %url, "request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token);
        if let Some(body) = &payload {
            request = request.json(body);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            let text = resp.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let body = resp.text().await.unwrap_or_default();
        error!(%method, endpoint, status = status.as_u16(), body = %body, "request failed");
        Err(AdminError::Status {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
