use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AdminError, AdminResult};
use crate::transport::{HttpTransport, Transport};

/// Entry point for every admin API call. Requests are issued one at a time,
/// each awaited before the next.
#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<dyn Transport>,
}

impl AdminClient {
    pub fn new(config: ApiConfig) -> AdminResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
    ) -> AdminResult<Value> {
        self.transport.send(method, endpoint, payload).await
    }

    pub async fn get(&self, endpoint: &str) -> AdminResult<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    pub async fn post(&self, endpoint: &str, payload: Option<Value>) -> AdminResult<Value> {
        self.request(Method::POST, endpoint, payload).await
    }

    pub async fn put(&self, endpoint: &str, payload: Value) -> AdminResult<Value> {
        self.request(Method::PUT, endpoint, Some(payload)).await
    }

    pub async fn delete(&self, endpoint: &str) -> AdminResult<()> {
        self.request(Method::DELETE, endpoint, None).await?;
        Ok(())
    }

    /// GET and unwrap the resource stored under `key`.
    pub async fn get_resource<T: DeserializeOwned>(&self, endpoint: &str, key: &str) -> AdminResult<T> {
        let body = self.get(endpoint).await?;
        extract(body, endpoint, key)
    }

    /// GET a collection endpoint and unwrap the list under `key`.
    pub async fn get_list<T: DeserializeOwned>(&self, endpoint: &str, key: &str) -> AdminResult<Vec<T>> {
        self.get_resource(endpoint, key).await
    }
}

/// Wraps a payload as `{key: payload}`, the shape every write endpoint expects.
pub fn envelope<T: Serialize + ?Sized>(key: &str, payload: &T) -> AdminResult<Value> {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), serde_json::to_value(payload)?);
    Ok(Value::Object(map))
}

/// Pulls `body[key]` out of a response and decodes it.
pub fn extract<T: DeserializeOwned>(mut body: Value, endpoint: &str, key: &str) -> AdminResult<T> {
    match body.get_mut(key).map(Value::take) {
        Some(Value::Null) | None => Err(AdminError::MissingField {
            endpoint: endpoint.to_string(),
            field: key.to_string(),
        }),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}
