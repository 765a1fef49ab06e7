//! Scripted in-memory transport for exercising flows without a store.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::{AdminError, AdminResult};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
    /// A 200 whose body is decoded like a real response; a malformed body
    /// fails with `AdminError::Decode`.
    Raw(String),
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Json(body)
    }

    pub fn status(code: u16) -> Self {
        Reply::Status(code, format!("{{\"errors\":\"status {code}\"}}"))
    }

    pub fn raw(body: &str) -> Self {
        Reply::Raw(body.to_string())
    }

    fn into_result(self, method: &Method, endpoint: &str) -> AdminResult<Value> {
        match self {
            Reply::Json(body) => Ok(body),
            Reply::Status(status, body) => Err(AdminError::Status {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                status,
                body,
            }),
            Reply::Raw(body) => Ok(serde_json::from_str(&body)?),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub payload: Option<Value>,
}

/// Answers from queued replies per `(method, endpoint)`. The last reply in a
/// queue repeats; unscripted requests fall back to the per-method default and
/// then to a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    defaults: Mutex<HashMap<Method, Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, endpoint: &str, reply: Reply) -> Self {
        lock(&self.routes)
            .entry((method, endpoint.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_any(self, method: Method, reply: Reply) -> Self {
        lock(&self.defaults).insert(method, reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Calls whose endpoint starts with `prefix`.
    pub fn calls_to(&self, method: Method, prefix: &str) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.method == method && c.endpoint.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn count(&self, method: Method) -> usize {
        lock(&self.calls).iter().filter(|c| c.method == method).count()
    }

    fn reply_for(&self, method: &Method, endpoint: &str) -> Reply {
        let mut routes = lock(&self.routes);
        if let Some(queue) = routes.get_mut(&(method.clone(), endpoint.to_string())) {
            let next = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(reply) = next {
                return reply;
            }
        }
        drop(routes);

        lock(&self.defaults)
            .get(method)
            .cloned()
            .unwrap_or_else(|| Reply::status(404))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
    ) -> AdminResult<Value> {
        lock(&self.calls).push(RecordedCall {
            method: method.clone(),
            endpoint: endpoint.to_string(),
            payload,
        });
        self.reply_for(&method, endpoint).into_result(&method, endpoint)
    }
}
