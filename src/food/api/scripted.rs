//! Canned-response gateway for workflow tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use super::traits::Gateway;
use crate::error::TransportError;
use crate::food::models::UploadedImage;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub file_name: Option<String>,
}

#[derive(Default)]
pub(crate) struct ScriptedGateway {
    routes: Mutex<HashMap<(Method, String), Route>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, body: Value) {
        self.insert(method, path, Reply::Json(body), None);
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.insert(method, path, Reply::Status(status), None);
    }

    /// The reply is held back until the returned gate is notified.
    pub fn gated(&self, method: Method, path: &str, body: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.insert(method, path, Reply::Json(body), Some(gate.clone()));
        gate
    }

    pub fn gated_failure(&self, method: Method, path: &str, status: u16) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.insert(method, path, Reply::Status(status), Some(gate.clone()));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn insert(&self, method: Method, path: &str, reply: Reply, gate: Option<Arc<Notify>>) {
        self.routes
            .lock()
            .insert((method, path.to_string()), Route { reply, gate });
    }

    async fn respond(&self, call: Call) -> Result<Value, TransportError> {
        let route = self
            .routes
            .lock()
            .get(&(call.method.clone(), call.path.clone()))
            .cloned();
        self.calls.lock().push(call);

        let Some(route) = route else {
            return Err(TransportError::Status {
                status: 404,
                body: "no scripted route".to_string(),
            });
        };

        if let Some(gate) = route.gate {
            gate.notified().await;
        }

        match route.reply {
            Reply::Json(value) => Ok(value),
            Reply::Status(status) => Err(TransportError::Status {
                status,
                body: String::new(),
            }),
        }
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.respond(Call {
            method,
            path: path.to_string(),
            body,
            file_name: None,
        })
        .await
    }

    async fn upload(&self, path: &str, image: &UploadedImage) -> Result<Value, TransportError> {
        self.respond(Call {
            method: Method::POST,
            path: path.to_string(),
            body: None,
            file_name: Some(image.file_name.clone()),
        })
        .await
    }
}
