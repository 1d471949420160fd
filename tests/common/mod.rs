//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use translate_dispatch::translate::{TransportError, TransportResult};
use translate_dispatch::{TranslateRequest, TranslateResponse, Transport};

/// Start a programmable translation backend on an ephemeral port and return
/// its `/translate` URL. `f` produces the HTTP status and JSON body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> String
where
    F: Fn(TranslateRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, Value)> + Send + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().route(
        "/translate",
        post(move |Json(req): Json<TranslateRequest>| {
            let f = f.clone();
            async move {
                let (status, body) = f(req).await;
                (StatusCode::from_u16(status).unwrap(), Json(body))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/translate", addr)
}

/// Backend that answers every request with a successful translation.
pub async fn start_translating_backend(tag: &'static str) -> String {
    start_programmable_backend(move |req| async move {
        (
            200,
            json!({
                "code": 200,
                "id": 1,
                "data": format!("{}:{}", tag, req.text),
                "alternatives": [],
                "source_lang": req.source_lang,
                "target_lang": req.target_lang,
                "method": "Free"
            }),
        )
    })
    .await
}

/// A pre-scripted reply for one backend of a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub enum Script {
    /// Successful translation after a delay.
    Translate { delay: Duration, data: String },
    /// Transport succeeded, payload does not qualify.
    Reject { delay: Duration, code: i64 },
    /// Transport error after a delay.
    Fail { delay: Duration },
    /// Translates after a delay for the first `healthy_calls` calls, then hangs.
    Degrading {
        healthy_calls: usize,
        delay: Duration,
        data: String,
    },
    /// Never answers.
    Hang,
}

impl Script {
    pub fn ok(delay_ms: u64, data: &str) -> Self {
        Script::Translate {
            delay: Duration::from_millis(delay_ms),
            data: data.to_string(),
        }
    }

    pub fn reject(delay_ms: u64, code: i64) -> Self {
        Script::Reject {
            delay: Duration::from_millis(delay_ms),
            code,
        }
    }

    pub fn degrading(healthy_calls: usize, delay_ms: u64, data: &str) -> Self {
        Script::Degrading {
            healthy_calls,
            delay: Duration::from_millis(delay_ms),
            data: data.to_string(),
        }
    }

    pub fn fail(delay_ms: u64) -> Self {
        Script::Fail {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// In-memory transport that follows a script per backend address and records
/// which addresses it was asked to call.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, backend: &str, script: Script) -> Self {
        self.scripts.insert(backend.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, backend: &str, request: &TranslateRequest) -> TransportResult<TranslateResponse> {
        let previous_calls = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|c| c.as_str() == backend).count();
            calls.push(backend.to_string());
            previous
        };

        let script = self
            .scripts
            .get(backend)
            .cloned()
            .unwrap_or(Script::Fail { delay: Duration::ZERO });

        let script = match script {
            Script::Degrading {
                healthy_calls,
                delay,
                data,
            } if previous_calls < healthy_calls => Script::Translate { delay, data },
            Script::Degrading { .. } => Script::Hang,
            other => other,
        };

        match script {
            Script::Translate { delay, data } => {
                tokio::time::sleep(delay).await;
                Ok(TranslateResponse {
                    code: 200,
                    data,
                    source_lang: request.source_lang.clone(),
                    target_lang: request.target_lang.clone(),
                    ..Default::default()
                })
            }
            Script::Reject { delay, code } => {
                tokio::time::sleep(delay).await;
                Ok(TranslateResponse {
                    code,
                    ..Default::default()
                })
            }
            Script::Fail { delay } => {
                tokio::time::sleep(delay).await;
                Err(TransportError::Other(format!("{} refused", backend)))
            }
            Script::Hang | Script::Degrading { .. } => std::future::pending().await,
        }
    }
}
