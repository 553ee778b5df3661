//! Test helpers: a scripted, recording [`Transport`].
//!
//! Each path gets a queue of canned results; the last one sticks so repeated
//! refreshes keep working. Posts can be held open to observe in-flight state.

#![cfg(test)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::TransferError;
use crate::transfer::{Body, Payload, PostOptions, ProgressFn, ProgressReporter, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub auth_token: Option<String>,
    pub payload: Option<Payload>,
}

#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    routes: Mutex<HashMap<String, VecDeque<Result<Body, TransferError>>>>,
    progress_script: Mutex<Vec<f32>>,
    raw_progress: Mutex<Option<ProgressFn>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: serde_json::Value) {
        self.push(path, Ok(Body::from(body)));
    }

    pub fn fail(&self, path: &str, err: TransferError) {
        self.push(path, Err(err));
    }

    fn push(&self, path: &str, result: Result<Body, TransferError>) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(result);
    }

    /// Progress values emitted (through a [`ProgressReporter`]) during each post.
    pub fn script_progress(&self, values: &[f32]) {
        *self.progress_script.lock().unwrap() = values.to_vec();
    }

    /// Keep posts open until the returned handle is notified.
    pub fn hold_posts(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    /// The unfiltered progress callback of the last post, to simulate a
    /// transport that misbehaves after settling.
    pub fn raw_progress(&self) -> Option<ProgressFn> {
        self.raw_progress.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }

    fn next(&self, path: &str) -> Result<Body, TransferError> {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(TransferError::network(format!("no route for {path}"))),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        auth_token: Option<&str>,
    ) -> Result<Body, TransferError> {
        self.calls.lock().unwrap().push(Call {
            method: Method::Get,
            path: path.to_string(),
            query: query.to_vec(),
            auth_token: auth_token.map(str::to_string),
            payload: None,
        });
        self.next(path)
    }

    async fn post(
        &self,
        path: &str,
        payload: Payload,
        options: PostOptions,
    ) -> Result<Body, TransferError> {
        self.calls.lock().unwrap().push(Call {
            method: Method::Post,
            path: path.to_string(),
            query: Vec::new(),
            auth_token: options.auth_token.clone(),
            payload: Some(payload),
        });
        *self.raw_progress.lock().unwrap() = options.on_progress.clone();

        let reporter = ProgressReporter::new(options.on_progress);
        let script = self.progress_script.lock().unwrap().clone();
        for value in script {
            reporter.percent(value);
        }

        let hold = self.hold.lock().unwrap().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }

        let result = self.next(path);
        reporter.settle();
        result
    }
}
