//! In-memory transport for tests.
//!
//! Routes match on method and URL path suffix; the most recently added
//! matching route wins, so a test can change a route's answer mid-way.
//! Unmatched requests get a 404. Every request is recorded, and hooks
//! registered with [`MockTransport::on_request`] run before the reply.

use crate::{FetchError, Method, Request, Response, Transport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

type HookFn = dyn Fn(&Request) + Send + Sync;

#[derive(Clone)]
struct Hook {
    method: Method,
    path: String,
    run: Arc<HookFn>,
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond { status: u16, body: Vec<u8> },
    Fail(FetchError),
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

/// Canned-response transport with call recording.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    hooks: Mutex<Vec<Hook>>,
    calls: Mutex<Vec<Request>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body.
    pub fn with_json(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.set_json(method, path, status, body);
        self
    }

    /// Answer `method path` with a plain-text body.
    pub fn with_text(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.set_text(method, path, status, body);
        self
    }

    /// Fail `method path` with a transport error.
    pub fn with_network_error(self, method: Method, path: &str, message: &str) -> Self {
        self.set_network_error(method, path, message);
        self
    }

    pub fn set_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.push(method, path, Reply::Respond {
            status,
            body: body.to_string().into_bytes(),
        });
    }

    pub fn set_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Reply::Respond {
            status,
            body: body.as_bytes().to_vec(),
        });
    }

    pub fn set_network_error(&self, method: Method, path: &str, message: &str) {
        self.push(
            method,
            path,
            Reply::Fail(FetchError::RequestError(message.to_string())),
        );
    }

    /// Run `hook` whenever `method path` is requested, before the reply is
    /// produced. Lets a test change shared state while a call is in flight.
    pub fn on_request<F>(self, method: Method, path: &str, hook: F) -> Self
    where
        F: Fn(&Request) + Send + Sync + 'static,
    {
        lock(&self.hooks).push(Hook {
            method,
            path: path.to_string(),
            run: Arc::new(hook),
        });
        self
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        lock(&self.routes).push(Route {
            method,
            path: path.to_string(),
            reply,
        });
    }

    /// Every request sent so far, oldest first.
    pub fn calls(&self) -> Vec<Request> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests whose method matches and whose URL path ends with `path`.
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Request> {
        lock(&self.calls)
            .iter()
            .filter(|r| r.method == method && path_of(&r.url).ends_with(path))
            .cloned()
            .collect()
    }
}

fn path_of(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    match without_query.find("://") {
        Some(scheme_end) => {
            let rest = &without_query[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => without_query,
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let path = path_of(&request.url);
        let hooks: Vec<Hook> = lock(&self.hooks)
            .iter()
            .filter(|h| h.method == request.method && path.ends_with(&h.path))
            .cloned()
            .collect();
        for hook in &hooks {
            (hook.run)(&request);
        }

        let reply = {
            let routes = lock(&self.routes);
            routes
                .iter()
                .rev()
                .find(|r| r.method == request.method && path.ends_with(&r.path))
                .map(|r| r.reply.clone())
        };
        lock(&self.calls).push(request);

        match reply {
            Some(Reply::Respond { status, body }) => {
                let mut headers = HashMap::new();
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                Ok(Response::new(status, headers, body))
            }
            Some(Reply::Fail(err)) => Err(err),
            None => Ok(Response::new(404, HashMap::new(), b"Not Found".to_vec())),
        }
    }
}
