//! Request wrapper over the record service.
//!
//! Screens talk to the service through `Client`, which attaches the session
//! token to every request and signs the session out when the service rejects
//! it. `FileBackend` stands in for the REST service when running locally.

mod client;
mod file;
mod seed;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

pub use client::Client;
pub use file::{Document, FileBackend, UserRecord, hash_password};
pub use seed::demo_document;

use crate::Result;

/// HTTP-style request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// A request against the record service.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub data: Option<Value>,
    pub headers: BTreeMap<String, String>,
}

/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            data: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Token from an `Authorization: Bearer <token>` header.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Service reply. `body` is `Null` for empty responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: Value::Null,
        }
    }
}

/// Something that answers requests: the local store, or a remote service.
pub trait Backend: Send {
    fn request(&mut self, request: Request) -> Result<Response>;
}
