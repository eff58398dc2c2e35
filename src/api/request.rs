//! Normalized request and response values exchanged with the HTTP front end

use std::collections::{BTreeMap, HashMap};

use actix_web::http::{Method, StatusCode};

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Request headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn host(&self) -> Option<&str> {
        self.get("host").filter(|h| !h.is_empty())
    }

    /// `true` when the Accept header asks for JSON.
    pub fn accepts_json(&self) -> bool {
        self.get("accept")
            .is_some_and(|accept| accept.contains(CONTENT_TYPE_JSON))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Which path shape the request targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The link-creation endpoint itself (`/redirect`)
    CreationEndpoint,
    /// A token path (`/redirect/{token}`)
    Token(String),
    /// Anything else
    Other(String),
}

#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    pub method: Method,
    pub resource: Resource,
    /// `None` for bare invocations that carry no header context at all
    pub headers: Option<Headers>,
    /// Deployment stage from the request context
    pub stage: Option<String>,
    pub body: Option<String>,
}

impl NormalizedRequest {
    pub fn new(method: Method, resource: Resource) -> Self {
        Self {
            method,
            resource,
            headers: None,
            stage: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(Headers::new).insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn accepts_json(&self) -> bool {
        self.headers.as_ref().is_some_and(Headers::accepts_json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResponse {
    pub status: StatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl NormalizedResponse {
    /// Response with the headers every answer carries.
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, CONTENT_TYPE_HTML, body)
    }

    pub fn json(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, CONTENT_TYPE_JSON, body)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
