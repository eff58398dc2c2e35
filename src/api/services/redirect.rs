//! actix-web front end
//!
//! Turns an `HttpRequest` into a `NormalizedRequest`, hands it to the
//! `RequestRouter` and returns the router's answer verbatim.

use std::sync::Arc;

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{trace, warn};

use crate::api::request::{Headers, NormalizedRequest, NormalizedResponse, Resource};
use crate::api::router::RequestRouter;
use crate::config::RoutingConfig;

/// Maps raw request paths onto router resources.
///
/// An optional leading `/{stage}` segment is stripped; the configured stage is
/// always reported as the request's stage.
#[derive(Debug, Clone)]
pub struct PathMapper {
    resource: String,
    stage: Option<String>,
}

impl PathMapper {
    pub fn new(resource: impl Into<String>, stage: Option<String>) -> Self {
        Self {
            resource: resource.into().trim_matches('/').to_string(),
            stage: stage.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.resource.clone(), config.stage.clone())
    }

    pub fn stage(&self) -> Option<&str> {
        self.stage.as_deref()
    }

    pub fn map(&self, path: &str) -> Resource {
        let mut rest = path.trim_start_matches('/');

        if let Some(stage) = &self.stage
            && let Some(after) = rest.strip_prefix(stage.as_str())
            && (after.is_empty() || after.starts_with('/'))
        {
            rest = after.trim_start_matches('/');
        }

        match rest.strip_prefix(self.resource.as_str()) {
            Some("") | Some("/") => Resource::CreationEndpoint,
            Some(tail) if tail.starts_with('/') => Resource::Token(tail[1..].to_string()),
            _ => Resource::Other(path.to_string()),
        }
    }
}

pub struct RedirectService;

impl RedirectService {
    /// Catch-all handler, mounted as the app's default service.
    pub async fn handle(
        req: HttpRequest,
        body: web::Bytes,
        router: web::Data<Arc<RequestRouter>>,
        mapper: web::Data<PathMapper>,
    ) -> HttpResponse {
        let normalized = Self::normalize(&req, &body, &mapper);
        trace!(
            "{} {} -> {:?}",
            normalized.method,
            req.path(),
            normalized.resource
        );
        let response = router.handle(normalized).await;
        Self::into_http_response(response)
    }

    pub fn normalize(req: &HttpRequest, body: &[u8], mapper: &PathMapper) -> NormalizedRequest {
        let mut headers: Headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .collect();

        // HTTP/2 carries the authority outside the header map
        if !headers.contains("host") {
            headers.insert("host", req.connection_info().host());
        }

        let mut normalized = NormalizedRequest::new(req.method().clone(), mapper.map(req.path()))
            .with_headers(headers);

        if let Some(stage) = mapper.stage() {
            normalized = normalized.with_stage(stage);
        }

        if !body.is_empty() {
            match std::str::from_utf8(body) {
                Ok(text) => normalized = normalized.with_body(text),
                Err(e) => warn!("Discarding non UTF-8 request body: {}", e),
            }
        }

        normalized
    }

    pub fn into_http_response(response: NormalizedResponse) -> HttpResponse {
        let mut builder = HttpResponse::build(response.status);
        for (name, value) in &response.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    builder.insert_header((name, value));
                }
                _ => warn!("Dropping unrepresentable response header {}", name),
            }
        }
        builder.body(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_without_stage() {
        let mapper = PathMapper::new("redirect", None);
        assert_eq!(mapper.map("/redirect"), Resource::CreationEndpoint);
        assert_eq!(mapper.map("/redirect/"), Resource::CreationEndpoint);
        assert_eq!(
            mapper.map("/redirect/abc123"),
            Resource::Token("abc123".to_string())
        );
        assert_eq!(
            mapper.map("/redirectx"),
            Resource::Other("/redirectx".to_string())
        );
        assert_eq!(mapper.map("/"), Resource::Other("/".to_string()));
    }

    #[test]
    fn test_map_strips_configured_stage() {
        let mapper = PathMapper::new("redirect", Some("prod".to_string()));
        assert_eq!(mapper.stage(), Some("prod"));
        assert_eq!(mapper.map("/prod/redirect"), Resource::CreationEndpoint);
        assert_eq!(
            mapper.map("/prod/redirect/Tok3n"),
            Resource::Token("Tok3n".to_string())
        );
        // custom domains strip the stage before the request arrives
        assert_eq!(
            mapper.map("/redirect/Tok3n"),
            Resource::Token("Tok3n".to_string())
        );
        assert_eq!(
            mapper.map("/production/redirect"),
            Resource::Other("/production/redirect".to_string())
        );
    }

    #[test]
    fn test_empty_stage_is_ignored() {
        let mapper = PathMapper::new("/redirect/", Some(String::new()));
        assert_eq!(mapper.stage(), None);
        assert_eq!(mapper.map("/redirect"), Resource::CreationEndpoint);
    }
}
