//! Request dispatch
//!
//! | Method | Resource            | Action                      |
//! |--------|---------------------|-----------------------------|
//! | GET    | creation endpoint   | HTML form                   |
//! | GET    | token path          | resolve-link                |
//! | POST   | any                 | create-link                 |
//! | other  | any                 | "HTTP method not supported." |

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, trace, warn};

use crate::api::domain::DomainResolver;
use crate::api::request::{NormalizedRequest, NormalizedResponse, Resource};
use crate::api::templates::render_form;
use crate::errors::LinkgateError;
use crate::services::LinkService;
use crate::utils::escape_html;

pub const METHOD_NOT_SUPPORTED: &str = "HTTP method not supported.";
pub const MALFORMED_BODY: &str = "Malformed request body.";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Body of a create-link POST
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub destination_url: String,
    #[serde(default)]
    pub custom_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateLinkResponse {
    pub shortened_url: String,
}

pub struct RequestRouter {
    links: Arc<LinkService>,
    domain: DomainResolver,
}

impl RequestRouter {
    pub fn new(links: Arc<LinkService>, domain: DomainResolver) -> Self {
        Self { links, domain }
    }

    #[instrument(skip_all, fields(method = %request.method, resource = ?request.resource))]
    pub async fn handle(&self, request: NormalizedRequest) -> NormalizedResponse {
        let base_url = self
            .domain
            .resolve(request.headers.as_ref(), request.stage.as_deref());
        trace!("Resolved base url: {}", base_url);

        match request.method {
            Method::GET => match &request.resource {
                Resource::CreationEndpoint => {
                    NormalizedResponse::html(StatusCode::OK, render_form(&base_url))
                }
                Resource::Token(token) => self.resolve_link(token).await,
                Resource::Other(path) => {
                    debug!("GET on unrouted path {}", path);
                    Self::method_not_supported()
                }
            },
            Method::POST => self.create_link(&request, &base_url).await,
            _ => Self::method_not_supported(),
        }
    }

    async fn create_link(&self, request: &NormalizedRequest, base_url: &str) -> NormalizedResponse {
        let payload = match Self::parse_body(request.body.as_deref()) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("{}", e);
                return NormalizedResponse::html(StatusCode::BAD_REQUEST, MALFORMED_BODY);
            }
        };

        let created = match self
            .links
            .create_link(&payload.destination_url, payload.custom_token.as_deref())
            .await
        {
            Ok(created) => created,
            Err(e) => return Self::error_response(&e),
        };

        let shortened_url = format!("{}/{}", base_url, created.link.token);
        debug!(
            "Created {} (token {})",
            shortened_url,
            if created.generated_token { "generated" } else { "custom" }
        );

        if request.accepts_json() {
            let body = CreateLinkResponse { shortened_url };
            match serde_json::to_string(&body) {
                Ok(json) => NormalizedResponse::json(StatusCode::OK, json),
                Err(e) => Self::error_response(&LinkgateError::from(e)),
            }
        } else {
            let link = escape_html(&shortened_url);
            NormalizedResponse::html(
                StatusCode::OK,
                format!(
                    "Shortened URL for {} created. <br>The shortened url is <a href=\"{}\">{}</a><br>",
                    escape_html(&payload.destination_url),
                    link,
                    link
                ),
            )
        }
    }

    async fn resolve_link(&self, token: &str) -> NormalizedResponse {
        match self.links.resolve_link(token).await {
            Ok(Some(destination)) => NormalizedResponse::html(StatusCode::MOVED_PERMANENTLY, "")
                .with_header("Location", destination),
            Ok(None) => {
                debug!("Token not found: {}", token);
                NormalizedResponse::html(
                    StatusCode::OK,
                    format!("Token {} Invalid. URL Not Found\n", escape_html(token)),
                )
            }
            Err(e) => Self::error_response(&e),
        }
    }

    fn parse_body(body: Option<&str>) -> Result<CreateLinkRequest, LinkgateError> {
        let body = body.ok_or_else(|| LinkgateError::malformed_input("missing request body"))?;
        serde_json::from_str(body)
            .map_err(|e| LinkgateError::malformed_input(format!("invalid create-link body: {}", e)))
    }

    fn error_response(err: &LinkgateError) -> NormalizedResponse {
        match err {
            LinkgateError::Validation(msg) | LinkgateError::TokenConflict(msg) => {
                NormalizedResponse::html(err.http_status(), format!("{}\n", msg))
            }
            LinkgateError::MalformedInput(_) => {
                NormalizedResponse::html(StatusCode::BAD_REQUEST, MALFORMED_BODY)
            }
            _ if err.is_storage() => {
                error!("Storage failure: {}", err.format_simple());
                NormalizedResponse::html(err.http_status(), INTERNAL_ERROR)
            }
            _ => {
                warn!("{}", err.format_simple());
                NormalizedResponse::html(err.http_status(), INTERNAL_ERROR)
            }
        }
    }

    #[inline]
    fn method_not_supported() -> NormalizedResponse {
        NormalizedResponse::html(StatusCode::OK, METHOD_NOT_SUPPORTED)
    }
}
