//! HTTP-facing core: request normalization, base URL derivation, dispatch

pub mod domain;
pub mod request;
pub mod router;
pub mod services;
pub mod templates;

pub use domain::DomainResolver;
pub use request::{Headers, NormalizedRequest, NormalizedResponse, Resource};
pub use router::{CreateLinkRequest, CreateLinkResponse, RequestRouter};
