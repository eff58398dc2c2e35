pub mod link_service;
pub mod token_generator;

pub use link_service::{CreatedLink, LinkPolicy, LinkService};
pub use token_generator::{RandomTokenGenerator, TokenGenerator};
