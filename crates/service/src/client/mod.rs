//! Client side of moviecards-service.
//!
//! [`MovieCardsApi`] is the seam used by the domain services; the HTTP
//! implementation lives in [`http`], an in-memory one in [`api::mock`].

pub mod api;
pub mod fallback;
pub mod http;

pub use api::{LinkOutcome, MovieCardsApi};
pub use fallback::FallbackPolicy;
pub use http::MovieCardsClient;
