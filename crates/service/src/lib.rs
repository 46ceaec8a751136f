//! Service layer of the moviecards web front.
//! - `client` talks to the remote moviecards-service over HTTP.
//! - `movie` / `actor` hold the use cases the controllers call.
//! - Every remote failure surfaces as [`errors::ServiceClientError`].

pub mod actor;
pub mod client;
pub mod errors;
pub mod movie;
pub mod observability;
