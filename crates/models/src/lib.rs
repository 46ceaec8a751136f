//! Transfer objects exchanged with moviecards-service.
//!
//! These types are never persisted locally: the remote service owns them.

pub mod actor;
pub mod errors;
pub mod input;
pub mod movie;
pub mod nullable;

pub use actor::Actor;
pub use movie::Movie;
