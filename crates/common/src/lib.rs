//! Helpers shared by every crate of the workspace: logging setup,
//! environment lookups and execution profile detection.

pub mod env;
pub mod profiles;
pub mod types;
pub mod utils;

pub use profiles::ActiveProfiles;
