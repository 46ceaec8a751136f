pub mod service;

pub use service::MovieService;
