pub mod service;

pub use service::ActorService;
