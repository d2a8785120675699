//! # Folio Backend
//!
//! The authoritative side of the editing round trip: an in-memory page
//! store that applies every mutation, bumps the page version, and
//! returns the full snapshot the client adopts wholesale.

mod config;
mod service;
mod store;

pub use config::{BackendConfig, DEFAULT_CONFIG_NAME};
pub use service::InMemoryBackend;
pub use store::PageStore;
