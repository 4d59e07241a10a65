//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers, providing concrete implementations for persistence and outbound
//! I/O.
//!
//! # Modules
//!
//! - [`counter`] - Hash counter persistence (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`probe`] - Destination liveness probing over HTTP

pub mod counter;
pub mod persistence;
pub mod probe;
