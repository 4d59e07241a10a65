//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern.
//! Implementations live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Account CRUD and lock management
//! - [`ShortLinkRepository`] - Short link CRUD

pub mod account_repository;
pub mod short_link_repository;

pub use account_repository::AccountRepository;
pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
