//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Account`] - A registered user or administrator
//! - [`ShortLink`] - A shortened URL mapping owned by an account
//! - [`Role`] - Trust tier of an account
//!
//! Creation inputs live in separate structs (`NewAccount`, `NewShortLink`)
//! and partial updates in [`ProfileUpdate`].

pub mod account;
pub mod role;
pub mod short_link;

pub use account::{Account, AccountKey, NewAccount, ProfileUpdate};
pub use role::Role;
pub use short_link::{NewShortLink, ShortLink};
