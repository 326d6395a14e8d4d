//! Core domain concepts shared across all subdomains.
//!
//! - [`entity::Entity`]: a candidate the player may be thinking of
//! - [`question::Question`]: a yes/no question issued for one turn
//! - [`error::DomainError`]: domain-level errors

pub mod entity;
pub mod error;
pub mod question;
