//! # Userhub Core
//!
//! The domain layer of the userhub service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
