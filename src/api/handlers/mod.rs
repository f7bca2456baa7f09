//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Sign-up and sign-in handlers.
pub mod auth;
/// Event CRUD handlers.
pub mod events;
