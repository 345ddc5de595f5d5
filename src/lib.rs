//! Aura onboarding — guided profile setup for a social-matching app.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod store;

pub use error::{Error, Result};
