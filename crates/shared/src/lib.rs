//! Shared types, errors, and configuration for Pricelist.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT issuing and validation
//! - Authentication payloads

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::{Claims, TokenResponse};
pub use config::AppConfig;
pub use error::{AppError, AuthFailure};
pub use jwt::{JwtConfig, JwtError, JwtService};
