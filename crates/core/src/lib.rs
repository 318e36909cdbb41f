//! Core business logic for Pricelist.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `currency` - Price conversion between currencies
//! - `product` - Validation of product and product price input
//! - `auth` - Password hashing

pub mod auth;
pub mod currency;
pub mod product;
