//! Credential handling for the authentication collaborator.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
