//! Product and product price input handling.
//!
//! Request bodies are deserialized leniently into [`ProductInput`] /
//! [`ProductPriceInput`] and then checked field by field, so every problem is
//! reported against the field that caused it rather than as one parse failure.

mod field;
mod input;
mod rules;

pub use field::Field;
pub use input::{NewProduct, NewProductPrice, ProductChanges, ProductInput, ProductPriceInput};
pub use rules::{NAME_MAX_LENGTH, unknown_currency};
