//! Raw request payloads and their validated forms.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use validator::ValidationErrors;

use super::field::Field;
use super::rules::{AmountMessages, Checks};

/// Product payload as received. Members other than the fillable ones are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    /// Product name.
    #[serde(default)]
    pub name: Field<Value>,
    /// Free-form description.
    #[serde(default)]
    pub description: Field<Value>,
    /// Price in the base currency.
    #[serde(default)]
    pub price: Field<Value>,
    /// Base currency ID.
    #[serde(default)]
    pub currency_id: Field<Value>,
    /// Tax cost.
    #[serde(default)]
    pub tax_cost: Field<Value>,
    /// Manufacturing cost.
    #[serde(default)]
    pub manufacturing_cost: Field<Value>,
}

/// A validated product ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Product name, trimmed.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Price in the base currency.
    pub price: Decimal,
    /// Base currency ID. Existence is checked by the store.
    pub currency_id: i32,
    /// Tax cost.
    pub tax_cost: Decimal,
    /// Manufacturing cost.
    pub manufacturing_cost: Decimal,
}

/// Validated changes to an existing product. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    /// New name.
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New price.
    pub price: Option<Decimal>,
    /// New base currency ID.
    pub currency_id: Option<i32>,
    /// New tax cost.
    pub tax_cost: Option<Decimal>,
    /// New manufacturing cost.
    pub manufacturing_cost: Option<Decimal>,
}

impl ProductChanges {
    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ProductInput {
    /// Validates a creation payload. All fields but `description` are required.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, keyed by field name.
    pub fn validate_new(&self) -> Result<NewProduct, ValidationErrors> {
        let mut checks = Checks::default();

        let name = checks.required_text("name", &self.name, true);
        let description = checks.optional_text("description", &self.description);
        let price = checks.amount("price", &self.price, true, &AmountMessages::generic("price"));
        let currency_id = checks.currency_id(&self.currency_id, true);
        let tax_cost = checks.amount(
            "tax_cost",
            &self.tax_cost,
            true,
            &AmountMessages::generic("tax_cost"),
        );
        let manufacturing_cost = checks.amount(
            "manufacturing_cost",
            &self.manufacturing_cost,
            true,
            &AmountMessages::generic("manufacturing_cost"),
        );

        checks.finish(|| {
            Some(NewProduct {
                name: name?,
                description: description.flatten(),
                price: price?,
                currency_id: currency_id?,
                tax_cost: tax_cost?,
                manufacturing_cost: manufacturing_cost?,
            })
        })
    }

    /// Validates an update payload. Absent fields are left alone; present
    /// fields follow the creation rules.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, keyed by field name.
    pub fn validate_changes(&self) -> Result<ProductChanges, ValidationErrors> {
        let mut checks = Checks::default();

        let changes = ProductChanges {
            name: checks.required_text("name", &self.name, false),
            description: checks.optional_text("description", &self.description),
            price: checks.amount("price", &self.price, false, &AmountMessages::generic("price")),
            currency_id: checks.currency_id(&self.currency_id, false),
            tax_cost: checks.amount(
                "tax_cost",
                &self.tax_cost,
                false,
                &AmountMessages::generic("tax_cost"),
            ),
            manufacturing_cost: checks.amount(
                "manufacturing_cost",
                &self.manufacturing_cost,
                false,
                &AmountMessages::generic("manufacturing_cost"),
            ),
        };

        checks.finish(|| Some(changes))
    }
}

/// Product price payload as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPriceInput {
    /// Target currency ID.
    #[serde(default)]
    pub currency_id: Field<Value>,
    /// Price in the target currency.
    #[serde(default)]
    pub price: Field<Value>,
}

/// A validated per-currency price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewProductPrice {
    /// Target currency ID. Existence is checked by the store.
    pub currency_id: i32,
    /// Price in the target currency.
    pub price: Decimal,
}

impl ProductPriceInput {
    /// Validates the payload; `currency_id` and a numeric `price` are required.
    /// The price carries no sign rule.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, keyed by field name.
    pub fn validate_new(&self) -> Result<NewProductPrice, ValidationErrors> {
        let mut checks = Checks::default();

        let currency_id = checks.currency_id(&self.currency_id, true);
        let price = checks.amount(
            "price",
            &self.price,
            true,
            &AmountMessages {
                required: "El precio es obligatorio".to_string(),
                numeric: "El precio debe ser un número".to_string(),
                non_negative: false,
            },
        );

        checks.finish(|| {
            Some(NewProductPrice {
                currency_id: currency_id?,
                price: price?,
            })
        })
    }
}
