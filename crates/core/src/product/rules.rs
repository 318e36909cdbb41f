//! Field rules and their error messages.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use super::field::Field;

/// Longest accepted product name, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

/// Decimal places kept by the money columns.
const AMOUNT_SCALE: u32 = 2;

/// Error set for a `currency_id` that matches no stored currency.
#[must_use]
pub fn unknown_currency() -> ValidationErrors {
    let mut checks = Checks::default();
    checks.fail(
        "currency_id",
        "exists",
        "El campo currency_id seleccionado no es válido.".to_string(),
    );
    checks.errors
}

/// Accumulates field errors while a payload is being checked.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: ValidationErrors,
}

impl Checks {
    pub(crate) fn fail(&mut self, field: &'static str, code: &'static str, message: String) {
        self.errors
            .add(field, ValidationError::new(code).with_message(message.into()));
    }

    /// Finishes checking, yielding `value` only when no rule failed.
    pub(crate) fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        // Every field was validated above, so the builder cannot come up short.
        value().ok_or(self.errors)
    }

    /// `required` on create, `sometimes|required` on update.
    fn present<'a>(
        &mut self,
        field: &'static str,
        raw: &'a Field<Value>,
        required: bool,
        message: &str,
    ) -> Option<&'a Value> {
        match raw {
            Field::Value(value) => Some(value),
            Field::Missing if !required => None,
            Field::Missing | Field::Null => {
                self.fail(field, "required", message.to_string());
                None
            }
        }
    }

    pub(crate) fn required_text(
        &mut self,
        field: &'static str,
        raw: &Field<Value>,
        required: bool,
    ) -> Option<String> {
        let value = self.present(field, raw, required, &required_message(field))?;
        let Some(text) = value.as_str().map(str::trim) else {
            self.fail(field, "string", format!("El campo {field} debe ser una cadena de texto."));
            return None;
        };
        if text.is_empty() {
            self.fail(field, "required", required_message(field));
            return None;
        }
        if text.chars().count() > NAME_MAX_LENGTH {
            self.fail(
                field,
                "max",
                format!("El campo {field} no debe ser mayor que {NAME_MAX_LENGTH} caracteres."),
            );
            return None;
        }
        Some(text.to_string())
    }

    /// Nullable string: `Some(None)` clears, `None` leaves untouched.
    pub(crate) fn optional_text(
        &mut self,
        field: &'static str,
        raw: &Field<Value>,
    ) -> Option<Option<String>> {
        match raw {
            Field::Missing => None,
            Field::Null => Some(None),
            Field::Value(Value::String(text)) => Some(Some(text.clone())),
            Field::Value(_) => {
                self.fail(field, "string", format!("El campo {field} debe ser una cadena de texto."));
                None
            }
        }
    }

    pub(crate) fn amount(
        &mut self,
        field: &'static str,
        raw: &Field<Value>,
        required: bool,
        messages: &AmountMessages,
    ) -> Option<Decimal> {
        let value = self.present(field, raw, required, &messages.required)?;
        let Some(amount) = parse_decimal(value) else {
            self.fail(field, "numeric", messages.numeric.clone());
            return None;
        };
        if messages.non_negative && amount < Decimal::ZERO {
            self.fail(field, "min", format!("El campo {field} debe ser al menos 0."));
            return None;
        }
        if amount.normalize().scale() > AMOUNT_SCALE {
            self.fail(
                field,
                "decimal",
                format!("El campo {field} debe tener como máximo {AMOUNT_SCALE} decimales."),
            );
            return None;
        }
        Some(amount)
    }

    pub(crate) fn currency_id(&mut self, raw: &Field<Value>, required: bool) -> Option<i32> {
        const FIELD: &str = "currency_id";
        let value = self.present(FIELD, raw, required, &required_message(FIELD))?;
        let id = parse_decimal(value)
            .filter(|d| d.fract().is_zero())
            .and_then(|d| d.to_i32());
        if id.is_none() {
            self.fail(FIELD, "integer", format!("El campo {FIELD} debe ser un número entero."));
        }
        id
    }
}

/// Messages and sign rule for an amount field.
#[derive(Debug, Clone)]
pub(crate) struct AmountMessages {
    pub(crate) required: String,
    pub(crate) numeric: String,
    pub(crate) non_negative: bool,
}

impl AmountMessages {
    pub(crate) fn generic(field: &str) -> Self {
        Self {
            required: required_message(field),
            numeric: format!("El campo {field} debe ser un número."),
            non_negative: true,
        }
    }
}

fn required_message(field: &str) -> String {
    format!("El campo {field} es obligatorio.")
}

/// Accepts JSON numbers and numeric strings.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(Value::from(12), Some(dec!(12)))]
    #[case(serde_json::json!(1455.1), Some(dec!(1455.1)))]
    #[case(Value::from("2000"), Some(dec!(2000)))]
    #[case(Value::from(" 15.01 "), Some(dec!(15.01)))]
    #[case(Value::from("doce"), None)]
    #[case(Value::Bool(true), None)]
    #[case(serde_json::json!([1]), None)]
    fn test_parse_decimal(#[case] value: Value, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_decimal(&value), expected);
    }

    #[test]
    fn test_unknown_currency_error() {
        let errors = unknown_currency();
        assert!(errors.field_errors().contains_key("currency_id"));
    }

    #[test]
    fn test_name_too_long() {
        let mut checks = Checks::default();
        let long = Field::Value(Value::from("x".repeat(NAME_MAX_LENGTH + 1)));

        assert_eq!(checks.required_text("name", &long, true), None);
        assert!(checks.finish(|| Some(())).is_err());
    }

    #[rstest]
    #[case("10.125", false)]
    #[case("10.120", true)]
    #[case("10.12", true)]
    #[case("7", true)]
    fn test_amount_scale(#[case] raw: &str, #[case] accepted: bool) {
        let mut checks = Checks::default();
        let value = Field::Value(Value::from(raw));

        let amount = checks.amount("price", &value, true, &AmountMessages::generic("price"));
        assert_eq!(amount.is_some(), accepted);
        assert_eq!(checks.finish(|| Some(())).is_ok(), accepted);
    }

    #[test]
    fn test_sign_rule_is_optional() {
        let negative = Field::Value(Value::from(-5));
        let mut signed = AmountMessages::generic("price");
        signed.non_negative = false;

        let mut checks = Checks::default();
        assert_eq!(checks.amount("price", &negative, true, &signed), Some(Decimal::from(-5)));
        assert!(checks.finish(|| Some(())).is_ok());

        let mut checks = Checks::default();
        let generic = AmountMessages::generic("price");
        assert_eq!(checks.amount("price", &negative, true, &generic), None);
        assert!(checks.finish(|| Some(())).is_err());
    }

    #[test]
    fn test_missing_optional_field_is_not_an_error() {
        let mut checks = Checks::default();

        assert_eq!(checks.required_text("name", &Field::Missing, false), None);
        assert!(checks.finish(|| Some(())).is_ok());
    }
}
