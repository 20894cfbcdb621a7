use axum::{http::StatusCode, Json};
use bigdecimal::BigDecimal;
use serde_json::json;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors })))
}

pub fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    match *price > BigDecimal::from(0) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PRICE")
            .with_message(Cow::from("Price must be positive"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rejects_non_positive_prices() {
        assert!(validate_price(&BigDecimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_price(&BigDecimal::from(0)).is_err());
        assert!(validate_price(&BigDecimal::from(-3)).is_err());
    }
}
