use crate::dto::FieldErrors;
use rocket::serde::json::Value;
use sea_orm::prelude::Decimal;
use std::str::FromStr;

pub const WALLET_ADDRESS: &str = "wallet_address";
pub const GET_RESULT: &str = "getResult";

pub const WALLET_ADDRESS_REQUIRED: &str = "The wallet address field is required.";
pub const WALLET_ADDRESS_STRING: &str = "The wallet address must be a string.";
pub const WALLET_ADDRESS_TAKEN: &str = "The wallet address has already been taken.";
pub const GET_RESULT_REQUIRED: &str = "The get result field is required.";
pub const GET_RESULT_NUMERIC: &str = "The get result must be a number.";
pub const GET_RESULT_BETWEEN: &str = "The get result must be between 0 and 1000000000.";

/// Largest single offer. Keeps every total decodable as a `Decimal`.
pub const MAX_OFFER: i64 = 1_000_000_000;

/// Trimmed wallet address; blank counts as missing. Numbers are taken as
/// their decimal text.
pub fn wallet_address(wallet_address: Option<&Value>) -> Result<String, &'static str> {
    let address = match wallet_address {
        None | Some(Value::Null) => return Err(WALLET_ADDRESS_REQUIRED),
        Some(Value::String(address)) => address.trim().to_owned(),
        Some(Value::Number(address)) => address.to_string(),
        Some(Value::Array(address)) if address.is_empty() => return Err(WALLET_ADDRESS_REQUIRED),
        Some(_) => return Err(WALLET_ADDRESS_STRING),
    };
    if address.is_empty() {
        Err(WALLET_ADDRESS_REQUIRED)
    } else {
        Ok(address)
    }
}

/// Accepts a JSON number or a string holding one, within `0..=MAX_OFFER`.
pub fn get_result(get_result: Option<&Value>) -> Result<Decimal, &'static str> {
    let offer = match get_result {
        None | Some(Value::Null) => return Err(GET_RESULT_REQUIRED),
        Some(Value::String(offer)) if offer.trim().is_empty() => return Err(GET_RESULT_REQUIRED),
        Some(Value::Array(offer)) if offer.is_empty() => return Err(GET_RESULT_REQUIRED),
        Some(Value::String(offer)) => offer.trim().to_owned(),
        Some(Value::Number(offer)) => offer.to_string(),
        Some(_) => return Err(GET_RESULT_NUMERIC),
    };
    match Decimal::from_str(&offer).or_else(|_| Decimal::from_scientific(&offer)) {
        Ok(offer) if offer >= Decimal::ZERO && offer <= Decimal::from(MAX_OFFER) => {
            Ok(offer.normalize())
        }
        Ok(_) => Err(GET_RESULT_BETWEEN),
        // Out of Decimal's range but still a number
        Err(_) if offer.parse::<f64>().map_or(false, f64::is_finite) => Err(GET_RESULT_BETWEEN),
        Err(_) => Err(GET_RESULT_NUMERIC),
    }
}

pub fn add_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_owned())
        .or_default()
        .push(message.to_owned());
}
