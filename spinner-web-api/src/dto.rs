use rocket::http::uri::Absolute;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::serde::json::Value;
use rocket::serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use spinner_db_entity::db::spinner::Model as SpinnerModel;
use std::collections::BTreeMap;
use std::convert::Infallible;
use tracing::warn;

/// Field name to the list of messages for that field, in request field names.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResponseData<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ResponseData<T> {
    pub fn new(status: u16, message: String, data: Option<T>) -> ResponseData<T> {
        ResponseData {
            status,
            message,
            data,
            errors: None,
        }
    }

    pub fn with_errors(status: u16, message: String, errors: FieldErrors) -> ResponseData<T> {
        ResponseData {
            status,
            message,
            data: None,
            errors: Some(errors),
        }
    }
}

pub const RESPONSE_OK: u16 = 200;
pub const RESPONSE_BAD_REQUEST: u16 = 400;
pub const RESPONSE_UNAUTHORIZED: u16 = 401;
pub const RESPONSE_INTERNAL_ERROR: u16 = 500;
pub const RESPONSE_UNAVAILABLE: u16 = 503;

pub const SUBMITTED_MESSAGE: &str =
    "Congratulations! You have successfully submitted your wallet address";
pub const ALREADY_SUBMITTED_MESSAGE: &str = "You have already submitted your wallet address";
pub const TOTAL_SPINNERS_MESSAGE: &str = "Total spinners";
pub const SYSTEM_ERROR_MESSAGE: &str = "System error. Please contact administrator!";

/// Body of `POST /spinner`. Fields stay loose so that validation, not the
/// JSON guard, reports what is missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SpinnerRequest {
    pub wallet_address: Option<Value>,
    #[serde(rename = "getResult")]
    pub get_result: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SpinnerDetails {
    pub id: i32,
    pub wallet_address: String,
    pub get_offer: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}

impl SpinnerDetails {
    pub fn new(spinner: &SpinnerModel) -> SpinnerDetails {
        SpinnerDetails {
            id: spinner.id,
            wallet_address: spinner.wallet_address.to_owned(),
            get_offer: spinner.get_offer,
            created_at: spinner.created_at.timestamp(),
            updated_at: spinner.updated_at.timestamp(),
        }
    }
}

/// Where to send the caller after an admin action, taken from `Referer`.
/// Only relative referers and ones naming this host are followed.
#[derive(Debug)]
pub struct BackUrl(Option<String>);

impl BackUrl {
    pub fn or(self, fallback: &str) -> String {
        self.0.unwrap_or_else(|| fallback.to_owned())
    }
}

fn is_same_site(req: &Request<'_>, referer: &str) -> bool {
    if referer.starts_with('/') {
        return !referer.starts_with("//");
    }
    let uri = match Absolute::parse(referer) {
        Ok(uri) => uri,
        Err(_) => return false,
    };
    match (uri.authority(), req.host()) {
        (Some(authority), Some(host)) => {
            host.domain().as_str().eq_ignore_ascii_case(authority.host())
                && host.port() == authority.port()
        }
        _ => false,
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BackUrl {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let referer = req
            .headers()
            .get_one("Referer")
            .filter(|referer| !referer.is_empty());
        let back_url = match referer {
            Some(referer) if is_same_site(req, referer) => Some(referer.to_owned()),
            Some(referer) => {
                warn!("Ignoring foreign referer: {}", referer);
                None
            }
            None => None,
        };
        Outcome::Success(BackUrl(back_url))
    }
}
