use crate::dto::{FieldErrors, ResponseData, RESPONSE_UNAUTHORIZED};
use crate::validation::add_error;
use rocket::request::FlashMessage;
use rocket::serde::json::Json;

pub const LOGIN_MESSAGE: &str = "Please log in";

/// Stand-in for the admin login page: the session itself is issued elsewhere,
/// this only surfaces the notice the access gate left behind.
#[get("/login")]
pub fn login(flash: Option<FlashMessage<'_>>) -> Json<ResponseData<()>> {
    match flash {
        Some(flash) if flash.kind() == "error" => {
            let mut errors = FieldErrors::new();
            add_error(&mut errors, "message", flash.message());
            Json(ResponseData::with_errors(
                RESPONSE_UNAUTHORIZED,
                LOGIN_MESSAGE.to_owned(),
                errors,
            ))
        }
        _ => Json(ResponseData::new(
            RESPONSE_UNAUTHORIZED,
            LOGIN_MESSAGE.to_owned(),
            None,
        )),
    }
}
