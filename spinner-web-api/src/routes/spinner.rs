use crate::dto::{
    ResponseData, SpinnerRequest, ALREADY_SUBMITTED_MESSAGE, RESPONSE_BAD_REQUEST,
    RESPONSE_INTERNAL_ERROR, RESPONSE_OK, SUBMITTED_MESSAGE, SYSTEM_ERROR_MESSAGE,
    TOTAL_SPINNERS_MESSAGE,
};
use crate::pool::Db;
use crate::spinner_repository::SeaOrmSpinnerRepository;
use crate::spinner_service::{SpinnerError, SpinnerService};
use rocket::serde::json::Json;
use rust_decimal::Decimal;
use sea_orm_rocket::Connection;
use tracing::{error, warn};

#[post("/spinner", data = "<spinner_request>")]
pub async fn store(
    conn: Connection<'_, Db>,
    spinner_request: Json<SpinnerRequest>,
) -> Json<ResponseData<()>> {
    let db = conn.into_inner();
    let spinner_service = SpinnerService::new(SeaOrmSpinnerRepository::new(db));

    match spinner_service.submit(&spinner_request).await {
        Ok(_) => Json(ResponseData::new(
            RESPONSE_OK,
            SUBMITTED_MESSAGE.to_owned(),
            None,
        )),
        Err(SpinnerError::Database(error)) => {
            error!("Error storing spinner: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                SYSTEM_ERROR_MESSAGE.to_owned(),
                None,
            ))
        }
        Err(error) => {
            warn!("Spinner rejected: {}", error);
            Json(ResponseData::with_errors(
                RESPONSE_BAD_REQUEST,
                ALREADY_SUBMITTED_MESSAGE.to_owned(),
                error.field_errors().cloned().unwrap_or_default(),
            ))
        }
    }
}

#[get("/spinner/get")]
pub async fn total(conn: Connection<'_, Db>) -> Json<ResponseData<Decimal>> {
    let db = conn.into_inner();
    let spinner_service = SpinnerService::new(SeaOrmSpinnerRepository::new(db));

    match spinner_service.total_offers().await {
        Ok(total) => Json(ResponseData::new(
            RESPONSE_OK,
            TOTAL_SPINNERS_MESSAGE.to_owned(),
            Some(total),
        )),
        Err(error) => {
            error!("Error summing spinner offers: {:?}", error);
            Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                SYSTEM_ERROR_MESSAGE.to_owned(),
                None,
            ))
        }
    }
}
