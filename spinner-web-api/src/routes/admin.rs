use crate::dto::{
    BackUrl, ResponseData, SpinnerDetails, RESPONSE_INTERNAL_ERROR, RESPONSE_OK,
    SYSTEM_ERROR_MESSAGE,
};
use crate::pool::{Db, SpinnerConfig};
use crate::session::{Denied, Session};
use crate::spinner_repository::SeaOrmSpinnerRepository;
use crate::spinner_service::SpinnerService;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{serde::json::Json, State};
use sea_orm_rocket::Connection;
use tracing::{error, info};

pub const ADMIN_SPINNERS_PATH: &str = "/admin/spinners";

#[get("/admin/spinners")]
pub async fn index(
    conn: Connection<'_, Db>,
    session: Session<'_>,
    spinner_config: &State<SpinnerConfig>,
    flash: Option<FlashMessage<'_>>,
) -> Result<Json<ResponseData<Vec<SpinnerDetails>>>, Denied> {
    session.authorize(spinner_config.blocked_role_id)?;

    let db = conn.into_inner();
    let spinner_service = SpinnerService::new(SeaOrmSpinnerRepository::new(db));
    let message = flash
        .map(|flash| flash.message().to_owned())
        .unwrap_or_default();

    match spinner_service.list().await {
        Ok(spinners) => Ok(Json(ResponseData::new(
            RESPONSE_OK,
            message,
            Some(spinners.iter().map(SpinnerDetails::new).collect()),
        ))),
        Err(error) => {
            error!("Error listing spinners: {:?}", error);
            Ok(Json(ResponseData::new(
                RESPONSE_INTERNAL_ERROR,
                SYSTEM_ERROR_MESSAGE.to_owned(),
                None,
            )))
        }
    }
}

#[delete("/admin/spinners/<id>")]
pub async fn destroy(
    conn: Connection<'_, Db>,
    session: Session<'_>,
    spinner_config: &State<SpinnerConfig>,
    back: BackUrl,
    id: i32,
) -> Result<Flash<Redirect>, Denied> {
    let user = session.authorize(spinner_config.blocked_role_id)?;

    let db = conn.into_inner();
    let spinner_service = SpinnerService::new(SeaOrmSpinnerRepository::new(db));
    let back = Redirect::to(back.or(ADMIN_SPINNERS_PATH));

    match spinner_service.delete(id).await {
        Ok(()) => {
            info!("Spinner {} delete requested by user {}", id, user.id);
            Ok(Flash::success(back, "Spinner deleted"))
        }
        Err(error) => {
            error!("Error deleting spinner {}: {:?}", id, error);
            Ok(Flash::error(back, SYSTEM_ERROR_MESSAGE))
        }
    }
}
