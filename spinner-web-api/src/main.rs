mod access_gate;
mod cors;
mod dto;
mod maintenance;
mod pool;
mod request_log;
mod routes;
mod session;
mod spinner_repository;
mod spinner_service;
mod sql_stmt;
mod validation;


use dto::{
    ResponseData, RESPONSE_BAD_REQUEST, RESPONSE_INTERNAL_ERROR, RESPONSE_UNAVAILABLE,
};
use pool::{Db, SpinnerConfig};
use rocket::figment::Figment;
use rocket::{serde::json::Json, Build, Config, Request, Rocket};
use sea_orm_rocket::Database;
use std::error::Error;
use tracing_subscriber::{filter::Directive, fmt::format::FmtSpan, EnvFilter};

#[macro_use]
extern crate rocket;

#[get("/")]
async fn health_ping() -> &'static str {
    ""
}

#[get("/maintenance_mode")]
async fn maintenance_mode() -> Json<ResponseData<()>> {
    Json(ResponseData::new(
        RESPONSE_UNAVAILABLE,
        "Down for maintenance".to_owned(),
        None,
    ))
}

#[catch(400)]
async fn bad_request() -> Json<ResponseData<()>> {
    Json(ResponseData::new(
        RESPONSE_BAD_REQUEST,
        "Malformed request.".to_owned(),
        None,
    ))
}

#[catch(404)]
async fn not_found(req: &Request<'_>) -> Json<ResponseData<()>> {
    let message = format!("Couldn't find '{}'", req.uri());
    Json(ResponseData::new(RESPONSE_BAD_REQUEST, message, None))
}

#[catch(422)]
async fn unprocessable() -> Json<ResponseData<()>> {
    Json(ResponseData::new(
        RESPONSE_BAD_REQUEST,
        "Please check params. The body should be a JSON object.".to_owned(),
        None,
    ))
}

#[catch(500)]
async fn internal_error() -> Json<ResponseData<()>> {
    Json(ResponseData::new(
        RESPONSE_INTERNAL_ERROR,
        "Whoops! Looks like we messed up.".to_owned(),
        None,
    ))
}

fn build(figment: Figment) -> Result<Rocket<Build>, rocket::figment::Error> {
    let spinner_config = figment.extract::<SpinnerConfig>()?;
    let origin_header = cors::OriginHeader::new(&spinner_config.cors_allowed_domains);

    Ok(rocket::custom(figment)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .attach(Db::init())
        .attach(pool::migrations())
        .attach(request_log::RequestTimer)
        .attach(maintenance::MaintenanceMode)
        .manage(spinner_config)
        .attach(origin_header)
        .attach(routes::mount())
        .mount("/", routes![health_ping, maintenance_mode, cors::preflight]))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let figment = Config::figment();
    let spinner_config = figment.extract::<SpinnerConfig>()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &spinner_config.rust_log);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("spinner_web_api={}", &spinner_config.web_api_log)
                    .parse::<Directive>()?,
            ),
        )
        .with_span_events(FmtSpan::FULL)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;

    let _rocket = build(figment)?.launch().await?;
    Ok(())
}
