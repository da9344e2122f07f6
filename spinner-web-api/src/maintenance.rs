use crate::pool::SpinnerConfig;
use rocket::{
    fairing::{Fairing, Info, Kind},
    http::{uri::Origin, Method},
    Data, Request,
};
use tracing::{info, warn};

pub const MAINTENANCE_PATH: &str = "/maintenance_mode";

/// Reroutes everything but the health ping while `enable_maintenance` is set.
pub struct MaintenanceMode;

#[rocket::async_trait]
impl Fairing for MaintenanceMode {
    fn info(&self) -> Info {
        Info {
            name: "Maintenance Mode",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let enabled = request
            .rocket()
            .state::<SpinnerConfig>()
            .map(|spinner_config| spinner_config.enable_maintenance)
            .unwrap_or(false);
        if !enabled || request.uri().path().as_str() == "/" {
            return;
        }
        info!("Maintenance mode, rerouting {}", request.uri());
        match Origin::parse(MAINTENANCE_PATH) {
            Ok(uri) => {
                request.set_uri(uri);
                request.set_method(Method::Get);
            }
            Err(error) => warn!("Bad maintenance path: {}", error),
        }
    }
}
