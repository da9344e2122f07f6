use crate::pool::SpinnerConfig;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Data, Request, Response,
};
use std::time::Instant;
use tracing::info;

/// Logs method, path, status and latency of each request when
/// `enable_request_log` is set.
pub struct RequestTimer;

#[derive(Clone)]
struct TimerStart(Option<Instant>);

fn enabled(request: &Request<'_>) -> bool {
    request
        .rocket()
        .state::<SpinnerConfig>()
        .map(|spinner_config| spinner_config.enable_request_log)
        .unwrap_or(false)
}

#[rocket::async_trait]
impl Fairing for RequestTimer {
    fn info(&self) -> Info {
        Info {
            name: "Request timer",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        if !enabled(request) || request.uri().path().as_str() == "/" {
            return;
        }
        request.local_cache(|| TimerStart(Some(Instant::now())));
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let started = match request.local_cache(|| TimerStart(None)).0 {
            Some(started) => started,
            None => return,
        };
        info!(
            "{} {} -> {} in {}ms",
            request.method(),
            request.uri().path(),
            response.status().code,
            started.elapsed().as_millis()
        );
    }
}
