use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Method, Status};
use rocket::{Request, Response};
use std::collections::HashSet;

pub struct OriginHeader {
    pub allowed_domains: HashSet<String>,
}

impl OriginHeader {
    pub fn new(cors_allowed_domains: &str) -> Self {
        let allowed_domains = cors_allowed_domains
            .split(',')
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .map(|domain| domain.to_owned())
            .collect();
        Self { allowed_domains }
    }
}

#[rocket::async_trait]
impl Fairing for OriginHeader {
    fn info(&self) -> Info {
        Info {
            name: "CORS Policy",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if response.status() == Status::NotFound {
            return;
        }

        let origin = match request.headers().get_one("Origin") {
            Some(origin) if self.allowed_domains.contains(origin) => origin,
            _ => return,
        };
        response.set_header(Header::new("Access-Control-Allow-Origin", origin.to_owned()));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, DELETE"));
        if request.method() == Method::Options {
            response.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        }
    }
}

/// Browsers preflight the JSON `POST /spinner` and admin deletes.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_domains_are_trimmed_and_blank_entries_skipped() {
        let origin_header = OriginHeader::new("https://spin.example, ,https://admin.example");
        assert_eq!(origin_header.allowed_domains.len(), 2);
        assert!(origin_header.allowed_domains.contains("https://admin.example"));
    }

    #[test]
    fn empty_config_allows_nothing() {
        assert!(OriginHeader::new("").allowed_domains.is_empty());
    }
}
