use crate::access_gate::{self, GateDecision, SessionContext, BLOCKED_NOTICE};
use crate::pool::{Db, SpinnerConfig};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use jwt::VerifyWithKey;
use rocket::http::{Cookie, CookieJar};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::{Flash, Redirect};
use sea_orm::EntityTrait;
use sea_orm_rocket::Database;
use sha2::Sha256;
use spinner_db_entity::db::user::{Entity as User, Model as UserModel};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tracing::{info, warn};

/// Cookie carrying the HS256 token issued by the admin login.
pub const SESSION_COOKIE: &str = "spinner_session";
pub const LOGIN_PATH: &str = "/login";

/// The caller's session for this request. Never fails as a guard; an absent
/// or bad token just yields an anonymous session.
pub struct Session<'r> {
    cookies: &'r CookieJar<'r>,
    user: Option<UserModel>,
}

#[derive(Responder)]
pub enum Denied {
    Blocked(Flash<Redirect>),
    Login(Redirect),
}

impl<'r> Session<'r> {
    pub fn authorize(mut self, blocked_role_id: i32) -> Result<UserModel, Denied> {
        let decision = access_gate::enforce(&mut self, blocked_role_id);
        match (decision, self.user) {
            (GateDecision::Allowed, Some(user)) => Ok(user),
            (GateDecision::Blocked, _) => Err(Denied::Blocked(Flash::error(
                Redirect::to(LOGIN_PATH),
                BLOCKED_NOTICE,
            ))),
            (decision, _) => {
                info!("Access gate: {}", decision);
                Err(Denied::Login(Redirect::to(LOGIN_PATH)))
            }
        }
    }
}

impl<'r> SessionContext for Session<'r> {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn current_user_role(&self) -> Option<i32> {
        self.user.as_ref().map(|user| user.role_id)
    }

    fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Blocked user {} logged out", user.id);
        }
        self.cookies.remove(Cookie::from(SESSION_COOKIE));
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session<'r> {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = req.cookies();
        let token = cookies
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned());
        let user = match token {
            Some(token) => current_user(req, &token).await,
            None => None,
        };
        Outcome::Success(Session { cookies, user })
    }
}

async fn current_user(req: &Request<'_>, token: &str) -> Option<UserModel> {
    let spinner_config = req.rocket().state::<SpinnerConfig>()?;
    let user_id = verify_session_token(&spinner_config.jwt_key, token)?;
    let db = Db::fetch(req.rocket())?;
    match User::find_by_id(user_id).one(&db.conn).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            warn!("Session token for unknown user: {}", user_id);
            None
        }
        Err(error) => {
            warn!("Error fetching session user: {:?}", error);
            None
        }
    }
}

/// Returns the user id of a correctly signed, unexpired token.
pub fn verify_session_token(jwt_key: &str, token: &str) -> Option<i32> {
    let key: Hmac<Sha256> = match Hmac::new_from_slice(jwt_key.as_bytes()) {
        Ok(key) => key,
        Err(error) => {
            warn!("Faulty JWT key: {}", error);
            return None;
        }
    };
    let claims: BTreeMap<String, String> = match token.verify_with_key(&key) {
        Ok(claims) => claims,
        Err(error) => {
            info!("JWT verification error: {}", error);
            warn!("Invalid session token passed!");
            return None;
        }
    };
    let user_id = match claims.get("user_id").map(|user_id| user_id.parse::<i32>()) {
        Some(Ok(user_id)) => user_id,
        _ => {
            warn!("Session token without a valid user_id");
            return None;
        }
    };
    let expiry = match claims
        .get("expiry")
        .map(|expiry| DateTime::parse_from_rfc3339(expiry))
    {
        Some(Ok(expiry)) => expiry.with_timezone(&Utc),
        _ => {
            warn!("Bad expiry in session token");
            return None;
        }
    };
    if Utc::now() <= expiry {
        Some(user_id)
    } else {
        info!("Session token is expired");
        None
    }
}
