use strum_macros::Display;

pub const BLOCKED_NOTICE: &str = "You are blocked by admin";

/// What the gate needs to know about the caller, passed in per request.
pub trait SessionContext {
    fn is_authenticated(&self) -> bool;

    fn current_user_role(&self) -> Option<i32>;

    fn logout(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GateDecision {
    Allowed,
    Blocked,
    Unauthenticated,
}

/// Fail-closed: only an authenticated caller whose role is known and is not
/// the blocked role gets through.
pub fn decide<S: SessionContext>(session: &S, blocked_role_id: i32) -> GateDecision {
    if !session.is_authenticated() {
        return GateDecision::Unauthenticated;
    }
    match session.current_user_role() {
        Some(role_id) if role_id == blocked_role_id => GateDecision::Blocked,
        Some(_) => GateDecision::Allowed,
        None => GateDecision::Unauthenticated,
    }
}

/// Like `decide`, and ends the session of a blocked caller.
pub fn enforce<S: SessionContext>(session: &mut S, blocked_role_id: i32) -> GateDecision {
    let decision = decide(session, blocked_role_id);
    if decision == GateDecision::Blocked {
        session.logout();
    }
    decision
}
