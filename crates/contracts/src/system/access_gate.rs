//! Access gate for admin-only views.
//!
//! The gate combines a session-presence check with an admin capability
//! lookup. The backend evaluates it on every admin route; it is not a
//! replacement for the store enforcing its own access rules.

use super::auth::Session;

/// Session as seen by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Identity is still being resolved
    Resolving,
    SignedOut,
    Active(Session),
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(s) => SessionState::Active(s),
            None => SessionState::SignedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    RenderView,
    RenderLoading,
    RedirectToLogin,
    RedirectToHome,
}

impl GateDecision {
    pub const LOGIN_PATH: &'static str = "/login";
    pub const HOME_PATH: &'static str = "/";

    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GateDecision::RedirectToLogin => Some(Self::LOGIN_PATH),
            GateDecision::RedirectToHome => Some(Self::HOME_PATH),
            GateDecision::RenderView | GateDecision::RenderLoading => None,
        }
    }
}

/// Decides whether a session carries the admin capability
pub trait AdminCapability {
    fn is_admin(&self, session: &Session) -> bool;

    /// Pre-check on a typed sign-in email, before any credential is verified
    fn admits_email(&self, email: &str) -> bool;
}

/// Single configured admin email, compared exactly (case-sensitive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAllowlist {
    admin_email: String,
}

impl EmailAllowlist {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }
}

impl AdminCapability for EmailAllowlist {
    fn is_admin(&self, session: &Session) -> bool {
        self.admits_email(&session.email)
    }

    fn admits_email(&self, email: &str) -> bool {
        email == self.admin_email
    }
}

pub fn evaluate(state: &SessionState, policy: &dyn AdminCapability) -> GateDecision {
    match state {
        SessionState::Resolving => GateDecision::RenderLoading,
        SessionState::SignedOut => GateDecision::RedirectToLogin,
        SessionState::Active(session) if policy.is_admin(session) => GateDecision::RenderView,
        SessionState::Active(_) => GateDecision::RedirectToHome,
    }
}
