use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use crate::config::{Config, GuardConfig};
use crate::models::Session;
use crate::services::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToAccessDenied,
}

/// Which paths need a session, and which of those need an admin.
#[derive(Debug, Clone)]
pub struct GuardPolicy {
    protected_root: String,
    admin_prefixes: Vec<String>,
}

impl From<&GuardConfig> for GuardPolicy {
    fn from(config: &GuardConfig) -> Self {
        Self {
            protected_root: config.protected_root.clone(),
            admin_prefixes: config.admin_prefixes.clone(),
        }
    }
}

impl GuardPolicy {
    pub fn evaluate(&self, path: &str, session: &Session) -> GuardDecision {
        if path.starts_with(&self.protected_root) && session.token().is_none() {
            return GuardDecision::RedirectToLogin;
        }
        let admin_only = self
            .admin_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()));
        if admin_only && !session.is_admin() {
            return GuardDecision::RedirectToAccessDenied;
        }
        GuardDecision::Allow
    }
}

/// Builds the request's `Session` from its cookies, applies the guard policy
/// and hands the session to handlers as an extension.
pub async fn route_guard(
    State((_, config)): State<(ApiClient, Config)>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let session = Session::from_jar(&jar);
    let path = req.uri().path().to_string();
    let decision = GuardPolicy::from(&config.guard).evaluate(&path, &session);
    tracing::debug!("Guard decision for {}: {:?}", path, decision);

    match decision {
        GuardDecision::Allow => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        GuardDecision::RedirectToLogin => {
            tracing::info!("No session for {}, redirecting to login", path);
            Redirect::to(&config.guard.login_path).into_response()
        }
        GuardDecision::RedirectToAccessDenied => {
            tracing::info!(
                "User {} is not allowed on {}",
                session.display_name(),
                path
            );
            Redirect::to(&config.guard.access_denied_path).into_response()
        }
    }
}
