use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{clear_session, store_session, LoginForm, RegisterForm};
use crate::services::ApiClient;
use crate::views::{fill_template, load_template, message_banner};

#[derive(Debug, Deserialize)]
pub struct AuthPageQuery {
    error: Option<String>,
    message: Option<String>,
}

impl AuthPageQuery {
    fn banner(&self) -> String {
        message_banner(self.error.as_deref().or(self.message.as_deref()))
    }
}

pub async fn serve_login_page(Query(query): Query<AuthPageQuery>) -> AppResult<Response> {
    tracing::info!("Serving login page");
    let html = fill_template(&load_template("login.html")?, &[("error", query.banner().as_str())]);
    Ok(Html(html).into_response())
}

pub async fn serve_sign_up_page(Query(query): Query<AuthPageQuery>) -> AppResult<Response> {
    tracing::info!("Serving sign-up page");
    let html = fill_template(&load_template("sign_up.html")?, &[("error", query.banner().as_str())]);
    Ok(Html(html).into_response())
}

pub async fn serve_access_denied() -> AppResult<Response> {
    Ok(Html(load_template("access_denied.html")?).into_response())
}

pub async fn handle_login(
    State((api, config)): State<(ApiClient, Config)>,
    jar: CookieJar,
    Form(login_form): Form<LoginForm>,
) -> Response {
    tracing::info!("Login attempt for user: {}", login_form.username);

    match api.login(&login_form).await {
        Ok(user) => {
            tracing::info!(
                "User {} logged in with role {:?}",
                login_form.username,
                user.role
            );
            let jar = store_session(jar, &user, &config.session);
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) if e.status() == Some(401) => {
            tracing::info!("Rejected credentials for user: {}", login_form.username);
            Redirect::to("/?error=Invalid%20username%20or%20password").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed for {}: {}", login_form.username, e);
            Redirect::to("/?error=Login%20failed").into_response()
        }
    }
}

pub async fn handle_register(
    State((api, _)): State<(ApiClient, Config)>,
    Form(register_form): Form<RegisterForm>,
) -> Response {
    let registration = match register_form.into_registration() {
        Ok(registration) => registration,
        Err(e) => {
            tracing::warn!("Registration rejected: {}", e);
            return Redirect::to("/sign-up?error=Passwords%20don't%20match").into_response();
        }
    };

    if let Err(e) = api.register(&registration).await {
        tracing::error!("Failed to register {}: {}", registration.username, e);
        return Redirect::to("/sign-up?error=Registration%20failed").into_response();
    }

    tracing::info!("Registered {} as {}", registration.username, registration.role);
    Redirect::to("/?message=Registration%20successful!%20Please%20login").into_response()
}

pub async fn handle_logout(jar: CookieJar) -> Response {
    tracing::info!("Logging out");
    (clear_session(jar), Redirect::to("/")).into_response()
}
