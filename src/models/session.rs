use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use crate::config::SessionConfig;

pub const TOKEN_COOKIE: &str = "token";
pub const USER_ID_COOKIE: &str = "savedUserId";
pub const USER_NAME_COOKIE: &str = "savedUserName";
pub const ROLE_COOKIE: &str = "savedUserRole";

const SESSION_COOKIES: [&str; 4] = [TOKEN_COOKIE, USER_ID_COOKIE, USER_NAME_COOKIE, ROLE_COOKIE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Regular,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "regular" => Some(Role::Regular),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Regular => "regular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub token: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub role: Option<Role>,
}

/// Who is making the request. Built once per request from the cookie jar
/// and handed to handlers through request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Session {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let value = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        match value(TOKEN_COOKIE) {
            Some(token) => Session::Authenticated(SessionUser {
                token,
                user_id: value(USER_ID_COOKIE),
                user_name: value(USER_NAME_COOKIE),
                role: value(ROLE_COOKIE).as_deref().and_then(Role::parse),
            }),
            None => Session::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.user().map(|u| u.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.user().and_then(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn display_name(&self) -> &str {
        self.user()
            .and_then(|u| u.user_name.as_deref())
            .unwrap_or("guest")
    }
}

/// Adds the four session cookies written after a successful login.
pub fn store_session(jar: CookieJar, user: &SessionUser, config: &SessionConfig) -> CookieJar {
    let role = user.role.map(|r| r.as_str().to_string()).unwrap_or_default();
    let pairs = [
        (TOKEN_COOKIE, user.token.clone()),
        (USER_ID_COOKIE, user.user_id.clone().unwrap_or_default()),
        (USER_NAME_COOKIE, user.user_name.clone().unwrap_or_default()),
        (ROLE_COOKIE, role),
    ];

    pairs.into_iter().fold(jar, |jar, (name, value)| {
        jar.add(
            Cookie::build((name, value))
                .path("/")
                .max_age(Duration::days(config.max_age_days))
                .same_site(SameSite::Lax)
                .secure(config.secure),
        )
    })
}

/// Expires every cookie the browser sent plus the session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut names: Vec<String> = jar.iter().map(|c| c.name().to_string()).collect();
    for name in SESSION_COOKIES {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
        .into_iter()
        .fold(jar, |jar, name| jar.remove(Cookie::build(name).path("/")))
}
