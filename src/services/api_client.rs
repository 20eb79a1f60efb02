use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use std::sync::Arc;
use crate::errors::{ApiError, ApiResult};
use crate::models::{
    Entity, EntityKind, LoginForm, OwnerLookup, Registration, SessionUser, SingleShape,
};
use super::login::parse_login_response;

/// Thin client for the REST API behind the dashboard.
///
/// Every call is one round trip: no retries, no caching, and no timeout
/// beyond what the transport does by default.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Sends the request and hands back the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("API answered {}: {}", status, body.trim());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub async fn list<E: Entity>(&self, token: Option<&str>) -> ApiResult<Vec<E>> {
        let path = format!("/{}/list", E::KIND.resource());
        let body = self.send(self.request(Method::GET, &path, token)).await?;
        decode_collection(&body)
    }

    pub async fn get<E: Entity>(&self, id: &str, token: Option<&str>) -> ApiResult<E> {
        let path = format!("/{}/get/{}", E::KIND.resource(), urlencoding::encode(id));
        let body = self.send(self.request(Method::GET, &path, token)).await?;

        match E::KIND.single_shape() {
            SingleShape::Bare => Ok(serde_json::from_str(&body)?),
            SingleShape::Wrapped(key) => {
                let mut envelope: Value = serde_json::from_str(&body)?;
                let inner = envelope
                    .get_mut(key)
                    .map(Value::take)
                    .filter(|v| !v.is_null())
                    .ok_or_else(|| {
                        ApiError::Malformed(format!("response has no `{}` field", key))
                    })?;
                Ok(serde_json::from_value(inner)?)
            }
        }
    }

    pub async fn list_by_owner<E: Entity>(
        &self,
        owner_id: &str,
        token: Option<&str>,
    ) -> ApiResult<Vec<E>> {
        let resource = E::KIND.resource();
        let owner = urlencoding::encode(owner_id);
        let path = match E::KIND.owner_lookup() {
            Some(OwnerLookup::PathSegment(segment)) => {
                format!("/{}/{}/{}", resource, segment, owner)
            }
            Some(OwnerLookup::ListQuery(param)) => {
                format!("/{}/list?{}={}", resource, param, owner)
            }
            None => {
                return Err(ApiError::Unsupported(format!(
                    "{} cannot be listed by owner",
                    resource
                )))
            }
        };
        let body = self.send(self.request(Method::GET, &path, token)).await?;
        decode_collection(&body)
    }

    pub async fn create(
        &self,
        kind: EntityKind,
        payload: &Map<String, Value>,
        token: Option<&str>,
    ) -> ApiResult<()> {
        let path = format!("/{}/create", kind.resource());
        self.send(self.request(Method::POST, &path, token).json(payload))
            .await
            .map(drop)
    }

    pub async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        payload: &Map<String, Value>,
        token: Option<&str>,
    ) -> ApiResult<()> {
        let path = format!("/{}/update/{}", kind.resource(), urlencoding::encode(id));
        self.send(self.request(Method::PUT, &path, token).json(payload))
            .await
            .map(drop)
    }

    pub async fn remove(&self, kind: EntityKind, id: &str, token: Option<&str>) -> ApiResult<()> {
        let path = format!("/{}/remove/{}", kind.resource(), urlencoding::encode(id));
        self.send(self.request(Method::DELETE, &path, token))
            .await
            .map(drop)
    }

    pub async fn login(&self, form: &LoginForm) -> ApiResult<SessionUser> {
        let body = self
            .send(self.request(Method::POST, "/auth/login", None).json(form))
            .await?;
        parse_login_response(&body, &form.username)
    }

    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        self.send(self.request(Method::POST, "/auth/register", None).json(registration))
            .await
            .map(drop)
    }
}

// Go services encode an empty slice as `null`.
fn decode_collection<E: Entity>(body: &str) -> ApiResult<Vec<E>> {
    let records: Option<Vec<E>> = serde_json::from_str(body)?;
    Ok(records.unwrap_or_default())
}
