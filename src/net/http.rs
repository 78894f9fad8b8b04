//! Production backend speaking the hosted service's REST surface.
//!
//! Browser builds (`csr`): real HTTP via `gloo-net`, auth endpoints under
//! `/auth/v1` and the `profiles` collection under `/rest/v1`, with the
//! session persisted in `localStorage` so reloads keep it. Native builds:
//! deterministic stubs so unit tests run without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `ApiError::Network`, non-success statuses to
//! `ApiError::Rejected` with the service's own message, body mismatches to
//! `ApiError::Decode`. Callers decide what to show and never retry here.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;

use super::backend::Backend;
use super::error::ApiError;
use super::types::{Profile, ProfileChanges, Session, SignUpOutcome};

/// `localStorage` key for the persisted session.
#[cfg(feature = "csr")]
const SESSION_STORAGE_KEY: &str = "roster.session";

/// Fallback session lifetime when the service reports no expiry.
#[cfg(feature = "csr")]
const DEFAULT_SESSION_SECS: i64 = 3600;

#[cfg(any(test, feature = "csr"))]
fn password_grant_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/token?grant_type=password")
}

#[cfg(any(test, feature = "csr"))]
fn sign_up_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/signup")
}

#[cfg(any(test, feature = "csr"))]
fn sign_out_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/logout")
}

/// List endpoint: creation order is the service's insertion order.
#[cfg(any(test, feature = "csr"))]
fn profiles_ordered_endpoint(base: &str) -> String {
    format!("{base}/rest/v1/profiles?select=*&order=created_at.asc")
}

/// Single-record read endpoint.
#[cfg(any(test, feature = "csr"))]
fn profile_record_endpoint(base: &str, id: Uuid) -> String {
    format!("{base}/rest/v1/profiles?id=eq.{id}&select=*")
}

/// Mutation endpoint (update/delete) for one row.
#[cfg(any(test, feature = "csr"))]
fn profile_by_id_endpoint(base: &str, id: Uuid) -> String {
    format!("{base}/rest/v1/profiles?id=eq.{id}")
}

/// Extract a human-readable message from an error response body.
///
/// The auth endpoints use `error_description` or `msg`, the record store
/// uses `message`; fall back to the status code when neither parses.
#[cfg(any(test, feature = "csr"))]
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_owned))
        })
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

/// Hosted-service client. One instance is shared by the whole app.
pub struct HttpBackend {
    config: Config,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[cfg(feature = "csr")]
mod browser {
    //! Browser-only plumbing: wall clock and session persistence.

    use super::{SESSION_STORAGE_KEY, Session};

    pub fn now_secs() -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn load_session() -> Option<Session> {
        let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    pub fn store_session(session: &Session) {
        if let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(session)) {
            let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
        }
    }

    pub fn clear_session() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct AuthUserDto {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUserDto,
}

#[cfg(feature = "csr")]
impl TokenResponse {
    fn into_session(self, now_secs: i64, fallback_email: &str) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs + secs))
            .unwrap_or(now_secs + DEFAULT_SESSION_SECS);
        Session {
            access_token: self.access_token,
            user_id: self.user.id,
            email: self.user.email.unwrap_or_else(|| fallback_email.to_owned()),
            expires_at,
        }
    }
}

/// Sign-up answers come in two shapes: a full token grant when email
/// confirmation is disabled, or a bare user record when it is pending.
#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<AuthUserDto>,
}

#[cfg(feature = "csr")]
async fn rejection(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ApiError::Rejected {
        status,
        message: error_message(status, &body),
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        #[cfg(feature = "csr")]
        {
            match browser::load_session() {
                Some(session) if session.is_expired(browser::now_secs()) => {
                    browser::clear_session();
                    Ok(None)
                }
                other => Ok(other),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(None)
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&password_grant_endpoint(
                &self.config.backend_url,
            ))
            .header("apikey", &self.config.anon_key)
            .json(&payload)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            let token: TokenResponse = resp
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            let session = token.into_session(browser::now_secs(), email);
            browser::store_session(&session);
            Ok(session)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp =
                gloo_net::http::Request::post(&sign_up_endpoint(&self.config.backend_url))
                    .header("apikey", &self.config.anon_key)
                    .json(&payload)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            let body: SignUpResponse = resp
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            let session = match (body.access_token, body.user) {
                (Some(access_token), Some(user)) => {
                    let token = TokenResponse {
                        access_token,
                        expires_in: body.expires_in,
                        expires_at: body.expires_at,
                        user,
                    };
                    let session = token.into_session(browser::now_secs(), email);
                    browser::store_session(&session);
                    Some(session)
                }
                // Confirmation pending: no session yet.
                _ => None,
            };
            Ok(SignUpOutcome { session })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            if let Some(session) = browser::load_session() {
                let result =
                    gloo_net::http::Request::post(&sign_out_endpoint(&self.config.backend_url))
                        .header("apikey", &self.config.anon_key)
                        .header(
                            "Authorization",
                            &format!("Bearer {}", session.access_token),
                        )
                        .send()
                        .await;
                if let Err(e) = result {
                    // Local sign-out proceeds regardless; the token will
                    // lapse on its own.
                    log::warn!("remote sign-out failed: {e}");
                }
            }
            browser::clear_session();
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }

    async fn fetch_profile(&self, id: Uuid) -> Result<Profile, ApiError> {
        #[cfg(feature = "csr")]
        {
            let session = browser::load_session().ok_or(ApiError::NotSignedIn)?;
            let resp = gloo_net::http::Request::get(&profile_record_endpoint(
                &self.config.backend_url,
                id,
            ))
            .header("apikey", &self.config.anon_key)
            .header(
                "Authorization",
                &format!("Bearer {}", session.access_token),
            )
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    async fn fetch_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let session = browser::load_session().ok_or(ApiError::NotSignedIn)?;
            let resp = gloo_net::http::Request::get(&profiles_ordered_endpoint(
                &self.config.backend_url,
            ))
            .header("apikey", &self.config.anon_key)
            .header(
                "Authorization",
                &format!("Bearer {}", session.access_token),
            )
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let session = browser::load_session().ok_or(ApiError::NotSignedIn)?;
            let resp = gloo_net::http::Request::patch(&profile_by_id_endpoint(
                &self.config.backend_url,
                id,
            ))
            .header("apikey", &self.config.anon_key)
            .header(
                "Authorization",
                &format!("Bearer {}", session.access_token),
            )
            .header("Prefer", "return=minimal")
            .json(changes)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, changes);
            Err(ApiError::Unavailable)
        }
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let session = browser::load_session().ok_or(ApiError::NotSignedIn)?;
            let resp = gloo_net::http::Request::delete(&profile_by_id_endpoint(
                &self.config.backend_url,
                id,
            ))
            .header("apikey", &self.config.anon_key)
            .header(
                "Authorization",
                &format!("Bearer {}", session.access_token),
            )
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(rejection(resp).await);
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }
}
