//! Token authentication for HTTP handlers.
//!
//! Callers identify themselves with `Authorization: Token <key>`. The key is
//! resolved through [`AccessTokenRepository`]. A request without the header
//! is served as an anonymous viewer; a malformed header or an unknown key is
//! rejected with `401` before the handler runs.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::AccessTokenRepositoryError;
use crate::domain::{Error, UserId};

use super::state::HttpState;

const TOKEN_SCHEME: &str = "Token";
const FINGERPRINT_BYTES: usize = 4;

/// Identity of the caller, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext(Option<UserId>);

impl AuthContext {
    /// Context for a caller who sent no credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Context for an authenticated caller.
    #[must_use]
    pub const fn authenticated(user: UserId) -> Self {
        Self(Some(user))
    }

    /// The caller, or `None` for anonymous viewers.
    #[must_use]
    pub const fn viewer(&self) -> Option<UserId> {
        self.0
    }

    /// Require an authenticated caller or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.0.ok_or_else(|| {
            Error::unauthorized("authentication credentials were not provided")
        })
    }
}

/// Short, non-reversible label for a token so rejected keys can be
/// correlated in logs without recording them.
pub(crate) fn token_fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}

/// Extract the token key from the `Authorization` header.
///
/// Returns `Ok(None)` when the header is absent.
pub(crate) fn token_from_headers(headers: &HeaderMap) -> Result<Option<String>, Error> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let malformed = || Error::unauthorized("invalid authorization header");
    let raw = value.to_str().map_err(|_| malformed())?;
    let (scheme, key) = raw.trim().split_once(' ').ok_or_else(malformed)?;
    let key = key.trim();
    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) || key.is_empty() || key.contains(' ') {
        return Err(malformed());
    }
    Ok(Some(key.to_owned()))
}

fn map_token_error(error: AccessTokenRepositoryError) -> Error {
    match error {
        AccessTokenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("token store unavailable: {message}"))
        }
        AccessTokenRepositoryError::Query { message } => {
            Error::internal(format!("token lookup failed: {message}"))
        }
    }
}

async fn authenticate(req: &HttpRequest) -> Result<AuthContext, Error> {
    let Some(key) = token_from_headers(req.headers())? else {
        return Ok(AuthContext::anonymous());
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    match state.access_tokens.resolve(&key).await.map_err(map_token_error)? {
        Some(user) => Ok(AuthContext::authenticated(user)),
        None => {
            debug!(fingerprint = %token_fingerprint(&key), "unknown access token");
            Err(Error::unauthorized("invalid token"))
        }
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value"),
        );
        headers
    }

    #[rstest]
    fn missing_header_is_anonymous() {
        assert_eq!(token_from_headers(&HeaderMap::new()), Ok(None));
    }

    #[rstest]
    #[case("Token abc123", "abc123")]
    #[case("token   abc123 ", "abc123")]
    fn token_scheme_is_case_insensitive(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(
            token_from_headers(&headers_with(header)),
            Ok(Some(expected.to_owned()))
        );
    }

    #[rstest]
    #[case("Bearer abc123")]
    #[case("Token")]
    #[case("Token a b")]
    #[case("abc123")]
    fn malformed_headers_are_unauthorized(#[case] header: &str) {
        let err = token_from_headers(&headers_with(header)).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn fingerprints_are_short_and_stable() {
        let first = token_fingerprint("secret-key");
        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(first, token_fingerprint("secret-key"));
        assert_ne!(first, token_fingerprint("other-key"));
    }

    async fn whoami(auth: AuthContext) -> HttpResponse {
        match auth.viewer() {
            Some(user) => HttpResponse::Ok().body(user.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn resolves_tokens_through_the_state() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::fixtures()))
                .route("/", web::get().to(whoami)),
        )
        .await;
        let user = UserId::random();

        let anonymous = actix_test::call_and_read_body(&app, actix_test::TestRequest::get().to_request()).await;
        assert_eq!(anonymous, "anonymous");

        let known = actix_test::call_and_read_body(
            &app,
            actix_test::TestRequest::get()
                .insert_header((AUTHORIZATION, format!("Token {user}")))
                .to_request(),
        )
        .await;
        assert_eq!(known, user.to_string());

        let unknown = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .insert_header((AUTHORIZATION, "Token not-a-user"))
                .to_request(),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn anonymous_callers_cannot_act() {
        let err = AuthContext::anonymous()
            .require_user_id()
            .expect_err("anonymous");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
