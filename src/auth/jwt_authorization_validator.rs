use super::{dto::JwtClaims, User};
use anyhow::anyhow;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderValue, Request, Response, StatusCode},
};
use bson::oid::ObjectId;
use jsonwebtoken::{DecodingKey, Validation};
use std::sync::Arc;
use tower_http::validate_request::ValidateRequest;

///
/// Middleware that validates JWT in Authorization header.
/// If Authorization is correct [User] is added to request extensions.
///
#[derive(Clone)]
pub struct JwtAuthorizationValidator {
    inner: Arc<JwtAuthorizationValidatorInner>,
}

struct JwtAuthorizationValidatorInner {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthorizationValidator {
    pub fn new(key: DecodingKey) -> Self {
        let validation = Validation::default();

        let inner = JwtAuthorizationValidatorInner { key, validation };

        Self {
            inner: Arc::new(inner),
        }
    }

    fn try_parse_authorization_header(
        &self,
        authorization_header: Option<&HeaderValue>,
    ) -> anyhow::Result<User> {
        let Some(authorization_header) = authorization_header else {
            return Err(anyhow!("missing Authorization header"));
        };
        let Ok(authorization_value) = authorization_header.to_str() else {
            return Err(anyhow!("illegal character in Authorization header"));
        };
        if !authorization_value.starts_with("Bearer") {
            return Err(anyhow!("unsupported authorization type"));
        }
        let Some(token) = authorization_value.get("Bearer ".len()..) else {
            return Err(anyhow!("invalid jwt"));
        };
        let token_data =
            jsonwebtoken::decode::<JwtClaims>(token, &self.inner.key, &self.inner.validation)?;

        let id = ObjectId::parse_str(&token_data.claims.sub)
            .map_err(|err| anyhow!("invalid jwt sub: {err}"))?;

        Ok(User::new(id, token_data.claims.role))
    }
}

impl<B> ValidateRequest<B> for JwtAuthorizationValidator {
    type ResponseBody = Body;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        let authorization_header = request.headers().get(AUTHORIZATION);

        let user = self
            .try_parse_authorization_header(authorization_header)
            .map_err(|err| {
                tracing::warn!(%err, "auth error");
                Response::builder()
                    .status(StatusCode::UNAUTHORIZED)
                    .body(Body::empty())
                    .unwrap()
            })?;

        request.extensions_mut().insert(user);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::{dto::User, Role};
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, HeaderValue, Method, Request, StatusCode},
        routing::get,
        Extension, Router,
    };
    use jsonwebtoken::{EncodingKey, Header};
    use time::{Duration, OffsetDateTime};
    use tower::ServiceExt;
    use tower_http::validate_request::ValidateRequestHeaderLayer;

    const SECRET: &[u8] = b"some secret";

    fn encode_jwt(secret: &[u8], sub: &str, role: &str, exp: OffsetDateTime) -> String {
        let claims = JwtClaims {
            sub: sub.to_string(),
            exp: exp.unix_timestamp(),
            role: role.to_string(),
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_authorization_header() {
        test_invalid_authorization_header(None).await;
    }

    #[tokio::test]
    async fn invalid_authorization_header() {
        test_invalid_authorization_header("invalid characters ąćś").await;
    }

    #[tokio::test]
    async fn authorization_type_not_bearer() {
        test_invalid_authorization_header("NotBearer").await;
    }

    #[tokio::test]
    async fn invalid_token() {
        test_invalid_authorization_header("Bearer that's not correct JWT").await;
    }

    #[tokio::test]
    async fn expired_token() {
        let token = encode_jwt(
            SECRET,
            &ObjectId::new().to_hex(),
            Role::User.as_ref(),
            OffsetDateTime::now_utc() - Duration::hours(1),
        );
        let authorization = format!("Bearer {token}");
        test_invalid_authorization_header(authorization.as_str()).await;
    }

    #[tokio::test]
    async fn invalid_signature() {
        let token = encode_jwt(
            b"wrong key",
            &ObjectId::new().to_hex(),
            Role::User.as_ref(),
            OffsetDateTime::now_utc() + Duration::hours(1),
        );
        let authorization = format!("Bearer {token}");
        test_invalid_authorization_header(authorization.as_str()).await;
    }

    #[tokio::test]
    async fn sub_not_object_id() {
        let token = encode_jwt(
            SECRET,
            "definitely not an object id",
            Role::User.as_ref(),
            OffsetDateTime::now_utc() + Duration::hours(1),
        );
        let authorization = format!("Bearer {token}");
        test_invalid_authorization_header(authorization.as_str()).await;
    }

    #[tokio::test]
    async fn correct_request_extension() {
        let user_id = ObjectId::new();
        let token = encode_jwt(
            SECRET,
            &user_id.to_hex(),
            Role::Admin.as_ref(),
            OffsetDateTime::now_utc() + Duration::hours(1),
        );
        let key = DecodingKey::from_secret(SECRET);

        let router = Router::new()
            .route(
                "/",
                get(move |Extension(user): Extension<User>| async move {
                    if user.id != user_id {
                        return StatusCode::INTERNAL_SERVER_ERROR;
                    }
                    if user.role != Role::Admin.as_ref() {
                        return StatusCode::INTERNAL_SERVER_ERROR;
                    }

                    StatusCode::OK
                }),
            )
            .route_layer(ValidateRequestHeaderLayer::custom(
                JwtAuthorizationValidator::new(key),
            ));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK)
    }

    async fn test_invalid_authorization_header(authorization: impl Into<Option<&str>>) {
        let key = DecodingKey::from_secret(SECRET);

        let router = Router::new()
            .route("/", get(|| async { StatusCode::OK }))
            .route_layer(ValidateRequestHeaderLayer::custom(
                JwtAuthorizationValidator::new(key),
            ));

        let mut request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        if let Some(authorization) = authorization.into() {
            request
                .headers_mut()
                .insert(AUTHORIZATION, HeaderValue::try_from(authorization).unwrap());
        }

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
