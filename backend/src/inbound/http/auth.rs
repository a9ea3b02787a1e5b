//! Bearer identity verification for protected endpoints.
//!
//! [`BearerIdentity`] is an extractor: declaring it as a handler argument is
//! what makes an endpoint protected. It parses the `Authorization` header,
//! hands the raw token to the [`crate::domain::ports::TokenCodec`] port, and
//! yields the verified [`Identity`]. Missing header, malformed scheme, bad
//! signature, and expiry all collapse into the same 401 so the response
//! cannot be used as an oracle.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::domain::{DomainError, Identity};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Verified caller identity, extracted from the bearer credential.
#[derive(Debug, Clone)]
pub struct BearerIdentity(Identity);

impl BearerIdentity {
    /// Unwrap into the domain identity.
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl Deref for BearerIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn verify(req: &HttpRequest) -> Result<BearerIdentity, ApiError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| ApiError::from(DomainError::internal("http state not configured")))?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::from(DomainError::unauthorized()))?;

    let identity = state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::from(DomainError::unauthorized()))?;
    Ok(BearerIdentity(identity))
}

impl FromRequest for BearerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify(req))
    }
}
