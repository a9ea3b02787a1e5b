//! Credential issuance endpoint.
//!
//! ```text
//! POST /identity-token {"email":"student@x.com"}
//! ```
//!
//! Issues a signed bearer credential from the supplied claims. Deliberately
//! ungated, mirroring a front-channel login flow where the identity provider
//! sits elsewhere; the credential asserts identity only, never role.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EmailAddress, Identity};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /identity-token`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

/// Response payload carrying the signed credential.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a bearer credential for the supplied claims.
#[utoipa::path(
    post,
    path = "/identity-token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed credential", body = TokenResponse),
        (status = 400, description = "Malformed email"),
    ),
    tags = ["auth"],
    operation_id = "issueIdentityToken",
    security([])
)]
#[post("/identity-token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let email = EmailAddress::parse(&payload.email)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let token = state
        .tokens
        .issue(&Identity::new(email))
        .map_err(|err| DomainError::internal(err.to_string()))?;
    Ok(web::Json(TokenResponse { token }))
}
