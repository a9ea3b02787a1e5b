//! User registration and role management handlers.
//!
//! ```text
//! POST  /users                  {"email":"a@x.com"}
//! GET   /users                  (admin)
//! GET   /users/{email}/role     (authenticated)
//! PATCH /users/{id}/role        (admin) {"role":"instructor"}
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::RegistrationOutcome;
use crate::domain::{DomainError, EmailAddress, Role, User, UserId};
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    /// Optional initial role; defaults to student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Soft-success payload returned for an already-registered e-mail.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AlreadyExistsResponse {
    pub message: String,
}

/// Request payload for `PATCH /users/{id}/role`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RoleChangeRequest {
    pub role: Role,
}

/// Role flags for the caller's own record.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RoleFlagsResponse {
    pub admin: bool,
    pub instructor: bool,
}

/// Register an e-mail address. Idempotent: re-registering returns a soft
/// "already exists" success and never overwrites the stored role.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 200, description = "Already registered", body = AlreadyExistsResponse),
        (status = 400, description = "Malformed email"),
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let email = EmailAddress::parse(&payload.email)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    match state.directory.register(email, payload.role).await? {
        RegistrationOutcome::Created(user) => Ok(HttpResponse::Created().json(user)),
        RegistrationOutcome::AlreadyRegistered(_) => {
            Ok(HttpResponse::Ok().json(AlreadyExistsResponse {
                message: "already exists".to_owned(),
            }))
        }
    }
}

/// List registered users. Admin only.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
) -> ApiResult<web::Json<Vec<User>>> {
    state.require_role(&identity, &[Role::Admin]).await?;
    Ok(web::Json(state.directory.list().await?))
}

/// Report role flags for an e-mail address.
///
/// A caller asking about anyone but themselves receives all-false flags
/// rather than an error, so the endpoint stays usable for cheap UI checks
/// without leaking other users' roles.
#[utoipa::path(
    get,
    path = "/users/{email}/role",
    params(("email" = String, Path, description = "Target e-mail address")),
    responses(
        (status = 200, description = "Role flags", body = RoleFlagsResponse),
        (status = 401, description = "Missing or invalid credential"),
    ),
    tags = ["users"],
    operation_id = "userRoleFlags"
)]
#[get("/users/{email}/role")]
pub async fn role_flags(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoleFlagsResponse>> {
    let target = EmailAddress::parse(path.into_inner())
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    if identity.email() != &target {
        return Ok(web::Json(RoleFlagsResponse {
            admin: false,
            instructor: false,
        }));
    }
    let role = state.directory.role_of(&target).await?;
    Ok(web::Json(RoleFlagsResponse {
        admin: role == Some(Role::Admin),
        instructor: role == Some(Role::Instructor),
    }))
}

/// Change a user's role. Admin only; takes effect on the target's next
/// gated request without credential reissuance.
#[utoipa::path(
    patch,
    path = "/users/{id}/role",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = RoleChangeRequest,
    responses(
        (status = 200, description = "Updated user"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown user"),
    ),
    tags = ["users"],
    operation_id = "changeUserRole"
)]
#[patch("/users/{id}/role")]
pub async fn change_role(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<Uuid>,
    payload: web::Json<RoleChangeRequest>,
) -> ApiResult<web::Json<User>> {
    state.require_role(&identity, &[Role::Admin]).await?;
    let id = UserId::from(path.into_inner());
    let user = state.directory.set_role(&id, payload.role).await?;
    Ok(web::Json(user))
}
