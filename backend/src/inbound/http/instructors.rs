//! Instructor profile handlers.
//!
//! ```text
//! GET /instructors
//! GET /instructors/{id}
//! ```
//!
//! Both reads are public: profiles are catalogue content, separate from the
//! instructor's user record.

use actix_web::{get, web};
use uuid::Uuid;

use crate::domain::{DomainError, InstructorId, InstructorProfile};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every instructor profile. Public.
#[utoipa::path(
    get,
    path = "/instructors",
    responses((status = 200, description = "All instructor profiles")),
    tags = ["instructors"],
    operation_id = "listInstructors",
    security([])
)]
#[get("/instructors")]
pub async fn list_instructors(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<InstructorProfile>>> {
    let profiles = state
        .instructors
        .list()
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?;
    Ok(web::Json(profiles))
}

/// Fetch a single instructor profile. Public.
#[utoipa::path(
    get,
    path = "/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor profile identifier")),
    responses(
        (status = 200, description = "The profile"),
        (status = 404, description = "Unknown instructor"),
    ),
    tags = ["instructors"],
    operation_id = "getInstructor",
    security([])
)]
#[get("/instructors/{id}")]
pub async fn get_instructor(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<InstructorProfile>> {
    let id = InstructorId::from(path.into_inner());
    let profile = state
        .instructors
        .find(&id)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?
        .ok_or_else(|| DomainError::not_found("instructor not found"))?;
    Ok(web::Json(profile))
}
