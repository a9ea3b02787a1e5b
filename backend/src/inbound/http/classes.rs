//! Class offering handlers.
//!
//! ```text
//! GET    /classes
//! GET    /classes/{id}
//! POST   /classes                       (instructor)
//! GET    /classes/instructor/{email}    (instructor + self)
//! PUT    /classes/{id}                  (instructor, full field replace)
//! PATCH  /classes/{id}                  (admin, status/feedback only)
//! DELETE /classes/{id}                  (admin)
//! ```

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    ClassFields, ClassId, ClassOffering, ClassStatus, DomainError, EmailAddress, Price, Role,
};
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Instructor-supplied offering fields, used for create and full replace.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub name: String,
    pub instructor: String,
    pub instructor_email: String,
    pub total_seats: u32,
    pub available_seats: u32,
    pub price: f64,
    pub image: String,
}

impl TryFrom<ClassPayload> for ClassFields {
    type Error = DomainError;

    fn try_from(value: ClassPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            instructor: value.instructor,
            instructor_email: EmailAddress::parse(value.instructor_email)
                .map_err(|err| DomainError::invalid_request(err.to_string()))?,
            total_seats: value.total_seats,
            available_seats: value.available_seats,
            price: Price::new(value.price)
                .map_err(|err| DomainError::invalid_request(err.to_string()))?,
            image: value.image,
        })
    }
}

/// Admin moderation payload: status and optional feedback only.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ModerationPayload {
    pub status: ClassStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// List every class offering. Public.
#[utoipa::path(
    get,
    path = "/classes",
    responses((status = 200, description = "All offerings")),
    tags = ["classes"],
    operation_id = "listClasses",
    security([])
)]
#[get("/classes")]
pub async fn list_classes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ClassOffering>>> {
    let classes = state
        .classes
        .list()
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?;
    Ok(web::Json(classes))
}

/// Fetch a single offering. Public.
#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "The offering"),
        (status = 404, description = "Unknown class"),
    ),
    tags = ["classes"],
    operation_id = "getClass",
    security([])
)]
#[get("/classes/{id}")]
pub async fn get_class(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ClassOffering>> {
    let id = ClassId::from(path.into_inner());
    let offering = state
        .classes
        .find(&id)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?
        .ok_or_else(|| DomainError::not_found("class not found"))?;
    Ok(web::Json(offering))
}

/// Create a class offering. Instructor only; starts pending moderation.
#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassPayload,
    responses(
        (status = 201, description = "Created offering"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an instructor"),
    ),
    tags = ["classes"],
    operation_id = "createClass"
)]
#[post("/classes")]
pub async fn create_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<ClassPayload>,
) -> ApiResult<HttpResponse> {
    state.require_role(&identity, &[Role::Instructor]).await?;
    let fields = ClassFields::try_from(payload.into_inner())?;
    let offering = state
        .classes
        .insert(ClassOffering::create(fields))
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?;
    Ok(HttpResponse::Created().json(offering))
}

/// List an instructor's own offerings. Instructor role plus ownership of the
/// path e-mail, so one instructor cannot enumerate another's classes.
#[utoipa::path(
    get,
    path = "/classes/instructor/{email}",
    params(("email" = String, Path, description = "Instructor e-mail address")),
    responses(
        (status = 200, description = "The instructor's offerings"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Not an instructor, or not the caller's e-mail"),
    ),
    tags = ["classes"],
    operation_id = "listInstructorClasses"
)]
#[get("/classes/instructor/{email}")]
pub async fn instructor_classes(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ClassOffering>>> {
    let target = EmailAddress::parse(path.into_inner())
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    state.require_role(&identity, &[Role::Instructor]).await?;
    state.require_self(&identity, &target).await?;
    let classes = state
        .classes
        .list_by_instructor(&target)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?;
    Ok(web::Json(classes))
}

/// Full field replace by an instructor. Status and feedback are untouched.
#[utoipa::path(
    put,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class identifier")),
    request_body = ClassPayload,
    responses(
        (status = 200, description = "Updated offering"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an instructor"),
        (status = 404, description = "Unknown class"),
    ),
    tags = ["classes"],
    operation_id = "replaceClass"
)]
#[put("/classes/{id}")]
pub async fn replace_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<Uuid>,
    payload: web::Json<ClassPayload>,
) -> ApiResult<web::Json<ClassOffering>> {
    state.require_role(&identity, &[Role::Instructor]).await?;
    let id = ClassId::from(path.into_inner());
    let fields = ClassFields::try_from(payload.into_inner())?;
    let offering = state
        .classes
        .replace_fields(&id, fields)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?
        .ok_or_else(|| DomainError::not_found("class not found"))?;
    Ok(web::Json(offering))
}

/// Admin moderation: set status and optional feedback.
#[utoipa::path(
    patch,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class identifier")),
    request_body = ModerationPayload,
    responses(
        (status = 200, description = "Moderated offering"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown class"),
    ),
    tags = ["classes"],
    operation_id = "moderateClass"
)]
#[patch("/classes/{id}")]
pub async fn moderate_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<Uuid>,
    payload: web::Json<ModerationPayload>,
) -> ApiResult<web::Json<ClassOffering>> {
    state.require_role(&identity, &[Role::Admin]).await?;
    let id = ClassId::from(path.into_inner());
    let body = payload.into_inner();
    let offering = state
        .classes
        .moderate(&id, body.status, body.feedback)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?
        .ok_or_else(|| DomainError::not_found("class not found"))?;
    Ok(web::Json(offering))
}

/// Delete an offering. Admin only.
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Deletion acknowledgment"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown class"),
    ),
    tags = ["classes"],
    operation_id = "deleteClass"
)]
#[delete("/classes/{id}")]
pub async fn delete_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.require_role(&identity, &[Role::Admin]).await?;
    let id = ClassId::from(path.into_inner());
    let deleted = state
        .classes
        .delete(&id)
        .await
        .map_err(|err| DomainError::internal(err.to_string()))?;
    if deleted {
        Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
    } else {
        Err(DomainError::not_found("class not found").into())
    }
}
