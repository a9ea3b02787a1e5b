//! Cart handlers.
//!
//! ```text
//! GET    /cart/{email}   (self)
//! POST   /cart           (idempotent add, ungated)
//! DELETE /cart/{id}      (owner of the referenced item)
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::CartInsertOutcome;
use crate::domain::{CartItem, CartItemId, ClassId, DomainError, EmailAddress};
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /cart`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartAddRequest {
    pub class_id: Uuid,
    pub email: String,
}

/// List the caller's cart. Ownership-gated against the path e-mail.
#[utoipa::path(
    get,
    path = "/cart/{email}",
    params(("email" = String, Path, description = "Cart owner e-mail")),
    responses(
        (status = 200, description = "The owner's cart items"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Not the caller's cart"),
    ),
    tags = ["cart"],
    operation_id = "listCart"
)]
#[get("/cart/{email}")]
pub async fn list_cart(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CartItem>>> {
    let owner = EmailAddress::parse(path.into_inner())
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    state.require_self(&identity, &owner).await?;
    Ok(web::Json(state.cart.list_for(&owner).await?))
}

/// Add an enrollment intent. Duplicate `(class, student)` pairs return a
/// soft "already exists" success so clients can retry freely.
#[utoipa::path(
    post,
    path = "/cart",
    request_body = CartAddRequest,
    responses(
        (status = 201, description = "Stored cart item"),
        (status = 200, description = "Already in the cart"),
        (status = 400, description = "Malformed payload"),
    ),
    tags = ["cart"],
    operation_id = "addToCart",
    security([])
)]
#[post("/cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    payload: web::Json<CartAddRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let email = EmailAddress::parse(body.email)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    match state.cart.add(ClassId::from(body.class_id), email).await? {
        CartInsertOutcome::Added(item) => Ok(HttpResponse::Created().json(item)),
        CartInsertOutcome::AlreadyPresent(_) => {
            Ok(HttpResponse::Ok().json(json!({ "message": "already exists" })))
        }
    }
}

/// Remove a cart item. The item is resolved first so ownership is checked
/// against the stored record, not the caller's claim.
#[utoipa::path(
    delete,
    path = "/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart item identifier")),
    responses(
        (status = 200, description = "Deletion acknowledgment"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Not the item's owner"),
        (status = 404, description = "Unknown cart item"),
    ),
    tags = ["cart"],
    operation_id = "removeFromCart"
)]
#[delete("/cart/{id}")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = CartItemId::from(path.into_inner());
    state.cart.remove(&id, &identity).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}
